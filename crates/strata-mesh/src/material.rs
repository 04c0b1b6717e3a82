//! Material groups: the three submeshes of every chunk mesh.

use strata_voxel::BlockType;

use crate::face_direction::FaceDirection;

/// Submesh a face is rendered with. The discriminant is the submesh index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MaterialGroup {
    Dirt = 0,
    Grass = 1,
    Stone = 2,
}

impl MaterialGroup {
    /// Number of groups, and of submeshes per chunk mesh.
    pub const COUNT: usize = 3;

    /// All groups in submesh order.
    pub const ALL: [MaterialGroup; Self::COUNT] = [Self::Dirt, Self::Grass, Self::Stone];

    /// Group for the face of a `kind` block pointing in `direction`.
    ///
    /// Only the top of a grass block is grass; its sides and bottom are dirt.
    /// Stone and both totem layers are stone. Everything else is dirt.
    pub fn for_face(kind: BlockType, direction: FaceDirection) -> Self {
        match kind {
            BlockType::Grass if direction == FaceDirection::PosY => Self::Grass,
            BlockType::Stone => Self::Stone,
            kind if kind.is_totem() => Self::Stone,
            _ => Self::Dirt,
        }
    }

    /// Submesh index (0–2).
    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grass_top_only() {
        for dir in FaceDirection::ALL {
            let expected = if dir == FaceDirection::PosY {
                MaterialGroup::Grass
            } else {
                MaterialGroup::Dirt
            };
            assert_eq!(MaterialGroup::for_face(BlockType::Grass, dir), expected, "{dir:?}");
        }
    }

    #[test]
    fn test_stone_and_totems_are_stone_on_every_face() {
        for kind in [BlockType::Stone, BlockType::TotemBase, BlockType::TotemTop] {
            for dir in FaceDirection::ALL {
                assert_eq!(MaterialGroup::for_face(kind, dir), MaterialGroup::Stone);
            }
        }
    }

    #[test]
    fn test_dirt_falls_through() {
        assert_eq!(
            MaterialGroup::for_face(BlockType::Dirt, FaceDirection::PosY),
            MaterialGroup::Dirt
        );
    }

    #[test]
    fn test_indices_match_submesh_order() {
        for (i, group) in MaterialGroup::ALL.into_iter().enumerate() {
            assert_eq!(group.index(), i);
        }
    }
}
