//! Set of cube faces, packed into one byte.

use crate::face_direction::FaceDirection;

/// The exposed faces of one cell. Bit `n` is the face whose
/// [`FaceDirection`] discriminant is `n`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FaceMask(u8);

impl FaceMask {
    pub const EMPTY: Self = Self(0);
    pub const FULL: Self = Self(0b11_1111);

    fn bit(dir: FaceDirection) -> u8 {
        1 << dir.index()
    }

    pub fn contains(self, dir: FaceDirection) -> bool {
        self.0 & Self::bit(dir) != 0
    }

    pub fn insert(&mut self, dir: FaceDirection) {
        self.0 |= Self::bit(dir);
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Faces in the set, in [`FaceDirection::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = FaceDirection> {
        FaceDirection::ALL
            .into_iter()
            .filter(move |&dir| self.contains(dir))
    }
}

impl FromIterator<FaceDirection> for FaceMask {
    fn from_iter<I: IntoIterator<Item = FaceDirection>>(iter: I) -> Self {
        let mut mask = Self::EMPTY;
        for dir in iter {
            mask.insert(dir);
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_is_every_direction() {
        assert_eq!(FaceMask::FULL, FaceDirection::ALL.into_iter().collect());
        assert_eq!(FaceMask::FULL.len(), 6);
        assert!(FaceMask::EMPTY.is_empty());
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut mask = FaceMask::EMPTY;
        mask.insert(FaceDirection::PosZ);
        mask.insert(FaceDirection::PosZ);
        assert_eq!(mask.len(), 1);
        assert!(mask.contains(FaceDirection::PosZ));
        assert!(!mask.contains(FaceDirection::NegZ));
    }

    #[test]
    fn test_iter_follows_direction_order() {
        let mask: FaceMask = [FaceDirection::NegZ, FaceDirection::PosY].into_iter().collect();
        assert_eq!(
            mask.iter().collect::<Vec<_>>(),
            vec![FaceDirection::PosY, FaceDirection::NegZ]
        );
    }
}
