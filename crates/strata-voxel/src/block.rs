//! Block values stored in every voxel cell.
//!
//! A [`Block`] is a small `Copy` value: a [`BlockType`] plus one auxiliary data
//! byte. Edits always replace the whole value; nothing mutates a block in place.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Material type of a block.
///
/// `Air` is the only non-solid type, so zero-initialized storage is empty space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockType {
    /// Empty space.
    #[default]
    Air = 0,
    /// Underground fill.
    Dirt = 1,
    /// Top layer of generated terrain.
    Grass = 2,
    /// Placed rock.
    Stone = 3,
    /// Lower layers of a totem structure.
    TotemBase = 4,
    /// Capstone layer of a totem structure.
    TotemTop = 5,
}

impl BlockType {
    /// Every block type, in discriminant order.
    pub const ALL: [BlockType; 6] = [
        Self::Air,
        Self::Dirt,
        Self::Grass,
        Self::Stone,
        Self::TotemBase,
        Self::TotemTop,
    ];

    /// Returns `true` for every type except [`BlockType::Air`].
    pub fn is_solid(self) -> bool {
        self != Self::Air
    }

    /// Returns `true` for the two totem layers.
    pub fn is_totem(self) -> bool {
        matches!(self, Self::TotemBase | Self::TotemTop)
    }

    /// Lowercase name, used for display and logging.
    pub fn name(self) -> &'static str {
        match self {
            Self::Air => "air",
            Self::Dirt => "dirt",
            Self::Grass => "grass",
            Self::Stone => "stone",
            Self::TotemBase => "totem_base",
            Self::TotemTop => "totem_top",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single voxel cell: its type and one byte of auxiliary data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    /// Material type.
    pub kind: BlockType,
    /// Free-form data byte (orientation, variant, owner...). Zero by default.
    pub data: u8,
}

impl Block {
    /// An air block with zero data.
    pub const AIR: Self = Self {
        kind: BlockType::Air,
        data: 0,
    };

    /// Creates a block of the given type with zero data.
    pub const fn new(kind: BlockType) -> Self {
        Self { kind, data: 0 }
    }

    /// Creates a block with an explicit data byte.
    pub const fn with_data(kind: BlockType, data: u8) -> Self {
        Self { kind, data }
    }

    /// A block is solid iff its type is not air.
    pub fn is_solid(self) -> bool {
        self.kind.is_solid()
    }
}

impl From<BlockType> for Block {
    fn from(kind: BlockType) -> Self {
        Self::new(kind)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
