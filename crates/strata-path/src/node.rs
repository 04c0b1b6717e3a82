//! Arena-indexed search nodes for a single A* run.

use glam::IVec3;
use rustc_hash::FxHashMap;

/// Search state for one grid cell.
#[derive(Clone, Debug)]
pub(crate) struct PathNode {
    pub pos: IVec3,
    /// Index of the predecessor in the owning [`NodeArena`].
    pub parent: Option<usize>,
    /// Cost from the start.
    pub g: f32,
    /// Heuristic estimate to the goal.
    pub h: f32,
    /// Expanded; never reopened.
    pub closed: bool,
}

impl PathNode {
    pub fn f(&self) -> f32 {
        self.g + self.h
    }
}

/// Dense node storage plus a position → index map.
///
/// Parents are indices into `nodes`, so the arena can be cleared and reused
/// between searches without reallocating.
#[derive(Debug, Default)]
pub(crate) struct NodeArena {
    nodes: Vec<PathNode>,
    index: FxHashMap<IVec3, usize>,
}

impl NodeArena {
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
    }

    /// Index of the node at `pos`, if one was created during this search.
    pub fn find(&self, pos: IVec3) -> Option<usize> {
        self.index.get(&pos).copied()
    }

    /// Creates a node and returns its index. `pos` must not already be present.
    pub fn insert(&mut self, pos: IVec3, parent: Option<usize>, g: f32, h: f32) -> usize {
        debug_assert!(!self.index.contains_key(&pos));
        let idx = self.nodes.len();
        self.nodes.push(PathNode {
            pos,
            parent,
            g,
            h,
            closed: false,
        });
        self.index.insert(pos, idx);
        idx
    }

    pub fn get(&self, idx: usize) -> &PathNode {
        &self.nodes[idx]
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut PathNode {
        &mut self.nodes[idx]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Cells from the search root to `idx`, in travel order.
    pub fn trace(&self, idx: usize) -> Vec<IVec3> {
        let mut cells = Vec::new();
        let mut cursor = Some(idx);
        while let Some(i) = cursor {
            let node = &self.nodes[i];
            cells.push(node.pos);
            cursor = node.parent;
        }
        cells.reverse();
        cells
    }
}
