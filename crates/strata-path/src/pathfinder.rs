//! A* search over walkable voxel cells.

use glam::{IVec3, Vec3};
use strata_voxel::VoxelQuery;

use crate::config::PathfinderConfig;
use crate::error::PathError;
use crate::node::NodeArena;
use crate::open_set::OpenSet;
use crate::path::Path;
use crate::reservation::ReservationSet;

/// Grid pathfinder owning the destination reservations.
///
/// Search buffers are kept between calls and cleared at the start of each
/// search, so repeated queries do not reallocate once warmed up. Apart from
/// the reservation set, every call is independent.
pub struct Pathfinder {
    config: PathfinderConfig,
    reservations: ReservationSet,
    arena: NodeArena,
    open: OpenSet,
}

impl Pathfinder {
    pub fn new(config: PathfinderConfig) -> Self {
        Self {
            config,
            reservations: ReservationSet::new(),
            arena: NodeArena::default(),
            open: OpenSet::default(),
        }
    }

    pub fn config(&self) -> &PathfinderConfig {
        &self.config
    }

    /// Finds a least-cost route between two world-space points.
    ///
    /// Both points are snapped down to walkable cells first. The goal cell is
    /// reserved before searching and stays reserved on success; every error
    /// leaves it unreserved (or reserved by its previous holder, for
    /// [`PathError::GoalReserved`]).
    pub fn find_path<W: VoxelQuery + ?Sized>(
        &mut self,
        world: &W,
        start: Vec3,
        end: Vec3,
    ) -> Result<Path, PathError> {
        let start_cell = self
            .snap_to_walkable(world, start)
            .ok_or(PathError::StartNotWalkable {
                x: start.x.floor() as i32,
                z: start.z.floor() as i32,
            })?;
        let goal_cell = self
            .snap_to_walkable(world, end)
            .ok_or(PathError::GoalNotWalkable {
                x: end.x.floor() as i32,
                z: end.z.floor() as i32,
            })?;

        if !self.reservations.try_reserve(goal_cell) {
            tracing::debug!(goal = ?goal_cell, "goal already reserved");
            return Err(PathError::GoalReserved(goal_cell));
        }

        match self.search(world, start_cell, goal_cell) {
            Some((cells, cost)) => {
                let waypoints = cells.iter().map(|&c| self.grid_to_world(c)).collect();
                tracing::debug!(
                    start = ?start_cell,
                    goal = ?goal_cell,
                    steps = cells.len() - 1,
                    cost,
                    expanded = self.arena.len(),
                    frontier = self.open.len(),
                    "path found"
                );
                Ok(Path::new(cells, waypoints, cost))
            }
            None => {
                self.reservations.release(goal_cell);
                tracing::debug!(
                    start = ?start_cell,
                    goal = ?goal_cell,
                    expanded = self.arena.len(),
                    "no route"
                );
                Err(PathError::NoRoute {
                    start: start_cell,
                    goal: goal_cell,
                })
            }
        }
    }

    /// Highest walkable cell in the column under `point`, scanning down from
    /// `snap_max_height` to `0` inclusive.
    pub fn snap_to_walkable<W: VoxelQuery + ?Sized>(&self, world: &W, point: Vec3) -> Option<IVec3> {
        let x = point.x.floor() as i32;
        let z = point.z.floor() as i32;
        (0..=self.config.snap_max_height)
            .rev()
            .map(|y| IVec3::new(x, y, z))
            .find(|&cell| world.is_walkable(cell))
    }

    /// World-space waypoint for `cell`: its horizontal center, lifted by
    /// `waypoint_height_offset`.
    pub fn grid_to_world(&self, cell: IVec3) -> Vec3 {
        Vec3::new(
            cell.x as f32 + 0.5,
            cell.y as f32 + self.config.waypoint_height_offset,
            cell.z as f32 + 0.5,
        )
    }

    /// Whether an agent standing on `from` may move to the adjacent cell `to`.
    ///
    /// `to` must be walkable with free headroom, at most `max_step_height`
    /// above or below `from`. A horizontal diagonal also needs both shoulder
    /// cells at `from`'s height walkable, so it never cuts a solid corner.
    pub fn is_valid_step<W: VoxelQuery + ?Sized>(&self, world: &W, from: IVec3, to: IVec3) -> bool {
        let d = to - from;
        if d == IVec3::ZERO || d.x.abs() > 1 || d.z.abs() > 1 {
            return false;
        }
        if d.y.abs() > self.config.max_step_height {
            return false;
        }
        if !world.is_walkable(to) || world.is_solid(to + IVec3::Y) {
            return false;
        }
        if d.x != 0 && d.z != 0 {
            let shoulder_x = IVec3::new(to.x, from.y, from.z);
            let shoulder_z = IVec3::new(from.x, from.y, to.z);
            if !world.is_walkable(shoulder_x) || !world.is_walkable(shoulder_z) {
                return false;
            }
        }
        true
    }

    /// Cost of one legal step.
    pub fn step_cost(&self, from: IVec3, to: IVec3) -> f32 {
        let d = to - from;
        let mut cost = if d.x != 0 && d.z != 0 {
            self.config.diagonal_cost
        } else {
            self.config.orthogonal_cost
        };
        if d.y > 0 {
            cost += self.config.climb_penalty;
        }
        cost
    }

    /// Claims `cell` as a destination. Returns `false` if already held.
    pub fn try_reserve(&mut self, cell: IVec3) -> bool {
        self.reservations.try_reserve(cell)
    }

    /// Releases a destination claim. Returns `false` if it was not held.
    pub fn release(&mut self, cell: IVec3) -> bool {
        self.reservations.release(cell)
    }

    /// Releases the goal reservation held by `path`.
    pub fn release_path(&mut self, path: &Path) -> bool {
        self.release(path.goal())
    }

    pub fn is_reserved(&self, cell: IVec3) -> bool {
        self.reservations.is_reserved(cell)
    }

    pub fn reservations(&self) -> &ReservationSet {
        &self.reservations
    }

    fn heuristic(from: IVec3, goal: IVec3) -> f32 {
        from.as_vec3().distance(goal.as_vec3())
    }

    fn search<W: VoxelQuery + ?Sized>(
        &mut self,
        world: &W,
        start: IVec3,
        goal: IVec3,
    ) -> Option<(Vec<IVec3>, f32)> {
        self.arena.clear();
        self.open.clear();

        let h = Self::heuristic(start, goal);
        let root = self.arena.insert(start, None, 0.0, h);
        self.open.push(root, h);

        let max_dy = self.config.max_step_height.max(0);

        while let Some(current) = self.open.pop() {
            if self.arena.get(current).closed {
                continue;
            }
            let node = self.arena.get_mut(current);
            node.closed = true;
            let (pos, g) = (node.pos, node.g);

            if pos == goal {
                return Some((self.arena.trace(current), g));
            }

            for dx in -1..=1 {
                for dy in -max_dy..=max_dy {
                    for dz in -1..=1 {
                        let next = pos + IVec3::new(dx, dy, dz);
                        if !self.is_valid_step(world, pos, next) {
                            continue;
                        }
                        let tentative = g + self.step_cost(pos, next);

                        match self.arena.find(next) {
                            Some(idx) => {
                                let existing = self.arena.get_mut(idx);
                                if existing.closed || tentative >= existing.g {
                                    continue;
                                }
                                existing.g = tentative;
                                existing.parent = Some(current);
                                let f = existing.f();
                                self.open.push(idx, f);
                            }
                            None => {
                                let h = Self::heuristic(next, goal);
                                let idx = self.arena.insert(next, Some(current), tentative, h);
                                self.open.push(idx, tentative + h);
                            }
                        }
                    }
                }
            }
        }

        None
    }
}

impl Default for Pathfinder {
    fn default() -> Self {
        Self::new(PathfinderConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::SQRT_2;
    use strata_voxel::{BlockType, VoxelWorld, WorldGenParams};

    const EPS: f32 = 1e-4;

    fn flat_world() -> VoxelWorld {
        VoxelWorld::generate(&WorldGenParams {
            size_x_chunks: 1,
            size_z_chunks: 1,
            chunk_size: 16,
            ground_height: 8,
        })
    }

    /// Unbounded solid half-space below `y = 0`.
    struct Floor;

    impl VoxelQuery for Floor {
        fn is_solid(&self, pos: IVec3) -> bool {
            pos.y < 0
        }
    }

    #[test]
    fn test_snap_finds_surface_cell() {
        let world = flat_world();
        let finder = Pathfinder::default();
        assert_eq!(
            finder.snap_to_walkable(&world, Vec3::new(3.7, 20.0, 4.2)),
            Some(IVec3::new(3, 8, 4))
        );
        assert_eq!(finder.snap_to_walkable(&world, Vec3::new(-0.5, 9.0, 2.0)), None);
    }

    #[test]
    fn test_snap_prefers_highest_walkable_cell() {
        let mut world = flat_world();
        world.set_block(IVec3::new(3, 11, 4), BlockType::Stone, 0);
        let finder = Pathfinder::default();
        assert_eq!(
            finder.snap_to_walkable(&world, Vec3::new(3.0, 0.0, 4.0)),
            Some(IVec3::new(3, 12, 4))
        );
    }

    #[test]
    fn test_grid_to_world_lifts_waypoint() {
        let finder = Pathfinder::default();
        let p = finder.grid_to_world(IVec3::new(1, 8, 1));
        assert!((p - Vec3::new(1.5, 9.0, 1.5)).length() < EPS);
    }

    #[test]
    fn test_flat_plane_path_is_optimal() {
        let world = flat_world();
        let mut finder = Pathfinder::default();
        let path = finder
            .find_path(&world, Vec3::new(2.5, 12.0, 3.5), Vec3::new(10.2, 9.0, 5.9))
            .expect("path");
        assert_eq!(path.start(), IVec3::new(2, 8, 3));
        assert_eq!(path.goal(), IVec3::new(10, 8, 5));
        assert!((path.cost() - (2.0 * SQRT_2 + 6.0)).abs() < EPS, "{}", path.cost());
        assert_eq!(path.waypoints().len(), 9);
        assert_eq!(path.steps(), 8);
    }

    #[test]
    fn test_every_step_in_path_is_legal() {
        let mut world = flat_world();
        world.fill_sphere(IVec3::new(8, 8, 8), 2.0, BlockType::Stone);
        let mut finder = Pathfinder::default();
        let path = finder
            .find_path(&world, Vec3::new(1.0, 9.0, 1.0), Vec3::new(14.0, 9.0, 14.0))
            .expect("path");
        for pair in path.cells().windows(2) {
            assert!(finder.is_valid_step(&world, pair[0], pair[1]), "{pair:?}");
        }
    }

    #[test]
    fn test_diagonal_corner_cut_rejected() {
        let mut world = flat_world();
        world.set_block(IVec3::new(6, 8, 5), BlockType::Stone, 0);
        world.set_block(IVec3::new(5, 8, 6), BlockType::Stone, 0);
        let finder = Pathfinder::default();
        let from = IVec3::new(5, 8, 5);
        let to = IVec3::new(6, 8, 6);
        assert!(world.is_walkable(from) && world.is_walkable(to));
        assert!(!finder.is_valid_step(&world, from, to));
        assert!(!finder.is_valid_step(&world, to, from));
    }

    #[test]
    fn test_diagonal_with_one_blocked_shoulder_rejected() {
        let mut world = flat_world();
        world.set_block(IVec3::new(6, 8, 5), BlockType::Stone, 0);
        let finder = Pathfinder::default();
        assert!(!finder.is_valid_step(&world, IVec3::new(5, 8, 5), IVec3::new(6, 8, 6)));
        assert!(finder.is_valid_step(&world, IVec3::new(5, 8, 5), IVec3::new(5, 8, 6)));
    }

    #[test]
    fn test_step_height_limits() {
        let mut world = flat_world();
        world.set_block(IVec3::new(6, 8, 5), BlockType::Stone, 0);
        world.set_block(IVec3::new(7, 8, 5), BlockType::Stone, 0);
        world.set_block(IVec3::new(7, 9, 5), BlockType::Stone, 0);
        let finder = Pathfinder::default();
        // One block up is fine, and back down.
        assert!(finder.is_valid_step(&world, IVec3::new(5, 8, 5), IVec3::new(6, 9, 5)));
        assert!(finder.is_valid_step(&world, IVec3::new(6, 9, 5), IVec3::new(5, 8, 5)));
        // Two blocks up is not.
        assert!(!finder.is_valid_step(&world, IVec3::new(5, 8, 5), IVec3::new(7, 10, 5)));
        // Pure vertical moves never pass.
        assert!(!finder.is_valid_step(&world, IVec3::new(5, 8, 5), IVec3::new(5, 9, 5)));
    }

    #[test]
    fn test_climb_surcharge_applies_only_upward() {
        let finder = Pathfinder::default();
        let up = finder.step_cost(IVec3::new(0, 8, 0), IVec3::new(1, 9, 0));
        let down = finder.step_cost(IVec3::new(1, 9, 0), IVec3::new(0, 8, 0));
        let diag_up = finder.step_cost(IVec3::new(0, 8, 0), IVec3::new(1, 9, 1));
        assert!((up - 1.5).abs() < EPS);
        assert!((down - 1.0).abs() < EPS);
        assert!((diag_up - (SQRT_2 + 0.5)).abs() < EPS);
    }

    #[test]
    fn test_path_climbs_over_low_wall() {
        let mut world = flat_world();
        for z in 0..16 {
            world.set_block(IVec3::new(8, 8, z), BlockType::Stone, 0);
        }
        let mut finder = Pathfinder::default();
        let path = finder
            .find_path(&world, Vec3::new(4.5, 9.0, 8.5), Vec3::new(12.5, 9.0, 8.5))
            .expect("path");
        assert!((path.cost() - 8.5).abs() < EPS, "{}", path.cost());
        assert!(path.cells().contains(&IVec3::new(8, 9, 8)));
    }

    #[test]
    fn test_reservation_exclusive_until_released() {
        let world = flat_world();
        let mut finder = Pathfinder::default();
        let from = Vec3::new(1.0, 9.0, 1.0);
        let to = Vec3::new(9.0, 9.0, 9.0);

        let first = finder.find_path(&world, from, to).expect("first path");
        assert!(finder.is_reserved(first.goal()));

        let second = finder.find_path(&world, Vec3::new(3.0, 9.0, 1.0), to);
        assert_eq!(second, Err(PathError::GoalReserved(IVec3::new(9, 8, 9))));
        assert!(finder.is_reserved(first.goal()), "denied request keeps holder's claim");

        assert!(finder.release_path(&first));
        let third = finder.find_path(&world, Vec3::new(3.0, 9.0, 1.0), to);
        assert!(third.is_ok());
    }

    #[test]
    fn test_no_route_releases_reservation() {
        let mut world = flat_world();
        let goal = IVec3::new(10, 8, 10);
        for dx in -1..=1 {
            for dz in -1..=1 {
                if dx == 0 && dz == 0 {
                    continue;
                }
                for y in 8..10 {
                    world.set_block(goal + IVec3::new(dx, y - 8, dz), BlockType::Stone, 0);
                }
            }
        }
        let mut finder = Pathfinder::default();
        let result = finder.find_path(&world, Vec3::new(2.0, 9.0, 2.0), Vec3::new(10.5, 9.0, 10.5));
        assert_eq!(
            result,
            Err(PathError::NoRoute {
                start: IVec3::new(2, 8, 2),
                goal,
            })
        );
        assert!(!finder.is_reserved(goal));
        assert!(finder.reservations().is_empty());
    }

    #[test]
    fn test_snap_failures_reserve_nothing() {
        let world = flat_world();
        let mut finder = Pathfinder::default();
        assert_eq!(
            finder.find_path(&world, Vec3::new(-3.0, 9.0, 2.0), Vec3::new(5.0, 9.0, 5.0)),
            Err(PathError::StartNotWalkable { x: -3, z: 2 })
        );
        assert_eq!(
            finder.find_path(&world, Vec3::new(5.0, 9.0, 5.0), Vec3::new(40.0, 9.0, 2.0)),
            Err(PathError::GoalNotWalkable { x: 40, z: 2 })
        );
        assert!(finder.reservations().is_empty());
    }

    #[test]
    fn test_start_equals_goal() {
        let world = flat_world();
        let mut finder = Pathfinder::default();
        let path = finder
            .find_path(&world, Vec3::new(4.0, 9.0, 4.0), Vec3::new(4.9, 9.0, 4.1))
            .expect("path");
        assert_eq!(path.cells(), &[IVec3::new(4, 8, 4)]);
        assert!(path.cost().abs() < EPS);
        assert!(finder.is_reserved(IVec3::new(4, 8, 4)));
    }

    #[test]
    fn test_works_over_any_voxel_query() {
        let mut finder = Pathfinder::default();
        let path = finder
            .find_path(&Floor, Vec3::new(0.0, 5.0, 0.0), Vec3::new(3.0, 5.0, 5.0))
            .expect("path");
        assert_eq!(path.goal(), IVec3::new(3, 0, 5));
        assert!((path.cost() - (3.0 * SQRT_2 + 2.0)).abs() < EPS);
    }

    #[test]
    fn test_repeated_searches_reuse_buffers() {
        let world = flat_world();
        let mut finder = Pathfinder::default();
        for i in 0..3 {
            let to = Vec3::new(12.0, 9.0, 2.0 + i as f32);
            let path = finder.find_path(&world, Vec3::new(1.0, 9.0, 1.0), to).expect("path");
            finder.release_path(&path);
        }
        assert!(finder.reservations().is_empty());
    }
}
