//! # Passability Integration Tests
//!
//! Proves the runner can always find a ground lane, plane after plane.

use strider_procedural::{
    ensure_passable, BoundaryMemory, CellType, CollectibleConfig, CollectiblePlanner,
    GridPopulator, LevelConfig, LevelRng, LevelSeed, Probabilities, SegmentGrid,
};

const SEEDS: u64 = 500;

/// Every scenario derives its own seed stream from this one.
const BASE_SEED: LevelSeed = LevelSeed::new(0x5EED_0F_57E1DE);

fn scenario_rng(scenario: u64) -> LevelRng {
    BASE_SEED.derive(scenario).rng()
}

fn default_populator() -> GridPopulator {
    GridPopulator::from_config(&LevelConfig::default())
}

fn only_platforms(platform: f64) -> Probabilities {
    Probabilities {
        platform,
        ramp: 0.0,
        ramp_continuation: 0.0,
        obstacle: 0.0,
        collectible: 0.0,
    }
}

/// Test: Every row has an open lane after pass 1, over many seeds and planes.
#[test]
fn test_every_row_passable() {
    let populator = default_populator();

    for seed in 0..SEEDS {
        let mut rng = scenario_rng(seed);
        let mut grid = SegmentGrid::new(3, 10);
        let mut boundary = BoundaryMemory::new(3);

        // Several planes in a row so the seam is exercised too
        for plane in 0..5 {
            populator.populate_platforms(&mut grid, &mut boundary, &mut rng);
            for row in 0..grid.rows() {
                assert!(
                    grid.row_has_empty(row),
                    "seed {seed} plane {plane} row {row} blocked:\n{grid}"
                );
            }
        }
    }
}

/// Test: No middle-lane checkerboard survives repair.
#[test]
fn test_no_middle_checkerboard() {
    let populator = default_populator();

    for seed in 0..SEEDS {
        let mut rng = scenario_rng(seed);
        let mut grid = SegmentGrid::new(3, 10);
        let mut boundary = BoundaryMemory::new(3);

        // Later planes start from a blocked boundary, so row 0 keeps platforms
        for plane in 0..5 {
            populator.populate_platforms(&mut grid, &mut boundary, &mut rng);

            for row in 0..grid.rows() {
                if grid.get(1, row) != Some(CellType::Platform) {
                    continue;
                }
                for d_row in [-1isize, 1] {
                    let left = grid.neighbor(1, row, -1, d_row);
                    let right = grid.neighbor(1, row, 1, d_row);
                    if let (Some(left), Some(right)) = (left, right) {
                        assert!(
                            left.is_empty() || right.is_empty(),
                            "seed {seed} plane {plane}: checkerboard around row {row}:\n{grid}"
                        );
                    }
                }
            }
        }
    }
}

/// Test: An open lane at the end of one plane is never walled off at the
/// start of the next.
#[test]
fn test_boundary_continuity() {
    let populator = default_populator();

    for seed in 0..SEEDS {
        let mut rng = scenario_rng(seed);
        let mut grid = SegmentGrid::new(3, 10);
        let mut boundary = BoundaryMemory::new(3);

        for _ in 0..5 {
            let previous = boundary.clone();
            populator.populate_platforms(&mut grid, &mut boundary, &mut rng);

            for (lane, cell) in previous.cells().iter().enumerate() {
                if cell.is_empty() {
                    assert_ne!(
                        grid.get(lane, 0),
                        Some(CellType::Platform),
                        "seed {seed}: lane {lane} sealed at the seam"
                    );
                }
            }
            assert_eq!(boundary.cells(), grid.row(9));
        }
    }
}

/// Test: Same seed, same level.
#[test]
fn test_fixed_seed_reproducible() {
    let populator = default_populator();

    let generate = |seed: u64| {
        let mut rng = LevelSeed::new(seed).rng();
        let mut grid = SegmentGrid::new(3, 10);
        let mut boundary = BoundaryMemory::new(3);
        let mut dumps = Vec::new();
        for _ in 0..3 {
            populator.populate_platforms(&mut grid, &mut boundary, &mut rng);
            populator.populate_obstacles(&mut grid, &mut rng);
            dumps.push(grid.to_string());
        }
        dumps
    };

    assert_eq!(generate(42), generate(42));
    assert_ne!(generate(42), generate(43));
}

/// Test: All platforms, open boundary - row 0 still has a way in.
#[test]
fn test_all_platforms_open_boundary() {
    let populator = GridPopulator::new(only_platforms(1.0), 3);

    for seed in 0..50 {
        let mut rng = LevelSeed::new(seed).rng();
        let mut grid = SegmentGrid::new(3, 10);
        let mut boundary = BoundaryMemory::new(3);

        populator.populate_platforms(&mut grid, &mut boundary, &mut rng);

        assert!(grid.row_has_empty(0));
        for row in 0..10 {
            assert!(grid.row_has_empty(row), "seed {seed}:\n{grid}");
        }
    }
}

/// Test: Boundary [Empty, Platform, Platform] over a fully blocked row 0.
#[test]
fn test_seam_clears_open_lane() {
    use CellType::{Empty as E, Platform as P};

    for seed in 0..50 {
        let mut grid = SegmentGrid::from_rows(&[vec![P, P, P]]).unwrap();
        let boundary = BoundaryMemory::from_cells(vec![E, P, P]);
        let mut rng = LevelSeed::new(seed).rng();

        ensure_passable(&mut grid, &boundary, &mut rng);

        assert_eq!(grid.get(0, 0), Some(E));
    }
}

/// Test: Obstacles always win their roll - one per group of three rows.
#[test]
fn test_one_obstacle_per_group() {
    let mut probabilities = only_platforms(0.0);
    probabilities.obstacle = 1.0;
    let populator = GridPopulator::new(probabilities, 3);

    for seed in 0..50 {
        let mut rng = LevelSeed::new(seed).rng();
        let mut grid = SegmentGrid::new(3, 10);
        let mut boundary = BoundaryMemory::new(3);

        populator.populate_platforms(&mut grid, &mut boundary, &mut rng);
        populator.populate_obstacles(&mut grid, &mut rng);

        for group in [0..3, 3..6, 6..9, 9..10] {
            let obstacles: usize = group
                .clone()
                .map(|row| {
                    grid.row(row)
                        .iter()
                        .filter(|&&c| c == CellType::Obstacle)
                        .count()
                })
                .sum();
            assert_eq!(obstacles, 1, "seed {seed} rows {group:?}:\n{grid}");
        }
    }
}

/// Test: The drawn total never starts a streak past the cap.
#[test]
fn test_collectible_cap() {
    let populator = default_populator();
    let planner = CollectiblePlanner::new(CollectibleConfig::default(), 1.0);

    let mut worst = 0;
    for seed in 0..SEEDS {
        let mut rng = scenario_rng(seed);
        let mut grid = SegmentGrid::new(3, 10);
        let mut boundary = BoundaryMemory::new(3);

        populator.populate_platforms(&mut grid, &mut boundary, &mut rng);
        populator.populate_obstacles(&mut grid, &mut rng);
        let plan = planner.plan(&grid, &mut rng);

        assert!(plan.drawn_total <= 21, "seed {seed}: {plan:?}");
        if let Some(last) = plan.streaks.last() {
            assert!(plan.drawn_total - last.drawn < 15);
        }
        assert_eq!(
            plan.item_count(),
            plan.drawn_total + u32::try_from(plan.streaks.len()).unwrap()
        );
        worst = worst.max(plan.drawn_total);
    }

    println!("Highest drawn total over {SEEDS} seeds: {worst}");
}
