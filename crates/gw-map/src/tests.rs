//! Unit tests for `gw-map`.

#[cfg(test)]
mod island {
    use crate::island::IslandPartition;
    use crate::tile::Tile;
    use gw_core::geometry::Grid;
    use gw_core::ids::TileIndex;

    #[test]
    fn single_open_room_is_one_island() {
        let grid = Grid::new(3, 3);
        let tiles = vec![Tile::Normal; 9];
        let partition = IslandPartition::compute(&grid, &tiles);
        assert_eq!(partition.island_count, 1);
        let a = grid.index_of(0, 0).unwrap();
        let b = grid.index_of(2, 2).unwrap();
        assert_eq!(partition.island_of(a), partition.island_of(b));
    }

    #[test]
    fn obstacle_wall_splits_into_two_islands() {
        // 3x3 grid, middle column is all obstacle.
        let grid = Grid::new(3, 3);
        let mut tiles = vec![Tile::Normal; 9];
        for y in 0..3 {
            let idx = grid.index_of(1, y).unwrap();
            tiles[idx.index()] = Tile::Obstacle;
        }
        let partition = IslandPartition::compute(&grid, &tiles);
        assert_eq!(partition.island_count, 2);
        let left = grid.index_of(0, 0).unwrap();
        let right = grid.index_of(2, 0).unwrap();
        assert_ne!(partition.island_of(left), partition.island_of(right));
    }

    #[test]
    fn obstacle_tiles_get_invalid_island() {
        let grid = Grid::new(2, 2);
        let mut tiles = vec![Tile::Normal; 4];
        let obstacle = grid.index_of(1, 1).unwrap();
        tiles[obstacle.index()] = Tile::Obstacle;
        let partition = IslandPartition::compute(&grid, &tiles);
        assert!(!partition.island_of(obstacle).is_valid());
        let _ = TileIndex::default();
    }
}

#[cfg(test)]
mod map_builder {
    use crate::error::MapError;
    use crate::map::MapBuilder;
    use crate::tile::{Portal, Tile};
    use gw_core::ids::TileIndex;

    #[test]
    fn defaults_to_all_obstacle_when_tiles_omitted() {
        let map = MapBuilder::new(2, 2).build().unwrap();
        for i in 0..4 {
            assert!(map.is_obstacle(TileIndex(i)));
        }
    }

    #[test]
    fn rejects_portal_with_out_of_bounds_from() {
        let result = MapBuilder::new(2, 2)
            .tiles(vec![Tile::Normal; 4])
            .portal(Portal {
                from: TileIndex(99),
                to: TileIndex(0),
                direction: None,
            })
            .build();
        assert!(matches!(result, Err(MapError::InvalidMap { index: 99, .. })));
    }

    #[test]
    fn rejects_portal_with_out_of_bounds_to() {
        let result = MapBuilder::new(2, 2)
            .tiles(vec![Tile::Normal; 4])
            .portal(Portal {
                from: TileIndex(0),
                to: TileIndex(50),
                direction: None,
            })
            .build();
        assert!(matches!(result, Err(MapError::InvalidMap { index: 50, .. })));
    }
}

#[cfg(test)]
mod map_query {
    use crate::map::MapBuilder;
    use crate::tile::{Portal, Tile};
    use gw_core::geometry::Direction;
    use gw_core::ids::TileIndex;

    fn open_grid(w: u32, h: u32) -> crate::map::Map {
        MapBuilder::new(w, h)
            .tiles(vec![Tile::Normal; (w * h) as usize])
            .build()
            .unwrap()
    }

    #[test]
    fn cost_reflects_tile_kind() {
        let map = MapBuilder::new(2, 1)
            .tiles(vec![Tile::Normal, Tile::Fast])
            .build()
            .unwrap();
        assert_eq!(map.cost(TileIndex(0)), Some(10));
        assert_eq!(map.cost(TileIndex(1)), Some(7));
    }

    #[test]
    fn estimate_distance_is_none_through_obstacle() {
        let map = MapBuilder::new(3, 1)
            .tiles(vec![Tile::Normal, Tile::Obstacle, Tile::Normal])
            .build()
            .unwrap();
        assert_eq!(map.estimate_distance(TileIndex(0), TileIndex(1)), None);
        assert_eq!(map.estimate_distance(TileIndex(0), TileIndex(2)), Some(2));
    }

    #[test]
    fn generate_move_onto_normal_tile_succeeds() {
        let map = open_grid(3, 3);
        let from = map.grid().index_of(1, 1).unwrap();
        let result = map.generate_move(from, Direction::Right, None).unwrap();
        assert_eq!(result.total_ticks, 10);
        assert_eq!(result.target_position, (2, 1));
    }

    #[test]
    fn generate_move_blocked_by_static_obstacle() {
        let map = MapBuilder::new(2, 1)
            .tiles(vec![Tile::Normal, Tile::Obstacle])
            .build()
            .unwrap();
        assert!(map.generate_move(TileIndex(0), Direction::Right, None).is_none());
    }

    #[test]
    fn generate_move_blocked_by_dynamic_obstacle() {
        let map = open_grid(3, 1);
        let mut colliders = gw_core::bitset::TileBitSet::new(3);
        colliders.set(1);
        assert!(map
            .generate_move(TileIndex(0), Direction::Right, Some(&colliders))
            .is_none());
    }

    #[test]
    fn generate_move_off_grid_is_none() {
        let map = open_grid(2, 2);
        let corner = map.grid().index_of(0, 0).unwrap();
        assert!(map.generate_move(corner, Direction::Up, None).is_none());
    }

    #[test]
    fn portal_teleports_when_direction_matches() {
        let map = MapBuilder::new(3, 1)
            .tiles(vec![Tile::Normal; 3])
            .portal(Portal {
                from: TileIndex(1),
                to: TileIndex(2),
                direction: Some(Direction::Right),
            })
            .build()
            .unwrap();
        let result = map.generate_move(TileIndex(0), Direction::Right, None).unwrap();
        assert_eq!(result.target_idx, TileIndex(2));
    }

    #[test]
    fn portal_does_not_teleport_on_direction_mismatch() {
        let map = MapBuilder::new(3, 1)
            .tiles(vec![Tile::Normal; 3])
            .portal(Portal {
                from: TileIndex(1),
                to: TileIndex(2),
                direction: Some(Direction::Left),
            })
            .build()
            .unwrap();
        let result = map.generate_move(TileIndex(0), Direction::Right, None).unwrap();
        assert_eq!(result.target_idx, TileIndex(1));
    }

    #[test]
    fn neighbors_resolve_portal_teleport_regardless_of_direction_constraint() {
        let map = MapBuilder::new(3, 1)
            .tiles(vec![Tile::Normal; 3])
            .portal(Portal {
                from: TileIndex(1),
                to: TileIndex(2),
                direction: Some(Direction::Left),
            })
            .build()
            .unwrap();
        let neighbours = map.neighbors(TileIndex(0));
        let right = neighbours.iter().find(|(d, _)| *d == Direction::Right).unwrap();
        assert_eq!(right.1, TileIndex(2));
    }
}

#[cfg(test)]
mod astar {
    use crate::astar::{self, AstarOutcome, SearchOptions};
    use crate::map::MapBuilder;
    use crate::tile::Tile;
    use gw_core::bitset::TileBitSet;
    use gw_core::ids::TileIndex;

    #[test]
    fn finds_shortest_path_in_open_grid() {
        let map = MapBuilder::new(4, 4)
            .tiles(vec![Tile::Normal; 16])
            .build()
            .unwrap();
        let start = map.grid().index_of(0, 0).unwrap();
        let goal = map.grid().index_of(3, 3).unwrap();
        match astar::search(&map, start, goal, &SearchOptions::live(None)) {
            AstarOutcome::Found { directions, .. } => assert_eq!(directions.len(), 6),
            _ => panic!("expected a path"),
        }
    }

    #[test]
    fn returns_partial_path_when_goal_is_walled_off_but_other_tiles_are_reachable() {
        let grid_w = 3;
        let mut tiles = vec![Tile::Normal; (grid_w * 3) as usize];
        // wall off the middle column entirely, splitting the grid in two
        for y in 0..3u32 {
            let idx = (y * grid_w + 1) as usize;
            tiles[idx] = Tile::Obstacle;
        }
        let map = MapBuilder::new(grid_w, 3).tiles(tiles).build().unwrap();
        let start = map.grid().index_of(0, 0).unwrap();
        let goal = map.grid().index_of(2, 0).unwrap();
        match astar::search(&map, start, goal, &SearchOptions::live(None)) {
            AstarOutcome::Partial { directions } => assert!(!directions.is_empty()),
            other => panic!("expected Partial, got a different outcome ({})", describe(&other)),
        }
    }

    #[test]
    fn returns_unreachable_when_start_has_no_open_neighbours() {
        // start (0) is boxed in by an obstacle at 1; goal (2) is unreachable
        // and no other tile is reachable from start either.
        let map = MapBuilder::new(3, 1)
            .tiles(vec![Tile::Normal, Tile::Obstacle, Tile::Normal])
            .build()
            .unwrap();
        match astar::search(&map, TileIndex(0), TileIndex(2), &SearchOptions::live(None)) {
            AstarOutcome::Unreachable => {}
            other => panic!("expected Unreachable, got a different outcome ({})", describe(&other)),
        }
    }

    #[test]
    fn dynamic_obstacle_adjacent_to_goal_is_skipped_entirely() {
        // 1x3 corridor: start=0, collider=1, goal=2. The only neighbour of
        // the goal is the collider tile, within estimateDistance <= 1, so it
        // must be skipped rather than penalized.
        let map = MapBuilder::new(3, 1).tiles(vec![Tile::Normal; 3]).build().unwrap();
        let mut colliders = TileBitSet::new(3);
        colliders.set(1);
        let outcome = astar::search(&map, TileIndex(0), TileIndex(2), &SearchOptions::live(Some(&colliders)));
        assert!(matches!(outcome, AstarOutcome::Unreachable));
    }

    #[test]
    fn dynamic_obstacle_far_from_goal_is_penalized_not_blocked() {
        // 5-wide corridor; a collider sits two steps in, not adjacent to goal.
        let map = MapBuilder::new(5, 1).tiles(vec![Tile::Normal; 5]).build().unwrap();
        let mut colliders = TileBitSet::new(5);
        colliders.set(1);
        let outcome = astar::search(&map, TileIndex(0), TileIndex(4), &SearchOptions::live(Some(&colliders)));
        match outcome {
            AstarOutcome::Found { directions, .. } => assert_eq!(directions.len(), 4),
            other => panic!("expected Found, got a different outcome ({})", describe(&other)),
        }
    }

    #[test]
    fn start_equals_goal_returns_empty_path() {
        let map = MapBuilder::new(2, 2).tiles(vec![Tile::Normal; 4]).build().unwrap();
        match astar::search(&map, TileIndex(0), TileIndex(0), &SearchOptions::live(None)) {
            AstarOutcome::Found { directions, cost } => {
                assert!(directions.is_empty());
                assert_eq!(cost, 0.0);
            }
            _ => panic!("expected Found"),
        }
    }

    fn describe(outcome: &AstarOutcome) -> &'static str {
        match outcome {
            AstarOutcome::Found { .. } => "Found",
            AstarOutcome::Partial { .. } => "Partial",
            AstarOutcome::Unreachable => "Unreachable",
            AstarOutcome::CapExceeded => "CapExceeded",
        }
    }
}

#[cfg(test)]
mod portal_graph {
    use crate::portal_graph::PortalGraph;
    use gw_core::ids::PortalId;

    #[test]
    fn self_distance_is_zero() {
        let graph = PortalGraph::build(3, |_, _| None);
        assert_eq!(graph.cost(PortalId::from(0usize), PortalId::from(0usize)), Some(0));
        assert_eq!(graph.path(PortalId::from(1usize), PortalId::from(1usize)), Some(&[PortalId::from(1usize)][..]));
    }

    #[test]
    fn finds_shortest_two_hop_path() {
        // 0 -> 1 costs 5, 1 -> 2 costs 5, direct 0 -> 2 costs 20: the two-hop
        // route should win.
        let graph = PortalGraph::build(3, |i, j| match (i, j) {
            (0, 1) => Some(5),
            (1, 2) => Some(5),
            (0, 2) => Some(20),
            _ => None,
        });
        assert_eq!(graph.cost(PortalId::from(0usize), PortalId::from(2usize)), Some(10));
        assert_eq!(
            graph.path(PortalId::from(0usize), PortalId::from(2usize)),
            Some(&[PortalId::from(0usize), PortalId::from(1usize), PortalId::from(2usize)][..])
        );
    }

    #[test]
    fn unreachable_pair_has_no_cost_or_path() {
        let graph = PortalGraph::build(2, |_, _| None);
        assert_eq!(graph.cost(PortalId::from(0usize), PortalId::from(1usize)), None);
        assert!(graph.path(PortalId::from(0usize), PortalId::from(1usize)).is_none());
    }
}

#[cfg(test)]
mod bridging {
    use crate::map::MapBuilder;
    use crate::tile::{Portal, Tile};
    use gw_core::geometry::Direction;
    use gw_core::ids::TileIndex;

    #[test]
    fn portal_links_two_islands_for_cross_island_routing() {
        // 5x1: tiles 0-1 island A, tile 2 obstacle wall, tiles 3-4 island B.
        // A portal from tile 1 to tile 3 bridges them.
        let map = MapBuilder::new(5, 1)
            .tiles(vec![
                Tile::Normal,
                Tile::Normal,
                Tile::Obstacle,
                Tile::Normal,
                Tile::Normal,
            ])
            .portal(Portal {
                from: TileIndex(1),
                to: TileIndex(3),
                direction: None,
            })
            .build()
            .unwrap();

        let start = TileIndex(0);
        let goal = TileIndex(4);
        assert_ne!(map.island_of(start), map.island_of(goal));

        let (entry, exit, cost) = map
            .best_bridging_portals(start, goal)
            .expect("a bridging portal pair should exist");
        assert_eq!(entry, exit);
        assert_eq!(cost, 0);
        let _ = Direction::Right;
    }
}
