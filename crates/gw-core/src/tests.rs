//! Unit tests for gw-core primitives.

#[cfg(test)]
mod geometry {
    use crate::{Direction, Grid};

    #[test]
    fn index_roundtrip() {
        let g = Grid::new(5, 3);
        let idx = g.index_of(2, 1).unwrap();
        assert_eq!(g.coord_of(idx).unwrap(), (2, 1));
    }

    #[test]
    fn out_of_bounds() {
        let g = Grid::new(3, 3);
        assert!(g.index_of(3, 0).is_err());
        assert!(g.index_of(0, 3).is_err());
    }

    #[test]
    fn step_directions() {
        let g = Grid::new(3, 3);
        let center = g.index_of(1, 1).unwrap();
        assert_eq!(g.coord_of(g.step(center, Direction::Up).unwrap()).unwrap(), (1, 0));
        assert_eq!(g.coord_of(g.step(center, Direction::Down).unwrap()).unwrap(), (1, 2));
        assert_eq!(g.coord_of(g.step(center, Direction::Left).unwrap()).unwrap(), (0, 1));
        assert_eq!(g.coord_of(g.step(center, Direction::Right).unwrap()).unwrap(), (2, 1));
    }

    #[test]
    fn step_off_grid_is_none() {
        let g = Grid::new(3, 3);
        let corner = g.index_of(0, 0).unwrap();
        assert!(g.step(corner, Direction::Up).is_none());
        assert!(g.step(corner, Direction::Left).is_none());
    }

    #[test]
    fn direction_between_adjacent() {
        let g = Grid::new(3, 3);
        let a = g.index_of(1, 1).unwrap();
        let b = g.index_of(1, 0).unwrap();
        assert_eq!(g.direction(a, b), Some(Direction::Up));
    }

    #[test]
    fn direction_between_non_adjacent_is_none() {
        let g = Grid::new(5, 5);
        let a = g.index_of(0, 0).unwrap();
        let b = g.index_of(3, 3).unwrap();
        assert_eq!(g.direction(a, b), None);
    }

    #[test]
    fn manhattan_distance() {
        let g = Grid::new(10, 10);
        let a = g.index_of(0, 0).unwrap();
        let b = g.index_of(3, 4).unwrap();
        assert_eq!(g.manhattan(a, b), Some(7));
    }
}

#[cfg(test)]
mod bitset {
    use crate::TileBitSet;

    #[test]
    fn set_and_has() {
        let mut bs = TileBitSet::new(100);
        assert!(!bs.has(42));
        bs.set(42);
        assert!(bs.has(42));
        assert!(!bs.has(41));
    }

    #[test]
    fn reset_same_length_clears_in_place() {
        let mut bs = TileBitSet::new(64);
        bs.set(10);
        bs.set(63);
        bs.reset(64);
        assert!(!bs.has(10));
        assert!(!bs.has(63));
        assert_eq!(bs.length(), 64);
    }

    #[test]
    fn reset_different_length_reallocates() {
        let mut bs = TileBitSet::new(10);
        bs.set(5);
        bs.reset(200);
        assert_eq!(bs.length(), 200);
        assert!(!bs.has(5));
        bs.set(150);
        assert!(bs.has(150));
    }

    #[test]
    fn out_of_range_reads_as_clear_and_set_is_ignored() {
        let mut bs = TileBitSet::new(8);
        bs.set(100);
        assert!(!bs.has(100));
    }

    #[test]
    fn spans_multiple_words() {
        let mut bs = TileBitSet::new(200);
        for i in (0..200).step_by(7) {
            bs.set(i);
        }
        for i in (0..200).step_by(7) {
            assert!(bs.has(i), "bit {i} should be set");
        }
        assert!(!bs.has(1));
    }
}

#[cfg(test)]
mod heap {
    use crate::IndexedMinHeap;

    #[test]
    fn pop_returns_smallest_first() {
        let mut h = IndexedMinHeap::new();
        h.push(1, 5.0);
        h.push(2, 1.0);
        h.push(3, 3.0);
        assert_eq!(h.pop(), Some((2, 1.0)));
        assert_eq!(h.pop(), Some((3, 3.0)));
        assert_eq!(h.pop(), Some((1, 5.0)));
        assert_eq!(h.pop(), None);
    }

    #[test]
    fn push_duplicate_key_is_noop() {
        let mut h = IndexedMinHeap::new();
        h.push(1, 5.0);
        h.push(1, 0.0); // should not override — push is a no-op when present
        assert_eq!(h.pop(), Some((1, 5.0)));
    }

    #[test]
    fn decrease_priority_moves_entry_up() {
        let mut h = IndexedMinHeap::new();
        h.push(1, 10.0);
        h.push(2, 20.0);
        h.decrease_priority(2, 1.0);
        assert_eq!(h.pop(), Some((2, 1.0)));
    }

    #[test]
    fn decrease_priority_ignores_increase() {
        let mut h = IndexedMinHeap::new();
        h.push(1, 10.0);
        h.decrease_priority(1, 50.0);
        assert_eq!(h.pop(), Some((1, 10.0)));
    }

    #[test]
    fn decrease_priority_on_absent_key_pushes() {
        let mut h = IndexedMinHeap::new();
        h.decrease_priority(7, 2.0);
        assert!(h.contains(7));
        assert_eq!(h.pop(), Some((7, 2.0)));
    }

    #[test]
    fn ties_broken_by_insertion_order() {
        let mut h = IndexedMinHeap::new();
        h.push(1, 1.0);
        h.push(2, 1.0);
        h.push(3, 1.0);
        assert_eq!(h.pop(), Some((1, 1.0)));
        assert_eq!(h.pop(), Some((2, 1.0)));
        assert_eq!(h.pop(), Some((3, 1.0)));
    }

    #[test]
    fn size_and_contains() {
        let mut h = IndexedMinHeap::new();
        assert_eq!(h.size(), 0);
        h.push(1, 1.0);
        h.push(2, 2.0);
        assert_eq!(h.size(), 2);
        assert!(h.contains(1));
        h.pop();
        assert_eq!(h.size(), 1);
        assert!(!h.contains(1));
    }
}

#[cfg(test)]
mod rng {
    use crate::{MinRandomSource, RandomSource, SmallRngSource};

    #[test]
    fn min_random_source_returns_lower_bound() {
        let mut r = MinRandomSource;
        assert_eq!(r.range_inclusive(3, 9), 3);
    }

    #[test]
    fn small_rng_source_is_deterministic_for_seed() {
        let mut a = SmallRngSource::new(42);
        let mut b = SmallRngSource::new(42);
        let seq_a: Vec<u32> = (0..10).map(|_| a.range_inclusive(0, 100)).collect();
        let seq_b: Vec<u32> = (0..10).map(|_| b.range_inclusive(0, 100)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn small_rng_source_stays_in_range() {
        let mut r = SmallRngSource::new(7);
        for _ in 0..50 {
            let v = r.range_inclusive(5, 10);
            assert!((5..=10).contains(&v));
        }
    }
}
