// ==============================================
// EVICTION SCENARIOS (integration)
// ==============================================
//
// Short hand-traced access patterns that pin down each policy's victim
// choice. Keys are named by letter to match the traces in the docs.

use cachelab::prelude::*;

fn run<P: ReplacementPolicy<char>>(policy: &mut P, keys: &str) -> Vec<Option<char>> {
    keys.chars()
        .map(|k| policy.access(k).into_evicted())
        .collect()
}

mod fifo {
    use super::*;

    #[test]
    fn evicts_in_insertion_order_regardless_of_hits() {
        let mut fifo = FifoPolicy::new(3, 8);
        let evicted = run(&mut fifo, "abcaade");
        assert_eq!(evicted, [None, None, None, None, None, Some('a'), Some('b')]);
        assert_eq!(fifo.resident_keys(), vec!['c', 'd', 'e']);
    }
}

mod lru {
    use super::*;

    #[test]
    fn recency_protects_the_reused_key() {
        let mut lru = LruPolicy::new(2, 4);
        let evicted = run(&mut lru, "abac");
        assert_eq!(evicted[3], Some('b'));
        assert!(lru.contains(&'a'));
        assert!(lru.contains(&'c'));
    }

    #[test]
    fn reference_sequence_at_capacity_three() {
        let keys = [1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5];
        let mut lru = LruPolicy::new(3, keys.len());
        let hits: Vec<bool> = keys.iter().map(|&k| lru.access(k).is_hit()).collect();

        assert_eq!(lru.hits(), 2);
        assert!(hits[7] && hits[8]);
        let mut resident = lru.resident_keys();
        resident.sort_unstable();
        assert_eq!(resident, vec![3, 4, 5]);
        assert!((lru.hit_rate() - 2.0 / 12.0).abs() < 1e-12);
    }
}

mod mru {
    use super::*;

    #[test]
    fn evicts_the_most_recent_key() {
        let mut mru = MruPolicy::new(2, 4);
        let evicted = run(&mut mru, "abac");
        assert_eq!(evicted[3], Some('a'));
        assert!(mru.contains(&'b'));
        assert!(mru.contains(&'c'));
    }
}

mod lfu {
    use super::*;

    #[test]
    fn evicts_lowest_count_oldest_first() {
        let mut lfu = LfuPolicy::new(3, 8);
        // a:2 b:1 c:1, b is older than c at count 1
        let evicted = run(&mut lfu, "abcad");
        assert_eq!(evicted[4], Some('b'));
        assert_eq!(lfu.frequency(&'a'), Some(2));
        assert_eq!(lfu.frequency(&'d'), Some(1));
    }
}

mod clock {
    use super::*;

    #[test]
    fn full_sweep_clears_every_bit_before_evicting() {
        let mut clock = ClockPolicy::new(2, 3);
        let evicted = run(&mut clock, "abc");
        assert_eq!(evicted, [None, None, Some('a')]);
        assert_eq!(clock.is_referenced(&'b'), Some(false));
        assert_eq!(clock.is_referenced(&'c'), Some(true));
        assert_eq!(clock.metrics().ref_bit_resets, 2);
    }

    #[test]
    fn referenced_key_gets_a_second_chance() {
        let mut clock = ClockPolicy::new(3, 8);
        // d sweeps every bit clear and takes a's slot; b is then re-referenced
        let evicted = run(&mut clock, "abcdbe");
        assert_eq!(evicted[3], Some('a'));
        assert_eq!(evicted[5], Some('c'));
        assert!(clock.contains(&'b'));
        assert_eq!(clock.is_referenced(&'b'), Some(false));
    }
}

mod arc {
    use super::*;

    #[test]
    fn second_reference_promotes_to_t2() {
        let mut arc = ArcPolicy::new(2, 4);
        arc.access('a');
        assert!(arc.in_t1(&'a'));
        assert!(arc.access('a').is_hit());
        assert!(arc.in_t2(&'a'));
        assert!(!arc.in_t1(&'a'));
        assert_eq!(arc.metrics().t1_to_t2_promotions, 1);
    }

    #[test]
    fn demoted_key_is_remembered_as_ghost() {
        let mut arc = ArcPolicy::new(2, 4);
        let evicted = run(&mut arc, "abc");
        assert_eq!(evicted[2], Some('a'));
        assert!(arc.in_b1(&'a'));
        assert!(!arc.contains(&'a'));

        // re-admission keeps the ghost entry; b is demoted beside it
        assert!(arc.access('a').is_miss());
        assert!(arc.contains(&'a'));
        assert!(arc.in_b1(&'a'));
        assert!(arc.in_b1(&'b'));
        assert_eq!(arc.metrics().b1_ghost_hits, 1);
    }
}

mod random {
    use super::*;

    #[test]
    fn seeded_instances_agree() {
        let keys = "abcdefabcdefgabc";
        let mut a = RandomPolicy::with_seed(3, keys.len(), 11).unwrap();
        let mut b = RandomPolicy::with_seed(3, keys.len(), 11).unwrap();
        assert_eq!(run(&mut a, keys), run(&mut b, keys));
        assert_eq!(a.hits(), b.hits());
    }
}
