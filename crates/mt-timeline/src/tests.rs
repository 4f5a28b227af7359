//! Unit tests for mt-timeline.

use mt_core::{EntityId, GeoPoint, Timestamp};
use mt_samples::Sample;

use crate::{OffsetRange, Timeline, TimelineIndex};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Hour `h` on 2023-06-01, UTC.
fn at(h: i64) -> Timestamp {
    Timestamp::from_unix_secs(1_685_577_600 + h * 3_600).unwrap()
}

fn sample(id: u64, lat: f64, lon: f64, h: i64) -> Sample {
    Sample::new(EntityId(id), GeoPoint::new(lat, lon), at(h))
}

/// Entity 7 at (0,0), (1,1), (2,2) on hours 0, 6, 12.
fn diagonal() -> Timeline {
    Timeline::new(
        EntityId(7),
        vec![sample(7, 0.0, 0.0, 0), sample(7, 1.0, 1.0, 6), sample(7, 2.0, 2.0, 12)],
    )
    .unwrap()
}

// ── Timeline ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod timeline {
    use super::*;

    #[test]
    fn empty_is_refused() {
        assert!(Timeline::new(EntityId(1), vec![]).is_none());
    }

    #[test]
    fn new_sorts_stably() {
        let t = Timeline::new(
            EntityId(1),
            vec![sample(1, 2.0, 0.0, 5), sample(1, 0.0, 0.0, 1), sample(1, 1.0, 0.0, 5)],
        )
        .unwrap();
        let lats: Vec<f64> = t.positions().map(|p| p.lat).collect();
        assert_eq!(lats, [0.0, 2.0, 1.0]);
    }

    #[test]
    fn bounds_and_accessors() {
        let t = diagonal();
        assert_eq!(t.len(), 3);
        assert_eq!(t.start_time(), at(0));
        assert_eq!(t.end_time(), at(12));
        assert_eq!(t.position(1), GeoPoint::new(1.0, 1.0));
        assert_eq!(t.position(99), GeoPoint::new(2.0, 2.0));
        assert!(t.sample(3).is_none());
    }

    #[test]
    fn nearest_index_picks_closest_and_earlier_on_tie() {
        let t = diagonal();
        assert_eq!(t.nearest_index(at(-10)), 0);
        assert_eq!(t.nearest_index(at(2)), 0);
        assert_eq!(t.nearest_index(at(3)), 0); // equidistant from 0 and 6
        assert_eq!(t.nearest_index(at(4)), 1);
        assert_eq!(t.nearest_index(at(6)), 1);
        assert_eq!(t.nearest_index(at(100)), 2);
    }

    #[test]
    fn position_at_interpolates_and_clamps() {
        let t = diagonal();
        assert_eq!(t.position_at(at(-1)), GeoPoint::new(0.0, 0.0));
        let mid = t.position_at(at(3));
        assert!((mid.lat - 0.5).abs() < 1e-12 && (mid.lon - 0.5).abs() < 1e-12);
        let later = t.position_at(at(9));
        assert!((later.lat - 1.5).abs() < 1e-12);
        assert_eq!(t.position_at(at(12)), GeoPoint::new(2.0, 2.0));
        assert_eq!(t.position_at(at(50)), GeoPoint::new(2.0, 2.0));
    }

    #[test]
    fn position_at_shared_timestamp_takes_latest() {
        let t = Timeline::new(
            EntityId(1),
            vec![sample(1, 0.0, 0.0, 0), sample(1, 5.0, 5.0, 0), sample(1, 9.0, 9.0, 4)],
        )
        .unwrap();
        assert_eq!(t.position_at(at(0)), GeoPoint::new(5.0, 5.0));
    }
}

// ── TimelineIndex ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod timeline_index {
    use super::*;

    fn mixed() -> Vec<Sample> {
        vec![
            sample(3, 0.3, 0.0, 2),
            sample(1, 0.1, 0.0, 1),
            sample(3, 0.2, 0.0, 1),
            sample(1, 0.0, 0.0, 0),
            sample(2, 9.0, 9.0, 5),
        ]
    }

    #[test]
    fn groups_by_entity_in_time_order() {
        let index = TimelineIndex::build(&mixed());
        assert_eq!(index.len(), 3);
        assert_eq!(index.entities().collect::<Vec<_>>(), [EntityId(1), EntityId(2), EntityId(3)]);
        for timeline in index.iter() {
            assert!(timeline.samples().windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
            assert!(timeline.samples().iter().all(|s| s.entity == timeline.entity()));
        }
        let lats: Vec<f64> = index.get(EntityId(3)).unwrap().positions().map(|p| p.lat).collect();
        assert_eq!(lats, [0.2, 0.3]);
    }

    #[test]
    fn grouping_is_lossless() {
        let samples = mixed();
        let index = TimelineIndex::build(&samples);
        assert_eq!(index.total_samples(), samples.len());
    }

    #[test]
    fn build_is_deterministic() {
        let samples = mixed();
        assert_eq!(TimelineIndex::build(&samples), TimelineIndex::build(&samples));
    }

    #[test]
    fn no_samples_no_entities() {
        let index = TimelineIndex::build(&[]);
        assert!(index.is_empty());
        assert!(!index.contains(EntityId(1)));
        assert_eq!(index, TimelineIndex::empty());
    }
}

// ── OffsetRange ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod offset_range {
    use super::*;

    #[test]
    fn degenerate_range_rejected() {
        assert!(OffsetRange::new(2, 2).is_err());
        assert!(OffsetRange::new(3, -1).is_err());
        assert!(OffsetRange::new(-2, 8).is_ok());
    }

    #[test]
    fn scenario_entity_seven() {
        let range = OffsetRange::new(-2, 2).unwrap();
        let t = diagonal();
        assert_eq!(t.position(range.resolve(-2, t.len())), GeoPoint::new(0.0, 0.0));
        assert_eq!(t.position(range.resolve(0, t.len())), GeoPoint::new(1.0, 1.0));
        assert_eq!(t.position(range.resolve(2, t.len())), GeoPoint::new(2.0, 2.0));
    }

    #[test]
    fn boundaries_map_to_first_and_last() {
        let range = OffsetRange::new(-2, 8).unwrap();
        for len in [2, 3, 10, 57, 1_000] {
            assert_eq!(range.resolve(-2, len), 0);
            assert_eq!(range.resolve(8, len), len - 1);
        }
    }

    #[test]
    fn single_sample_always_zero() {
        let range = OffsetRange::new(-2, 8).unwrap();
        for offset in -2..=8 {
            assert_eq!(range.resolve(offset, 1), 0);
        }
    }

    #[test]
    fn out_of_range_offsets_clamp() {
        let range = OffsetRange::new(-2, 8).unwrap();
        assert_eq!(range.resolve(-50, 11), 0);
        assert_eq!(range.resolve(50, 11), 10);
        assert_eq!(range.resolve(i32::MIN, 11), 0);
        assert_eq!(range.resolve(i32::MAX, 11), 10);
    }

    #[test]
    fn resolve_is_monotone_and_idempotent() {
        let range = OffsetRange::new(-2, 8).unwrap();
        let mut previous = 0;
        for offset in -2..=8 {
            let a = range.resolve(offset, 17);
            let b = range.resolve(offset, 17);
            assert_eq!(a, b);
            assert!(a >= previous);
            previous = a;
        }
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // ratio 0.25 over 3 samples → 0.5 → rounds to 1.
        let range = OffsetRange::new(0, 4).unwrap();
        assert_eq!(range.resolve(1, 3), 1);
    }

    #[test]
    fn select_all_covers_each_entity_independently() {
        let index = TimelineIndex::build(&[
            sample(1, 0.0, 0.0, 0),
            sample(2, 0.0, 0.0, 0),
            sample(2, 1.0, 0.0, 1),
            sample(2, 2.0, 0.0, 2),
        ]);
        let range = OffsetRange::new(0, 2).unwrap();
        let picks = range.select_all(2, &index);
        assert_eq!(picks.len(), 2);
        assert_eq!((picks[0].entity, picks[0].index), (EntityId(1), 0));
        assert_eq!((picks[1].entity, picks[1].index), (EntityId(2), 2));
        assert!(picks.iter().all(|p| p.offset == 2));
    }
}
