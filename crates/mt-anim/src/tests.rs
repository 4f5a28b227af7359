//! Unit tests for mt-anim.

use mt_core::{ArrivalPolicy, EntityId, Frame, GeoPoint, Timestamp};
use mt_samples::Sample;
use mt_timeline::{OffsetRange, TimelineIndex};

use crate::{AnimationDriver, StepParams};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sample(id: u64, lat: f64, lon: f64, h: i64) -> Sample {
    let t = Timestamp::from_unix_secs(1_685_577_600 + h * 3_600).unwrap();
    Sample::new(EntityId(id), GeoPoint::new(lat, lon), t)
}

/// `(id, [(lat, lon)])` → index with one sample per hour.
fn index_of(tracks: &[(u64, &[(f64, f64)])]) -> TimelineIndex {
    let samples: Vec<Sample> = tracks
        .iter()
        .flat_map(|(id, pts)| {
            pts.iter()
                .enumerate()
                .map(move |(h, &(lat, lon))| sample(*id, lat, lon, h as i64))
        })
        .collect();
    TimelineIndex::build(&samples)
}

fn params(speed: f64, policy: ArrivalPolicy) -> StepParams {
    StepParams { speed, epsilon: 1e-4, policy }
}

fn seeded(index: &TimelineIndex, p: StepParams) -> AnimationDriver {
    let mut driver = AnimationDriver::new(p);
    driver.seed(index);
    driver
}

// ── Seeding ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod seeding {
    use super::*;

    #[test]
    fn new_entities_start_on_first_sample() {
        let index = index_of(&[(1, &[(0.0, 0.0), (1.0, 1.0)]), (2, &[(5.0, 5.0)])]);
        let mut driver = AnimationDriver::new(StepParams::default());
        let report = driver.seed(&index);
        assert_eq!(report.added, 2);

        let one = driver.state(EntityId(1)).unwrap();
        assert_eq!(one.current, GeoPoint::new(0.0, 0.0));
        assert_eq!(one.target_index, 1);

        let two = driver.state(EntityId(2)).unwrap();
        assert_eq!(two.current, GeoPoint::new(5.0, 5.0));
        assert_eq!(two.target_index, 0);
    }

    #[test]
    fn reseed_keeps_survivors_and_discards_vanished() {
        let before = index_of(&[(1, &[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]), (2, &[(5.0, 5.0)])]);
        let mut driver = seeded(&before, params(0.5, ArrivalPolicy::Wrap));
        driver.apply_offset(&before, OffsetRange::new(0, 2).unwrap(), 1); // entity 1 → sample 1, target 2
        let moved = driver.state(EntityId(1)).unwrap().current;

        // Entity 1 now has only two samples; entity 2 is gone; entity 3 is new.
        let after = index_of(&[(1, &[(0.0, 0.0), (1.0, 1.0)]), (3, &[(7.0, 7.0)])]);
        let report = driver.seed(&after);
        assert_eq!((report.added, report.kept, report.removed), (1, 1, 1));

        let one = driver.state(EntityId(1)).unwrap();
        assert_eq!(one.current, moved);
        assert_eq!(one.target_index, 1);
        assert!(driver.state(EntityId(2)).is_none());
        assert_eq!(driver.state(EntityId(3)).unwrap().current, GeoPoint::new(7.0, 7.0));
    }

    #[test]
    fn empty_index_clears_everything() {
        let index = index_of(&[(1, &[(0.0, 0.0)])]);
        let mut driver = seeded(&index, StepParams::default());
        let report = driver.seed(&TimelineIndex::empty());
        assert_eq!(report.removed, 1);
        assert!(driver.store().is_empty());
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stepping {
    use super::*;

    #[test]
    fn gap_shrinks_strictly_until_arrival() {
        let index = index_of(&[(1, &[(0.0, 0.0), (1.0, -1.0)])]);
        let mut driver = seeded(&index, params(0.1, ArrivalPolicy::Wrap));
        let target = GeoPoint::new(1.0, -1.0);

        let mut prev = driver.state(EntityId(1)).unwrap().current;
        let mut ticks = 0;
        loop {
            let report = driver.step(&index);
            ticks += 1;
            let state = *driver.state(EntityId(1)).unwrap();
            if report.arrivals == 1 {
                assert_eq!(state.current, target);
                assert_eq!(state.target_index, 0);
                break;
            }
            assert!((target.lat - state.current.lat).abs() < (target.lat - prev.lat).abs());
            assert!((target.lon - state.current.lon).abs() < (target.lon - prev.lon).abs());
            prev = state.current;
            assert!(ticks < 200, "no arrival after {ticks} ticks");
        }
    }

    #[test]
    fn default_speed_arrives_in_bounded_ticks() {
        let index = index_of(&[(1, &[(23.0, -90.0), (24.0, -89.0)])]);
        let mut driver = seeded(&index, StepParams::default());
        let ticks = (1..=10_000).find(|_| driver.step(&index).arrivals == 1);
        assert!(ticks.is_some());
    }

    #[test]
    fn epsilon_below_float_spacing_still_arrives() {
        let index = index_of(&[(1, &[(23.0, -179.0), (24.0, -178.0)])]);
        let p = StepParams { speed: 0.002, epsilon: 1e-15, policy: ArrivalPolicy::Wrap };
        let mut driver = seeded(&index, p);

        let ticks = (1..=50_000).find(|_| driver.step(&index).arrivals == 1);
        assert!(ticks.is_some());
        let state = driver.state(EntityId(1)).unwrap();
        assert_eq!(state.current, GeoPoint::new(24.0, -178.0));
        assert_eq!(state.target_index, 0);
    }

    #[test]
    fn one_advance_per_tick_even_through_coincident_samples() {
        let index = index_of(&[(1, &[(0.0, 0.0), (0.0, 0.0), (0.0, 0.0), (5.0, 5.0)])]);
        let mut driver = seeded(&index, params(0.5, ArrivalPolicy::Wrap));

        assert_eq!(driver.step(&index).arrivals, 1);
        assert_eq!(driver.state(EntityId(1)).unwrap().target_index, 2);
        assert_eq!(driver.step(&index).arrivals, 1);
        assert_eq!(driver.state(EntityId(1)).unwrap().target_index, 3);
        assert_eq!(driver.step(&index).arrivals, 0);
        assert_eq!(driver.state(EntityId(1)).unwrap().target_index, 3);
    }

    #[test]
    fn wrap_loops_back_to_first_sample() {
        let index = index_of(&[(1, &[(0.0, 0.0), (0.00001, 0.0), (0.00002, 0.0)])]);
        let mut driver = seeded(&index, params(0.5, ArrivalPolicy::Wrap));
        let targets: Vec<usize> = (0..4)
            .map(|_| {
                driver.step(&index);
                driver.state(EntityId(1)).unwrap().target_index
            })
            .collect();
        assert_eq!(targets, [2, 0, 1, 2]);
    }

    #[test]
    fn clamp_parks_on_last_sample() {
        let index = index_of(&[(1, &[(0.0, 0.0), (0.00001, 0.0), (0.00002, 0.0)])]);
        let mut driver = seeded(&index, params(0.5, ArrivalPolicy::Clamp));
        assert_eq!(driver.step(&index).arrivals, 1);
        let report = driver.step(&index);
        assert_eq!(report.resting, 1);
        assert_eq!(report.arrivals, 0);
        for _ in 0..5 {
            let report = driver.step(&index);
            assert_eq!(report.resting, 1);
        }
        let state = driver.state(EntityId(1)).unwrap();
        assert_eq!(state.target_index, 2);
        assert_eq!(state.current, GeoPoint::new(0.00002, 0.0));
    }

    #[test]
    fn single_sample_timeline_rests_without_panicking() {
        let index = index_of(&[(1, &[(3.0, 4.0)])]);
        for policy in [ArrivalPolicy::Wrap, ArrivalPolicy::Clamp] {
            let mut driver = seeded(&index, params(0.5, policy));
            for _ in 0..3 {
                let report = driver.step(&index);
                assert_eq!(report.resting, 1);
            }
            assert_eq!(driver.state(EntityId(1)).unwrap().current, GeoPoint::new(3.0, 4.0));
        }
    }

    #[test]
    fn entities_move_independently() {
        let index = index_of(&[(1, &[(0.0, 0.0), (10.0, 0.0)]), (2, &[(0.0, 0.0), (0.0, 20.0)])]);
        let mut driver = seeded(&index, params(0.25, ArrivalPolicy::Wrap));
        let report = driver.step(&index);
        assert_eq!(report.seeking, 2);
        assert_eq!(driver.state(EntityId(1)).unwrap().current, GeoPoint::new(2.5, 0.0));
        assert_eq!(driver.state(EntityId(2)).unwrap().current, GeoPoint::new(0.0, 5.0));
    }

    #[test]
    fn step_drops_entities_missing_from_index() {
        let index = index_of(&[(1, &[(0.0, 0.0)]), (2, &[(1.0, 1.0)])]);
        let mut driver = seeded(&index, StepParams::default());
        let smaller = index_of(&[(2, &[(1.0, 1.0)])]);
        driver.step(&smaller);
        assert!(driver.state(EntityId(1)).is_none());
        assert!(driver.state(EntityId(2)).is_some());
    }
}

// ── Offsets and snapshots ─────────────────────────────────────────────────────

#[cfg(test)]
mod offsets {
    use super::*;

    fn entity_seven() -> TimelineIndex {
        index_of(&[(7, &[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])])
    }

    #[test]
    fn scenario_offset_teleports_snapshot() {
        let index = entity_seven();
        let range = OffsetRange::new(-2, 2).unwrap();
        let mut driver = seeded(&index, StepParams::default());

        let expected = [(-2, (0.0, 0.0), 1), (0, (1.0, 1.0), 2), (2, (2.0, 2.0), 2)];
        for (offset, (lat, lon), target) in expected {
            driver.apply_offset(&index, range, offset);
            let snap = driver.snapshot(Frame(0));
            assert_eq!(snap.get(EntityId(7)), Some(GeoPoint::new(lat, lon)), "offset {offset}");
            assert_eq!(driver.state(EntityId(7)).unwrap().target_index, target);
        }
    }

    #[test]
    fn apply_offset_is_idempotent() {
        let index = entity_seven();
        let range = OffsetRange::new(-2, 2).unwrap();
        let mut driver = seeded(&index, StepParams::default());

        let first = driver.apply_offset(&index, range, 1);
        let state = *driver.state(EntityId(7)).unwrap();
        let second = driver.apply_offset(&index, range, 1);
        assert_eq!(first, second);
        assert_eq!(*driver.state(EntityId(7)).unwrap(), state);
    }

    #[test]
    fn offset_then_step_continues_toward_next_sample() {
        let index = entity_seven();
        let range = OffsetRange::new(-2, 2).unwrap();
        let mut driver = seeded(&index, params(0.5, ArrivalPolicy::Clamp));
        driver.apply_offset(&index, range, 0);
        driver.step(&index);
        assert_eq!(driver.snapshot(Frame(1)).get(EntityId(7)), Some(GeoPoint::new(1.5, 1.5)));
    }

    #[test]
    fn snapshot_is_a_detached_value() {
        let index = entity_seven();
        let mut driver = seeded(&index, params(0.5, ArrivalPolicy::Wrap));
        let before = driver.snapshot(Frame(3));
        driver.step(&index);
        let after = driver.snapshot(Frame(4));
        assert_eq!(before.frame(), Frame(3));
        assert_eq!(before.get(EntityId(7)), Some(GeoPoint::new(0.0, 0.0)));
        assert_eq!(after.get(EntityId(7)), Some(GeoPoint::new(0.5, 0.5)));
        assert_eq!(after.len(), 1);
        assert!(after.get(EntityId(8)).is_none());
    }
}
