//! Property tests for the scheduling invariants.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use schedwise_core::{
    assign, displace, find_collisions, triage, ClockTime, EnergyProfile, SchedulingPolicy,
    SkipReason, Task, TimeRange,
};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap()
}

fn at(minutes: u32) -> ClockTime {
    ClockTime::from_minutes(minutes).unwrap()
}

/// Interval starting at `start` lasting `len` minutes, clamped to the day.
fn interval(start: u32, len: u32) -> TimeRange {
    let start = start.min(1439);
    TimeRange::new(at(start), at((start + len).min(1440)))
}

fn arb_profile() -> impl Strategy<Value = EnergyProfile> {
    (
        prop::collection::vec(0..=100i32, 24),
        0u32..23,
        1u32..=24,
        0i32..400,
    )
        .prop_map(|(curve, start, span, budget)| {
            let end = (start + span).min(24).max(start + 1);
            EnergyProfile::default()
                .with_curve(curve)
                .with_window(start, end)
                .with_budget(budget)
        })
}

fn arb_candidates() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec((0..20i32, 0..120i32, 1..=16u32), 0..12).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (priority, energy, quarters))| {
                Task::new(format!("c{i}"), "candidate")
                    .with_priority(priority)
                    .with_energy(energy)
                    .with_duration((quarters * 15) as i32)
            })
            .collect()
    })
}

fn arb_fixed() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec((0u32..1440, 5u32..180), 0..6).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (start, len))| {
                Task::new(format!("f{i}"), "fixed").with_schedule(day(), interval(start, len))
            })
            .filter(|t| t.validate().is_ok())
            .collect()
    })
}

fn pair(a: &str, b: &str) -> BTreeSet<String> {
    [a.to_string(), b.to_string()].into_iter().collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Placed tasks never overlap anything else on the day and stay inside the window.
    #[test]
    fn assignment_introduces_no_overlaps(
        profile in arb_profile(),
        candidates in arb_candidates(),
        fixed in arb_fixed(),
    ) {
        let mut tasks = fixed.clone();
        tasks.extend(candidates);
        let out = assign(&tasks, &profile, day(), &SchedulingPolicy::default()).unwrap();

        let window_start = at(profile.start_hour * 60);
        let window_end = at(profile.end_hour * 60);
        for p in &out.placements {
            prop_assert!(p.range.start >= window_start);
            prop_assert!(p.range.end <= window_end);
            for other in out.tasks.iter().filter(|t| t.id != p.task_id) {
                if let Some(r) = other.occupies(day()) {
                    prop_assert!(!p.range.overlaps(&r), "{} overlaps {}", p.task_id, other.id);
                }
            }
        }

        // Pre-existing records come back untouched.
        for f in &fixed {
            prop_assert!(out.tasks.contains(f));
        }
    }

    /// Committed energy never exceeds the starting budget.
    #[test]
    fn assignment_respects_budget(profile in arb_profile(), candidates in arb_candidates()) {
        let out = assign(&candidates, &profile, day(), &SchedulingPolicy::default()).unwrap();
        prop_assert!(out.energy_committed() <= profile.remaining_energy);
        prop_assert_eq!(out.remaining_energy, profile.remaining_energy - out.energy_committed());
        prop_assert!(out.remaining_energy >= 0);
        prop_assert_eq!(out.placements.len() + out.skipped.len(), candidates.len());
    }

    /// Placements follow priority order, and each slot has enough energy for its task.
    #[test]
    fn assignment_follows_priority_and_energy_fit(
        profile in arb_profile(),
        candidates in arb_candidates(),
    ) {
        let policy = SchedulingPolicy::default();
        let out = assign(&candidates, &profile, day(), &policy).unwrap();
        let by_id: HashMap<&str, &Task> = candidates.iter().map(|t| (t.id.as_str(), t)).collect();

        let scores: Vec<i32> = out
            .placements
            .iter()
            .map(|p| by_id[p.task_id.as_str()].priority_score)
            .collect();
        prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]));

        for p in &out.placements {
            let task = by_id[p.task_id.as_str()];
            prop_assert_eq!(p.range.duration_minutes() as i32, task.time_required);
            prop_assert!(p.fit_score - task.estimated_energy_cost >= -policy.energy_tolerance);
            prop_assert_eq!(p.fit_score, profile.energy_at(p.range.start.hour(), policy.fallback_energy));
        }

        for s in &out.skipped {
            if let SkipReason::InsufficientEnergy { cost, available } = s.reason {
                prop_assert!(cost > available);
            }
        }
    }

    /// Same input, same plan.
    #[test]
    fn assignment_is_deterministic(profile in arb_profile(), candidates in arb_candidates()) {
        let policy = SchedulingPolicy::default();
        let a = assign(&candidates, &profile, day(), &policy).unwrap();
        let b = assign(&candidates, &profile, day(), &policy).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Shifted tasks keep their duration, chain from the urgent end and never overlap it.
    #[test]
    fn displacement_preserves_durations_and_clears_urgent(
        fixed in arb_fixed(),
        urgent_start in 0u32..1380,
        urgent_len in 15u32..240,
    ) {
        let urgent = Task::new("urgent", "urgent").with_schedule(day(), interval(urgent_start, urgent_len));
        let urgent_range = urgent.range().unwrap();
        let out = displace(&urgent, &fixed).unwrap();

        let mut cursor = urgent_range.end;
        for s in &out.shifts {
            prop_assert_eq!(s.to.duration_minutes(), s.from.duration_minutes());
            prop_assert_eq!(s.to.start, cursor);
            prop_assert!(!s.to.overlaps(&urgent_range));
            cursor = s.to.end;
        }

        for t in &out.tasks {
            if t.id == "urgent" {
                continue;
            }
            let before = fixed.iter().find(|f| f.id == t.id).unwrap();
            let moved = out.shift_for(&t.id).is_some() || out.overflowed.contains(&t.id);
            if !moved {
                prop_assert_eq!(t, before);
            }
            if let Some(r) = t.occupies(day()) {
                prop_assert!(!r.overlaps(&urgent_range), "{} still overlaps urgent", t.id);
            }
        }
        prop_assert_eq!(out.tasks.iter().filter(|t| t.id == "urgent").count(), 1);
    }

    /// Every new collision a shift causes is reported, and nothing else is.
    #[test]
    fn displacement_flags_every_secondary_collision(
        fixed in arb_fixed(),
        urgent_start in 0u32..1380,
        urgent_len in 15u32..240,
    ) {
        let urgent = Task::new("urgent", "urgent").with_schedule(day(), interval(urgent_start, urgent_len));
        let out = displace(&urgent, &fixed).unwrap();

        let flagged: BTreeSet<BTreeSet<String>> = out
            .secondary_collisions
            .iter()
            .map(|c| pair(&c.first, &c.second))
            .collect();
        let involving_shift: BTreeSet<BTreeSet<String>> = find_collisions(&out.tasks, day())
            .iter()
            .filter(|c| out.shift_for(&c.first).is_some() || out.shift_for(&c.second).is_some())
            .map(|c| pair(&c.first, &c.second))
            .collect();
        prop_assert_eq!(flagged, involving_shift);
    }

    /// Triage only ever adds the two bonuses and is stable at a fixed instant.
    #[test]
    fn triage_bonuses_and_idempotence(
        specs in prop::collection::vec(
            (0..50i32, prop::option::of(0i64..30), prop::option::of(-72i64..120), any::<bool>()),
            0..10,
        ),
    ) {
        let tasks: Vec<Task> = specs
            .into_iter()
            .enumerate()
            .map(|(i, (priority, days_since, hours_to_due, scheduled))| {
                let mut t = Task::new(format!("t{i}"), "x").with_priority(priority);
                if let Some(d) = days_since {
                    t = t.with_last_triage(now() - Duration::days(d) - Duration::minutes(1));
                }
                if let Some(h) = hours_to_due {
                    t = t.with_due_date(now() + Duration::hours(h));
                }
                if scheduled {
                    t = t.with_schedule(day(), interval(600, 60));
                }
                t
            })
            .collect();

        let policy = SchedulingPolicy::default();
        let once = triage(&tasks, now(), &policy);
        for (before, after) in tasks.iter().zip(&once) {
            if before.is_scheduled {
                prop_assert_eq!(before, after);
                continue;
            }
            let bonus = after.priority_score - before.priority_score;
            prop_assert!([0, 1, 3, 4].contains(&bonus));
            prop_assert_eq!(after.last_triage_date, Some(now()));

            let stale = before.last_triage_date.is_some_and(|l| now() - l > Duration::days(7));
            prop_assert_eq!(bonus == 1 || bonus == 4, stale);

            let due_soon = before
                .due_date
                .is_some_and(|d| d > now() && d - now() < Duration::hours(48));
            if due_soon && before.last_triage_date.is_none() {
                prop_assert!(bonus >= 3);
            }
            if !due_soon {
                prop_assert!(bonus < 3);
            }
        }

        let twice = triage(&once, now(), &policy);
        prop_assert_eq!(once, twice);
    }
}
