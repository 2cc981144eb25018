//! Engine behaviour through the public `schedule` API

use chrono::Weekday;
use shootcal_mcp::schedule::{
    CalendarDate, DateRange, GridLayout, GridPolicy, OverlapCandidate, PhaseDates, PhaseKind,
    PhaseOffsetPolicy, PhaseSet, Project, TouchedFlags, add_days_iso, bucket_day, build_grid,
    derive_phases, each_day, find_overlaps, parse_day,
};

fn d(s: &str) -> CalendarDate {
    parse_day(s).unwrap()
}

fn confirmed(id: &str, start: &str, end: &str) -> Project {
    let mut p = Project::new(id, id, DateRange::new(d(start), d(end)).unwrap(), d("2025-01-01"));
    p.confirmed = true;
    p
}

#[test]
fn test_iso_round_trip_and_day_arithmetic() {
    for s in ["2024-02-29", "2025-01-01", "2025-12-31", "1999-03-28"] {
        let day = d(s);
        assert_eq!(day.to_iso(), s);
        assert_eq!(day.add_days(0), day);
        for n in [1, 7, 31, 365, -400] {
            assert_eq!(day.add_days(n).add_days(-n), day);
        }
    }
    assert_eq!(add_days_iso("2025-02-28", 1).unwrap(), "2025-03-01");
    assert_eq!(each_day(d("2025-06-10"), d("2025-06-10")), vec![d("2025-06-10")]);
    assert!(each_day(d("2025-06-11"), d("2025-06-10")).is_empty());
}

#[test]
fn test_grid_is_whole_weeks_covering_the_month() {
    let layouts = [GridLayout::Weeks, GridLayout::SixWeeks];
    let starts = [Weekday::Mon, Weekday::Sun, Weekday::Sat];
    for month in 1..=12 {
        let anchor = CalendarDate::from_ymd(2025, month, 15).unwrap();
        for layout in layouts {
            for week_start in starts {
                let policy = GridPolicy {
                    week_start,
                    layout,
                    ..Default::default()
                };
                let grid = build_grid(anchor, &[], &policy);
                assert!(!grid.days.is_empty());
                assert_eq!(grid.days.len() % 7, 0);
                assert_eq!(grid.days[0].weekday(), week_start);
                assert!(grid.days[0] <= anchor.start_of_month());
                assert!(anchor.end_of_month() <= *grid.days.last().unwrap());
                if layout == GridLayout::SixWeeks {
                    assert_eq!(grid.days.len(), 42);
                }
            }
        }
    }
}

#[test]
fn test_derivation_scenarios() {
    let policy = PhaseOffsetPolicy::default();
    let derived = derive_phases(
        Some(d("2025-06-10")),
        &PhaseSet::default(),
        TouchedFlags::default(),
        &policy,
    );
    assert_eq!(derived.fitting.complete(), Some(DateRange::single_day(d("2025-06-08"))));
    assert_eq!(
        derived.prep.complete(),
        Some(DateRange::new(d("2025-06-02"), d("2025-06-07")).unwrap())
    );

    let manual = PhaseSet {
        fitting: PhaseDates::new(Some(d("2025-06-05")), Some(d("2025-06-05"))),
        prep: derived.prep,
    };
    let touched = TouchedFlags {
        fitting: true,
        prep: false,
    };
    let rederived = derive_phases(Some(d("2025-06-10")), &manual, touched, &policy);
    assert_eq!(rederived.fitting, manual.fitting);
    assert_eq!(
        rederived.prep.complete(),
        Some(DateRange::new(d("2025-05-30"), d("2025-06-04")).unwrap())
    );
}

#[test]
fn test_touching_shooting_ranges_conflict_once() {
    let existing = vec![confirmed("a", "2025-01-01", "2025-01-10")];

    let touching = OverlapCandidate {
        confirmed: true,
        primary: Some(DateRange::new(d("2025-01-10"), d("2025-01-15")).unwrap()),
        ..Default::default()
    };
    let conflicts = find_overlaps(&touching, &existing);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].phase, PhaseKind::Primary);
    assert_eq!(conflicts[0].other_id, "a");

    let apart = OverlapCandidate {
        primary: Some(DateRange::new(d("2025-01-11"), d("2025-01-15")).unwrap()),
        ..touching.clone()
    };
    assert!(find_overlaps(&apart, &existing).is_empty());

    let pending = OverlapCandidate {
        confirmed: false,
        ..touching
    };
    assert!(find_overlaps(&pending, &existing).is_empty());
}

#[test]
fn test_gap_day_has_no_phase() {
    let mut p = confirmed("a", "2025-06-10", "2025-06-20");
    p.prep_start = Some(d("2025-06-02"));
    p.prep_end = Some(d("2025-06-07"));
    p.fitting_start = Some(d("2025-06-08"));
    p.fitting_end = Some(d("2025-06-08"));

    assert_eq!(p.phase_for_day(d("2025-06-09")), None);
    assert!(p.covers(d("2025-06-09")));
    assert_eq!(p.phase_for_day(d("2025-06-02")), Some(PhaseKind::Prep));
    assert_eq!(p.phase_for_day(d("2025-06-08")), Some(PhaseKind::Fitting));
    assert_eq!(p.phase_for_day(d("2025-06-20")), Some(PhaseKind::Primary));
}

#[test]
fn test_busy_day_shows_first_four_confirmed() {
    let projects: Vec<Project> = (1..=5)
        .map(|i| confirmed(&format!("p{}", i), "2025-06-10", "2025-06-10"))
        .collect();

    let grid = build_grid(d("2025-06-01"), &projects, &GridPolicy::default());
    let bucket = grid.projects_on(d("2025-06-10"));
    let ids: Vec<&str> = bucket.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["p1", "p2", "p3", "p4"]);
    assert_eq!(grid.hidden_on(d("2025-06-10")), 1);
    assert_eq!(grid.legend().len(), 5);

    let covering: Vec<&Project> = projects.iter().collect();
    let (bucket, hidden) = bucket_day(&covering, 10);
    assert_eq!(bucket.len(), 5);
    assert_eq!(hidden, 0);
}
