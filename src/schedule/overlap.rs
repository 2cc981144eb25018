//! Overlap detection between confirmed projects
//!
//! Phases are compared like-for-like only: Preparation against
//! Preparation, Fitting against Fitting, Shooting against Shooting.
//! Results are advisory; nothing here blocks a save.

use super::phases::{DateRange, PhaseKind};
use super::project::Project;
use std::fmt;

/// The values of a project about to be saved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverlapCandidate {
    /// Absent for a project that has not been stored yet
    pub id: Option<String>,
    pub confirmed: bool,
    pub prep: Option<DateRange>,
    pub fitting: Option<DateRange>,
    pub primary: Option<DateRange>,
}

impl OverlapCandidate {
    pub fn phase(&self, kind: PhaseKind) -> Option<DateRange> {
        match kind {
            PhaseKind::Prep => self.prep,
            PhaseKind::Fitting => self.fitting,
            PhaseKind::Primary => self.primary,
        }
    }
}

impl From<&Project> for OverlapCandidate {
    fn from(project: &Project) -> Self {
        Self {
            id: Some(project.id.clone()),
            confirmed: project.confirmed,
            prep: project.phase(PhaseKind::Prep),
            fitting: project.phase(PhaseKind::Fitting),
            primary: project.phase(PhaseKind::Primary),
        }
    }
}

/// One phase of the candidate sharing at least one day with the same
/// phase of another confirmed project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictDescription {
    pub phase: PhaseKind,
    pub other_id: String,
    pub other_name: String,
    pub candidate_range: DateRange,
    pub other_range: DateRange,
}

impl fmt::Display for ConflictDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} overlaps with \"{}\": {} vs {}",
            self.phase,
            self.other_name,
            self.candidate_range.to_display(),
            self.other_range.to_display()
        )
    }
}

/// Every like-for-like phase overlap between `candidate` and `existing`.
///
/// - A pending candidate gets no conflicts at all.
/// - Pending projects and the candidate's own stored record are skipped.
/// - A phase is compared only when both sides have it complete.
///
/// Conflicts come out in `existing` order, and for each project in
/// Preparation, Fitting, Shooting order.
pub fn find_overlaps(candidate: &OverlapCandidate, existing: &[Project]) -> Vec<ConflictDescription> {
    if !candidate.confirmed {
        return Vec::new();
    }

    let mut conflicts = Vec::new();
    for other in existing {
        if !other.confirmed || candidate.id.as_deref() == Some(other.id.as_str()) {
            continue;
        }
        for kind in PhaseKind::CHECK_ORDER {
            let (Some(mine), Some(theirs)) = (candidate.phase(kind), other.phase(kind)) else {
                continue;
            };
            if mine.overlaps(&theirs) {
                conflicts.push(ConflictDescription {
                    phase: kind,
                    other_id: other.id.clone(),
                    other_name: other.name.clone(),
                    candidate_range: mine,
                    other_range: theirs,
                });
            }
        }
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::calendar_date::{CalendarDate, parse_day};

    fn d(s: &str) -> CalendarDate {
        parse_day(s).unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(d(start), d(end)).unwrap()
    }

    fn confirmed(id: &str, start: &str, end: &str) -> Project {
        let mut p = Project::new(id, &id.to_uppercase(), range(start, end), d("2025-01-01"));
        p.confirmed = true;
        p
    }

    #[test]
    fn test_touching_endpoints_conflict() {
        let a = confirmed("a", "2025-01-01", "2025-01-10");
        let b = confirmed("b", "2025-01-10", "2025-01-15");
        let conflicts = find_overlaps(&OverlapCandidate::from(&b), &[a.clone()]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].phase, PhaseKind::Primary);
        assert_eq!(conflicts[0].other_id, "a");

        let c = confirmed("c", "2025-01-11", "2025-01-15");
        assert!(find_overlaps(&OverlapCandidate::from(&c), &[a]).is_empty());
    }

    #[test]
    fn test_pending_candidate_never_conflicts() {
        let a = confirmed("a", "2025-01-01", "2025-01-10");
        let mut b = confirmed("b", "2025-01-01", "2025-01-10");
        b.confirmed = false;
        assert!(find_overlaps(&OverlapCandidate::from(&b), &[a]).is_empty());
    }

    #[test]
    fn test_pending_others_and_self_are_skipped() {
        let mut pending = confirmed("p", "2025-01-01", "2025-01-10");
        pending.confirmed = false;
        let me = confirmed("me", "2025-01-01", "2025-01-10");
        let conflicts = find_overlaps(&OverlapCandidate::from(&me), &[pending, me.clone()]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_missing_phases_are_not_open_ended() {
        let mut a = confirmed("a", "2025-03-01", "2025-03-05");
        a.fitting_start = Some(d("2025-02-27"));
        a.fitting_end = Some(d("2025-02-27"));

        let mut b = confirmed("b", "2025-04-01", "2025-04-05");
        b.fitting_start = Some(d("2025-02-27"));
        // No fitting end on b: the fitting pairing is skipped

        assert!(find_overlaps(&OverlapCandidate::from(&b), &[a]).is_empty());
    }

    #[test]
    fn test_order_is_per_project_then_phase() {
        let mut a = confirmed("a", "2025-06-10", "2025-06-20");
        a.prep_start = Some(d("2025-06-02"));
        a.prep_end = Some(d("2025-06-07"));
        a.fitting_start = Some(d("2025-06-08"));
        a.fitting_end = Some(d("2025-06-08"));
        let b = confirmed("b", "2025-06-15", "2025-06-16");
        let existing = vec![a.clone(), b];

        let mut cand = a.clone();
        cand.id = "new".to_string();
        let conflicts = find_overlaps(&OverlapCandidate::from(&cand), &existing);

        let summary: Vec<(String, PhaseKind)> = conflicts
            .iter()
            .map(|c| (c.other_id.clone(), c.phase))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("a".to_string(), PhaseKind::Prep),
                ("a".to_string(), PhaseKind::Fitting),
                ("a".to_string(), PhaseKind::Primary),
                ("b".to_string(), PhaseKind::Primary),
            ]
        );
    }

    #[test]
    fn test_candidate_without_id_is_checked_against_everyone() {
        let a = confirmed("a", "2025-01-01", "2025-01-10");
        let candidate = OverlapCandidate {
            id: None,
            confirmed: true,
            primary: Some(range("2025-01-05", "2025-01-06")),
            ..Default::default()
        };
        assert_eq!(find_overlaps(&candidate, &[a]).len(), 1);
    }

    #[test]
    fn test_conflict_display() {
        let a = confirmed("a", "2025-01-01", "2025-01-10");
        let b = confirmed("b", "2025-01-10", "2025-01-10");
        let conflicts = find_overlaps(&OverlapCandidate::from(&b), &[a]);
        assert_eq!(
            conflicts[0].to_string(),
            "Shooting overlaps with \"A\": 10 Jan 2025 vs 01 Jan 2025 to 10 Jan 2025"
        );
    }
}
