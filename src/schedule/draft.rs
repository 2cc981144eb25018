//! Edit-form state for a project
//!
//! A draft holds whatever the user has entered so far, including the
//! session-only touched flags. The engine never stores a draft; callers
//! keep it between edits and pass it back in.

use super::calendar_date::CalendarDate;
use super::overlap::OverlapCandidate;
use super::phases::{
    DateRange, PhaseDates, PhaseOffsetPolicy, PhaseSet, TouchedFlags, derive_phases,
};
use super::project::{Project, validate_phase_order};
use crate::error::{ScheduleError, ScheduleResult};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectDraft {
    /// Absent while creating a new project
    pub id: Option<String>,
    pub name: String,
    pub confirmed: bool,
    pub primary_start: Option<CalendarDate>,
    pub primary_end: Option<CalendarDate>,
    pub phases: PhaseSet,
    pub touched: TouchedFlags,
}

impl ProjectDraft {
    /// Start editing an existing project. Touched flags start cleared.
    pub fn from_project(project: &Project) -> Self {
        Self {
            id: Some(project.id.clone()),
            name: project.name.clone(),
            confirmed: project.confirmed,
            primary_start: Some(project.primary_start),
            primary_end: Some(project.primary_end),
            phases: project.phase_set(),
            touched: TouchedFlags::default(),
        }
    }

    /// New shooting range entered; re-derive untouched phases.
    pub fn set_primary(
        &mut self,
        start: Option<CalendarDate>,
        end: Option<CalendarDate>,
        policy: &PhaseOffsetPolicy,
    ) {
        self.primary_start = start;
        self.primary_end = end;
        self.rederive(policy);
    }

    /// Manual Fitting edit; later primary edits will keep it.
    pub fn set_fitting(&mut self, dates: PhaseDates) {
        self.phases.fitting = dates;
        self.touched.fitting = true;
    }

    /// Manual Preparation edit; later primary edits will keep it.
    pub fn set_prep(&mut self, dates: PhaseDates) {
        self.phases.prep = dates;
        self.touched.prep = true;
    }

    pub fn rederive(&mut self, policy: &PhaseOffsetPolicy) {
        self.phases = derive_phases(self.primary_start, &self.phases, self.touched, policy);
    }

    pub fn primary(&self) -> ScheduleResult<DateRange> {
        match (self.primary_start, self.primary_end) {
            (Some(start), Some(end)) => Ok(DateRange { start, end }),
            (None, _) => Err(ScheduleError::MissingRequiredRange(
                "Shooting start date is required".to_string(),
            )),
            (_, None) => Err(ScheduleError::MissingRequiredRange(
                "Shooting end date is required".to_string(),
            )),
        }
    }

    /// Phases as they would be saved.
    ///
    /// A Fitting with a start but no end is a single day. Preparation gets
    /// no such default.
    pub fn effective_phases(&self) -> PhaseSet {
        let mut phases = self.phases;
        if let (Some(start), None) = (phases.fitting.start, phases.fitting.end) {
            phases.fitting.end = Some(start);
        }
        phases
    }

    /// Values handed to the overlap detector before saving
    pub fn overlap_candidate(&self) -> OverlapCandidate {
        let phases = self.effective_phases();
        OverlapCandidate {
            id: self.id.clone(),
            confirmed: self.confirmed,
            prep: phases.prep.complete(),
            fitting: phases.fitting.complete(),
            primary: self.primary().ok(),
        }
    }

    /// Check the shooting range is present and every phase is in order.
    /// Problems are reported, never corrected.
    pub fn validate(&self) -> ScheduleResult<DateRange> {
        let primary = self.primary()?;
        let phases = self.effective_phases();
        validate_phase_order(primary, phases.fitting, phases.prep)?;
        Ok(primary)
    }

    /// Validate and produce the record to persist under `id`.
    ///
    /// `base` carries the stored metadata when editing an existing project.
    pub fn into_project(
        self,
        id: &str,
        base: Option<&Project>,
        today: CalendarDate,
    ) -> ScheduleResult<Project> {
        let primary = self.validate()?;
        let phases = self.effective_phases();

        let mut project = match base {
            Some(existing) => existing.clone(),
            None => Project::new(id, "", primary, today),
        };
        project.name = self.name.trim().to_string();
        project.confirmed = self.confirmed;
        project.primary_start = primary.start;
        project.primary_end = primary.end;
        project.set_phases(&phases);
        project.updated_at = today;
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::calendar_date::parse_day;

    fn d(s: &str) -> CalendarDate {
        parse_day(s).unwrap()
    }

    #[test]
    fn test_form_session_keeps_manual_fitting() {
        let policy = PhaseOffsetPolicy::default();
        let mut draft = ProjectDraft {
            name: "Feature".to_string(),
            ..Default::default()
        };

        draft.set_primary(Some(d("2025-06-10")), Some(d("2025-06-20")), &policy);
        assert_eq!(draft.phases.fitting.start, Some(d("2025-06-08")));

        draft.set_fitting(PhaseDates::new(Some(d("2025-06-05")), Some(d("2025-06-05"))));
        draft.set_primary(Some(d("2025-06-12")), Some(d("2025-06-22")), &policy);

        assert_eq!(draft.phases.fitting.start, Some(d("2025-06-05")));
        assert_eq!(draft.phases.prep.start, Some(d("2025-05-30")));
        assert_eq!(draft.phases.prep.end, Some(d("2025-06-04")));
    }

    #[test]
    fn test_clearing_primary_keeps_phases() {
        let policy = PhaseOffsetPolicy::default();
        let mut draft = ProjectDraft::default();
        draft.set_primary(Some(d("2025-06-10")), Some(d("2025-06-20")), &policy);
        let before = draft.phases;
        draft.set_primary(None, None, &policy);
        assert_eq!(draft.phases, before);
    }

    #[test]
    fn test_into_project_requires_primary() {
        let draft = ProjectDraft {
            name: "No dates".to_string(),
            primary_start: Some(d("2025-06-10")),
            ..Default::default()
        };
        let err = draft.into_project("project-1", None, d("2025-01-01")).unwrap_err();
        assert!(matches!(err, ScheduleError::MissingRequiredRange(_)));
    }

    #[test]
    fn test_into_project_fitting_defaults_to_single_day_but_prep_does_not() {
        let draft = ProjectDraft {
            name: "Short".to_string(),
            confirmed: true,
            primary_start: Some(d("2025-06-10")),
            primary_end: Some(d("2025-06-12")),
            phases: PhaseSet {
                fitting: PhaseDates::new(Some(d("2025-06-09")), None),
                prep: PhaseDates::new(Some(d("2025-06-01")), None),
            },
            ..Default::default()
        };
        let project = draft.into_project("project-7", None, d("2025-01-01")).unwrap();
        assert_eq!(project.id, "project-7");
        assert_eq!(project.fitting_end, Some(d("2025-06-09")));
        assert_eq!(project.prep_start, Some(d("2025-06-01")));
        assert_eq!(project.prep_end, None);
    }

    #[test]
    fn test_into_project_rejects_fitting_after_primary() {
        let draft = ProjectDraft {
            name: "Late fitting".to_string(),
            primary_start: Some(d("2025-06-10")),
            primary_end: Some(d("2025-06-12")),
            phases: PhaseSet {
                fitting: PhaseDates::new(Some(d("2025-06-11")), Some(d("2025-06-11"))),
                prep: PhaseDates::default(),
            },
            ..Default::default()
        };
        let err = draft.into_project("project-1", None, d("2025-01-01")).unwrap_err();
        assert!(matches!(err, ScheduleError::OrderViolation(_)));
    }

    #[test]
    fn test_into_project_preserves_metadata_on_edit() {
        let mut stored = Project::new(
            "spot",
            "Spot",
            DateRange::new(d("2025-06-10"), d("2025-06-12")).unwrap(),
            d("2025-01-01"),
        );
        stored.city = Some("Madrid".to_string());

        let mut draft = ProjectDraft::from_project(&stored);
        draft.name = "Spot v2".to_string();
        draft.set_primary(Some(d("2025-07-01")), Some(d("2025-07-03")), &PhaseOffsetPolicy::default());

        let saved = draft.into_project("spot", Some(&stored), d("2025-02-01")).unwrap();
        assert_eq!(saved.id, "spot");
        assert_eq!(saved.name, "Spot v2");
        assert_eq!(saved.city.as_deref(), Some("Madrid"));
        assert_eq!(saved.created_at, d("2025-01-01"));
        assert_eq!(saved.updated_at, d("2025-02-01"));
        assert_eq!(saved.fitting_start, Some(d("2025-06-29")));
    }

    #[test]
    fn test_overlap_candidate_uses_effective_phases() {
        let draft = ProjectDraft {
            id: Some("a".to_string()),
            confirmed: true,
            primary_start: Some(d("2025-06-10")),
            primary_end: Some(d("2025-06-12")),
            phases: PhaseSet {
                fitting: PhaseDates::new(Some(d("2025-06-08")), None),
                prep: PhaseDates::new(Some(d("2025-06-01")), None),
            },
            ..Default::default()
        };
        let candidate = draft.overlap_candidate();
        assert_eq!(
            candidate.fitting,
            Some(DateRange::single_day(d("2025-06-08")))
        );
        assert_eq!(candidate.prep, None);
    }
}
