use super::calendar_date::CalendarDate;
use super::phases::{DateRange, PhaseDates, PhaseKind, PhaseSet};
use crate::error::{ScheduleError, ScheduleResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A film-production project as stored by the project collection.
///
/// Shooting (`primary_start..=primary_end`) is always present. Fitting and
/// Preparation may be absent or partially filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier (e.g., "project-3", "spring-campaign")
    pub id: String,
    /// Display name, shown in conflict warnings and on calendar cells
    pub name: String,
    /// Confirmed projects take part in conflict checks; pending ones do not
    #[serde(default)]
    pub confirmed: bool,
    pub primary_start: CalendarDate,
    pub primary_end: CalendarDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitting_start: Option<CalendarDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitting_end: Option<CalendarDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_start: Option<CalendarDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_end: Option<CalendarDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Internal notes in Markdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_budget: Option<f64>,
    pub created_at: CalendarDate,
    pub updated_at: CalendarDate,
}

impl Project {
    /// Minimal project with only the shooting range set
    pub fn new(id: &str, name: &str, primary: DateRange, today: CalendarDate) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            confirmed: false,
            primary_start: primary.start,
            primary_end: primary.end,
            fitting_start: None,
            fitting_end: None,
            prep_start: None,
            prep_end: None,
            producer: None,
            contact: None,
            city: None,
            description: None,
            notes: None,
            budget: None,
            team_budget: None,
            created_at: today,
            updated_at: today,
        }
    }

    pub fn primary(&self) -> DateRange {
        DateRange {
            start: self.primary_start,
            end: self.primary_end,
        }
    }

    pub fn fitting_dates(&self) -> PhaseDates {
        PhaseDates::new(self.fitting_start, self.fitting_end)
    }

    pub fn prep_dates(&self) -> PhaseDates {
        PhaseDates::new(self.prep_start, self.prep_end)
    }

    pub fn phase_set(&self) -> PhaseSet {
        PhaseSet {
            fitting: self.fitting_dates(),
            prep: self.prep_dates(),
        }
    }

    pub fn set_phases(&mut self, phases: &PhaseSet) {
        self.fitting_start = phases.fitting.start;
        self.fitting_end = phases.fitting.end;
        self.prep_start = phases.prep.start;
        self.prep_end = phases.prep.end;
    }

    /// The range of a phase, only when both of its ends are set
    pub fn phase(&self, kind: PhaseKind) -> Option<DateRange> {
        match kind {
            PhaseKind::Prep => self.prep_dates().complete(),
            PhaseKind::Fitting => self.fitting_dates().complete(),
            PhaseKind::Primary => Some(self.primary()),
        }
    }

    /// Span in which the project is visible on a calendar.
    ///
    /// Starts at the Preparation start when one is set, otherwise at the
    /// shooting start, and always ends with shooting.
    pub fn total_range(&self) -> DateRange {
        DateRange {
            start: self.prep_start.unwrap_or(self.primary_start),
            end: self.primary_end,
        }
    }

    pub fn covers(&self, day: CalendarDate) -> bool {
        self.total_range().contains(day)
    }

    /// Phase covering `day`, if any.
    ///
    /// When hand-edited phases intersect, Preparation wins over Fitting and
    /// Fitting wins over Shooting. Days between phases belong to none.
    pub fn phase_for_day(&self, day: CalendarDate) -> Option<PhaseKind> {
        PhaseKind::CHECK_ORDER
            .into_iter()
            .find(|kind| self.phase(*kind).is_some_and(|range| range.contains(day)))
    }

    pub fn validate(&self) -> ScheduleResult<()> {
        validate_phase_order(self.primary(), self.fitting_dates(), self.prep_dates())
    }

    pub fn timeline_tab(&self, today: CalendarDate) -> TimelineTab {
        classify_timeline(self, today)
    }
}

/// Check that every date can be stored, every range is ordered and no
/// phase starts after a phase it should precede. Nothing is corrected.
pub fn validate_phase_order(
    primary: DateRange,
    fitting: PhaseDates,
    prep: PhaseDates,
) -> ScheduleResult<()> {
    let days = [
        Some(primary.start),
        Some(primary.end),
        fitting.start,
        fitting.end,
        prep.start,
        prep.end,
    ];
    if let Some(day) = days.into_iter().flatten().find(|d| !d.is_supported()) {
        return Err(ScheduleError::OutOfRange(day.to_iso()));
    }

    if primary.start > primary.end {
        return Err(ScheduleError::OrderViolation(format!(
            "Shooting starts on {} after it ends on {}",
            primary.start, primary.end
        )));
    }

    for (kind, dates) in [(PhaseKind::Fitting, fitting), (PhaseKind::Prep, prep)] {
        match (dates.start, dates.end) {
            (None, Some(end)) => {
                return Err(ScheduleError::MissingRequiredRange(format!(
                    "{} ends on {} but has no start",
                    kind, end
                )));
            }
            (Some(start), Some(end)) if start > end => {
                return Err(ScheduleError::OrderViolation(format!(
                    "{} starts on {} after it ends on {}",
                    kind, start, end
                )));
            }
            _ => {}
        }
    }

    if let Some(fitting_start) = fitting.start
        && fitting_start > primary.start
    {
        return Err(ScheduleError::OrderViolation(format!(
            "Fitting starts on {} after Shooting starts on {}",
            fitting_start, primary.start
        )));
    }

    if let Some(prep_start) = prep.start {
        if let Some(fitting_start) = fitting.start
            && prep_start > fitting_start
        {
            return Err(ScheduleError::OrderViolation(format!(
                "Preparation starts on {} after Fitting starts on {}",
                prep_start, fitting_start
            )));
        }
        if prep_start > primary.start {
            return Err(ScheduleError::OrderViolation(format!(
                "Preparation starts on {} after Shooting starts on {}",
                prep_start, primary.start
            )));
        }
    }

    Ok(())
}

/// Home-screen grouping of projects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimelineTab {
    /// Confirmed and running today
    Current,
    /// Confirmed and starting after today
    Upcoming,
    /// Confirmed and finished before today
    Past,
    /// Not confirmed yet, regardless of dates
    Pending,
}

impl TimelineTab {
    pub fn label(&self) -> &'static str {
        match self {
            TimelineTab::Current => "current",
            TimelineTab::Upcoming => "upcoming",
            TimelineTab::Past => "past",
            TimelineTab::Pending => "pending",
        }
    }
}

impl FromStr for TimelineTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current" => Ok(TimelineTab::Current),
            "upcoming" => Ok(TimelineTab::Upcoming),
            "past" => Ok(TimelineTab::Past),
            "pending" => Ok(TimelineTab::Pending),
            _ => Err(format!(
                "Invalid tab '{}'. Valid options are: current, upcoming, past, pending",
                s
            )),
        }
    }
}

pub fn classify_timeline(project: &Project, today: CalendarDate) -> TimelineTab {
    if !project.confirmed {
        return TimelineTab::Pending;
    }
    let span = project.total_range();
    if span.start > today {
        TimelineTab::Upcoming
    } else if span.end < today {
        TimelineTab::Past
    } else {
        TimelineTab::Current
    }
}
