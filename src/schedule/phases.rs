//! Phase ranges and the phase deriver
//!
//! A project has three sequential phases. Shooting (the primary range) is
//! entered by the user; Fitting and Preparation are derived from it with
//! fixed offsets unless the user has edited them by hand.

use super::calendar_date::CalendarDate;
use crate::error::{ScheduleError, ScheduleResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three phases of a project, in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Preparation, ends the eve of Fitting by default
    Prep,
    /// Short phase just before shooting
    Fitting,
    /// The anchor range (shooting)
    Primary,
}

impl PhaseKind {
    /// Order in which phases are compared and classified.
    pub const CHECK_ORDER: [PhaseKind; 3] = [PhaseKind::Prep, PhaseKind::Fitting, PhaseKind::Primary];

    pub fn label(&self) -> &'static str {
        match self {
            PhaseKind::Prep => "Preparation",
            PhaseKind::Fitting => "Fitting",
            PhaseKind::Primary => "Shooting",
        }
    }

    /// One-letter marker drawn on calendar cells
    pub fn badge(&self) -> char {
        match self {
            PhaseKind::Prep => 'P',
            PhaseKind::Fitting => 'F',
            PhaseKind::Primary => 'S',
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A closed interval of calendar days.
///
/// `new` enforces `start <= end`; ranges assembled from stored or
/// hand-edited values may still be disordered until validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: CalendarDate,
    pub end: CalendarDate,
}

impl DateRange {
    pub fn new(start: CalendarDate, end: CalendarDate) -> ScheduleResult<Self> {
        if start > end {
            return Err(ScheduleError::OrderViolation(format!(
                "range starts on {} but ends on {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn single_day(day: CalendarDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn contains(&self, day: CalendarDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Closed-interval overlap: ranges that only touch at an endpoint overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        !(self.end < other.start || other.end < self.start)
    }

    pub fn to_display(&self) -> String {
        if self.start == self.end {
            self.start.to_display()
        } else {
            format!("{} to {}", self.start.to_display(), self.end.to_display())
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Possibly incomplete dates of one phase, as held by a form or a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseDates {
    pub start: Option<CalendarDate>,
    pub end: Option<CalendarDate>,
}

impl PhaseDates {
    pub fn new(start: Option<CalendarDate>, end: Option<CalendarDate>) -> Self {
        Self { start, end }
    }

    /// The range, only when both ends are present
    pub fn complete(&self) -> Option<DateRange> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

impl From<DateRange> for PhaseDates {
    fn from(range: DateRange) -> Self {
        Self {
            start: Some(range.start),
            end: Some(range.end),
        }
    }
}

/// Fitting and Preparation values derived from (or kept against) a primary range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseSet {
    pub fitting: PhaseDates,
    pub prep: PhaseDates,
}

/// Which phases the user has edited by hand in the current editing session.
///
/// Never persisted; the caller threads it through each derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchedFlags {
    pub fitting: bool,
    pub prep: bool,
}

/// Offsets and durations used to derive Fitting and Preparation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseOffsetPolicy {
    /// Fitting start relative to the primary start
    pub fitting_offset_days: i64,
    pub fitting_length_days: i64,
    /// Preparation start relative to the Fitting start
    pub prep_offset_from_fitting_days: i64,
    pub prep_length_days: i64,
}

impl Default for PhaseOffsetPolicy {
    fn default() -> Self {
        Self {
            fitting_offset_days: -2,
            fitting_length_days: 1,
            prep_offset_from_fitting_days: -6,
            prep_length_days: 6,
        }
    }
}

impl PhaseOffsetPolicy {
    pub fn fitting_for(&self, primary_start: CalendarDate) -> DateRange {
        let start = primary_start.add_days(self.fitting_offset_days);
        DateRange {
            start,
            end: start.add_days(self.fitting_length_days.max(1) - 1),
        }
    }

    pub fn prep_for(&self, fitting_start: CalendarDate) -> DateRange {
        let start = fitting_start.add_days(self.prep_offset_from_fitting_days);
        DateRange {
            start,
            end: start.add_days(self.prep_length_days.max(1) - 1),
        }
    }
}

/// Derive Fitting and Preparation from the primary start.
///
/// - Without a primary start nothing is computed and `current` is returned.
/// - Fitting is recomputed unless it is touched and already has a start,
///   in which case it is kept verbatim.
/// - Preparation is recomputed from the Fitting start in effect after the
///   step above, unless it is touched and has both a start and an end.
pub fn derive_phases(
    primary_start: Option<CalendarDate>,
    current: &PhaseSet,
    touched: TouchedFlags,
    policy: &PhaseOffsetPolicy,
) -> PhaseSet {
    let Some(primary_start) = primary_start else {
        return *current;
    };

    let (fitting, fitting_start) = match current.fitting.start {
        Some(start) if touched.fitting => (current.fitting, start),
        _ => {
            let range = policy.fitting_for(primary_start);
            (PhaseDates::from(range), range.start)
        }
    };

    let prep = match current.prep.complete() {
        Some(_) if touched.prep => current.prep,
        _ => PhaseDates::from(policy.prep_for(fitting_start)),
    };

    PhaseSet { fitting, prep }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::calendar_date::parse_day;

    fn d(s: &str) -> CalendarDate {
        parse_day(s).unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(d(start), d(end)).unwrap()
    }

    #[test]
    fn test_derive_untouched() {
        let set = derive_phases(
            Some(d("2025-06-10")),
            &PhaseSet::default(),
            TouchedFlags::default(),
            &PhaseOffsetPolicy::default(),
        );
        assert_eq!(set.fitting.complete(), Some(range("2025-06-08", "2025-06-08")));
        assert_eq!(set.prep.complete(), Some(range("2025-06-02", "2025-06-07")));
    }

    #[test]
    fn test_derive_keeps_touched_fitting_and_recomputes_prep() {
        let current = PhaseSet {
            fitting: range("2025-06-05", "2025-06-05").into(),
            prep: range("2025-06-02", "2025-06-07").into(),
        };
        let touched = TouchedFlags {
            fitting: true,
            prep: false,
        };
        let set = derive_phases(
            Some(d("2025-06-10")),
            &current,
            touched,
            &PhaseOffsetPolicy::default(),
        );
        assert_eq!(set.fitting.complete(), Some(range("2025-06-05", "2025-06-05")));
        assert_eq!(set.prep.complete(), Some(range("2025-05-30", "2025-06-04")));
    }

    #[test]
    fn test_derive_overwrites_untouched_existing_values() {
        let current = PhaseSet {
            fitting: range("2025-01-01", "2025-01-03").into(),
            prep: range("2024-12-01", "2024-12-20").into(),
        };
        let set = derive_phases(
            Some(d("2025-06-10")),
            &current,
            TouchedFlags::default(),
            &PhaseOffsetPolicy::default(),
        );
        assert_eq!(set.fitting.complete(), Some(range("2025-06-08", "2025-06-08")));
        assert_eq!(set.prep.complete(), Some(range("2025-06-02", "2025-06-07")));
    }

    #[test]
    fn test_derive_touched_without_value_is_recomputed() {
        let touched = TouchedFlags {
            fitting: true,
            prep: true,
        };
        let set = derive_phases(
            Some(d("2025-06-10")),
            &PhaseSet::default(),
            touched,
            &PhaseOffsetPolicy::default(),
        );
        assert_eq!(set.fitting.complete(), Some(range("2025-06-08", "2025-06-08")));
        assert_eq!(set.prep.complete(), Some(range("2025-06-02", "2025-06-07")));
    }

    #[test]
    fn test_derive_touched_prep_missing_end_is_recomputed() {
        let current = PhaseSet {
            fitting: PhaseDates::default(),
            prep: PhaseDates::new(Some(d("2025-05-01")), None),
        };
        let touched = TouchedFlags {
            fitting: false,
            prep: true,
        };
        let set = derive_phases(
            Some(d("2025-06-10")),
            &current,
            touched,
            &PhaseOffsetPolicy::default(),
        );
        assert_eq!(set.prep.complete(), Some(range("2025-06-02", "2025-06-07")));
    }

    #[test]
    fn test_derive_keeps_touched_fitting_without_end_verbatim() {
        let current = PhaseSet {
            fitting: PhaseDates::new(Some(d("2025-06-07")), None),
            prep: PhaseDates::default(),
        };
        let touched = TouchedFlags {
            fitting: true,
            prep: false,
        };
        let set = derive_phases(
            Some(d("2025-06-10")),
            &current,
            touched,
            &PhaseOffsetPolicy::default(),
        );
        assert_eq!(set.fitting, PhaseDates::new(Some(d("2025-06-07")), None));
        assert_eq!(set.prep.complete(), Some(range("2025-06-01", "2025-06-06")));
    }

    #[test]
    fn test_derive_without_primary_passes_through() {
        let current = PhaseSet {
            fitting: PhaseDates::new(Some(d("2025-06-07")), None),
            prep: PhaseDates::default(),
        };
        let set = derive_phases(
            None,
            &current,
            TouchedFlags::default(),
            &PhaseOffsetPolicy::default(),
        );
        assert_eq!(set, current);
    }

    #[test]
    fn test_custom_policy() {
        let policy = PhaseOffsetPolicy {
            fitting_offset_days: -3,
            fitting_length_days: 2,
            prep_offset_from_fitting_days: -10,
            prep_length_days: 10,
        };
        let set = derive_phases(
            Some(d("2025-03-02")),
            &PhaseSet::default(),
            TouchedFlags::default(),
            &policy,
        );
        assert_eq!(set.fitting.complete(), Some(range("2025-02-27", "2025-02-28")));
        assert_eq!(set.prep.complete(), Some(range("2025-02-17", "2025-02-26")));
    }

    #[test]
    fn test_range_overlap_is_closed() {
        let a = range("2025-01-01", "2025-01-10");
        assert!(a.overlaps(&range("2025-01-10", "2025-01-15")));
        assert!(range("2025-01-10", "2025-01-15").overlaps(&a));
        assert!(!a.overlaps(&range("2025-01-11", "2025-01-15")));
        assert!(a.overlaps(&range("2025-01-03", "2025-01-04")));
    }

    #[test]
    fn test_range_new_rejects_reversed() {
        assert!(matches!(
            DateRange::new(d("2025-01-02"), d("2025-01-01")),
            Err(ScheduleError::OrderViolation(_))
        ));
    }

    #[test]
    fn test_phase_kind_labels() {
        assert_eq!(PhaseKind::Fitting.badge(), 'F');
        assert_eq!(PhaseKind::Primary.to_string(), "Shooting");
    }
}
