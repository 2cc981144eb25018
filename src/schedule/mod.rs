//! Scheduling domain models and the phase/conflict engine
//!
//! Everything here is a pure, synchronous transform over values passed in
//! by the caller. Submodules:
//! - `calendar_date`: timezone-less day values and day arithmetic
//! - `phases`: phase ranges and the Fitting/Preparation deriver
//! - `project`: the stored project record and day classification
//! - `draft`: edit-form state with session-only touched flags
//! - `overlap`: like-for-like phase conflict detection
//! - `grid`: month grid layout with per-day buckets
//! - `schedule_data`: the project collection

pub mod calendar_date;
mod draft;
mod grid;
mod overlap;
mod phases;
mod project;
mod schedule_data;

// Re-export all public types
pub use calendar_date::{CalendarDate, add_days_iso, each_day, is_between_inclusive, parse_day};
pub use draft::ProjectDraft;
pub use grid::{
    DEFAULT_DAY_CAPACITY, GridLayout, GridPolicy, MonthGrid, MonthStats, bucket_day, build_grid,
};
pub use overlap::{ConflictDescription, OverlapCandidate, find_overlaps};
pub use phases::{
    DateRange, PhaseDates, PhaseKind, PhaseOffsetPolicy, PhaseSet, TouchedFlags, derive_phases,
};
pub use project::{Project, TimelineTab, classify_timeline, validate_phase_order};
pub use schedule_data::{FORMAT_VERSION, ScheduleData};
