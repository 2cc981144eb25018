//! Month grid for the calendar view
//!
//! The grid is padded out to whole weeks and each day holds the projects
//! whose visible span covers it. How many projects a cell shows is a
//! presentation choice (`GridPolicy::day_capacity`), not a scheduling rule.

use super::calendar_date::{CalendarDate, each_day};
use super::project::Project;
use chrono::Weekday;
use std::collections::BTreeMap;

/// Default number of projects drawn in one day cell
pub const DEFAULT_DAY_CAPACITY: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridLayout {
    /// As many weeks as the month touches (4 to 6)
    #[default]
    Weeks,
    /// Always 6 weeks (42 days) from the week-aligned month start
    SixWeeks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPolicy {
    pub week_start: Weekday,
    pub layout: GridLayout,
    /// Maximum projects per day cell, confirmed first
    pub day_capacity: usize,
}

impl Default for GridPolicy {
    fn default() -> Self {
        Self {
            week_start: Weekday::Mon,
            layout: GridLayout::Weeks,
            day_capacity: DEFAULT_DAY_CAPACITY,
        }
    }
}

/// Day counts over the whole grid, before the per-day cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthStats {
    /// Days no project covers
    pub free: usize,
    /// Days at least one project covers
    pub busy: usize,
    /// Days two or more projects cover
    pub overlap: usize,
}

#[derive(Debug, Clone)]
pub struct MonthGrid<'a> {
    pub month_start: CalendarDate,
    pub month_end: CalendarDate,
    /// Ascending, always a positive multiple of 7
    pub days: Vec<CalendarDate>,
    /// Capped bucket of projects drawn on each day
    pub per_day: BTreeMap<CalendarDate, Vec<&'a Project>>,
    /// How many covering projects did not fit in each day's bucket
    pub hidden: BTreeMap<CalendarDate, usize>,
    legend: Vec<&'a Project>,
    stats: MonthStats,
}

impl<'a> MonthGrid<'a> {
    pub fn in_month(&self, day: CalendarDate) -> bool {
        self.month_start <= day && day <= self.month_end
    }

    pub fn projects_on(&self, day: CalendarDate) -> &[&'a Project] {
        self.per_day.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn hidden_on(&self, day: CalendarDate) -> usize {
        self.hidden.get(&day).copied().unwrap_or(0)
    }

    /// Every project visible somewhere on the grid, in input order,
    /// including ones dropped from full day cells.
    pub fn legend(&self) -> &[&'a Project] {
        &self.legend
    }

    pub fn stats(&self) -> MonthStats {
        self.stats
    }

    /// Days split into rows of seven
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDate]> {
        self.days.chunks(7)
    }
}

/// Confirmed projects first (up to `capacity`), then pending ones in the
/// remaining slots. Both groups keep their input order.
///
/// Returns the bucket and the number of projects left out.
pub fn bucket_day<'a>(covering: &[&'a Project], capacity: usize) -> (Vec<&'a Project>, usize) {
    let confirmed = covering.iter().filter(|p| p.confirmed);
    let pending = covering.iter().filter(|p| !p.confirmed);
    let bucket: Vec<&'a Project> = confirmed.chain(pending).take(capacity).copied().collect();
    let hidden = covering.len() - bucket.len();
    (bucket, hidden)
}

/// Build the calendar grid of the month containing `anchor`.
pub fn build_grid<'a>(
    anchor: CalendarDate,
    projects: &'a [Project],
    policy: &GridPolicy,
) -> MonthGrid<'a> {
    let month_start = anchor.start_of_month();
    let month_end = anchor.end_of_month();
    let grid_start = month_start.start_of_calendar_grid(policy.week_start);
    let grid_end = match policy.layout {
        GridLayout::Weeks => month_end.end_of_calendar_grid(policy.week_start),
        GridLayout::SixWeeks => grid_start.add_days(6 * 7 - 1),
    };
    let days = each_day(grid_start, grid_end);

    let mut per_day = BTreeMap::new();
    let mut hidden = BTreeMap::new();
    let mut stats = MonthStats::default();
    for day in &days {
        let covering: Vec<&'a Project> = projects.iter().filter(|p| p.covers(*day)).collect();
        match covering.len() {
            0 => stats.free += 1,
            1 => stats.busy += 1,
            _ => {
                stats.busy += 1;
                stats.overlap += 1;
            }
        }
        let (bucket, dropped) = bucket_day(&covering, policy.day_capacity);
        if dropped > 0 {
            hidden.insert(*day, dropped);
        }
        per_day.insert(*day, bucket);
    }

    let legend = projects
        .iter()
        .filter(|p| {
            let span = p.total_range();
            span.start <= grid_end && grid_start <= span.end
        })
        .collect();

    MonthGrid {
        month_start,
        month_end,
        days,
        per_day,
        hidden,
        legend,
        stats,
    }
}
