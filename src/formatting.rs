//! Formatting helper functions for the schedule MCP server
//!
//! This module contains filtering and text rendering for projects, derived
//! phases, conflict lists and the calendar views.

use crate::schedule::{
    CalendarDate, ConflictDescription, MonthGrid, PhaseDates, PhaseKind, PhaseSet, Project,
    TimelineTab, classify_timeline,
};
use chrono::Weekday;

/// Keep only projects in the given timeline tab
pub fn apply_tab_filter(projects: &mut Vec<&Project>, tab: TimelineTab, today: CalendarDate) {
    projects.retain(|p| classify_timeline(p, today) == tab);
}

/// Apply keyword filtering (case-insensitive search in id, name, producer and city)
pub fn apply_keyword_filter(projects: &mut Vec<&Project>, keyword: &str) {
    let keyword_lower = keyword.to_lowercase();
    let matches = |field: Option<&str>| {
        field
            .map(|f| f.to_lowercase().contains(&keyword_lower))
            .unwrap_or(false)
    };
    projects.retain(|p| {
        matches(Some(p.id.as_str()))
            || matches(Some(p.name.as_str()))
            || matches(p.producer.as_deref())
            || matches(p.city.as_deref())
    });
}

fn format_phase_dates(dates: &PhaseDates) -> String {
    match (dates.start, dates.end) {
        (Some(start), Some(end)) => format!("{} .. {}", start, end),
        (Some(start), None) => format!("{} .. (no end)", start),
        (None, Some(end)) => format!("(no start) .. {}", end),
        (None, None) => "not set".to_string(),
    }
}

/// Derived Fitting and Preparation, as previewed in the edit form
pub fn format_phase_set(phases: &PhaseSet) -> String {
    format!(
        "Preparation: {}\nFitting: {}\n",
        format_phase_dates(&phases.prep),
        format_phase_dates(&phases.fitting)
    )
}

/// Format projects into a display string
pub fn format_projects(projects: &[&Project], today: CalendarDate) -> String {
    if projects.is_empty() {
        return "No projects found".to_string();
    }

    let mut result = format!("Found {} project(s):\n\n", projects.len());
    for project in projects {
        let status = if project.confirmed {
            "confirmed"
        } else {
            "pending"
        };
        result.push_str(&format!(
            "- [{}] {} ({}, {})\n",
            project.id,
            project.name,
            status,
            classify_timeline(project, today).label()
        ));
        result.push_str(&format!("  Shooting: {}\n", project.primary()));
        if !project.fitting_dates().is_empty() {
            result.push_str(&format!(
                "  Fitting: {}\n",
                format_phase_dates(&project.fitting_dates())
            ));
        }
        if !project.prep_dates().is_empty() {
            result.push_str(&format!(
                "  Preparation: {}\n",
                format_phase_dates(&project.prep_dates())
            ));
        }
        if let Some(ref producer) = project.producer {
            result.push_str(&format!("  Producer: {}\n", producer));
        }
        if let Some(ref city) = project.city {
            result.push_str(&format!("  City: {}\n", city));
        }
        if let Some(ref notes) = project.notes {
            result.push_str(&format!("  Notes: {}\n", notes));
        }
    }

    result
}

/// Conflict warning shown before a save is confirmed
pub fn format_conflicts(conflicts: &[ConflictDescription]) -> String {
    if conflicts.is_empty() {
        return "No conflicts with confirmed projects".to_string();
    }

    let mut result = format!("Found {} conflict(s):\n", conflicts.len());
    for conflict in conflicts {
        result.push_str(&format!("- {}\n", conflict));
    }
    result
}

fn weekday_short(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

fn badge(phase: Option<PhaseKind>) -> char {
    phase.map(|p| p.badge()).unwrap_or('-')
}

/// Month grid: day-number rows, then each occupied day with its projects
pub fn format_month(grid: &MonthGrid<'_>) -> String {
    let title = grid.month_start.naive().format("%B %Y").to_string();
    let mut result = format!("{}\n\n", title);

    if let Some(first_week) = grid.weeks().next() {
        let header: Vec<&str> = first_week.iter().map(|d| weekday_short(d.weekday())).collect();
        result.push_str(&header.join(" "));
        result.push('\n');
    }
    for week in grid.weeks() {
        let cells: Vec<String> = week
            .iter()
            .map(|d| {
                if grid.projects_on(*d).is_empty() {
                    format!("{:>2}", d.day())
                } else {
                    format!("{:>2}*", d.day())
                }
            })
            .collect();
        result.push_str(&cells.join(" "));
        result.push('\n');
    }

    result.push('\n');
    for day in &grid.days {
        let bucket = grid.projects_on(*day);
        if bucket.is_empty() {
            continue;
        }
        let entries: Vec<String> = bucket
            .iter()
            .map(|p| {
                let marker = if p.confirmed { "" } else { " (pending)" };
                format!("[{}] {}{}", badge(p.phase_for_day(*day)), p.name, marker)
            })
            .collect();
        let outside = if grid.in_month(*day) { "" } else { " (outside month)" };
        result.push_str(&format!("{}{}: {}", day, outside, entries.join(", ")));
        let hidden = grid.hidden_on(*day);
        if hidden > 0 {
            result.push_str(&format!(" +{} more", hidden));
        }
        result.push('\n');
    }

    let stats = grid.stats();
    result.push_str(&format!(
        "\nFree {} | Busy {} | Overlapping {}\n",
        stats.free, stats.busy, stats.overlap
    ));

    if !grid.legend().is_empty() {
        result.push_str("\nProjects this month:\n");
        for project in grid.legend() {
            result.push_str(&format!("- [{}] {}\n", project.id, project.name));
        }
    }

    result
}

/// Every project covering `day` with the phase it is in on that day
pub fn format_day(day: CalendarDate, projects: &[&Project]) -> String {
    if projects.is_empty() {
        return format!("No projects on {}", day);
    }

    let mut result = format!("{} project(s) on {}:\n", projects.len(), day);
    for project in projects {
        let phase = project
            .phase_for_day(day)
            .map(|p| p.label())
            .unwrap_or("between phases");
        let status = if project.confirmed {
            "confirmed"
        } else {
            "pending"
        };
        result.push_str(&format!(
            "- [{}] {} ({}): {}\n",
            project.id, project.name, status, phase
        ));
    }
    result
}
