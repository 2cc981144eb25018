//! Validation helper functions for the schedule MCP server
//!
//! Turns raw tool parameters into domain values and domain errors into
//! `INVALID_PARAMS` errors the client can show to the user.

use crate::error::ScheduleError;
use crate::schedule::{CalendarDate, PhaseDates, ScheduleData, TimelineTab, parse_day};
use mcp_attr::Result as McpResult;

/// Wrap a domain error as a public `INVALID_PARAMS` error
pub fn invalid_params(err: ScheduleError) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(err.to_string(), true)
}

/// Parse a required `YYYY-MM-DD` parameter
pub fn parse_date_param(date_str: &str) -> McpResult<CalendarDate> {
    parse_day(date_str.trim()).map_err(invalid_params)
}

/// Parse an optional date parameter. Absent or empty means no date.
pub fn parse_optional_date(date_str: Option<&str>) -> McpResult<Option<CalendarDate>> {
    match date_str.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date_param(s).map(Some),
    }
}

/// Parse the start/end pair of one phase
pub fn parse_phase_dates(start: Option<&str>, end: Option<&str>) -> McpResult<PhaseDates> {
    Ok(PhaseDates::new(
        parse_optional_date(start)?,
        parse_optional_date(end)?,
    ))
}

/// Parse and validate a timeline tab filter
pub fn parse_tab_filter(tab_str: &str) -> McpResult<TimelineTab> {
    tab_str.trim().parse::<TimelineTab>().map_err(|msg| {
        mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(msg, true)
    })
}

/// Format an error message for an unknown project ID with the IDs that do exist
pub fn format_unknown_project_error(project_id: &str, data: &ScheduleData) -> String {
    if data.is_empty() {
        format!(
            "Project '{}' does not exist. No projects have been saved yet.",
            project_id
        )
    } else {
        let ids: Vec<&str> = data.list().iter().map(|p| p.id.as_str()).collect();
        format!(
            "Project '{}' does not exist.\nAvailable projects: {}",
            project_id,
            ids.join(", ")
        )
    }
}

/// Trim surrounding whitespace from a client-chosen project ID
pub fn normalize_project_id(project_id: &str) -> String {
    project_id.trim().to_string()
}
