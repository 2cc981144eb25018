//! Phase preview handler for the schedule MCP server

use crate::ScheduleServerHandler;
use crate::formatting;
use crate::schedule::{PhaseSet, TouchedFlags, derive_phases};
use crate::validation;
use mcp_attr::Result as McpResult;

impl ScheduleServerHandler {
    /// Runs the phase deriver once over the given form values. Nothing is stored.
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_derive_phases(
        &self,
        primary_start: Option<String>,
        fitting_start: Option<String>,
        fitting_end: Option<String>,
        prep_start: Option<String>,
        prep_end: Option<String>,
        fitting_touched: Option<bool>,
        prep_touched: Option<bool>,
    ) -> McpResult<String> {
        let primary_start = validation::parse_optional_date(primary_start.as_deref())?;
        let current = PhaseSet {
            fitting: validation::parse_phase_dates(
                fitting_start.as_deref(),
                fitting_end.as_deref(),
            )?,
            prep: validation::parse_phase_dates(prep_start.as_deref(), prep_end.as_deref())?,
        };
        let touched = TouchedFlags {
            fitting: fitting_touched.unwrap_or(false),
            prep: prep_touched.unwrap_or(false),
        };

        let derived = derive_phases(primary_start, &current, touched, &self.phase_policy);

        let mut result = match primary_start {
            Some(start) => format!("Phases for shooting starting {}:\n", start),
            None => "No shooting start date; phases left as given:\n".to_string(),
        };
        result.push_str(&formatting::format_phase_set(&derived));
        Ok(result)
    }
}
