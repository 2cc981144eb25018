//! Month view handler for the schedule MCP server

use crate::ScheduleServerHandler;
use crate::formatting;
use crate::schedule::{CalendarDate, build_grid};
use crate::validation;
use mcp_attr::Result as McpResult;

impl ScheduleServerHandler {
    pub async fn handle_month(&self, anchor: Option<String>) -> McpResult<String> {
        let anchor = validation::parse_optional_date(anchor.as_deref())?
            .unwrap_or_else(CalendarDate::today);

        let data = self.data.lock().unwrap();
        let grid = build_grid(anchor, data.list(), &self.grid_policy);
        Ok(formatting::format_month(&grid))
    }
}
