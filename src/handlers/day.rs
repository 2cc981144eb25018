//! Day view handler for the schedule MCP server

use crate::ScheduleServerHandler;
use crate::formatting;
use crate::validation;
use mcp_attr::Result as McpResult;

impl ScheduleServerHandler {
    /// Lists every project whose overall span covers the date.
    pub async fn handle_day(&self, date: String) -> McpResult<String> {
        let day = validation::parse_date_param(&date)?;

        let data = self.data.lock().unwrap();
        let mut projects: Vec<_> = data.list().iter().filter(|p| p.covers(day)).collect();
        // Confirmed first, same as the calendar cells
        projects.sort_by_key(|p| !p.confirmed);
        Ok(formatting::format_day(day, &projects))
    }
}
