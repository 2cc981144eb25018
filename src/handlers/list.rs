//! List handler for the schedule MCP server

use crate::ScheduleServerHandler;
use crate::formatting;
use crate::schedule::CalendarDate;
use crate::validation;
use mcp_attr::Result as McpResult;

impl ScheduleServerHandler {
    /// Handles list/filter operations - applies filters and formats results for display.
    pub async fn handle_list(
        &self,
        tab: Option<String>,
        keyword: Option<String>,
    ) -> McpResult<String> {
        let tab_filter = match tab.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(tab_str) => Some(validation::parse_tab_filter(tab_str)?),
        };

        let today = CalendarDate::today();
        let data = self.data.lock().unwrap();
        let mut projects: Vec<_> = data.list().iter().collect();

        if let Some(tab) = tab_filter {
            formatting::apply_tab_filter(&mut projects, tab, today);
        }

        if let Some(ref keyword_filter) = keyword {
            formatting::apply_keyword_filter(&mut projects, keyword_filter);
        }

        projects.sort_by_key(|p| (p.total_range().start, p.primary_start));
        Ok(formatting::format_projects(&projects, today))
    }
}
