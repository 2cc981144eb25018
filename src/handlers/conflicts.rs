//! Conflict check handler for the schedule MCP server

use super::save::ProjectParams;
use crate::ScheduleServerHandler;
use crate::formatting;
use crate::schedule::find_overlaps;
use mcp_attr::Result as McpResult;

impl ScheduleServerHandler {
    /// Builds the candidate exactly as `save` would and reports its overlaps.
    pub async fn handle_check_conflicts(&self, params: ProjectParams) -> McpResult<String> {
        let data = self.data.lock().unwrap();
        let (draft, _) = self.build_draft(&data, &params)?;

        let candidate = draft.overlap_candidate();
        if !candidate.confirmed {
            return Ok("Pending projects are not checked for conflicts".to_string());
        }

        let conflicts = find_overlaps(&candidate, data.list());
        Ok(formatting::format_conflicts(&conflicts))
    }
}
