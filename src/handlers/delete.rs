//! Delete handler for the schedule MCP server

use crate::ScheduleServerHandler;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl ScheduleServerHandler {
    pub async fn handle_delete(&self, id: String) -> McpResult<String> {
        let id = validation::normalize_project_id(&id);
        let mut data = self.data.lock().unwrap();
        let previous = data.clone();

        let removed = match data.delete(&id) {
            Ok(project) => project,
            Err(_) => {
                let error_msg = validation::format_unknown_project_error(&id, &data);
                drop(data);
                bail_public!(_, "{}", error_msg);
            }
        };

        if let Err(e) = self.commit(&mut data, previous) {
            drop(data);
            bail_public!(_, "Failed to save: {}", e);
        }
        drop(data);
        tracing::info!("project {} deleted", removed.id);

        Ok(format!("Deleted project {} ({})", removed.id, removed.name))
    }
}
