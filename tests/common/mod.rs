//! Common test utilities for integration tests

#![allow(dead_code)]

use shootcal_mcp::{Config, ProjectParams, ScheduleServerHandler};
use tempfile::NamedTempFile;

/// Create a test handler with temporary storage
pub fn get_test_handler() -> (ScheduleServerHandler, NamedTempFile) {
    get_test_handler_with_config(&Config::default())
}

pub fn get_test_handler_with_config(config: &Config) -> (ScheduleServerHandler, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let handler = ScheduleServerHandler::new(temp_file.path().to_str().unwrap(), config).unwrap();
    (handler, temp_file)
}

/// Save parameters for a confirmed project with only the shooting range set
pub fn shooting(id: &str, name: &str, start: &str, end: &str) -> ProjectParams {
    ProjectParams {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        confirmed: Some(true),
        primary_start: Some(start.to_string()),
        primary_end: Some(end.to_string()),
        ..Default::default()
    }
}

/// Same as `shooting` but not yet confirmed
pub fn pending(id: &str, name: &str, start: &str, end: &str) -> ProjectParams {
    ProjectParams {
        confirmed: Some(false),
        ..shooting(id, name, start, end)
    }
}
