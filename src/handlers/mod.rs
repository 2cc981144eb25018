//! MCP tool handlers for the schedule server
//!
//! This module contains the implementation of all MCP tool handlers.
//! Each handler is in a separate file for better organization.

pub mod conflicts;
pub mod day;
pub mod delete;
pub mod derive;
pub mod list;
pub mod month;
pub mod save;
