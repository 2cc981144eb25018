//! Shooting Calendar MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for planning
//! film production projects. Each project has a Shooting range plus Fitting
//! and Preparation phases that are derived from it, and the server warns
//! before a confirmed project's phase collides with the same phase of
//! another confirmed project.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `ScheduleServerHandler` - Handles MCP protocol communication
//! - **Domain Layer**: `schedule` module - Phase derivation, overlap detection and the month grid
//! - **Persistence Layer**: `storage` module - File-based TOML storage
//!
//! # Example
//!
//! ```no_run
//! use shootcal_mcp::{Config, ScheduleServerHandler};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = ScheduleServerHandler::new("shootcal.toml", &Config::default())?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

mod config;
mod error;
pub mod formatting;
mod handlers;
pub mod schedule;
mod storage;
pub mod validation;

use anyhow::Result;
use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use std::sync::Mutex;

// Re-export commonly used types
pub use config::{CalendarConfig, Config, PhasesConfig};
pub use error::{ScheduleError, ScheduleResult};
pub use handlers::save::ProjectParams;
pub use schedule::{
    CalendarDate, ConflictDescription, DateRange, GridLayout, GridPolicy, PhaseKind,
    PhaseOffsetPolicy, Project, ProjectDraft, ScheduleData, TimelineTab,
};
pub use storage::Storage;

/// MCP Server handler for production scheduling
///
/// Holds the project collection in memory and persists every change to a
/// TOML file. The phase and grid policies come from the configuration file
/// and stay fixed for the life of the server.
pub struct ScheduleServerHandler {
    pub(crate) data: Mutex<ScheduleData>,
    pub(crate) storage: Storage,
    pub(crate) phase_policy: PhaseOffsetPolicy,
    pub(crate) grid_policy: GridPolicy,
}

impl ScheduleServerHandler {
    /// Create a new schedule server handler
    ///
    /// # Arguments
    /// * `storage_path` - Path to the project data file (TOML format)
    /// * `config` - Phase offsets and calendar layout settings
    ///
    /// # Example
    /// ```no_run
    /// # use shootcal_mcp::{Config, ScheduleServerHandler};
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = ScheduleServerHandler::new("shootcal.toml", &Config::default())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(storage_path: &str, config: &Config) -> Result<Self> {
        let storage = Storage::new(storage_path);
        let data = Mutex::new(storage.load()?);
        Ok(Self {
            data,
            storage,
            phase_policy: config.phase_policy()?,
            grid_policy: config.grid_policy()?,
        })
    }

    /// Write `data` to disk. On failure `previous` is put back so memory
    /// keeps matching the file.
    fn commit(&self, data: &mut ScheduleData, previous: ScheduleData) -> Result<()> {
        if let Err(e) = self.storage.save(data) {
            *data = previous;
            return Err(e);
        }
        Ok(())
    }
}

/// Shooting calendar for a film production company.
///
/// Every project has a **Shooting** range (required). Two earlier phases are
/// derived from it unless set by hand:
/// - **Fitting**: by default the single day two days before Shooting starts
/// - **Preparation**: by default the six days ending the day before Fitting
///
/// Confirmed projects may not silently share a phase with another confirmed
/// project: Shooting is compared with Shooting, Fitting with Fitting and
/// Preparation with Preparation. Pending projects are never checked.
///
/// Dates are always YYYY-MM-DD. Project IDs are any string (e.g., "beer-spot-2025");
/// when omitted on save, one is generated ("project-1", "project-2", ...).
#[mcp_server]
impl McpServer for ScheduleServerHandler {
    /// **Review**: List projects, optionally by timeline tab and keyword.
    /// **Tabs**: current (confirmed, shooting now), upcoming (confirmed, not started),
    /// past (confirmed, finished), pending (not yet confirmed). Empty=all.
    #[tool]
    async fn list(
        &self,
        /// Tab filter: current/upcoming/past/pending (optional)
        tab: Option<String>,
        /// Keyword: case-insensitive match on id, name, producer or city (optional)
        keyword: Option<String>,
    ) -> McpResult<String> {
        self.handle_list(tab, keyword).await
    }

    /// **Preview**: Derive Fitting and Preparation from a Shooting start date without saving.
    /// **Touched**: Set fitting_touched/prep_touched=true to keep the dates you pass
    /// for that phase instead of recomputing them.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn derive_phases(
        &self,
        /// Shooting start date: YYYY-MM-DD (optional; without it nothing is derived)
        primary_start: Option<String>,
        /// Current Fitting start: YYYY-MM-DD (optional)
        fitting_start: Option<String>,
        /// Current Fitting end: YYYY-MM-DD (optional)
        fitting_end: Option<String>,
        /// Current Preparation start: YYYY-MM-DD (optional)
        prep_start: Option<String>,
        /// Current Preparation end: YYYY-MM-DD (optional)
        prep_end: Option<String>,
        /// Keep the given Fitting dates (optional, default false)
        fitting_touched: Option<bool>,
        /// Keep the given Preparation dates (optional, default false)
        prep_touched: Option<bool>,
    ) -> McpResult<String> {
        self.handle_derive_phases(
            primary_start,
            fitting_start,
            fitting_end,
            prep_start,
            prep_end,
            fitting_touched,
            prep_touched,
        )
        .await
    }

    /// **Check**: Report which phases of a prospective project collide with confirmed projects.
    /// Nothing is saved. Phases left out are derived from the Shooting dates.
    /// Pass id when checking an edit so the project is not compared with itself.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn check_conflicts(
        &self,
        /// Shooting start: YYYY-MM-DD
        primary_start: String,
        /// Shooting end: YYYY-MM-DD
        primary_end: String,
        /// ID of the project being edited (optional)
        id: Option<String>,
        /// Confirmed: pending projects never conflict (optional, default true here)
        confirmed: Option<bool>,
        /// Fitting start: YYYY-MM-DD (optional)
        fitting_start: Option<String>,
        /// Fitting end: YYYY-MM-DD (optional; a start alone means one day)
        fitting_end: Option<String>,
        /// Preparation start: YYYY-MM-DD (optional)
        prep_start: Option<String>,
        /// Preparation end: YYYY-MM-DD (optional)
        prep_end: Option<String>,
    ) -> McpResult<String> {
        let params = ProjectParams {
            id,
            confirmed: Some(confirmed.unwrap_or(true)),
            primary_start: Some(primary_start),
            primary_end: Some(primary_end),
            fitting_start,
            fitting_end,
            prep_start,
            prep_end,
            ..Default::default()
        };
        self.handle_check_conflicts(params).await
    }

    /// **Save**: Create a project, or edit the one with the given id.
    /// **Phases**: Fitting/Preparation are derived from Shooting unless you pass them
    /// (or set fitting_touched/prep_touched=true to keep the stored ones).
    /// **Conflicts**: A confirmed project that collides with another is NOT saved unless
    /// accept_conflicts=true. Review the returned conflicts with the user first.
    /// **Tip**: Use ""(empty string) to clear optional fields.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn save(
        &self,
        /// ID: any string (optional; generated for new projects)
        id: Option<String>,
        /// Name: required for new projects
        name: Option<String>,
        /// Confirmed: true once the production is booked (optional; new projects start pending)
        confirmed: Option<bool>,
        /// Shooting start: YYYY-MM-DD (required for new projects)
        primary_start: Option<String>,
        /// Shooting end: YYYY-MM-DD (required for new projects)
        primary_end: Option<String>,
        /// Fitting start: YYYY-MM-DD (optional)
        fitting_start: Option<String>,
        /// Fitting end: YYYY-MM-DD (optional; a start alone means one day)
        fitting_end: Option<String>,
        /// Preparation start: YYYY-MM-DD (optional)
        prep_start: Option<String>,
        /// Preparation end: YYYY-MM-DD (optional)
        prep_end: Option<String>,
        /// Keep the current Fitting when Shooting dates change (optional)
        fitting_touched: Option<bool>,
        /// Keep the current Preparation when Shooting dates change (optional)
        prep_touched: Option<bool>,
        /// Producer (optional)
        producer: Option<String>,
        /// Contact person or phone (optional)
        contact: Option<String>,
        /// City (optional)
        city: Option<String>,
        /// Description (optional)
        description: Option<String>,
        /// Notes: Markdown details (optional)
        notes: Option<String>,
        /// Budget (optional)
        budget: Option<f64>,
        /// Team budget (optional)
        team_budget: Option<f64>,
        /// Save even if conflicts were found (optional, default false)
        accept_conflicts: Option<bool>,
    ) -> McpResult<String> {
        let params = ProjectParams {
            id,
            name,
            confirmed,
            primary_start,
            primary_end,
            fitting_start,
            fitting_end,
            prep_start,
            prep_end,
            fitting_touched,
            prep_touched,
            producer,
            contact,
            city,
            description,
            notes,
            budget,
            team_budget,
            accept_conflicts,
        };
        self.handle_save(params).await
    }

    /// **Delete**: Permanently remove a project.
    #[tool]
    async fn delete(
        &self,
        /// ID of project to delete
        id: String,
    ) -> McpResult<String> {
        self.handle_delete(id).await
    }

    /// **Calendar**: Month view. Each day lists the projects on it with a phase badge
    /// ([P] Preparation, [F] Fitting, [S] Shooting), followed by free/busy/overlapping counts.
    #[tool]
    async fn month(
        &self,
        /// Any date in the month: YYYY-MM-DD (optional, default today)
        anchor: Option<String>,
    ) -> McpResult<String> {
        self.handle_month(anchor).await
    }

    /// **Day**: Every project on one date with the phase it is in that day.
    #[tool]
    async fn day(
        &self,
        /// Date: YYYY-MM-DD
        date: String,
    ) -> McpResult<String> {
        self.handle_day(date).await
    }
}
