//! Save handler for the schedule MCP server

use crate::ScheduleServerHandler;
use crate::formatting;
use crate::schedule::{
    CalendarDate, PhaseDates, Project, ProjectDraft, ScheduleData, find_overlaps,
};
use crate::validation::{self, invalid_params};
use mcp_attr::{Result as McpResult, bail_public};

/// Raw project fields as they arrive from a tool call.
///
/// `None` leaves a field as it is; for text fields `Some("")` clears it.
#[derive(Debug, Clone, Default)]
pub struct ProjectParams {
    pub id: Option<String>,
    pub name: Option<String>,
    pub confirmed: Option<bool>,
    pub primary_start: Option<String>,
    pub primary_end: Option<String>,
    pub fitting_start: Option<String>,
    pub fitting_end: Option<String>,
    pub prep_start: Option<String>,
    pub prep_end: Option<String>,
    pub fitting_touched: Option<bool>,
    pub prep_touched: Option<bool>,
    pub producer: Option<String>,
    pub contact: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub budget: Option<f64>,
    pub team_budget: Option<f64>,
    pub accept_conflicts: Option<bool>,
}

fn merge_phase(
    current: PhaseDates,
    start: Option<&str>,
    end: Option<&str>,
) -> McpResult<PhaseDates> {
    let mut dates = current;
    if start.is_some() {
        dates.start = validation::parse_optional_date(start)?;
    }
    if end.is_some() {
        dates.end = validation::parse_optional_date(end)?;
    }
    Ok(dates)
}

fn set_text(field: &mut Option<String>, value: Option<String>) {
    if let Some(v) = value {
        *field = if v.is_empty() { None } else { Some(v) };
    }
}

impl ScheduleServerHandler {
    /// Replay the tool parameters onto a draft, as the edit form would.
    ///
    /// Returns the draft together with the stored project it edits, if any.
    pub(crate) fn build_draft(
        &self,
        data: &ScheduleData,
        params: &ProjectParams,
    ) -> McpResult<(ProjectDraft, Option<Project>)> {
        let id = params
            .id
            .as_deref()
            .map(validation::normalize_project_id)
            .filter(|id| !id.is_empty());
        let base = id.as_deref().and_then(|id| data.get(id)).cloned();

        let mut draft = base
            .as_ref()
            .map(ProjectDraft::from_project)
            .unwrap_or_default();
        draft.id = id;
        if let Some(ref name) = params.name {
            draft.name = name.trim().to_string();
        }
        draft.confirmed = params
            .confirmed
            .unwrap_or(base.as_ref().map(|b| b.confirmed).unwrap_or(false));

        if params.fitting_start.is_some() || params.fitting_end.is_some() {
            let fitting = merge_phase(
                draft.phases.fitting,
                params.fitting_start.as_deref(),
                params.fitting_end.as_deref(),
            )?;
            draft.set_fitting(fitting);
        }
        if params.prep_start.is_some() || params.prep_end.is_some() {
            let prep = merge_phase(
                draft.phases.prep,
                params.prep_start.as_deref(),
                params.prep_end.as_deref(),
            )?;
            draft.set_prep(prep);
        }
        if let Some(touched) = params.fitting_touched {
            draft.touched.fitting = touched;
        }
        if let Some(touched) = params.prep_touched {
            draft.touched.prep = touched;
        }

        let primary_given = params.primary_start.is_some() || params.primary_end.is_some();
        if base.is_none() || primary_given {
            let start = match params.primary_start.as_deref() {
                Some(s) => validation::parse_optional_date(Some(s))?,
                None => draft.primary_start,
            };
            let end = match params.primary_end.as_deref() {
                Some(s) => validation::parse_optional_date(Some(s))?,
                None => draft.primary_end,
            };
            draft.set_primary(start, end, &self.phase_policy);
        }

        Ok((draft, base))
    }

    /// Derive, validate and check overlaps, then create or update the project.
    /// Conflicts block the save until the caller accepts them.
    pub async fn handle_save(&self, params: ProjectParams) -> McpResult<String> {
        let mut data = self.data.lock().unwrap();
        let (draft, base) = self.build_draft(&data, &params)?;

        if draft.name.is_empty() {
            drop(data);
            bail_public!(_, "Project name is required");
        }
        draft.validate().map_err(invalid_params)?;

        let conflicts = find_overlaps(&draft.overlap_candidate(), data.list());
        let accepted = params.accept_conflicts.unwrap_or(false);
        if !conflicts.is_empty() && !accepted {
            tracing::info!(
                "save of '{}' held back by {} conflict(s)",
                draft.name,
                conflicts.len()
            );
            return Ok(format!(
                "Project not saved. {}\nConfirm with the user, then call save again with accept_conflicts=true to save anyway, or change the dates.",
                formatting::format_conflicts(&conflicts)
            ));
        }

        let previous = data.clone();
        let id = match draft.id.clone() {
            Some(id) => id,
            None => data.generate_project_id(),
        };
        let mut project = draft
            .into_project(&id, base.as_ref(), CalendarDate::today())
            .map_err(invalid_params)?;

        set_text(&mut project.producer, params.producer);
        set_text(&mut project.contact, params.contact);
        set_text(&mut project.city, params.city);
        set_text(&mut project.description, params.description);
        set_text(&mut project.notes, params.notes);
        if let Some(budget) = params.budget {
            project.budget = Some(budget);
        }
        if let Some(team_budget) = params.team_budget {
            project.team_budget = Some(team_budget);
        }

        let summary = formatting::format_phase_set(&project.phase_set());
        let primary = project.primary();
        let action = if base.is_some() {
            data.update(project).map_err(invalid_params)?;
            "updated"
        } else {
            data.create(project).map_err(invalid_params)?;
            "created"
        };

        if let Err(e) = self.commit(&mut data, previous) {
            drop(data);
            bail_public!(_, "Failed to save: {}", e);
        }
        drop(data);
        tracing::info!("project {} {}", id, action);

        let mut result = format!(
            "Project {} {}\nShooting: {}\n{}",
            id, action, primary, summary
        );
        if !conflicts.is_empty() {
            result.push_str(&format!(
                "Saved despite {} conflict(s):\n",
                conflicts.len()
            ));
            for conflict in &conflicts {
                result.push_str(&format!("- {}\n", conflict));
            }
        }
        Ok(result)
    }
}
