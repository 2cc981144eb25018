use super::project::Project;
use crate::error::{ScheduleError, ScheduleResult};
use serde::{Deserialize, Serialize};

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

/// All stored projects.
///
/// This is the persistence collaborator of the scheduling engine: the
/// engine reads `list()`, the MCP handlers create, update and delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleData {
    #[serde(default = "default_format_version")]
    pub format_version: u32,

    /// Counter for generating unique project IDs
    #[serde(default)]
    pub project_counter: u32,

    /// Projects in insertion order, which keeps TOML diffs stable
    #[serde(default)]
    pub(crate) projects: Vec<Project>,
}

fn default_format_version() -> u32 {
    FORMAT_VERSION
}

impl Default for ScheduleData {
    fn default() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            project_counter: 0,
            projects: Vec::new(),
        }
    }
}

impl ScheduleData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate an ID not used by any stored project
    pub fn generate_project_id(&mut self) -> String {
        loop {
            self.project_counter += 1;
            let id = format!("project-{}", self.project_counter);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    pub fn list(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn create(&mut self, project: Project) -> ScheduleResult<()> {
        if self.get(&project.id).is_some() {
            return Err(ScheduleError::DuplicateId(project.id));
        }
        self.projects.push(project);
        Ok(())
    }

    /// Replace the stored project with the same ID, keeping its position
    pub fn update(&mut self, project: Project) -> ScheduleResult<()> {
        match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(slot) => {
                *slot = project;
                Ok(())
            }
            None => Err(ScheduleError::NotFound(project.id)),
        }
    }

    pub fn delete(&mut self, id: &str) -> ScheduleResult<Project> {
        match self.projects.iter().position(|p| p.id == id) {
            Some(pos) => Ok(self.projects.remove(pos)),
            None => Err(ScheduleError::NotFound(id.to_string())),
        }
    }
}
