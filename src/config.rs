//! Configuration loading for the schedule server.
//!
//! Every setting is optional; a missing file or section means defaults.
//!
//! ```toml
//! [phases]
//! fitting_offset_days = -2
//! fitting_length_days = 1
//! prep_offset_from_fitting_days = -6
//! prep_length_days = 6
//!
//! [calendar]
//! week_start = "monday"
//! layout = "weeks"      # or "six_weeks"
//! day_capacity = 4
//! ```

use crate::schedule::{GridLayout, GridPolicy, PhaseOffsetPolicy};
use anyhow::{Context, Result, bail};
use chrono::Weekday;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub phases: Option<PhasesConfig>,
    pub calendar: Option<CalendarConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct PhasesConfig {
    pub fitting_offset_days: Option<i64>,
    pub fitting_length_days: Option<i64>,
    pub prep_offset_from_fitting_days: Option<i64>,
    pub prep_length_days: Option<i64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct CalendarConfig {
    pub week_start: Option<String>,
    pub layout: Option<String>,
    pub day_capacity: Option<usize>,
}

impl Config {
    /// Load from `path`, or defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        // Surface bad values at startup rather than on first use
        config.phase_policy()?;
        config.grid_policy()?;
        Ok(config)
    }

    pub fn phase_policy(&self) -> Result<PhaseOffsetPolicy> {
        let defaults = PhaseOffsetPolicy::default();
        let Some(phases) = self.phases.as_ref() else {
            return Ok(defaults);
        };

        let policy = PhaseOffsetPolicy {
            fitting_offset_days: phases
                .fitting_offset_days
                .unwrap_or(defaults.fitting_offset_days),
            fitting_length_days: phases
                .fitting_length_days
                .unwrap_or(defaults.fitting_length_days),
            prep_offset_from_fitting_days: phases
                .prep_offset_from_fitting_days
                .unwrap_or(defaults.prep_offset_from_fitting_days),
            prep_length_days: phases.prep_length_days.unwrap_or(defaults.prep_length_days),
        };

        if policy.fitting_length_days < 1 {
            bail!(
                "phases.fitting_length_days must be at least 1 (got {})",
                policy.fitting_length_days
            );
        }
        if policy.prep_length_days < 1 {
            bail!(
                "phases.prep_length_days must be at least 1 (got {})",
                policy.prep_length_days
            );
        }
        if policy.fitting_offset_days > 0 || policy.prep_offset_from_fitting_days > 0 {
            bail!("phase offsets must not be positive: derived phases precede the one they are derived from");
        }
        Ok(policy)
    }

    pub fn grid_policy(&self) -> Result<GridPolicy> {
        let defaults = GridPolicy::default();
        let Some(calendar) = self.calendar.as_ref() else {
            return Ok(defaults);
        };

        let week_start = match calendar.week_start.as_deref() {
            None => defaults.week_start,
            Some(name) => parse_week_start(name)?,
        };
        let layout = match calendar.layout.as_deref() {
            None => defaults.layout,
            Some("weeks") => GridLayout::Weeks,
            Some("six_weeks") => GridLayout::SixWeeks,
            Some(other) => bail!(
                "Invalid calendar.layout '{}'. Valid options are: weeks, six_weeks",
                other
            ),
        };
        let day_capacity = calendar.day_capacity.unwrap_or(defaults.day_capacity);
        if day_capacity == 0 {
            bail!("calendar.day_capacity must be at least 1");
        }

        Ok(GridPolicy {
            week_start,
            layout,
            day_capacity,
        })
    }
}

fn parse_week_start(name: &str) -> Result<Weekday> {
    match name.to_lowercase().as_str() {
        "monday" | "mon" => Ok(Weekday::Mon),
        "sunday" | "sun" => Ok(Weekday::Sun),
        "saturday" | "sat" => Ok(Weekday::Sat),
        _ => bail!(
            "Invalid calendar.week_start '{}'. Valid options are: monday, sunday, saturday",
            name
        ),
    }
}
