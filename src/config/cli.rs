use crate::config::toml_config::{load_profile, PlannerConfig};
use crate::domain::model::StudentProfile;
use crate::utils::error::Result;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "course-planner")]
#[command(about = "Ask a language model for a next-semester course plan")]
pub struct CliConfig {
    #[arg(long, help = "TOML config file with [provider] and optional [student] tables")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "TOML file with a [student] table")]
    pub profile: Option<PathBuf>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub major: Option<String>,

    #[arg(long, value_delimiter = ',', help = "Completed course codes, comma separated")]
    pub completed: Option<Vec<String>>,

    #[arg(long, value_delimiter = ',', help = "In-progress course codes, comma separated")]
    pub in_progress: Option<Vec<String>>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub temperature: Option<f32>,

    #[arg(long)]
    pub max_tokens: Option<u32>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, help = "Print the request that would be sent and exit")]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// Loads `--config` (or defaults) and applies the model overrides.
    pub fn planner_config(&self) -> Result<PlannerConfig> {
        let mut config = match &self.config {
            Some(path) => PlannerConfig::from_file(path)?,
            None => PlannerConfig::default(),
        };

        if let Some(model) = &self.model {
            config.provider.model = model.clone();
        }
        if let Some(temperature) = self.temperature {
            config.provider.temperature = temperature;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.provider.max_tokens = max_tokens;
        }

        Ok(config)
    }

    /// Sample student, then the config's `[student]`, then `--profile`, then
    /// the individual field flags.
    pub fn student_profile(&self, config: &PlannerConfig) -> Result<StudentProfile> {
        let mut profile = match &self.profile {
            Some(path) => load_profile(path)?,
            None => config.student.clone().unwrap_or_else(StudentProfile::sample),
        };

        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(major) = &self.major {
            profile.major = major.clone();
        }
        if let Some(completed) = &self.completed {
            profile.completed_courses = course_list(completed);
        }
        if let Some(in_progress) = &self.in_progress {
            profile.in_progress_courses = course_list(in_progress);
        }

        Ok(profile)
    }
}

/// `--completed ""` means no courses; empty items from stray commas are dropped.
fn course_list(values: &[String]) -> Vec<String> {
    values.iter().filter(|c| !c.is_empty()).cloned().collect()
}
