pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use adapters::openai::OpenAiProvider;
pub use config::{PlannerConfig, ProviderConfig};
pub use crate::core::{
    planner::PlanRequester,
    prompt::{build_prompt, render_course_list, SYSTEM_INSTRUCTION},
};
pub use domain::model::{
    CompletionRequest, CompletionResponse, CompletionSettings, PlanReport, PromptPair,
    StudentProfile,
};
pub use domain::ports::CompletionProvider;
pub use utils::error::{PlannerError, Result};
