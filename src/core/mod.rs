pub mod planner;
pub mod prompt;

pub use crate::domain::model::{
    ChatMessage, CompletionRequest, CompletionResponse, CompletionSettings, PromptPair, Role,
    StudentProfile,
};
pub use crate::domain::ports::CompletionProvider;
pub use crate::utils::error::Result;
