use crate::utils::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};

/// A student's identity and course history. Every field is opaque text and
/// is inserted into the prompt as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub name: String,
    pub major: String,
    #[serde(default)]
    pub completed_courses: Vec<String>,
    #[serde(default)]
    pub in_progress_courses: Vec<String>,
}

impl StudentProfile {
    pub fn new(
        name: impl Into<String>,
        major: impl Into<String>,
        completed_courses: Vec<String>,
        in_progress_courses: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            major: major.into(),
            completed_courses,
            in_progress_courses,
        }
    }

    /// The student planned for when nothing else is supplied.
    pub fn sample() -> Self {
        let courses = |codes: &[&str]| codes.iter().map(|c| c.to_string()).collect();
        Self::new(
            "Zeina Elsawy",
            "Computer Science",
            courses(&[
                "CSCE 2202",
                "CSCE 2203",
                "MACT 2123",
                "CSCE 2303",
                "CSCE 2301",
                "CSCE 2302",
            ]),
            courses(&["MACT 3211", "CSCE 2501", "CSCE 4930", "CSCE 3701"]),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system_instruction: String,
    pub user_instruction: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Model parameters applied to every request a planner sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            max_tokens: 500,
        }
    }
}

/// Chat-completion request body, serialized as the provider expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Builds a response carrying one choice per given text.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: texts
                .into_iter()
                .map(|text| Choice {
                    message: ResponseMessage {
                        content: Some(text.into()),
                    },
                })
                .collect(),
        }
    }

    /// Content of the first choice; the remaining choices are ignored.
    pub fn into_first_content(self) -> Result<String> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or(PlannerError::EmptyChoices)?;

        choice
            .message
            .content
            .ok_or_else(|| PlannerError::MalformedResponse {
                message: "first choice has no message content".to_string(),
            })
    }
}

/// What `--format json` prints.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub student: String,
    pub major: String,
    pub model: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub plan: String,
}
