use crate::domain::model::{CompletionSettings, StudentProfile};
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    pub student: Option<StudentProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Environment variable holding the credential when `api_key` is unset.
    pub api_key_env: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        let settings = CompletionSettings::default();
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: settings.model,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            api_key_env: "API_KEY".to_string(),
            api_key: None,
            timeout_seconds: None,
        }
    }
}

impl ProviderConfig {
    fn expand_env_vars(&mut self) -> Result<()> {
        let re = placeholder_pattern()?;

        self.api_base = substitute_env_vars(&re, &self.api_base);
        self.model = substitute_env_vars(&re, &self.model);
        self.api_key_env = substitute_env_vars(&re, &self.api_key_env);
        if let Some(key) = &self.api_key {
            self.api_key = Some(substitute_env_vars(&re, key));
        }
        Ok(())
    }

    pub fn settings(&self) -> CompletionSettings {
        CompletionSettings {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Explicit key first, then the `api_key_env` variable. Blank values and
    /// `${...}` placeholders left over from substitution count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        let usable = |key: &str| {
            let key = key.trim();
            !key.is_empty() && !key.starts_with("${")
        };

        self.api_key
            .as_deref()
            .filter(|key| usable(key))
            .map(|key| key.trim().to_string())
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .filter(|key| usable(key))
                    .map(|key| key.trim().to_string())
            })
    }
}

impl PlannerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// `${VAR}` placeholders are expanded in the `[provider]` string values
    /// only; the `[student]` table is kept verbatim.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self =
            toml::from_str(content).map_err(|e| PlannerError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        config.provider.expand_env_vars()?;
        Ok(config)
    }
}

#[derive(Debug, Deserialize)]
struct ProfileFile {
    student: Option<StudentProfile>,
}

/// Reads the `[student]` table of a TOML file.
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<StudentProfile> {
    let content = std::fs::read_to_string(&path)?;
    let file: ProfileFile =
        toml::from_str(&content).map_err(|e| PlannerError::ConfigValidationError {
            field: "student".to_string(),
            message: format!("TOML parsing error: {}", e),
        })?;

    file.student.ok_or_else(|| PlannerError::ConfigValidationError {
        field: "student".to_string(),
        message: format!("no [student] table in {}", path.as_ref().display()),
    })
}

fn placeholder_pattern() -> Result<Regex> {
    Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlannerError::ConfigError {
        message: format!("invalid placeholder pattern: {}", e),
    })
}

/// 替換環境變數 (例如 ${API_KEY})，找不到的變數保留原樣
fn substitute_env_vars(re: &Regex, value: &str) -> String {
    re.replace_all(value, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}

impl Validate for ProviderConfig {
    fn validate(&self) -> Result<()> {
        validate_url("provider.api_base", &self.api_base)?;
        validate_non_empty_string("provider.model", &self.model)?;
        validate_range("provider.temperature", self.temperature, 0.0, 2.0)?;
        validate_positive_number("provider.max_tokens", u64::from(self.max_tokens), 1)?;
        validate_non_empty_string("provider.api_key_env", &self.api_key_env)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number("provider.timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}

impl Validate for PlannerConfig {
    fn validate(&self) -> Result<()> {
        self.provider.validate()
    }
}
