#![cfg(feature = "cli")]

use anyhow::Result;
use clap::Parser;
use course_planner::app::runner;
use course_planner::utils::error::ErrorCategory;
use course_planner::{CliConfig, PlannerError, SYSTEM_INSTRUCTION};
use httpmock::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes a config pointing at the mock server with a fixed test key.
fn write_config(temp_dir: &TempDir, server: &MockServer) -> Result<PathBuf> {
    let config_path = temp_dir.path().join("planner.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[provider]
api_base = "{}"
api_key = "sk-test"

[student]
name = "A"
major = "CS"
completed_courses = ["X1"]
in_progress_courses = ["Y1", "Y2"]
"#,
            server.url("/v1")
        ),
    )?;
    Ok(config_path)
}

fn cli(config_path: &Path, extra: &[&str]) -> CliConfig {
    let mut args = vec![
        "course-planner".to_string(),
        "--config".to_string(),
        config_path.display().to_string(),
    ];
    args.extend(extra.iter().map(|a| a.to_string()));
    CliConfig::parse_from(args)
}

#[tokio::test]
async fn test_dry_run_prints_request_without_contacting_provider() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200);
    });

    let config_path = write_config(&temp_dir, &server)?;
    let mut out = Vec::<u8>::new();
    runner::run(&cli(&config_path, &["--dry-run"]), &mut out).await?;

    assert_eq!(api_mock.hits(), 0);

    let request: serde_json::Value = serde_json::from_slice(&out)?;
    assert_eq!(request["model"], "gpt-4o-mini");
    assert_eq!(request["max_tokens"], 500);
    assert_eq!(request["messages"][0]["role"], "system");
    assert_eq!(request["messages"][0]["content"], SYSTEM_INSTRUCTION);
    let user = request["messages"][1]["content"].as_str().unwrap_or_default();
    assert!(user.contains("['X1']"));
    assert!(user.contains("['Y1', 'Y2']"));
    Ok(())
}

#[tokio::test]
async fn test_json_format_prints_plan_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "Take CSCE 3312"}}]
        }));
    });

    let config_path = write_config(&temp_dir, &server)?;
    let mut out = Vec::<u8>::new();
    runner::run(&cli(&config_path, &["--format", "json"]), &mut out).await?;

    api_mock.assert();
    let report: serde_json::Value = serde_json::from_slice(&out)?;
    assert_eq!(report["student"], "A");
    assert_eq!(report["major"], "CS");
    assert_eq!(report["model"], "gpt-4o-mini");
    assert_eq!(report["plan"], "Take CSCE 3312");
    assert!(report["generated_at"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_text_format_prints_plan_only() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(serde_json::json!({
            "choices": [{"message": {"content": "Plan text"}}]
        }));
    });

    let config_path = write_config(&temp_dir, &server)?;
    let mut out = Vec::<u8>::new();
    runner::run(&cli(&config_path, &[]), &mut out).await?;

    assert_eq!(String::from_utf8(out)?, "Plan text\n");
    Ok(())
}

#[tokio::test]
async fn test_failures_map_to_exit_codes() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let rejected = MockServer::start();
    rejected.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(401)
            .json_body(serde_json::json!({"error": {"message": "bad key"}}));
    });
    let config_path = write_config(&temp_dir, &rejected)?;
    let mut out = Vec::<u8>::new();
    let err = runner::run(&cli(&config_path, &[]), &mut out)
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::Authentication { .. }));
    assert_eq!(err.category(), ErrorCategory::Configuration);
    assert_eq!(err.exit_code(), 3);
    assert!(out.is_empty());

    let unavailable = MockServer::start();
    unavailable.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(503).body("down");
    });
    let config_path = write_config(&temp_dir, &unavailable)?;
    let err = runner::run(&cli(&config_path, &[]), &mut Vec::<u8>::new())
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Provider);
    assert_eq!(err.exit_code(), 2);

    let bad_model = MockServer::start();
    bad_model.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(404).body("model not found");
    });
    let config_path = write_config(&temp_dir, &bad_model)?;
    let err = runner::run(&cli(&config_path, &[]), &mut Vec::<u8>::new())
        .await
        .unwrap_err();
    assert_eq!(err.exit_code(), 1);
    Ok(())
}

#[tokio::test]
async fn test_invalid_config_fails_before_request() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200);
    });

    let config_path = write_config(&temp_dir, &server)?;
    let err = runner::run(
        &cli(&config_path, &["--temperature", "5"]),
        &mut Vec::<u8>::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PlannerError::InvalidConfigValueError { .. }));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(api_mock.hits(), 0);
    Ok(())
}
