use crate::adapters::openai::OpenAiProvider;
use crate::config::cli::{CliConfig, OutputFormat};
use crate::core::planner::PlanRequester;
use crate::domain::model::{PlanReport, StudentProfile};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::io::Write;

/// One CLI invocation: load config, resolve the student, then either print
/// the request (`--dry-run`) or ask the provider and print the plan.
pub async fn run<W: Write>(cli: &CliConfig, out: &mut W) -> Result<()> {
    // 載入並驗證配置
    let config = cli.planner_config()?;
    config.validate()?;
    let profile = cli.student_profile(&config)?;

    // 建立 provider 與 planner
    let provider = OpenAiProvider::new(&config.provider)?;
    let planner = PlanRequester::new(provider, config.provider.settings());

    if cli.dry_run {
        tracing::info!("Dry run: request not sent");
        let request = planner.build_request(&profile);
        writeln!(out, "{}", serde_json::to_string_pretty(&request)?)?;
        return Ok(());
    }

    // 發送請求並輸出結果
    let plan = planner.create_plan(&profile).await?;
    write_plan(out, cli.format, &profile, &planner.settings().model, plan)
}

pub fn write_plan<W: Write>(
    out: &mut W,
    format: OutputFormat,
    profile: &StudentProfile,
    model: &str,
    plan: String,
) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", plan)?,
        OutputFormat::Json => {
            let report = PlanReport {
                student: profile.name.clone(),
                major: profile.major.clone(),
                model: model.to_string(),
                generated_at: chrono::Utc::now(),
                plan,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }
    Ok(())
}
