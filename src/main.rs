//! FitPlan
//!
//! An MCP server for nutrition targets and AI-generated fitness plans.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fitplan::build_info;
use fitplan::config::{Config, API_KEY_ENV};
use fitplan::llm::GroqClient;
use fitplan::mcp::FitPlanService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries the MCP stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fitplan=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let config = Config::from_env();
    info!(model = %config.model, api_base = %config.api_base, "Loaded configuration");
    if config.api_key.is_none() {
        warn!("{} is not set; plan generation will fail until it is", API_KEY_ENV);
    }

    std::fs::create_dir_all(&config.output_dir)?;
    info!(output_dir = %config.output_dir.display(), "Output directory ready");

    let generator = Arc::new(GroqClient::new(
        config.api_key.clone(),
        config.model.clone(),
        config.api_base.clone(),
    ));

    let service = FitPlanService::new(config.output_dir.clone(), generator);

    eprintln!("Starting MCP server on stdio...");
    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
