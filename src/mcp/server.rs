//! FitPlan MCP Server Implementation
//!
//! Exposes the planner actions as MCP tools. Tools are stateless: every call
//! carries the full profile and any text generated earlier.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::llm::TextGenerator;
use crate::models::{ContentKind, GeneratedContent, PlanSession, Profile, ProfileInput};
use crate::planner::{build_prompt, generate_content};
use crate::tools::calculate;
use crate::tools::charts::{self, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH};
use crate::tools::export;
use crate::tools::status::{self, StatusTracker};

/// FitPlan MCP Service
#[derive(Clone)]
pub struct FitPlanService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    generator: Arc<dyn TextGenerator>,
    output_dir: PathBuf,
    tool_router: ToolRouter<FitPlanService>,
}

impl FitPlanService {
    pub fn new(output_dir: PathBuf, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(output_dir.clone()))),
            generator,
            output_dir,
            tool_router: Self::tool_router(),
        }
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn parse_kind(kind: &str) -> Result<ContentKind, McpError> {
    kind.parse().map_err(|e: String| McpError::invalid_params(e, None))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ProfileParams {
    /// Age in years (10-100)
    pub age: i64,
    /// Weight in kg (20-300)
    pub weight: f64,
    /// Height in cm (100-250)
    pub height: f64,
    /// Male or Female
    pub sex: String,
    /// Activity level label or short key (e.g. "sedentary")
    pub activity_level: String,
    /// Goal label or short key (e.g. "lose_weight")
    pub fitness_goal: String,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub workout_preferences: Vec<String>,
    /// Beginner, Intermediate, Advanced or Elite
    pub experience_level: Option<String>,
}

impl ProfileParams {
    fn into_profile(self) -> Result<Profile, McpError> {
        Profile::try_from(ProfileInput {
            age: self.age,
            weight: self.weight,
            height: self.height,
            sex: self.sex,
            activity_level: self.activity_level,
            fitness_goal: self.fitness_goal,
            dietary_restrictions: self.dietary_restrictions,
            workout_preferences: self.workout_preferences,
            experience_level: self.experience_level,
        })
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }

    fn into_session(self) -> Result<PlanSession, McpError> {
        Ok(PlanSession::calculate(self.into_profile()?))
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateNutritionParams {
    pub profile: ProfileParams,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PlanContentParams {
    pub profile: ProfileParams,
    /// meal, workout or tips
    pub kind: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RenderChartsParams {
    pub profile: ProfileParams,
    /// Directory for the PNG files (defaults to the server output directory)
    pub output_dir: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExportPlanParams {
    pub profile: ProfileParams,
    pub meal_plan: Option<String>,
    pub workout_plan: Option<String>,
    /// Destination file (defaults to fitness_plan_YYYYMMDD.json in the output directory)
    pub file_path: Option<String>,
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl FitPlanService {
    #[tool(description = "Get the current status of the FitPlan service including build info, model, API key presence, and process information")]
    async fn get_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(self.generator.model(), self.generator.is_configured());
        json_result(&status)
    }

    #[tool(description = "Get instructions for using the planner: profile fields, accepted values, and the calculate / generate / export workflow. Call this first.")]
    fn planner_instructions(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(status::planner_instructions())]))
    }

    #[tool(description = "Calculate BMR, TDEE, target calories, macro grams, BMI and daily fundamentals for a profile")]
    fn calculate_nutrition(&self, Parameters(p): Parameters<CalculateNutritionParams>) -> Result<CallToolResult, McpError> {
        let session = p.profile.into_session()?;
        json_result(&calculate::calculate_nutrition(&session))
    }

    #[tool(description = "Show the exact prompt that would be sent for a meal, workout or tips request, without calling the AI service")]
    fn build_plan_prompt(&self, Parameters(p): Parameters<PlanContentParams>) -> Result<CallToolResult, McpError> {
        let kind = parse_kind(&p.kind)?;
        let session = p.profile.into_session()?;
        let prompt = build_prompt(kind, session.profile(), session.nutrition());
        Ok(CallToolResult::success(vec![Content::text(prompt)]))
    }

    #[tool(description = "Generate a meal plan, workout plan or lifestyle tips with the AI service. On failure returns success=false and a message; no retry is attempted.")]
    async fn generate_plan_content(&self, Parameters(p): Parameters<PlanContentParams>) -> Result<CallToolResult, McpError> {
        let kind = parse_kind(&p.kind)?;
        let session = p.profile.into_session()?;
        let generator = Arc::clone(&self.generator);

        let outcome = tokio::task::spawn_blocking(move || {
            generate_content(generator.as_ref(), &session, kind)
        })
        .await
        .map_err(|e| McpError::internal_error(format!("Generation task failed: {}", e), None))?;

        json_result(&outcome.to_response())
    }

    #[tool(description = "Render the macro distribution pie chart and calorie breakdown bar chart as PNG files")]
    fn render_nutrition_charts(&self, Parameters(p): Parameters<RenderChartsParams>) -> Result<CallToolResult, McpError> {
        let session = p.profile.into_session()?;
        let output_dir = p
            .output_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| self.output_dir.clone());
        let result = charts::render_nutrition_charts(
            &session,
            &output_dir,
            p.width.unwrap_or(DEFAULT_CHART_WIDTH),
            p.height.unwrap_or(DEFAULT_CHART_HEIGHT),
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Export profile, nutrition targets, meal plan and workout plan as a JSON file. Requires a meal plan or workout plan.")]
    fn export_plan(&self, Parameters(p): Parameters<ExportPlanParams>) -> Result<CallToolResult, McpError> {
        let content = GeneratedContent {
            meal_plan: non_blank(p.meal_plan),
            workout_plan: non_blank(p.workout_plan),
            tips: None,
        };
        let session = PlanSession::with_content(p.profile.into_profile()?, content);
        let result = export::export_plan(&session, &self.output_dir, p.file_path.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for FitPlanService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "fitplan".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("FitPlan Health & Fitness Planner".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "FitPlan - nutrition targets and AI-generated fitness plans. \
                 IMPORTANT: Call planner_instructions first. \
                 Targets: calculate_nutrition. Charts: render_nutrition_charts. \
                 AI content: build_plan_prompt (preview), generate_plan_content (kind = meal, workout or tips). \
                 Export: export_plan (needs a meal or workout plan). \
                 Every tool takes the full profile; nothing is stored between calls."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ProfileParams {
        ProfileParams {
            age: 25,
            weight: 70.0,
            height: 170.0,
            sex: "male".to_string(),
            activity_level: "sedentary".to_string(),
            fitness_goal: "Maintain Weight".to_string(),
            dietary_restrictions: vec![],
            workout_preferences: vec![],
            experience_level: None,
        }
    }

    #[test]
    fn test_profile_params_into_session() {
        let session = params().into_session().unwrap();
        assert_eq!(session.nutrition().bmr, 1642);
    }

    #[test]
    fn test_profile_params_rejects_out_of_range() {
        let p = ProfileParams { age: 120, ..params() };
        assert!(p.into_session().is_err());
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("tips").unwrap(), ContentKind::Tips);
        assert!(parse_kind("snacks").is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some("Plan".to_string())).as_deref(), Some("Plan"));
    }
}
