//! Plan export
//!
//! Writes the profile, targets and generated plans as a JSON document.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::models::{NutritionResult, PlanSession, Profile};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export yet: generate a meal plan or workout plan first")]
    NothingToExport,

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// The exported document
#[derive(Debug, Serialize)]
pub struct PlanExport<'a> {
    pub generated_at: String,
    pub profile: &'a Profile,
    pub nutrition: &'a NutritionResult,
    pub meal_plan: &'a str,
    pub workout_plan: &'a str,
}

/// Default export file name, e.g. `fitness_plan_20261018.json`
pub fn export_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("fitness_plan_{}.json", now.format("%Y%m%d"))
}

/// Render the export document for a session at a given time
pub fn export_plan_json<Tz: TimeZone>(session: &PlanSession, now: &DateTime<Tz>) -> Result<String, ExportError>
where
    Tz::Offset: std::fmt::Display,
{
    let content = session.content();
    if !content.is_exportable() {
        return Err(ExportError::NothingToExport);
    }

    let doc = PlanExport {
        generated_at: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        profile: session.profile(),
        nutrition: session.nutrition(),
        meal_plan: content.meal_plan.as_deref().unwrap_or_default(),
        workout_plan: content.workout_plan.as_deref().unwrap_or_default(),
    };

    Ok(serde_json::to_string_pretty(&doc)?)
}

#[derive(Debug, Serialize)]
pub struct ExportPlanResponse {
    pub success: bool,
    pub file_path: String,
    pub bytes: usize,
    pub message: String,
}

/// Write the export document to `file_path`, or to the default file name
/// inside `output_dir`
pub fn export_plan(
    session: &PlanSession,
    output_dir: &Path,
    file_path: Option<&str>,
) -> Result<ExportPlanResponse, String> {
    let now = Local::now();
    let json = export_plan_json(session, &now).map_err(|e| e.to_string())?;

    let path: PathBuf = match file_path {
        Some(p) if !p.trim().is_empty() => PathBuf::from(p),
        _ => output_dir.join(export_file_name(&now)),
    };

    write_export(&path, &json).map_err(|e| e.to_string())?;
    info!(path = %path.display(), bytes = json.len(), "Exported plan");

    Ok(ExportPlanResponse {
        success: true,
        file_path: path.display().to_string(),
        bytes: json.len(),
        message: format!("Plan exported to {}", path.display()),
    })
}

fn write_export(path: &Path, json: &str) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::{ActivityLevel, ContentKind, ExperienceLevel, Goal, Sex};

    fn session() -> PlanSession {
        let profile = Profile::new(25, 70.0, 170.0, Sex::Male, ActivityLevel::Sedentary, Goal::MaintainWeight)
            .unwrap()
            .with_preferences(vec!["Keto".to_string()], vec![], ExperienceLevel::Advanced);
        PlanSession::calculate(profile)
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 5, 7).unwrap()
    }

    #[test]
    fn test_export_requires_a_plan() {
        let s = session();
        assert!(matches!(export_plan_json(&s, &fixed_time()), Err(ExportError::NothingToExport)));

        let tips_only = s.record(ContentKind::Tips, "Sleep".to_string());
        assert!(matches!(export_plan_json(&tips_only, &fixed_time()), Err(ExportError::NothingToExport)));
    }

    #[test]
    fn test_export_document_fields() {
        let s = session().record(ContentKind::Meal, "## Breakfast".to_string());
        let json = export_plan_json(&s, &fixed_time()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(doc["generated_at"], "2026-10-18 09:05:07");
        assert_eq!(doc["profile"]["age"], 25);
        assert_eq!(doc["profile"]["fitness_goal"], "Maintain Weight");
        assert_eq!(doc["profile"]["dietary_restrictions"][0], "Keto");
        assert_eq!(doc["profile"]["experience_level"], "Advanced");
        assert_eq!(doc["nutrition"]["bmr"], 1642);
        assert_eq!(doc["nutrition"]["protein"], 172);
        assert_eq!(doc["meal_plan"], "## Breakfast");
        assert_eq!(doc["workout_plan"], "");
        assert!(doc.get("tips").is_none());
    }

    #[test]
    fn test_export_is_indented() {
        let s = session().record(ContentKind::Workout, "Squat".to_string());
        let json = export_plan_json(&s, &fixed_time()).unwrap();
        assert!(json.starts_with("{\n  \"generated_at\""));
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(&fixed_time()), "fitness_plan_20261018.json");
    }

    #[test]
    fn test_export_writes_file() {
        let dir = std::env::temp_dir().join(format!("fitplan-export-{}", std::process::id()));
        let s = session().record(ContentKind::Meal, "Eggs".to_string());
        let response = export_plan(&s, &dir, None).unwrap();

        let written = std::fs::read_to_string(&response.file_path).unwrap();
        assert!(written.contains("\"meal_plan\": \"Eggs\""));
        assert_eq!(written.len(), response.bytes);

        std::fs::remove_dir_all(&dir).ok();
    }
}
