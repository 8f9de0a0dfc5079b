//! FitPlan Status Tool
//!
//! Runtime status of the service plus the usage guide served to assistants.

use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::models::{
    ActivityLevel, ExperienceLevel, Goal, Sex, AGE_RANGE, DIETARY_RESTRICTION_OPTIONS, HEIGHT_RANGE_CM,
    WEIGHT_RANGE_KG, WORKOUT_PREFERENCE_OPTIONS,
};

const INSTRUCTIONS_HEADER: &str = r#"
# FitPlan Usage Instructions

FitPlan turns a biometric profile into daily nutrition targets and, on
request, AI-written meal plans, workout plans and lifestyle tips.

## Profile Fields

| Field | Values |
|-------|--------|
"#;

const INSTRUCTIONS_BODY: &str = r#"
Labels are matched in any case. Enum fields also accept short keys such as
`sedentary`, `very_active`, `lose_weight` or `strength_training`.

---

## Workflow

1. `calculate_nutrition` with the profile. Show BMR, TDEE, target calories
   (with the delta from TDEE), BMI, macro grams and the daily fundamentals.
2. Optionally `render_nutrition_charts` for the macro pie and calorie bars.
   Each chart reports its own error; the other is still written.
3. `generate_plan_content` with `kind` = `meal`, `workout` or `tips`.
   Each kind is independent. A failed call returns `success: false`, a
   message and a hint; show both and leave that section empty.
4. `export_plan` once a meal plan or workout plan exists. Pass back the
   text you received from step 3. Tips are not part of the export.

Nothing is stored between calls. Send the full profile every time.

---

## Targets

- BMR: Mifflin-St Jeor
- TDEE: BMR x activity multiplier (1.2 to 1.9)
- Target: TDEE + goal offset (-500 fat loss, +300 bulk, +200 strength)
- Macros: protein and carbs at 4 kcal/g, fat at 9 kcal/g
"#;

/// Planner usage instructions for AI assistants
///
/// The value table is built from the option catalogues so it always lists
/// what the profile parser accepts.
pub fn planner_instructions() -> String {
    let sexes: Vec<&str> = Sex::ALL.iter().map(|s| s.as_str()).collect();
    let activities: Vec<&str> = ActivityLevel::ALL.iter().map(|a| a.label()).collect();
    let goals: Vec<&str> = Goal::ALL.iter().map(|g| g.label()).collect();
    let levels: Vec<&str> = ExperienceLevel::ALL.iter().map(|l| l.as_str()).collect();

    let rows = [
        ("age", format!("{}-{}", AGE_RANGE.0, AGE_RANGE.1)),
        ("weight", format!("{}-{} (kg)", WEIGHT_RANGE_KG.0, WEIGHT_RANGE_KG.1)),
        ("height", format!("{}-{} (cm)", HEIGHT_RANGE_CM.0, HEIGHT_RANGE_CM.1)),
        ("sex", sexes.join(", ")),
        ("activity_level", activities.join(", ")),
        ("fitness_goal", goals.join(", ")),
        ("dietary_restrictions", format!("optional list, e.g. {}", DIETARY_RESTRICTION_OPTIONS.join(", "))),
        ("workout_preferences", format!("optional list, e.g. {}", WORKOUT_PREFERENCE_OPTIONS.join(", "))),
        ("experience_level", format!("{} (default {})", levels.join(", "), ExperienceLevel::default())),
    ];

    let mut text = String::from(INSTRUCTIONS_HEADER);
    for (field, values) in rows {
        text.push_str(&format!("| {} | {} |\n", field, values));
    }
    text.push_str(INSTRUCTIONS_BODY);
    text
}

/// Status information for the FitPlan service
#[derive(Debug, Serialize)]
pub struct FitPlanStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    pub model: String,
    pub api_key_configured: bool,
    pub output_dir: String,

    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    output_dir: PathBuf,
}

impl StatusTracker {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            output_dir,
        }
    }

    pub fn get_status(&self, model: &str, api_key_configured: bool) -> FitPlanStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        FitPlanStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            model: model.to_string(),
            api_key_configured,
            output_dir: self.output_dir.display().to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
