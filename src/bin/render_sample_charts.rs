//! Utility to render the nutrition charts for a reference profile
//!
//! Handy for eyeballing chart layout without an MCP client.

use fitplan::config::Config;
use fitplan::models::{ActivityLevel, Goal, PlanSession, Profile, Sex};
use fitplan::tools::calculate::calculate_nutrition;
use fitplan::tools::charts::{render_nutrition_charts, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    println!("Output directory: {}", config.output_dir.display());

    let profile = Profile::new(25, 70.0, 170.0, Sex::Male, ActivityLevel::Sedentary, Goal::MaintainWeight)?;
    let session = PlanSession::calculate(profile);

    let blueprint = calculate_nutrition(&session);
    println!("Nutrition targets:");
    println!("  BMR:    {} kcal", blueprint.nutrition.bmr);
    println!("  TDEE:   {} kcal", blueprint.nutrition.tdee);
    println!("  Target: {} kcal ({:+})", blueprint.nutrition.target, blueprint.calorie_delta);
    println!(
        "  Macros: {}g protein, {}g carbs, {}g fats",
        blueprint.nutrition.protein_g, blueprint.nutrition.carbs_g, blueprint.nutrition.fats_g
    );

    let rendered = render_nutrition_charts(&session, &config.output_dir, DEFAULT_CHART_WIDTH, DEFAULT_CHART_HEIGHT)?;
    for chart in rendered.charts {
        match (chart.file_path, chart.error) {
            (Some(path), _) => println!("{}: {} ({} bytes)", chart.title, path, chart.bytes),
            (None, error) => println!("{}: not rendered ({})", chart.title, error.unwrap_or_default()),
        }
    }
    println!("{}", rendered.message);

    Ok(())
}
