//! Nutrition blueprint tool
//!
//! The "calculate my plan" action: targets plus the supporting numbers shown
//! with them.

use serde::Serialize;
use tracing::info;

use crate::models::{NutritionResult, PlanSession, Profile};
use crate::nutrition::{body_mass_index, DailyFundamentals, MacroRatios, DISCLAIMER};

#[derive(Debug, Serialize)]
pub struct MacroPercentages {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Response for calculate_nutrition
#[derive(Debug, Serialize)]
pub struct NutritionBlueprint {
    pub profile: Profile,
    pub nutrition: NutritionResult,
    pub calorie_delta: i64,
    pub bmi: f64,
    pub macro_ratios: MacroPercentages,
    pub fundamentals: DailyFundamentals,
    pub disclaimer: &'static str,
}

pub fn calculate_nutrition(session: &PlanSession) -> NutritionBlueprint {
    let profile = session.profile();
    let nutrition = *session.nutrition();
    let ratios = MacroRatios::for_goal(profile.goal());

    info!(
        goal = %profile.goal(),
        bmr = nutrition.bmr,
        tdee = nutrition.tdee,
        target = nutrition.target,
        "Calculated nutrition targets"
    );

    NutritionBlueprint {
        profile: profile.clone(),
        nutrition,
        calorie_delta: nutrition.calorie_delta(),
        bmi: body_mass_index(profile.weight_kg(), profile.height_cm()),
        macro_ratios: MacroPercentages {
            protein: ratios.protein * 100.0,
            carbs: ratios.carbs * 100.0,
            fats: ratios.fats * 100.0,
        },
        fundamentals: DailyFundamentals::for_profile(profile),
        disclaimer: DISCLAIMER,
    }
}
