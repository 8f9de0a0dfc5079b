//! Daily nutrition targets

use serde::{Deserialize, Serialize};

/// Daily energy and macronutrient targets derived from a profile
///
/// All values are whole numbers: kcal/day for energy, grams/day for macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionResult {
    pub bmr: i64,
    pub tdee: i64,
    pub target: i64,
    #[serde(rename = "protein")]
    pub protein_g: i64,
    #[serde(rename = "carbs")]
    pub carbs_g: i64,
    #[serde(rename = "fats")]
    pub fats_g: i64,
}

impl NutritionResult {
    /// Energy carried by the macro targets, in kcal
    pub fn macro_calories(&self) -> i64 {
        4 * self.protein_g + 4 * self.carbs_g + 9 * self.fats_g
    }

    /// Target minus TDEE (negative for a deficit)
    pub fn calorie_delta(&self) -> i64 {
        self.target - self.tdee
    }
}
