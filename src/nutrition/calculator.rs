//! Energy and macronutrient calculation
//!
//! Mifflin-St Jeor BMR, activity-scaled TDEE, goal-adjusted target and a
//! protein/carb/fat split. Intermediate values stay unrounded; each reported
//! number is rounded on its own, half-to-even.

use crate::models::{ActivityLevel, Goal, NutritionResult, Profile, Sex};

/// kcal per gram of protein or carbohydrate
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
/// kcal per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Fraction of target calories assigned to each macronutrient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroRatios {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl MacroRatios {
    const BUILD: MacroRatios = MacroRatios { protein: 0.30, carbs: 0.40, fats: 0.30 };
    const WEIGHT: MacroRatios = MacroRatios { protein: 0.35, carbs: 0.35, fats: 0.30 };
    const ENDURANCE: MacroRatios = MacroRatios { protein: 0.25, carbs: 0.45, fats: 0.30 };

    pub fn for_goal(goal: Goal) -> Self {
        match goal {
            Goal::GainMuscle | Goal::StrengthTraining => Self::BUILD,
            Goal::LoseWeight | Goal::MaintainWeight => Self::WEIGHT,
            Goal::Endurance => Self::ENDURANCE,
        }
    }

    pub fn total(&self) -> f64 {
        self.protein + self.carbs + self.fats
    }
}

/// TDEE multiplier for an activity level
pub fn activity_multiplier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::LightlyActive => 1.375,
        ActivityLevel::ModeratelyActive => 1.55,
        ActivityLevel::VeryActive => 1.725,
        ActivityLevel::ExtremelyActive => 1.9,
    }
}

/// Flat daily calorie adjustment for a goal, in kcal
pub fn goal_calorie_offset(goal: Goal) -> f64 {
    match goal {
        Goal::LoseWeight => -500.0,
        Goal::GainMuscle => 300.0,
        Goal::Endurance => 0.0,
        Goal::MaintainWeight => 0.0,
        Goal::StrengthTraining => 200.0,
    }
}

/// Basal metabolic rate (Mifflin-St Jeor), unrounded
pub fn basal_metabolic_rate(age: u32, weight_kg: f64, height_cm: f64, sex: Sex) -> f64 {
    let sex_constant = match sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64 + sex_constant
}

fn round_kcal(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Calculate daily energy and macro targets
///
/// Enum inputs are already validated by construction, so this cannot fail.
pub fn calculate(
    age: u32,
    weight_kg: f64,
    height_cm: f64,
    sex: Sex,
    activity_level: ActivityLevel,
    goal: Goal,
) -> NutritionResult {
    let bmr = basal_metabolic_rate(age, weight_kg, height_cm, sex);
    let tdee = bmr * activity_multiplier(activity_level);
    let target = tdee + goal_calorie_offset(goal);

    let ratios = MacroRatios::for_goal(goal);
    let protein_g = target * ratios.protein / KCAL_PER_G_PROTEIN;
    let carbs_g = target * ratios.carbs / KCAL_PER_G_CARBS;
    let fats_g = target * ratios.fats / KCAL_PER_G_FAT;

    NutritionResult {
        bmr: round_kcal(bmr),
        tdee: round_kcal(tdee),
        target: round_kcal(target),
        protein_g: round_kcal(protein_g),
        carbs_g: round_kcal(carbs_g),
        fats_g: round_kcal(fats_g),
    }
}

/// Calculate targets for a validated profile
pub fn calculate_for_profile(profile: &Profile) -> NutritionResult {
    calculate(
        profile.age(),
        profile.weight_kg(),
        profile.height_cm(),
        profile.sex(),
        profile.activity_level(),
        profile.goal(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // Worst case: 0.5 g off on each macro plus 0.5 kcal on the target itself
    const MACRO_KCAL_TOLERANCE: i64 = 9;

    fn reference(goal: Goal) -> NutritionResult {
        calculate(25, 70.0, 170.0, Sex::Male, ActivityLevel::Sedentary, goal)
    }

    #[test]
    fn test_reference_profile_maintain() {
        // 700 + 1062.5 - 125 + 5 = 1642.5; TDEE 1642.5 * 1.2 = 1971
        let r = reference(Goal::MaintainWeight);
        assert_eq!(r.bmr, 1642);
        assert_eq!(r.tdee, 1971);
        assert_eq!(r.target, 1971);
        assert_eq!(r.protein_g, 172);
        assert_eq!(r.carbs_g, 172);
        assert_eq!(r.fats_g, 66);
    }

    #[test]
    fn test_lose_weight_deficit() {
        let maintain = reference(Goal::MaintainWeight);
        let lose = reference(Goal::LoseWeight);
        assert_eq!(lose.tdee, maintain.tdee);
        assert_eq!(lose.target, lose.tdee - 500);
    }

    #[test]
    fn test_goal_offsets() {
        assert_eq!(reference(Goal::GainMuscle).calorie_delta(), 300);
        assert_eq!(reference(Goal::StrengthTraining).calorie_delta(), 200);
        assert_eq!(reference(Goal::Endurance).calorie_delta(), 0);
    }

    #[test]
    fn test_female_bmr_is_166_lower() {
        for (age, weight, height) in [(25, 70.0, 170.0), (40, 82.5, 181.0), (63, 55.0, 158.5)] {
            let male = calculate(age, weight, height, Sex::Male, ActivityLevel::VeryActive, Goal::Endurance);
            let female =
                calculate(age, weight, height, Sex::Female, ActivityLevel::VeryActive, Goal::Endurance);
            assert_eq!(male.bmr - female.bmr, 166);
        }
    }

    #[test]
    fn test_macro_calories_match_target() {
        for goal in Goal::ALL {
            for level in ActivityLevel::ALL {
                for (age, weight, height) in [(18, 52.0, 160.0), (35, 95.5, 188.0), (70, 64.0, 165.0)] {
                    let r = calculate(age, weight, height, Sex::Female, level, goal);
                    let diff = (r.macro_calories() - r.target).abs();
                    assert!(
                        diff <= MACRO_KCAL_TOLERANCE,
                        "{:?}/{:?}: macros {} vs target {}",
                        goal,
                        level,
                        r.macro_calories(),
                        r.target
                    );
                }
            }
        }
    }

    #[test]
    fn test_ratios_sum_to_one() {
        for goal in Goal::ALL {
            assert!((MacroRatios::for_goal(goal).total() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_ratio_mapping() {
        assert_eq!(MacroRatios::for_goal(Goal::GainMuscle), MacroRatios::for_goal(Goal::StrengthTraining));
        assert_eq!(MacroRatios::for_goal(Goal::LoseWeight), MacroRatios::for_goal(Goal::MaintainWeight));
        assert_eq!(MacroRatios::for_goal(Goal::Endurance).carbs, 0.45);
    }

    #[test]
    fn test_idempotent() {
        let a = calculate(33, 77.7, 177.7, Sex::Female, ActivityLevel::LightlyActive, Goal::GainMuscle);
        let b = calculate(33, 77.7, 177.7, Sex::Female, ActivityLevel::LightlyActive, Goal::GainMuscle);
        assert_eq!(a, b);
    }

    #[test]
    fn test_boundaries() {
        for age in [10, 100] {
            let r = calculate(age, 70.0, 170.0, Sex::Female, ActivityLevel::Sedentary, Goal::MaintainWeight);
            assert!(r.bmr > 0, "age {} gave bmr {}", age, r.bmr);
        }
        for weight in [20.0, 300.0] {
            let r = calculate(50, weight, 170.0, Sex::Male, ActivityLevel::ExtremelyActive, Goal::GainMuscle);
            assert!(r.tdee > 0);
            assert!(r.protein_g > 0 && r.carbs_g > 0 && r.fats_g > 0);
        }
    }

    #[test]
    fn test_half_rounds_to_even() {
        assert_eq!(round_kcal(1642.5), 1642);
        assert_eq!(round_kcal(1643.5), 1644);
        assert_eq!(round_kcal(-0.4), 0);
    }
}
