//! Body metrics and daily fundamentals shown alongside the targets

use serde::Serialize;

use crate::models::Profile;

/// Litres of water per kg of body weight per day
pub const WATER_L_PER_KG: f64 = 0.033;

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Body mass index, one decimal place
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round_one_decimal(weight_kg / (height_m * height_m))
}

/// Daily water intake in litres, one decimal place
pub fn daily_water_litres(weight_kg: f64) -> f64 {
    round_one_decimal(weight_kg * WATER_L_PER_KG)
}

/// Baseline habits recommended with every plan
#[derive(Debug, Clone, Serialize)]
pub struct DailyFundamentals {
    pub steps: &'static str,
    pub sleep: &'static str,
    pub hydration_litres: f64,
    pub rest_days: &'static str,
    pub note: &'static str,
}

impl DailyFundamentals {
    pub fn for_profile(profile: &Profile) -> Self {
        Self {
            steps: "7,000-10,000 steps",
            sleep: "7-9 hours of quality sleep",
            hydration_litres: daily_water_litres(profile.weight_kg()),
            rest_days: "1-2 rest days per week",
            note: "Consistency beats perfection. Small daily actions compound into extraordinary results.",
        }
    }
}

pub const DISCLAIMER: &str = "This tool provides general guidance only. Consult healthcare \
professionals before starting any new diet or exercise program.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi() {
        assert_eq!(body_mass_index(70.0, 170.0), 24.2);
        assert_eq!(body_mass_index(100.0, 200.0), 25.0);
    }

    #[test]
    fn test_daily_water() {
        assert_eq!(daily_water_litres(70.0), 2.3);
        assert_eq!(daily_water_litres(100.0), 3.3);
    }
}
