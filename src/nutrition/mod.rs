//! Nutrition calculation module
//!
//! Energy targets, macro split and supporting body metrics.

pub mod calculator;
pub mod metrics;

pub use calculator::{
    activity_multiplier, basal_metabolic_rate, calculate, calculate_for_profile,
    goal_calorie_offset, MacroRatios,
};
pub use metrics::{body_mass_index, daily_water_litres, DailyFundamentals, DISCLAIMER};
