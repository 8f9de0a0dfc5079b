//! Data models
//!
//! Profile input, derived nutrition targets and generated plan content.

mod content;
mod nutrition;
mod profile;
mod session;

pub use content::{ContentKind, GeneratedContent};
pub use nutrition::NutritionResult;
pub use profile::{
    ActivityLevel, ExperienceLevel, Goal, Profile, ProfileError, ProfileInput, Sex,
    AGE_RANGE, DIETARY_RESTRICTION_OPTIONS, HEIGHT_RANGE_CM, WEIGHT_RANGE_KG,
    WORKOUT_PREFERENCE_OPTIONS,
};
pub use session::PlanSession;
