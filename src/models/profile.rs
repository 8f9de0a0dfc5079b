//! Biometric profile model
//!
//! A validated, immutable description of the person a plan is built for.
//! Raw form input arrives as [`ProfileInput`] and is checked once, here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const AGE_RANGE: (i64, i64) = (10, 100);
pub const WEIGHT_RANGE_KG: (f64, f64) = (20.0, 300.0);
pub const HEIGHT_RANGE_CM: (f64, f64) = (100.0, 250.0);

/// Dietary restriction options offered to users
pub const DIETARY_RESTRICTION_OPTIONS: &[&str] = &[
    "Vegetarian", "Vegan", "Gluten-Free", "Dairy-Free", "Keto", "Paleo", "Halal", "Kosher",
];

/// Workout preference options offered to users
pub const WORKOUT_PREFERENCE_OPTIONS: &[&str] = &[
    "Home Workouts",
    "Gym Access",
    "Minimal Equipment",
    "Bodyweight Only",
    "Cardio Focus",
    "Strength Focus",
];

/// Profile validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("Age must be between {} and {}, got {0}", AGE_RANGE.0, AGE_RANGE.1)]
    AgeOutOfRange(i64),

    #[error("Weight must be between {} and {} kg, got {0}", WEIGHT_RANGE_KG.0, WEIGHT_RANGE_KG.1)]
    WeightOutOfRange(f64),

    #[error("Height must be between {} and {} cm, got {0}", HEIGHT_RANGE_CM.0, HEIGHT_RANGE_CM.1)]
    HeightOutOfRange(f64),

    #[error("Unknown {field}: '{value}' (expected one of: {expected})")]
    UnknownOption {
        field: &'static str,
        value: String,
        expected: String,
    },
}

fn unknown_option(field: &'static str, value: &str, labels: &[&str]) -> ProfileError {
    ProfileError::UnknownOption {
        field,
        value: value.to_string(),
        expected: labels.join(", "),
    }
}

/// Normalize a short key: lowercase, spaces and dashes become underscores
fn normalize_key(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

// ============================================================================
// Sex
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl FromStr for Sex {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            _ => Err(unknown_option("sex", s, &["Male", "Female"])),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Activity Level
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityLevel {
    #[serde(rename = "Sedentary (Little/No Exercise)")]
    Sedentary,
    #[serde(rename = "Lightly Active (1-3 days/week)")]
    LightlyActive,
    #[serde(rename = "Moderately Active (3-5 days/week)")]
    ModeratelyActive,
    #[serde(rename = "Very Active (6-7 days/week)")]
    VeryActive,
    #[serde(rename = "Extremely Active (Athlete)")]
    ExtremelyActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtremelyActive,
    ];

    /// Display label, also used in prompts and exports
    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (Little/No Exercise)",
            ActivityLevel::LightlyActive => "Lightly Active (1-3 days/week)",
            ActivityLevel::ModeratelyActive => "Moderately Active (3-5 days/week)",
            ActivityLevel::VeryActive => "Very Active (6-7 days/week)",
            ActivityLevel::ExtremelyActive => "Extremely Active (Athlete)",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtremelyActive => "extremely_active",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(s.trim()) || level.key() == key)
            .ok_or_else(|| {
                let labels: Vec<&str> = ActivityLevel::ALL.iter().map(|l| l.label()).collect();
                unknown_option("activity level", s, &labels)
            })
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Goal
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "Lose Weight (Fat Loss)")]
    LoseWeight,
    #[serde(rename = "Gain Muscle (Bulk)")]
    GainMuscle,
    #[serde(rename = "Endurance")]
    Endurance,
    #[serde(rename = "Maintain Weight")]
    MaintainWeight,
    #[serde(rename = "Strength Training")]
    StrengthTraining,
}

impl Goal {
    pub const ALL: [Goal; 5] = [
        Goal::LoseWeight,
        Goal::GainMuscle,
        Goal::Endurance,
        Goal::MaintainWeight,
        Goal::StrengthTraining,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Goal::LoseWeight => "Lose Weight (Fat Loss)",
            Goal::GainMuscle => "Gain Muscle (Bulk)",
            Goal::Endurance => "Endurance",
            Goal::MaintainWeight => "Maintain Weight",
            Goal::StrengthTraining => "Strength Training",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Goal::LoseWeight => "lose_weight",
            Goal::GainMuscle => "gain_muscle",
            Goal::Endurance => "endurance",
            Goal::MaintainWeight => "maintain_weight",
            Goal::StrengthTraining => "strength_training",
        }
    }
}

impl FromStr for Goal {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        Goal::ALL
            .into_iter()
            .find(|goal| goal.label().eq_ignore_ascii_case(s.trim()) || goal.key() == key)
            .ok_or_else(|| {
                let labels: Vec<&str> = Goal::ALL.iter().map(|g| g.label()).collect();
                unknown_option("goal", s, &labels)
            })
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Experience Level
// ============================================================================

/// Training experience, ordered from least to most experienced
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Elite,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Beginner,
        ExperienceLevel::Intermediate,
        ExperienceLevel::Advanced,
        ExperienceLevel::Elite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "Beginner",
            ExperienceLevel::Intermediate => "Intermediate",
            ExperienceLevel::Advanced => "Advanced",
            ExperienceLevel::Elite => "Elite",
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        ExperienceLevel::ALL
            .into_iter()
            .find(|level| level.as_str().to_lowercase() == key)
            .ok_or_else(|| {
                let labels: Vec<&str> = ExperienceLevel::ALL.iter().map(|l| l.as_str()).collect();
                unknown_option("experience level", s, &labels)
            })
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Unvalidated profile fields as submitted by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileInput {
    pub age: i64,
    pub weight: f64,
    pub height: f64,
    pub sex: String,
    pub activity_level: String,
    pub fitness_goal: String,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub workout_preferences: Vec<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
}

/// A validated biometric profile
///
/// Fields are private so every `Profile` in circulation has passed
/// [`Profile::try_from`]. Serializes with the same keys as [`ProfileInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProfileInput")]
pub struct Profile {
    age: u32,
    #[serde(rename = "weight")]
    weight_kg: f64,
    #[serde(rename = "height")]
    height_cm: f64,
    sex: Sex,
    activity_level: ActivityLevel,
    #[serde(rename = "fitness_goal")]
    goal: Goal,
    dietary_restrictions: Vec<String>,
    workout_preferences: Vec<String>,
    experience_level: ExperienceLevel,
}

/// Trim, drop blanks and duplicates, keep first-seen order
fn normalize_selection(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim();
        if !trimmed.is_empty() && !out.iter().any(|v| v == trimmed) {
            out.push(trimmed.to_string());
        }
    }
    out
}

impl TryFrom<ProfileInput> for Profile {
    type Error = ProfileError;

    fn try_from(input: ProfileInput) -> Result<Self, Self::Error> {
        if input.age < AGE_RANGE.0 || input.age > AGE_RANGE.1 {
            return Err(ProfileError::AgeOutOfRange(input.age));
        }
        // NaN fails both comparisons, so test for the valid range
        if !(input.weight >= WEIGHT_RANGE_KG.0 && input.weight <= WEIGHT_RANGE_KG.1) {
            return Err(ProfileError::WeightOutOfRange(input.weight));
        }
        if !(input.height >= HEIGHT_RANGE_CM.0 && input.height <= HEIGHT_RANGE_CM.1) {
            return Err(ProfileError::HeightOutOfRange(input.height));
        }

        let experience_level = match input.experience_level.as_deref() {
            Some(s) if !s.trim().is_empty() => s.parse()?,
            _ => ExperienceLevel::default(),
        };

        Ok(Self {
            age: input.age as u32,
            weight_kg: input.weight,
            height_cm: input.height,
            sex: input.sex.parse()?,
            activity_level: input.activity_level.parse()?,
            goal: input.fitness_goal.parse()?,
            dietary_restrictions: normalize_selection(input.dietary_restrictions),
            workout_preferences: normalize_selection(input.workout_preferences),
            experience_level,
        })
    }
}

impl Profile {
    /// Build a profile with no optional preferences
    pub fn new(
        age: u32,
        weight_kg: f64,
        height_cm: f64,
        sex: Sex,
        activity_level: ActivityLevel,
        goal: Goal,
    ) -> Result<Self, ProfileError> {
        Self::try_from(ProfileInput {
            age: age as i64,
            weight: weight_kg,
            height: height_cm,
            sex: sex.as_str().to_string(),
            activity_level: activity_level.label().to_string(),
            fitness_goal: goal.label().to_string(),
            dietary_restrictions: Vec::new(),
            workout_preferences: Vec::new(),
            experience_level: None,
        })
    }

    /// Return a copy with the given optional preferences
    pub fn with_preferences(
        mut self,
        dietary_restrictions: Vec<String>,
        workout_preferences: Vec<String>,
        experience_level: ExperienceLevel,
    ) -> Self {
        self.dietary_restrictions = normalize_selection(dietary_restrictions);
        self.workout_preferences = normalize_selection(workout_preferences);
        self.experience_level = experience_level;
        self
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn dietary_restrictions(&self) -> &[String] {
        &self.dietary_restrictions
    }

    pub fn workout_preferences(&self) -> &[String] {
        &self.workout_preferences
    }

    pub fn experience_level(&self) -> ExperienceLevel {
        self.experience_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ProfileInput {
        ProfileInput {
            age: 25,
            weight: 70.0,
            height: 170.0,
            sex: "Male".to_string(),
            activity_level: "Sedentary (Little/No Exercise)".to_string(),
            fitness_goal: "Maintain Weight".to_string(),
            dietary_restrictions: vec![],
            workout_preferences: vec![],
            experience_level: None,
        }
    }

    #[test]
    fn test_valid_profile() {
        let profile = Profile::try_from(input()).unwrap();
        assert_eq!(profile.age(), 25);
        assert_eq!(profile.sex(), Sex::Male);
        assert_eq!(profile.activity_level(), ActivityLevel::Sedentary);
        assert_eq!(profile.goal(), Goal::MaintainWeight);
        assert_eq!(profile.experience_level(), ExperienceLevel::Beginner);
    }

    #[test]
    fn test_age_bounds() {
        for age in [10, 100] {
            let p = Profile::try_from(ProfileInput { age, ..input() });
            assert!(p.is_ok(), "age {} should be accepted", age);
        }
        for age in [9, 101, -1] {
            let p = Profile::try_from(ProfileInput { age, ..input() });
            assert_eq!(p, Err(ProfileError::AgeOutOfRange(age)));
        }
    }

    #[test]
    fn test_weight_and_height_bounds() {
        assert!(Profile::try_from(ProfileInput { weight: 20.0, ..input() }).is_ok());
        assert!(Profile::try_from(ProfileInput { weight: 300.0, ..input() }).is_ok());
        assert!(matches!(
            Profile::try_from(ProfileInput { weight: 19.5, ..input() }),
            Err(ProfileError::WeightOutOfRange(_))
        ));
        assert!(matches!(
            Profile::try_from(ProfileInput { weight: f64::NAN, ..input() }),
            Err(ProfileError::WeightOutOfRange(_))
        ));
        assert!(matches!(
            Profile::try_from(ProfileInput { height: 250.5, ..input() }),
            Err(ProfileError::HeightOutOfRange(_))
        ));
    }

    #[test]
    fn test_enum_short_keys() {
        assert_eq!("lightly active".parse::<ActivityLevel>(), Ok(ActivityLevel::LightlyActive));
        assert_eq!("EXTREMELY_ACTIVE".parse::<ActivityLevel>(), Ok(ActivityLevel::ExtremelyActive));
        assert_eq!("lose-weight".parse::<Goal>(), Ok(Goal::LoseWeight));
        assert_eq!("Strength Training".parse::<Goal>(), Ok(Goal::StrengthTraining));
        assert_eq!("female".parse::<Sex>(), Ok(Sex::Female));
        assert_eq!("elite".parse::<ExperienceLevel>(), Ok(ExperienceLevel::Elite));
    }

    #[test]
    fn test_full_labels_any_case() {
        assert_eq!("sedentary (little/no exercise)".parse::<ActivityLevel>(), Ok(ActivityLevel::Sedentary));
        assert_eq!(" VERY ACTIVE (6-7 DAYS/WEEK) ".parse::<ActivityLevel>(), Ok(ActivityLevel::VeryActive));
        assert_eq!("gain muscle (bulk)".parse::<Goal>(), Ok(Goal::GainMuscle));
        assert_eq!("LOSE WEIGHT (FAT LOSS)".parse::<Goal>(), Ok(Goal::LoseWeight));
        for level in ActivityLevel::ALL {
            assert_eq!(level.label().to_lowercase().parse::<ActivityLevel>(), Ok(level));
        }
        for goal in Goal::ALL {
            assert_eq!(goal.label().to_uppercase().parse::<Goal>(), Ok(goal));
        }
    }

    #[test]
    fn test_unknown_option_rejected() {
        let err = Profile::try_from(ProfileInput {
            fitness_goal: "Get Swole".to_string(),
            ..input()
        })
        .unwrap_err();
        match err {
            ProfileError::UnknownOption { field, value, .. } => {
                assert_eq!(field, "goal");
                assert_eq!(value, "Get Swole");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_experience_levels_are_ordered() {
        assert!(ExperienceLevel::Beginner < ExperienceLevel::Intermediate);
        assert!(ExperienceLevel::Advanced < ExperienceLevel::Elite);
    }

    #[test]
    fn test_selection_normalized() {
        let profile = Profile::try_from(ProfileInput {
            dietary_restrictions: vec![
                "Vegan".to_string(),
                " ".to_string(),
                "Halal".to_string(),
                "Vegan".to_string(),
            ],
            ..input()
        })
        .unwrap();
        assert_eq!(profile.dietary_restrictions(), ["Vegan", "Halal"]);
    }

    #[test]
    fn test_serializes_with_display_labels() {
        let profile = Profile::try_from(input()).unwrap();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["weight"], 70.0);
        assert_eq!(json["activity_level"], "Sedentary (Little/No Exercise)");
        assert_eq!(json["fitness_goal"], "Maintain Weight");
        assert_eq!(json["experience_level"], "Beginner");

        let back: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }
}
