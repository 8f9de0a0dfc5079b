//! Generated plan content
//!
//! Free-text sections produced by the text-generation service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of generated content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Meal,
    Workout,
    Tips,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Meal, ContentKind::Workout, ContentKind::Tips];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Meal => "meal",
            ContentKind::Workout => "workout",
            ContentKind::Tips => "tips",
        }
    }

    /// Section title shown to the user
    pub fn title(&self) -> &'static str {
        match self {
            ContentKind::Meal => "Meal Plan",
            ContentKind::Workout => "Workout Plan",
            ContentKind::Tips => "Lifestyle Tips",
        }
    }

    /// Progress message while a request is in flight
    pub fn progress_message(&self) -> &'static str {
        match self {
            ContentKind::Meal => "Crafting your personalized meal plan...",
            ContentKind::Workout => "Building your workout routine...",
            ContentKind::Tips => "Generating lifestyle optimization tips...",
        }
    }

    /// Hint shown while a section is still empty
    pub fn empty_hint(&self) -> &'static str {
        match self {
            ContentKind::Meal => "Generate a meal plan to get your personalized nutrition guide",
            ContentKind::Workout => {
                "Generate a workout plan to get your customized training program"
            }
            ContentKind::Tips => "Get lifestyle tips for optimization strategies",
        }
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "meal" | "meal_plan" | "meals" => Ok(ContentKind::Meal),
            "workout" | "workout_plan" | "training" => Ok(ContentKind::Workout),
            "tips" | "lifestyle" | "lifestyle_tips" => Ok(ContentKind::Tips),
            _ => Err(format!(
                "Unknown content kind '{}' (expected meal, workout, or tips)",
                s
            )),
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three independently generated sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub meal_plan: Option<String>,
    pub workout_plan: Option<String>,
    pub tips: Option<String>,
}

impl GeneratedContent {
    pub fn get(&self, kind: ContentKind) -> Option<&str> {
        match kind {
            ContentKind::Meal => self.meal_plan.as_deref(),
            ContentKind::Workout => self.workout_plan.as_deref(),
            ContentKind::Tips => self.tips.as_deref(),
        }
    }

    /// Copy with one section replaced
    pub fn with(&self, kind: ContentKind, text: String) -> Self {
        let mut next = self.clone();
        let slot = match kind {
            ContentKind::Meal => &mut next.meal_plan,
            ContentKind::Workout => &mut next.workout_plan,
            ContentKind::Tips => &mut next.tips,
        };
        *slot = Some(text);
        next
    }

    pub fn is_empty(&self) -> bool {
        ContentKind::ALL.iter().all(|k| self.get(*k).is_none())
    }

    /// Export needs at least one of the two plans; tips alone don't count
    pub fn is_exportable(&self) -> bool {
        self.meal_plan.is_some() || self.workout_plan.is_some()
    }
}
