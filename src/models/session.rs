//! Plan session
//!
//! Everything one planning action produces: the submitted profile, its
//! nutrition targets and whatever content has been generated so far.
//! Sessions are values. Each action returns a new one.

use serde::Serialize;

use super::{ContentKind, GeneratedContent, NutritionResult, Profile};
use crate::nutrition::calculate_for_profile;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSession {
    profile: Profile,
    nutrition: NutritionResult,
    content: GeneratedContent,
}

impl PlanSession {
    /// Start a session by calculating targets for a profile
    pub fn calculate(profile: Profile) -> Self {
        let nutrition = calculate_for_profile(&profile);
        Self {
            profile,
            nutrition,
            content: GeneratedContent::default(),
        }
    }

    /// Rebuild a session with content generated earlier
    pub fn with_content(profile: Profile, content: GeneratedContent) -> Self {
        Self {
            content,
            ..Self::calculate(profile)
        }
    }

    /// New session with one content section recorded
    pub fn record(&self, kind: ContentKind, text: String) -> Self {
        Self {
            profile: self.profile.clone(),
            nutrition: self.nutrition,
            content: self.content.with(kind, text),
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn nutrition(&self) -> &NutritionResult {
        &self.nutrition
    }

    pub fn content(&self) -> &GeneratedContent {
        &self.content
    }
}
