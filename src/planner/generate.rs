//! Content generation
//!
//! One prompt, one call, one outcome. A failed call leaves the session as it
//! was and carries a message for the user.

use serde::Serialize;
use tracing::{info, warn};

use super::prompts::{build_prompt, SYSTEM_PROMPT};
use crate::llm::{GenerationRequest, TextGenerator};
use crate::models::{ContentKind, PlanSession};

/// Result of a generation attempt
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub session: PlanSession,
    pub kind: ContentKind,
    pub error: Option<String>,
}

impl GenerationOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    pub fn content(&self) -> Option<&str> {
        self.session.content().get(self.kind)
    }

    pub fn to_response(&self) -> GenerateContentResponse {
        let content = if self.succeeded() {
            self.content().map(str::to_string)
        } else {
            None
        };
        GenerateContentResponse {
            success: self.succeeded(),
            kind: self.kind,
            title: self.kind.title().to_string(),
            hint: content.is_none().then(|| self.kind.empty_hint().to_string()),
            content,
            message: match &self.error {
                Some(e) => e.clone(),
                None => format!("{} generated", self.kind.title()),
            },
        }
    }
}

/// Response for generate_plan_content
#[derive(Debug, Serialize)]
pub struct GenerateContentResponse {
    pub success: bool,
    pub kind: ContentKind,
    pub title: String,
    pub content: Option<String>,
    /// What to do next when the section is still empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub message: String,
}

/// Generate one section of content for a session
pub fn generate_content(
    generator: &dyn TextGenerator,
    session: &PlanSession,
    kind: ContentKind,
) -> GenerationOutcome {
    let prompt = build_prompt(kind, session.profile(), session.nutrition());
    let request = GenerationRequest::new(SYSTEM_PROMPT, prompt);

    info!(kind = %kind, model = generator.model(), "{}", kind.progress_message());

    match generator.generate(&request) {
        Ok(text) => {
            info!(kind = %kind, chars = text.len(), "Content generated");
            GenerationOutcome {
                session: session.record(kind, text),
                kind,
                error: None,
            }
        }
        Err(e) => {
            warn!(kind = %kind, error = %e, "Content generation failed");
            GenerationOutcome {
                session: session.clone(),
                kind,
                error: Some(format!("Error generating response: {}", e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::llm::GenerationError;
    use crate::models::{ActivityLevel, Goal, Profile, Sex};

    struct StubGenerator {
        reply: Option<String>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl StubGenerator {
        fn replying(text: &str) -> Self {
            Self { reply: Some(text.to_string()), seen: Mutex::new(Vec::new()) }
        }

        fn failing() -> Self {
            Self { reply: None, seen: Mutex::new(Vec::new()) }
        }
    }

    impl TextGenerator for StubGenerator {
        fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Some(text) => Ok(text.clone()),
                None => Err(GenerationError::Api {
                    status: 401,
                    message: "Invalid API Key".to_string(),
                }),
            }
        }

        fn model(&self) -> &str {
            "stub"
        }
    }

    fn session() -> PlanSession {
        let profile =
            Profile::new(41, 88.0, 175.0, Sex::Female, ActivityLevel::VeryActive, Goal::Endurance).unwrap();
        PlanSession::calculate(profile)
    }

    #[test]
    fn test_success_records_content() {
        let generator = StubGenerator::replying("## Breakfast\nOats");
        let start = session();
        let outcome = generate_content(&generator, &start, ContentKind::Meal);

        assert!(outcome.succeeded());
        assert_eq!(outcome.content(), Some("## Breakfast\nOats"));
        assert!(start.content().is_empty());

        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].system, SYSTEM_PROMPT);
        assert!(seen[0].prompt.contains("daily meal plan"));
    }

    #[test]
    fn test_failure_keeps_previous_content() {
        let start = session().record(ContentKind::Workout, "Run".to_string());
        let outcome = generate_content(&StubGenerator::failing(), &start, ContentKind::Workout);

        assert!(!outcome.succeeded());
        assert_eq!(outcome.session, start);

        let response = outcome.to_response();
        assert!(!response.success);
        assert_eq!(response.content, None);
        assert_eq!(response.message, "Error generating response: API returned 401: Invalid API Key");
        assert_eq!(
            response.hint.as_deref(),
            Some("Generate a workout plan to get your customized training program")
        );
    }

    #[test]
    fn test_hint_only_for_empty_section() {
        let ok = generate_content(&StubGenerator::replying("Drink water"), &session(), ContentKind::Tips);
        let response = ok.to_response();
        assert_eq!(response.hint, None);
        assert!(!serde_json::to_value(&response).unwrap().as_object().unwrap().contains_key("hint"));

        let failed = generate_content(&StubGenerator::failing(), &session(), ContentKind::Meal).to_response();
        assert_eq!(failed.hint.as_deref(), Some(ContentKind::Meal.empty_hint()));
    }

    #[test]
    fn test_single_attempt_on_failure() {
        let generator = StubGenerator::failing();
        generate_content(&generator, &session(), ContentKind::Tips);
        assert_eq!(generator.seen.lock().unwrap().len(), 1);
    }
}
