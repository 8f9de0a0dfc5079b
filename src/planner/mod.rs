//! Plan content generation
//!
//! Prompt construction and the single call out to the text-generation service.

pub mod generate;
pub mod prompts;

pub use generate::{generate_content, GenerationOutcome};
pub use prompts::{build_prompt, SYSTEM_PROMPT};
