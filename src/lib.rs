//! FitPlan Library
//!
//! Nutrition targets, plan prompts, AI content generation, charts and export.

pub mod build_info;
pub mod config;
pub mod llm;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod planner;
pub mod tools;
