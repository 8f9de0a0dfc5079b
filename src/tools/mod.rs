//! MCP tool implementations

pub mod calculate;
pub mod charts;
pub mod export;
pub mod status;
