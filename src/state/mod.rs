/// State management module
/// 
/// This module handles all gallery state, including:
/// - The content manifest and folder scanning (content.rs)
/// - Per-tile resolution and load status (data.rs)

pub mod content;
pub mod data;
