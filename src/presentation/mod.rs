// Presentation layer - Console controls
pub mod commands;
pub mod console;
