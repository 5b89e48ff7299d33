// Template downloads dashboard - View-state orchestration over the analytics API
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
