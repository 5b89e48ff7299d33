// Application layer - Controllers and the collaborator seams they drive
pub mod analytics_api;
pub mod chart;
pub mod chart_slot;
pub mod dashboard_controller;
pub mod page;
pub mod range_selection;
