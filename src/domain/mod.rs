// Domain layer - Plain data shapes exchanged with the analytics API
pub mod metrics;
pub mod range;
pub mod series;
