pub mod batch;
pub mod diagnose;
pub mod rules;
