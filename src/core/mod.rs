pub mod config;

// External collaborator seams
pub mod classifier;
pub mod detector;

// Per-frame stages
pub mod encoder;
pub mod selector;
pub mod window;

// Orchestration and session accounting
pub mod aggregator;
pub mod pipeline;
pub mod summary;
