// Data models for video frames, body poses, and action predictions

pub mod frame;
pub mod pose;
pub mod prediction;
