pub mod cue;
pub mod queue;
