pub mod engine;
pub mod shot;
pub mod state;
