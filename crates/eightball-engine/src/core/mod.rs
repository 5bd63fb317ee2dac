pub mod ball;
pub mod ball_set;
pub mod collision;
pub mod rng;
pub mod table;
pub mod time;
