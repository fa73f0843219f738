mod distance_field;
mod extract;
mod sentinels;

pub use distance_field::DistanceField;
pub use extract::{AttackPath, FleePath, TechniquePlacement};
pub use sentinels::{is_finite_distance, DARK, FLOOR, GOAL, WALL};
