pub mod assistant;
pub mod base;
