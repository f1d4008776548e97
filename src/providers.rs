pub mod assistant;
pub mod base;
pub mod configs;
pub mod types;
pub mod utils;

#[cfg(test)]
pub mod mock;
