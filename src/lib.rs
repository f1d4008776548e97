pub mod errors;
pub mod providers;
pub mod session;
