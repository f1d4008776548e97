pub mod message;
pub mod objectid;
pub mod source;
