pub mod capacity;
pub mod endpoint;
pub mod human;
