pub mod assess;
pub mod config;
pub mod hand;
pub mod mudra;
pub mod session;
pub mod store;
