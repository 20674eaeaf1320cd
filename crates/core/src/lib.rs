pub mod activity;
pub mod browser;
pub mod error;
pub mod limits;
pub mod resources;
pub mod roles;
pub mod session;
pub mod sql_gate;
pub mod sql_runner;
pub mod ssl;
pub mod tables;
pub mod types;
pub mod value;
