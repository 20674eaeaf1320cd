pub mod activity;
pub mod auth;
pub mod functions;
pub mod records;
pub mod search;
pub mod status;
pub mod tables;
