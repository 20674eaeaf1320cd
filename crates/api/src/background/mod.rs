//! Work that runs off the request path.

pub mod activity;
