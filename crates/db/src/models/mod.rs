//! Typed models for the fixed-shape tables.
//!
//! The generic browser works on untyped [`seatfinder_core::value::Row`]s;
//! these structs cover the tables the server itself reads and writes.

pub mod activity_log;
pub mod directory;
pub mod keep_alive_log;
pub mod role;
pub mod search_log;
