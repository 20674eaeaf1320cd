//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod activity_log_repo;
pub mod directory_repo;
pub mod keep_alive_log_repo;
pub mod role_repo;
pub mod row_repo;
pub mod search_log_repo;
pub mod sql_exec_repo;

pub use activity_log_repo::ActivityLogRepo;
pub use directory_repo::DirectoryRepo;
pub use keep_alive_log_repo::KeepAliveLogRepo;
pub use role_repo::RoleRepo;
pub use row_repo::RowRepo;
pub use search_log_repo::SearchLogRepo;
pub use sql_exec_repo::SqlExecRepo;
