//! Attendance computation: session durations, status classification,
//! break aggregation and report assembly, plus the storage-backed
//! recorder and reporter built on top of them.

pub mod breaks;
pub mod recorder;
pub mod report;
pub mod reporter;
pub mod session;
pub mod status;

pub const NOT_LOGGED_IN: &str = "Not Logged In";
pub const NOT_LOGGED_OUT: &str = "Not Logged Out Yet";
pub const UNKNOWN: &str = "Unknown";
