pub mod attendance;
pub mod breaks;
pub mod designation;
pub mod session;
