pub mod attendance;
pub mod authentication;
pub mod break_entry;
pub mod designation;
pub mod employee;
pub mod role;
