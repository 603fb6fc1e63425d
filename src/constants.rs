//! TigerStyle Constants

/// Lowest allowed gpa
pub const GPA_MIN: f64 = 0.0;

/// Highest allowed gpa
pub const GPA_MAX: f64 = 4.0;

/// Sub-second digits kept on timestamps (microseconds, as Postgres stores them)
pub const TIMESTAMP_SUBSEC_DIGITS: u16 = 6;

/// Maximum pooled database connections
pub const DATABASE_CONNECTIONS_COUNT_MAX: u32 = 10;

/// Default bind host
pub const HTTP_HOST_DEFAULT: &str = "0.0.0.0";

/// Default bind port
pub const HTTP_PORT_DEFAULT: u16 = 5000;

/// Health check status text
pub const HEALTH_STATUS: &str = "Server is running";

/// Body message for an unresolved id
pub const STUDENT_NOT_FOUND_MESSAGE: &str = "Student not found";

/// Body message after a delete
pub const STUDENT_DELETED_MESSAGE: &str = "Student deleted successfully";
