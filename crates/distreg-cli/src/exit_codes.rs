//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Validation error - a definition failed structural validation
pub const VALIDATION_ERROR: i32 = 2;

/// IO error - directory missing, file unreadable, etc.
pub const IO_ERROR: i32 = 5;

/// Not found - unknown distribution or architecture
pub const NOT_FOUND: i32 = 6;

/// Forbidden - organization not allowed to build a restricted distribution
pub const FORBIDDEN: i32 = 7;

/// Configuration error (following sysexits.h EX_CONFIG)
pub const CONFIG_ERROR: i32 = 78;
