//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and default server settings.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Falling & Catch";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "fallcatch";

/// Directory name used under the platform config directory.
pub const APP_DIR_NAME: &str = "FallingCatch";

/// Default address the server binds to.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port the server listens on.
pub const DEFAULT_PORT: u16 = 8000;
