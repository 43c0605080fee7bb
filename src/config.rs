//! Configuration constants and utilities for calcline

/// Default profile file path for calcline
pub const DEFAULT_PROFILE_PATH: &str = "~/.calcline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "CALCLINE_PROFILE_PATH";

/// Environment variable naming the log file; logging is off when unset
pub const LOG_FILE_ENV_VAR: &str = "CALCLINE_LOG_FILE";

/// Environment variable holding the log level filter
pub const LOG_LEVEL_ENV_VAR: &str = "CALCLINE_LOG_LEVEL";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}
