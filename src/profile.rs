//! # Connection Profiles
//!
//! Named sections of an INI file describing where the calculation service
//! lives and how patient to be with it.
//!
//! ```ini
//! [default]
//! server = http://localhost:3000
//! calculate_path = /api/calculate
//! health_path = /api/backend-health
//! timeout_ms = 10000
//! health_recheck_ms = 3000
//! ```

use ini::Ini;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SERVER: &str = "http://localhost:3000";
pub const DEFAULT_CALCULATE_PATH: &str = "/api/calculate";
pub const DEFAULT_HEALTH_PATH: &str = "/api/backend-health";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_HEALTH_RECHECK_MS: u64 = 3_000;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read profile file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: ini::Error,
    },
    #[error("invalid value '{value}' for '{key}' in profile '{profile}'")]
    InvalidValue {
        profile: String,
        key: String,
        value: String,
    },
}

/// Settings for reaching the calculation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalcProfile {
    server: String,
    calculate_path: String,
    health_path: String,
    timeout: Duration,
    health_recheck_delay: Duration,
}

impl CalcProfile {
    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn calculate_path(&self) -> &str {
        &self.calculate_path
    }

    pub fn health_path(&self) -> &str {
        &self.health_path
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn health_recheck_delay(&self) -> Duration {
        self.health_recheck_delay
    }

    /// Replace the server, e.g. from a command line override
    pub fn with_server<S: Into<String>>(mut self, server: S) -> Self {
        self.server = server.into();
        self
    }

    /// Absolute URL of the calculation endpoint
    pub fn calculate_url(&self) -> String {
        join_url(&self.server, &self.calculate_path)
    }

    /// Absolute URL of the health endpoint
    pub fn health_url(&self) -> String {
        join_url(&self.server, &self.health_path)
    }
}

impl Default for CalcProfile {
    fn default() -> Self {
        get_blank_profile()
    }
}

/// Profile used when no profile file or section exists
pub fn get_blank_profile() -> CalcProfile {
    CalcProfile {
        server: DEFAULT_SERVER.to_string(),
        calculate_path: DEFAULT_CALCULATE_PATH.to_string(),
        health_path: DEFAULT_HEALTH_PATH.to_string(),
        timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        health_recheck_delay: Duration::from_millis(DEFAULT_HEALTH_RECHECK_MS),
    }
}

fn join_url(server: &str, path: &str) -> String {
    format!(
        "{}/{}",
        server.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Reads profiles from an INI file
pub struct IniProfileStore {
    path: PathBuf,
}

impl IniProfileStore {
    /// Create a store for the given path; `~` is expanded
    pub fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(shellexpand::tilde(path).into_owned()),
        }
    }

    /// Load a named profile
    ///
    /// Returns `Ok(None)` when the file or the section does not exist.
    pub fn get_profile(&self, name: &str) -> Result<Option<CalcProfile>, ProfileError> {
        if !self.path.exists() {
            tracing::debug!("Profile file '{}' does not exist", self.path.display());
            return Ok(None);
        }

        let ini = Ini::load_from_file(&self.path).map_err(|source| ProfileError::Read {
            path: self.path.display().to_string(),
            source,
        })?;

        let Some(section) = ini.section(Some(name)) else {
            return Ok(None);
        };

        let blank = get_blank_profile();
        let text = |key: &str, default: &str| {
            section
                .get(key)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .unwrap_or(default)
                .to_string()
        };
        let millis = |key: &str, default: Duration| -> Result<Duration, ProfileError> {
            match section.get(key).map(str::trim) {
                None | Some("") => Ok(default),
                Some(value) => value.parse::<u64>().map(Duration::from_millis).map_err(|_| {
                    ProfileError::InvalidValue {
                        profile: name.to_string(),
                        key: key.to_string(),
                        value: value.to_string(),
                    }
                }),
            }
        };

        Ok(Some(CalcProfile {
            server: text("server", &blank.server),
            calculate_path: text("calculate_path", &blank.calculate_path),
            health_path: text("health_path", &blank.health_path),
            timeout: millis("timeout_ms", blank.timeout)?,
            health_recheck_delay: millis("health_recheck_ms", blank.health_recheck_delay)?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn profile_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn store_for(file: &NamedTempFile) -> IniProfileStore {
        IniProfileStore::new(file.path().to_str().unwrap())
    }

    #[test]
    fn missing_file_should_yield_no_profile() {
        let store = IniProfileStore::new("/nonexistent/calcline/profile");
        assert_eq!(store.get_profile("default").unwrap(), None);
    }

    #[test]
    fn missing_section_should_yield_no_profile() {
        let file = profile_file("[staging]\nserver = http://staging:3000\n");
        assert_eq!(store_for(&file).get_profile("default").unwrap(), None);
    }

    #[test]
    fn section_should_override_defaults() {
        let file = profile_file(
            "[default]\nserver = http://calc.local:8081\ncalculate_path = /calculate\ntimeout_ms = 250\n",
        );

        let profile = store_for(&file).get_profile("default").unwrap().unwrap();

        assert_eq!(profile.server(), "http://calc.local:8081");
        assert_eq!(profile.calculate_path(), "/calculate");
        assert_eq!(profile.health_path(), DEFAULT_HEALTH_PATH);
        assert_eq!(profile.timeout(), Duration::from_millis(250));
        assert_eq!(
            profile.health_recheck_delay(),
            Duration::from_millis(DEFAULT_HEALTH_RECHECK_MS)
        );
        assert_eq!(profile.calculate_url(), "http://calc.local:8081/calculate");
    }

    #[test]
    fn malformed_number_should_be_rejected() {
        let file = profile_file("[default]\ntimeout_ms = soon\n");

        let err = store_for(&file).get_profile("default").unwrap_err();

        assert!(matches!(err, ProfileError::InvalidValue { ref key, .. } if key == "timeout_ms"));
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn blank_profile_should_point_at_local_proxy() {
        let profile = get_blank_profile();
        assert_eq!(profile.calculate_url(), "http://localhost:3000/api/calculate");
        assert_eq!(profile.health_url(), "http://localhost:3000/api/backend-health");
    }

    #[test]
    fn urls_should_join_without_double_slashes() {
        let profile = get_blank_profile().with_server("http://example.com/");
        assert_eq!(profile.calculate_url(), "http://example.com/api/calculate");
    }
}
