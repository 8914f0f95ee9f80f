//! Error mapping configuration loaded via OrthoConfig.
//!
//! Deployments attach business meaning to specific unique indexes and
//! constraints through a JSON overrides file:
//!
//! ```json
//! {
//!   "mysql": { "idx_users_email": "DUPLICATE_EMAIL" },
//!   "postgres": { "users_email_key": "DUPLICATE_EMAIL" }
//! }
//! ```
//!
//! Both sections are optional. Every code must name a catalog entry.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::lookup;
use crate::domain::ports::OverrideTable;

/// Configuration values controlling error classification.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ERROR_MAPPING")]
pub struct ErrorMappingSettings {
    /// JSON file with index and constraint overrides.
    pub overrides_path: Option<PathBuf>,
    /// Fail instead of warning when MySQL override keys contain one another.
    #[ortho_config(default = false)]
    pub reject_overlapping_keys: bool,
}

/// Persistence backend an override section belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Index-name overrides matched by substring.
    MySql,
    /// Constraint-name overrides matched exactly.
    Postgres,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MySql => write!(f, "mysql"),
            Self::Postgres => write!(f, "postgres"),
        }
    }
}

/// Errors returned while loading error mapping configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Layered configuration could not be assembled.
    #[error("failed to load error mapping settings: {message}")]
    Load {
        /// Description from the configuration loader.
        message: String,
    },
    /// The overrides file could not be read.
    #[error("failed to read overrides at {path}: {source}")]
    Read {
        /// Path to the overrides file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The overrides file is not valid JSON of the expected shape.
    #[error("invalid overrides file: {0}")]
    Parse(#[from] serde_json::Error),
    /// An override names a code that is not in the catalog.
    #[error("{backend} override `{key}` refers to unknown code `{code}`")]
    UnknownCode {
        /// Section the entry was found in.
        backend: Backend,
        /// Index or constraint name.
        key: String,
        /// Offending code.
        code: String,
    },
    /// Two substring-matched keys contain one another with different codes.
    #[error("{backend} override `{inner}` is contained in `{outer}` with a different code")]
    OverlappingKeys {
        /// Section the keys were found in.
        backend: Backend,
        /// The shorter key.
        inner: String,
        /// The key containing it.
        outer: String,
    },
}

/// Override tables for every supported backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTables {
    /// Index-name overrides for duplicate entries.
    pub mysql: OverrideTable,
    /// Constraint-name overrides for unique violations.
    pub postgres: OverrideTable,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OverrideFile {
    #[serde(default)]
    mysql: BTreeMap<String, String>,
    #[serde(default)]
    postgres: BTreeMap<String, String>,
}

impl ErrorMappingSettings {
    /// Load settings from the process arguments, environment and files.
    pub fn load_from_env() -> Result<Self, SettingsError> {
        Self::load_from_args(std::env::args_os())
    }

    /// Load settings from explicit arguments layered over environment and
    /// files.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::load_from_iter(args).map_err(|err| SettingsError::Load {
            message: err.to_string(),
        })
    }

    /// Read and validate the configured override tables.
    ///
    /// Without an overrides path both tables are empty.
    pub fn override_tables(&self) -> Result<OverrideTables, SettingsError> {
        let Some(path) = self.overrides_path.as_deref() else {
            info!(reason = "unset", "no error mapping overrides configured");
            return Ok(OverrideTables::default());
        };
        let contents = read_overrides(path)?;
        let tables = parse_override_tables(&contents, self.reject_overlapping_keys)?;
        info!(
            path = %path.display(),
            mysql = tables.mysql.len(),
            postgres = tables.postgres.len(),
            "error mapping overrides loaded"
        );
        Ok(tables)
    }
}

fn read_overrides(path: &Path) -> Result<String, SettingsError> {
    let read_error = |source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "overrides path has no file name",
        ))
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    directory
        .read_to_string(Path::new(file_name))
        .map_err(read_error)
}

/// Parse the JSON overrides document into validated tables.
///
/// # Examples
/// ```
/// use domain_errors::domain::DomainError;
/// use domain_errors::settings::parse_override_tables;
///
/// let tables = parse_override_tables(
///     r#"{ "postgres": { "users_email_key": "DUPLICATE_EMAIL" } }"#,
///     false,
/// )?;
/// assert_eq!(
///     tables.postgres.get("users_email_key"),
///     Some(&DomainError::DUPLICATE_EMAIL)
/// );
/// assert!(tables.mysql.is_empty());
/// # Ok::<(), domain_errors::settings::SettingsError>(())
/// ```
pub fn parse_override_tables(
    contents: &str,
    reject_overlapping_keys: bool,
) -> Result<OverrideTables, SettingsError> {
    let file: OverrideFile = serde_json::from_str(contents)?;
    let mysql = resolve_section(Backend::MySql, file.mysql)?;
    let postgres = resolve_section(Backend::Postgres, file.postgres)?;

    let overlaps = mysql.overlapping_keys();
    if let (true, Some(&(inner, outer))) = (reject_overlapping_keys, overlaps.first()) {
        return Err(SettingsError::OverlappingKeys {
            backend: Backend::MySql,
            inner: inner.to_owned(),
            outer: outer.to_owned(),
        });
    }
    for &(inner, outer) in &overlaps {
        warn!(
            inner,
            outer,
            "mysql override keys overlap; messages naming the longer index match the shorter key first"
        );
    }

    Ok(OverrideTables { mysql, postgres })
}

fn resolve_section(
    backend: Backend,
    entries: BTreeMap<String, String>,
) -> Result<OverrideTable, SettingsError> {
    entries
        .into_iter()
        .map(|(key, code)| match lookup(&code) {
            Some(error) => Ok((key, error.clone())),
            None => Err(SettingsError::UnknownCode { backend, key, code }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    //! Unit tests for error mapping configuration parsing.

    use super::*;
    use std::io::Write;

    use env_lock::lock_env;
    use rstest::rstest;

    use crate::domain::DomainError;

    fn load_from_empty_args() -> ErrorMappingSettings {
        ErrorMappingSettings::load_from_iter([OsString::from("domain-errors")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("ERROR_MAPPING_OVERRIDES_PATH", None::<String>),
            ("ERROR_MAPPING_REJECT_OVERLAPPING_KEYS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.overrides_path.is_none());
        assert!(!settings.reject_overlapping_keys);
        let tables = settings.override_tables().expect("empty tables");
        assert_eq!(tables, OverrideTables::default());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "ERROR_MAPPING_OVERRIDES_PATH",
                Some("/etc/app/error-overrides.json".to_owned()),
            ),
            ("ERROR_MAPPING_REJECT_OVERLAPPING_KEYS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.overrides_path,
            Some(PathBuf::from("/etc/app/error-overrides.json"))
        );
        assert!(settings.reject_overlapping_keys);
    }

    #[rstest]
    fn malformed_environment_values_are_load_errors() {
        let _guard = lock_env([
            ("ERROR_MAPPING_OVERRIDES_PATH", None::<String>),
            (
                "ERROR_MAPPING_REJECT_OVERLAPPING_KEYS",
                Some("notabool".to_owned()),
            ),
        ]);

        let result = ErrorMappingSettings::load_from_args([OsString::from("domain-errors")]);
        assert!(matches!(result, Err(SettingsError::Load { .. })));
    }

    #[rstest]
    fn overrides_file_is_read_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(br#"{ "mysql": { "idx_email": "DUPLICATE_EMAIL" } }"#)
            .expect("write overrides");
        let settings = ErrorMappingSettings {
            overrides_path: Some(file.path().to_path_buf()),
            reject_overlapping_keys: false,
        };

        let tables = settings.override_tables().expect("tables load");
        assert_eq!(
            tables.mysql.get("idx_email"),
            Some(&DomainError::DUPLICATE_EMAIL)
        );
        assert!(tables.postgres.is_empty());
    }

    #[rstest]
    fn missing_overrides_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let settings = ErrorMappingSettings {
            overrides_path: Some(dir.path().join("absent.json")),
            reject_overlapping_keys: false,
        };
        let result = settings.override_tables();
        assert!(matches!(result, Err(SettingsError::Read { .. })));
    }

    #[rstest]
    fn unknown_codes_are_rejected() {
        let result = parse_override_tables(r#"{ "postgres": { "k": "NOPE" } }"#, false);
        match result {
            Err(SettingsError::UnknownCode { backend, key, code }) => {
                assert_eq!(backend, Backend::Postgres);
                assert_eq!(key, "k");
                assert_eq!(code, "NOPE");
            }
            other => panic!("expected unknown code error, got {other:?}"),
        }
    }

    #[rstest]
    #[case(r#"{ "sqlite": {} }"#)]
    #[case(r#"{ "mysql": ["idx_email"] }"#)]
    #[case("not json")]
    fn malformed_documents_are_parse_errors(#[case] contents: &str) {
        let result = parse_override_tables(contents, false);
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[rstest]
    fn overlapping_mysql_keys_warn_by_default_and_fail_when_strict() {
        let contents = r#"{ "mysql": {
            "idx_email": "DUPLICATE_EMAIL",
            "idx_email_lead": "DUPLICATE_LEAD"
        } }"#;

        let lenient = parse_override_tables(contents, false).expect("overlaps only warn");
        assert_eq!(lenient.mysql.len(), 2);

        let strict = parse_override_tables(contents, true);
        assert!(matches!(
            strict,
            Err(SettingsError::OverlappingKeys {
                backend: Backend::MySql,
                ..
            })
        ));
    }

    #[rstest]
    fn overlapping_postgres_keys_are_fine() {
        let contents = r#"{ "postgres": {
            "users_email_key": "DUPLICATE_EMAIL",
            "users_email_key_lead": "DUPLICATE_LEAD"
        } }"#;
        let tables = parse_override_tables(contents, true).expect("exact keys never overlap");
        assert_eq!(tables.postgres.len(), 2);
    }
}
