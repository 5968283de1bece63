use crate::error::PerflineError;
use figment::{Figment, providers::{Env, Format, Yaml}};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Environment variable holding the branch under test.
pub const BRANCH_VAR: &str = "BRANCH";

/// Environment variable holding the timestamp of the commit under test.
pub const COMMIT_TIMESTAMP_VAR: &str = "COMMIT_TIMESTAMP";

/// Publication settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublishConfig {
    /// Measurement name for rendered lines.
    #[serde(default = "default_measurement")]
    pub measurement: String,

    /// Source metadata for the code under test.
    #[serde(default)]
    pub source: SourceInfo,
}

/// Snapshot of the CI context describing the code under test.
///
/// Captured once at the call site and handed to `Metric` construction, so the
/// value objects never read the process environment themselves and later
/// environment changes cannot affect an already-built metric.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SourceInfo {
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub branch: Option<String>,

    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub commit_timestamp: Option<String>,
}

impl SourceInfo {
    /// Capture `BRANCH` and `COMMIT_TIMESTAMP` from the process environment.
    ///
    /// Absent variables are tolerated: the branch tag renders with an empty
    /// value and the backend assigns ingestion time. Each miss is logged so a
    /// half-configured CI job stays visible.
    pub fn from_env() -> Self {
        Self::default().or_env()
    }

    /// Fill unset fields from the process environment.
    pub fn or_env(self) -> Self {
        self.or_lookup(|name| std::env::var(name).ok())
    }

    fn or_lookup(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let branch = self.branch.or_else(|| lookup(BRANCH_VAR));
        if branch.is_none() {
            warn!(var = BRANCH_VAR, "not set; branch tag will render empty");
        }
        let commit_timestamp = self.commit_timestamp.or_else(|| lookup(COMMIT_TIMESTAMP_VAR));
        if commit_timestamp.is_none() {
            warn!(var = COMMIT_TIMESTAMP_VAR, "not set; backend will assign ingestion time");
        }
        Self { branch, commit_timestamp }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            measurement: default_measurement(),
            source: SourceInfo::default(),
        }
    }
}

impl PublishConfig {
    /// Load configuration from a YAML file + `PERFLINE_` env overrides.
    ///
    /// Source fields set by neither layer fall back to `BRANCH` /
    /// `COMMIT_TIMESTAMP`, each independently.
    pub fn load(path: &Path) -> Result<Self, PerflineError> {
        let mut config: PublishConfig = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("PERFLINE_").split("__"))
            .extract()?;
        config.source = config.source.or_env();
        Ok(config)
    }
}

fn default_measurement() -> String {
    crate::metric::MEASUREMENT.to_string()
}

/// Config values arrive type-inferred (a bare commit timestamp parses as an
/// integer); accept any scalar and normalize it back to a string.
fn de_opt_scalar<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        UInt(u64),
        Float(f64),
        Bool(bool),
    }

    Ok(Option::<Scalar>::deserialize(de)?.map(|scalar| match scalar {
        Scalar::Text(s) => s,
        Scalar::Int(v) => v.to_string(),
        Scalar::UInt(v) => v.to_string(),
        Scalar::Float(v) => v.to_string(),
        Scalar::Bool(v) => v.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // ── Defaults ─────────────────────────────────────────────────

    #[test]
    fn default_config_uses_perf_measurement() {
        let cfg = PublishConfig::default();
        assert_eq!(cfg.measurement, "perf");
        assert!(cfg.source.branch.is_none());
        assert!(cfg.source.commit_timestamp.is_none());
    }

    // ── Lookup fallback ──────────────────────────────────────────

    #[test]
    fn lookup_fills_both_fields() {
        let info = SourceInfo::default().or_lookup(|name| match name {
            BRANCH_VAR => Some("main".to_string()),
            COMMIT_TIMESTAMP_VAR => Some("1700000000".to_string()),
            _ => None,
        });
        assert_eq!(info.branch.as_deref(), Some("main"));
        assert_eq!(info.commit_timestamp.as_deref(), Some("1700000000"));
    }

    #[test]
    fn absent_variables_stay_none() {
        let info = SourceInfo::default().or_lookup(|_| None);
        assert!(info.branch.is_none());
        assert!(info.commit_timestamp.is_none());
    }

    #[test]
    fn preset_fields_win_over_lookup() {
        let preset = SourceInfo {
            branch: Some("release/1.2".to_string()),
            commit_timestamp: None,
        };
        let info = preset.or_lookup(|name| match name {
            BRANCH_VAR => Some("main".to_string()),
            COMMIT_TIMESTAMP_VAR => Some("1700000000".to_string()),
            _ => None,
        });
        assert_eq!(info.branch.as_deref(), Some("release/1.2"));
        assert_eq!(info.commit_timestamp.as_deref(), Some("1700000000"));
    }

    // ── SourceInfo serde ─────────────────────────────────────────

    #[test]
    fn source_info_roundtrip() {
        let info = SourceInfo {
            branch: Some("main".to_string()),
            commit_timestamp: Some("1700000000".to_string()),
        };
        let json = serde_json::to_string(&info).unwrap();
        let back: SourceInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }

    #[test]
    fn numeric_commit_timestamp_normalizes_to_string() {
        let info: SourceInfo =
            serde_json::from_str(r#"{"branch":"main","commit_timestamp":1700000000}"#).unwrap();
        assert_eq!(info.commit_timestamp.as_deref(), Some("1700000000"));
    }

    // ── PublishConfig::load() ────────────────────────────────────

    #[test]
    fn load_from_valid_yaml_overrides_defaults() {
        let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
        write!(tmpfile, "measurement: \"perf_nightly\"\n").unwrap();
        let cfg = PublishConfig::load(tmpfile.path()).unwrap();
        assert_eq!(cfg.measurement, "perf_nightly");
    }

    #[test]
    fn load_yaml_with_source_block() {
        let yaml = r#"
source:
  branch: "release/2.11"
  commit_timestamp: 1700000000
"#;
        let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
        write!(tmpfile, "{yaml}").unwrap();
        let cfg = PublishConfig::load(tmpfile.path()).unwrap();
        assert_eq!(cfg.source.branch.as_deref(), Some("release/2.11"));
        // Unquoted YAML integer is normalized back to its string form
        assert_eq!(cfg.source.commit_timestamp.as_deref(), Some("1700000000"));
    }

    #[test]
    fn load_from_missing_file_keeps_default_measurement() {
        let cfg = PublishConfig::load(Path::new("/nonexistent/perfline.yaml")).unwrap();
        assert_eq!(cfg.measurement, "perf");
    }
}
