use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuminaConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Root of the record store.
    pub data_dir: PathBuf,
    /// IANA zone used for chart labels. Added in v1.
    pub timezone: String,
    /// Questionnaire catalog JSON; the built-in questionnaire when unset.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Recommendation rule table JSON; the built-in table when unset.
    #[serde(default)]
    pub rules_path: Option<PathBuf>,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl LuminaConfig {
    pub fn defaults() -> eyre::Result<Self> {
        let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
        Ok(Self {
            config_version: CURRENT_VERSION,
            data_dir: base.join("lumina"),
            timezone: DEFAULT_TIMEZONE.to_string(),
            catalog_path: None,
            rules_path: None,
            log_format: LogFormat::default(),
        })
    }

    pub fn time_zone(&self) -> eyre::Result<jiff::tz::TimeZone> {
        jiff::tz::TimeZone::get(&self.timezone)
            .map_err(|e| eyre::eyre!("unknown timezone '{}': {e}", self.timezone))
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("lumina"))
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the config at `path`, or the platform default location when no
/// path is given. A missing file yields the defaults.
pub fn load_config(path: Option<&Path>) -> eyre::Result<LuminaConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    if !path.exists() {
        return LuminaConfig::defaults();
    }

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: LuminaConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update Lumina."
        ));
    }

    // v0 → v1: add timezone
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("timezone")
            .or_insert(serde_json::Value::String(DEFAULT_TIMEZONE.to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(CURRENT_VERSION.into()),
        );
        tracing::info!("migrated config v0 → v1 (added timezone)");
    }

    Ok(json)
}

pub fn save_config(config: &LuminaConfig, path: &Path) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v0_gains_default_timezone() {
        let json = serde_json::json!({ "data_dir": "/var/lib/lumina" });

        let migrated = migrate(json, 0).unwrap();
        let config: LuminaConfig = serde_json::from_value(migrated).unwrap();

        assert_eq!(config.config_version, 1);
        assert_eq!(config.timezone, "America/Sao_Paulo");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn v0_keeps_explicit_timezone() {
        let json = serde_json::json!({ "data_dir": "/tmp/l", "timezone": "Europe/Lisbon" });

        let migrated = migrate(json, 0).unwrap();
        assert_eq!(migrated["timezone"], "Europe/Lisbon");
    }

    #[test]
    fn newer_version_is_rejected() {
        let json = serde_json::json!({ "config_version": 9, "data_dir": "/tmp/l" });
        assert!(migrate(json, 9).is_err());
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(migrate(serde_json::json!([1, 2]), 0).is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = LuminaConfig {
            config_version: 0,
            data_dir: dir.path().join("data"),
            timezone: "America/Manaus".to_string(),
            catalog_path: None,
            rules_path: Some(dir.path().join("rules.json")),
            log_format: LogFormat::Json,
        };
        save_config(&config, &path).unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.config_version, 1);
        assert_eq!(loaded.timezone, "America/Manaus");
        assert_eq!(loaded.log_format, LogFormat::Json);
        assert_eq!(loaded.rules_path, config.rules_path);
    }

    #[test]
    fn bundled_timezone_resolves() {
        let mut config = LuminaConfig {
            config_version: CURRENT_VERSION,
            data_dir: PathBuf::from("/tmp/lumina"),
            timezone: DEFAULT_TIMEZONE.to_string(),
            catalog_path: None,
            rules_path: None,
            log_format: LogFormat::Pretty,
        };
        assert!(config.time_zone().is_ok());

        config.timezone = "Not/AZone".to_string();
        assert!(config.time_zone().is_err());
    }
}
