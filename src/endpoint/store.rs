use super::validate::validate_base_url;
use crate::config::{AppConfig, EndpointConfig};
use crate::error::{Result, RsketchError};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const NOT_CONFIGURED_HINT: &str =
    "no backend URL has been set; run `rsketch endpoint set <url>` first";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointValidation {
    pub ok: bool,
    pub detail: String,
}

/// File-backed home of the single `base_url` record.
#[derive(Debug, Clone)]
pub struct EndpointConfigStore {
    path: PathBuf,
}

impl EndpointConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.endpoint_file.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validates and atomically replaces the stored URL. On any error the
    /// previous value stays readable.
    pub fn set(&self, url: &str) -> Result<()> {
        let base_url = validate_base_url(url)?;
        let record = EndpointConfig::new(base_url);
        let data = serde_json::to_vec_pretty(&record)?;

        self.write_atomic(&data)?;
        log::info!("Endpoint updated to {} ({})", record.base_url, self.path.display());
        Ok(())
    }

    pub fn get(&self) -> Result<String> {
        Ok(self.load()?.base_url)
    }

    /// Reads the full record, for callers that thread it through.
    pub fn load(&self) -> Result<EndpointConfig> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RsketchError::NotConfigured(NOT_CONFIGURED_HINT.into()));
            }
            Err(e) => return Err(e.into()),
        };

        let record: EndpointConfig = serde_json::from_str(&content).map_err(|e| {
            RsketchError::ConfigError(format!(
                "{} is not a valid endpoint file: {}",
                self.path.display(),
                e
            ))
        })?;

        if record.base_url.trim().is_empty() {
            return Err(RsketchError::NotConfigured(NOT_CONFIGURED_HINT.into()));
        }

        Ok(record)
    }

    pub fn validate(&self) -> EndpointValidation {
        match self.load() {
            Ok(record) => match validate_base_url(&record.base_url) {
                Ok(url) => EndpointValidation {
                    ok: true,
                    detail: format!("endpoint configured: {}", url),
                },
                Err(e) => EndpointValidation {
                    ok: false,
                    detail: e.to_string(),
                },
            },
            Err(e) => EndpointValidation {
                ok: false,
                detail: e.to_string(),
            },
        }
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "endpoint.json".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    fn write_atomic(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.temp_path();
        let written = (|| -> io::Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(data)?;
            file.sync_all()
        })();

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        // rename replaces the target in one step on every platform
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> EndpointConfigStore {
        EndpointConfigStore::new(dir.join("endpoint.json"))
    }

    #[test]
    fn test_get_before_set_is_not_configured() {
        let dir = tempdir().unwrap();
        let err = store_in(dir.path()).get().unwrap_err();
        assert!(err.is_not_configured());
        assert!(err.to_string().contains("rsketch endpoint set"));
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.set("https://abc123.example.com").unwrap();
        assert_eq!(store.get().unwrap(), "https://abc123.example.com");
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.set("https://first.example.com").unwrap();
        store.set("https://second.example.com").unwrap();
        assert_eq!(store.get().unwrap(), "https://second.example.com");
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_invalid_set_keeps_previous_value() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.set("https://abc123.example.com").unwrap();

        let err = store.set("not-a-url").unwrap_err();
        assert!(err.is_invalid_url());
        assert_eq!(store.get().unwrap(), "https://abc123.example.com");
    }

    #[test]
    fn test_invalid_set_on_empty_store_writes_nothing() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(store.set("").is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_failed_rename_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        fs::create_dir(store.path()).unwrap();
        fs::write(store.path().join("occupied"), "x").unwrap();

        assert!(store.set("https://abc123.example.com").is_err());
        assert!(!store.temp_path().exists());
        assert!(store.path().join("occupied").exists());
    }

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.set("https://abc123.example.com").unwrap();

        // A directory squatting on the temp path makes File::create fail
        fs::create_dir(store.temp_path()).unwrap();
        fs::write(store.temp_path().join("occupied"), "x").unwrap();

        let err = store.set("https://other.example.com").unwrap_err();
        assert!(matches!(err, RsketchError::IoError(_)));
        assert_eq!(store.get().unwrap(), "https://abc123.example.com");
    }

    #[test]
    fn test_set_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = EndpointConfigStore::new(dir.path().join("nested/conf/endpoint.json"));
        store.set("http://localhost:8000").unwrap();
        assert_eq!(store.get().unwrap(), "http://localhost:8000");
    }

    #[test]
    fn test_validate_reports_without_failing() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let missing = store.validate();
        assert!(!missing.ok);
        assert!(missing.detail.contains("not configured"));

        store.set("https://abc123.example.com").unwrap();
        let present = store.validate();
        assert!(present.ok);
        assert!(present.detail.contains("https://abc123.example.com"));
    }

    #[test]
    fn test_validate_flags_hand_edited_garbage() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        fs::write(store.path(), r#"{"base_url":"nonsense"}"#).unwrap();
        assert!(!store.validate().ok);

        fs::write(store.path(), "{ truncated").unwrap();
        let report = store.validate();
        assert!(!report.ok);
        assert!(matches!(store.get(), Err(RsketchError::ConfigError(_))));
    }

    #[test]
    fn test_stored_file_shape() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.set("https://abc123.example.com").unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["base_url"], "https://abc123.example.com");
    }
}
