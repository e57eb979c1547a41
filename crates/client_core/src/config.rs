use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use shared::protocol::JOBS_PATH;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://testapi.getlokalapp.com";
pub const DEFAULT_RESULTS_FIELD: &str = "results";
pub const DEFAULT_END_REACHED_THRESHOLD: f32 = 0.5;
pub const SETTINGS_FILE: &str = "jobs.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid api base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    HttpClient(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub api_base_url: String,
    /// Response field holding the job list (`results` or `data`).
    pub results_field: String,
    /// Fraction of the viewport height below which the list counts as scrolled to the end.
    pub end_reached_threshold: f32,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            results_field: DEFAULT_RESULTS_FIELD.into(),
            end_reached_threshold: DEFAULT_END_REACHED_THRESHOLD,
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    results_field: Option<String>,
    end_reached_threshold: Option<f32>,
    request_timeout_secs: Option<u64>,
}

impl ClientSettings {
    pub fn with_api_base_url(mut self, api_base_url: impl AsRef<str>) -> Self {
        self.api_base_url = normalize_base_url(api_base_url.as_ref());
        self
    }

    pub fn with_results_field(mut self, results_field: impl AsRef<str>) -> Self {
        self.set_results_field(results_field.as_ref());
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn jobs_endpoint(&self) -> Result<Url, SettingsError> {
        let invalid = |reason: String| SettingsError::InvalidBaseUrl {
            url: self.api_base_url.clone(),
            reason,
        };
        let base = Url::parse(&format!("{}/", normalize_base_url(&self.api_base_url)))
            .map_err(|err| invalid(err.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
        }
        base.join(JOBS_PATH).map_err(|err| invalid(err.to_string()))
    }

    fn set_results_field(&mut self, raw: &str) {
        let field = raw.trim();
        if !field.is_empty() {
            self.results_field = field.to_string();
        }
    }

    fn set_end_reached_threshold(&mut self, threshold: f32) {
        if threshold.is_finite() && threshold >= 0.0 {
            self.end_reached_threshold = threshold;
        }
    }
}

pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file, then environment overrides. Values that
/// fail to parse leave the previous layer in place.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.api_base_url {
                    settings.api_base_url = normalize_base_url(&v);
                }
                if let Some(v) = file_cfg.results_field {
                    settings.set_results_field(&v);
                }
                if let Some(v) = file_cfg.end_reached_threshold {
                    settings.set_end_reached_threshold(v);
                }
                if let Some(v) = file_cfg.request_timeout_secs {
                    settings.request_timeout_secs = Some(v);
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "ignoring unreadable settings file: {err}");
            }
        }
    }

    if let Some(v) = env("JOBS_API_BASE_URL") {
        settings.api_base_url = normalize_base_url(&v);
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = normalize_base_url(&v);
    }

    if let Some(v) = env("APP__RESULTS_FIELD") {
        settings.set_results_field(&v);
    }

    if let Some(v) = env("APP__END_REACHED_THRESHOLD") {
        if let Ok(parsed) = v.trim().parse::<f32>() {
            settings.set_end_reached_threshold(parsed);
        }
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        }
    }

    settings
}

pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_API_BASE_URL.to_string();
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    fn temp_settings_file(contents: &str) -> std::path::PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let dir = env::temp_dir().join(format!("job_board_settings_test_{suffix}"));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join(SETTINGS_FILE);
        fs::write(&path, contents).expect("write settings");
        path
    }

    #[test]
    fn defaults_apply_without_file_or_env() {
        let settings = load_settings_from(Path::new("/nonexistent/jobs.toml"), env_from(&[]));
        assert_eq!(settings, ClientSettings::default());
        assert_eq!(
            settings.jobs_endpoint().expect("endpoint").as_str(),
            "https://testapi.getlokalapp.com/common/jobs"
        );
    }

    #[test]
    fn file_values_are_overridden_by_env() {
        let path = temp_settings_file(
            r#"
api_base_url = "http://file.example/"
results_field = "data"
end_reached_threshold = 0.25
request_timeout_secs = 5
"#,
        );

        let settings = load_settings_from(&path, env_from(&[]));
        assert_eq!(settings.api_base_url, "http://file.example");
        assert_eq!(settings.results_field, "data");
        assert_eq!(settings.end_reached_threshold, 0.25);
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(5)));

        let settings = load_settings_from(
            &path,
            env_from(&[
                ("JOBS_API_BASE_URL", "http://legacy.example"),
                ("APP__API_BASE_URL", "http://env.example/api/"),
                ("APP__RESULTS_FIELD", "results"),
            ]),
        );
        assert_eq!(settings.api_base_url, "http://env.example/api");
        assert_eq!(settings.results_field, "results");

        fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
    }

    #[test]
    fn malformed_values_keep_previous_layer() {
        let settings = load_settings_from(
            Path::new("/nonexistent/jobs.toml"),
            env_from(&[
                ("APP__END_REACHED_THRESHOLD", "-1"),
                ("APP__REQUEST_TIMEOUT_SECS", "soon"),
                ("APP__RESULTS_FIELD", "   "),
            ]),
        );
        assert_eq!(settings.end_reached_threshold, DEFAULT_END_REACHED_THRESHOLD);
        assert_eq!(settings.request_timeout_secs, None);
        assert_eq!(settings.results_field, DEFAULT_RESULTS_FIELD);
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let settings = ClientSettings::default().with_api_base_url("http://127.0.0.1:9000/api/v2/");
        assert_eq!(
            settings.jobs_endpoint().expect("endpoint").as_str(),
            "http://127.0.0.1:9000/api/v2/common/jobs"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        let err = ClientSettings::default()
            .with_api_base_url("not a url")
            .jobs_endpoint()
            .expect_err("relative");
        assert!(matches!(err, SettingsError::InvalidBaseUrl { .. }));

        let err = ClientSettings::default()
            .with_api_base_url("ftp://jobs.example")
            .jobs_endpoint()
            .expect_err("scheme");
        assert!(err.to_string().contains("unsupported scheme"), "{err}");
    }

    #[test]
    fn blank_base_url_falls_back_to_default() {
        assert_eq!(normalize_base_url("  "), DEFAULT_API_BASE_URL);
    }
}
