use std::{fs, io, path::Path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::error::{AdminClientError, AdminResult};

pub const DEFAULT_CONFIG_FILE: &str = "admin.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then `admin.toml` (or `path`), then environment overrides,
/// then `server_url` from the command line. Only the final URL is validated.
///
/// A missing `admin.toml` is fine; a `path` that cannot be read is an error.
pub fn load_settings(path: Option<&Path>, server_url: Option<&str>) -> AdminResult<Settings> {
    load_settings_with(path, server_url, |key| std::env::var(key).ok())
}

fn load_settings_with(
    path: Option<&Path>,
    server_url: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> AdminResult<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = read_config_file(path)? {
        let path = path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let file_cfg: FileSettings = toml::from_str(&raw).map_err(|err| {
            AdminClientError::Config(format!("{}: {err}", path.display()))
        })?;
        if let Some(v) = file_cfg.server_url {
            settings.server_url = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            settings.request_timeout_secs = v;
        }
    }

    apply_env_overrides(&mut settings, lookup);
    if let Some(v) = server_url {
        settings.server_url = v.to_string();
    }
    settings.server_url = normalize_server_url(&settings.server_url)?;
    Ok(settings)
}

fn read_config_file(path: Option<&Path>) -> AdminResult<Option<String>> {
    match path {
        Some(path) => fs::read_to_string(path).map(Some).map_err(|err| {
            AdminClientError::Config(format!("cannot read {}: {err}", path.display()))
        }),
        None => match fs::read_to_string(DEFAULT_CONFIG_FILE) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(AdminClientError::Config(format!(
                "cannot read {DEFAULT_CONFIG_FILE}: {err}"
            ))),
        },
    }
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("ADMIN_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }
}

/// Validates an http(s) base URL and strips the trailing slash so paths can
/// be appended directly.
pub fn normalize_server_url(raw: &str) -> AdminResult<String> {
    let url = Url::parse(raw.trim())
        .map_err(|err| AdminClientError::Config(format!("server url '{raw}': {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AdminClientError::Config(format!(
            "server url '{raw}' must use http or https"
        )));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}
