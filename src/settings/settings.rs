use crate::application_impl::DEFAULT_LOGIN_ROUTE;
use crate::infra_crypto::MIN_SECRET_LEN;
use anyhow::{Result, anyhow, bail};
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api: Api,
    pub crypto: Crypto,
    pub log: Log,
    pub session: Session,
    pub storage: Storage,
}

#[derive(Debug, Deserialize)]
pub struct Api {
    pub url: String,
    pub timeout_ms: u64,
}

#[derive(Deserialize)]
pub struct Crypto {
    pub secret_key: String,
}

// keep the secret out of `info!(?settings)`
impl std::fmt::Debug for Crypto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crypto")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub filter: String,
}

#[derive(Debug, Deserialize)]
pub struct Session {
    pub login_route: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
    pub backend: String, // "memory" or "file"
    pub path: Option<String>,
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

const ENV_PREFIX: &str = "LESSON_ADMIN";

impl Settings {
    /// Rejects configurations the console cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.api.url.trim().is_empty() {
            bail!("api.url must not be empty");
        }
        url::Url::parse(&self.api.url).map_err(|e| anyhow!("api.url is not a valid URL: {e}"))?;

        if self.crypto.secret_key.chars().count() < MIN_SECRET_LEN {
            bail!("crypto.secret_key must be at least {MIN_SECRET_LEN} characters");
        }

        match self.storage.backend.as_str() {
            "memory" => {}
            "file" => {
                if self.storage.path.as_deref().is_none_or(str::is_empty) {
                    bail!("storage.path is required for the file backend");
                }
            }
            other => bail!("unknown storage backend: {other}"),
        }

        if !self.session.login_route.starts_with('/') {
            bail!("session.login_route must start with '/'");
        }
        Ok(())
    }
}

fn builder(path: &str) -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
    let builder = Config::builder()
        .set_default("api.timeout_ms", 10_000)?
        .set_default("log.filter", "info")?
        .set_default("session.login_route", DEFAULT_LOGIN_ROUTE)?
        .set_default("storage.backend", "memory")?
        .add_source(File::with_name(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        );
    Ok(builder)
}

pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = builder(path)?
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_settings(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_file_with_defaults() {
        let file = write_settings(
            r#"
            [api]
            url = "https://api.example.test"

            [crypto]
            secret_key = "0123456789abcdef0123456789abcdef"
            "#,
        );
        let settings = parse_settings(file.path().to_str()).unwrap();
        assert_eq!(settings.api.timeout_ms, 10_000);
        assert_eq!(settings.session.login_route, "/login");
        assert_eq!(settings.storage.backend, "memory");
        assert!(!format!("{:?}", settings).contains("0123456789abcdef"));
    }

    #[test]
    fn short_secret_fails_fast() {
        let file = write_settings(
            r#"
            [api]
            url = "https://api.example.test"

            [crypto]
            secret_key = "short"
            "#,
        );
        let err = parse_settings(file.path().to_str()).unwrap_err();
        assert!(err.to_string().contains("secret_key"));
    }

    #[test]
    fn malformed_url_fails_fast() {
        let file = write_settings(
            r#"
            [api]
            url = "not a url"

            [crypto]
            secret_key = "0123456789abcdef0123456789abcdef"
            "#,
        );
        assert!(parse_settings(file.path().to_str()).is_err());
    }

    #[test]
    fn file_backend_needs_a_path() {
        let file = write_settings(
            r#"
            [api]
            url = "https://api.example.test"

            [crypto]
            secret_key = "0123456789abcdef0123456789abcdef"

            [storage]
            backend = "file"
            "#,
        );
        let err = parse_settings(file.path().to_str()).unwrap_err();
        assert!(err.to_string().contains("storage.path"));
    }
}
