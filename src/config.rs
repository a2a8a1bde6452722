use std::path::PathBuf;
use std::sync::LazyLock;

use axum_extra::extract::cookie::Key;
use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Process-wide configuration: defaults merged with `SITE_`-prefixed
/// environment variables (e.g. `SITE_DATABASE_URL`, `SITE_ADMIN_PASSWORD`).
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| match Config::load() {
    Ok(cfg) => cfg,
    Err(e) => {
        eprintln!("invalid configuration: {e}");
        std::process::exit(1);
    }
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub loglevel: String,
    /// Admin credentials. Login is refused outright while the password is
    /// empty, so a fresh deployment is closed rather than open.
    pub admin_username: String,
    pub admin_password: String,
    /// Master secret for the encrypted session cookie. Must be at least 64
    /// bytes; shorter values fall back to a per-process random key, which
    /// invalidates sessions on restart.
    pub session_secret: String,
    /// Phone number (country code, digits only) for the WhatsApp contact
    /// links on listing cards.
    pub whatsapp_number: String,
    /// Cloudinary unsigned-upload settings. When either is absent, uploaded
    /// images are stored under `{static_dir}/uploads` instead.
    pub cloudinary_cloud: Option<String>,
    pub cloudinary_preset: Option<String>,
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:properties.sqlite".to_string(),
            bind_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            admin_username: "admin".to_string(),
            admin_password: String::new(),
            session_secret: String::new(),
            whatsapp_number: "919999999999".to_string(),
            cloudinary_cloud: None,
            cloudinary_preset: None,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("SITE_"))
            .extract()
    }

    /// Key for the private (encrypted + authenticated) cookie jar.
    pub fn cookie_key(&self) -> Key {
        let secret = self.session_secret.as_bytes();
        if secret.len() >= 64 {
            Key::from(secret)
        } else {
            warn!("SITE_SESSION_SECRET missing or shorter than 64 bytes; using an ephemeral session key");
            Key::generate()
        }
    }
}
