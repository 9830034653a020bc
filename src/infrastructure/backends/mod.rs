pub mod agent;

use anyhow::bail;
use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendBox;

pub struct BackendManager {}

impl BackendManager {
    pub fn get() -> Result<BackendBox> {
        let url = Config::get(ConfigKey::BackendURL);
        if url.is_empty() {
            bail!("No backend URL configured. Set --backend-url or backend-url in config.toml");
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            bail!(format!("Backend URL must start with http:// or https://, got {url}"));
        }

        return Ok(Box::<agent::Agent>::default());
    }
}
