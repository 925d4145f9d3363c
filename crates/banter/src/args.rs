use std::path::PathBuf;
use std::time::Duration;

use banter_model::ApiKey;
use banter_together_model::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, TogetherConfig, TogetherConfigBuilder,
};
use clap::Parser;

/// Chat with a hosted completion model from the terminal.
#[derive(Parser)]
#[command(name = "banter", version)]
pub struct Args {
    /// API key for the completion endpoint.
    #[arg(long, env = "TOGETHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model identifier sent with every request.
    #[arg(long, env = "TOGETHER_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Root of the completion API.
    #[arg(long, env = "TOGETHER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Give up on a request after this many seconds. Waits forever if unset.
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// Directory saved conversations are written to.
    #[arg(long, value_name = "DIR", default_value = ".")]
    save_dir: PathBuf,
}

impl Args {
    /// Returns the credential, if a non-blank one was given.
    pub fn api_key(&self) -> Option<ApiKey> {
        self.api_key.clone().and_then(ApiKey::new)
    }

    pub fn provider_config(&self) -> TogetherConfig {
        let mut builder = TogetherConfigBuilder::new()
            .with_model(&self.model)
            .with_base_url(&self.base_url);
        if let Some(secs) = self.timeout_secs {
            builder = builder.with_timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    #[inline]
    pub fn save_dir(&self) -> &PathBuf {
        &self.save_dir
    }
}
