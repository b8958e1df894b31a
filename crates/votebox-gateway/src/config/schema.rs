use serde::Deserialize;
use votebox_core::error::{Result, VoteError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub ballot: BallotSection,

    #[serde(default)]
    pub store: StoreSection,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            ballot: BallotSection::default(),
            store: StoreSection::default(),
        }
    }
}

impl FileConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(VoteError::UnsupportedVersion);
        }

        self.store.validate()?;   // Verify the scope of value

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Replace the page title with the host name (load balancer demos).
    #[serde(default)]
    pub show_host: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            show_host: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BallotSection {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_option_a")]
    pub option_a: String,

    #[serde(default = "default_option_b")]
    pub option_b: String,
}

impl Default for BallotSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            option_a: default_option_a(),
            option_b: default_option_b(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default = "default_store_url")]
    pub url: String,

    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Upper bound for a single command, including time spent waiting for
    /// a reconnect.
    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            url: default_store_url(),
            pool_size: default_pool_size(),
            connect_timeout_ms: default_connect_timeout_ms(),
            command_timeout_ms: default_command_timeout_ms(),
        }
    }
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("redis://") || self.url.starts_with("rediss://")) {
            return Err(VoteError::BadRequest(
                "store.url must start with redis:// or rediss://".into(),
            ));
        }
        if !(1..=64).contains(&self.pool_size) {
            return Err(VoteError::BadRequest(
                "store.pool_size must be between 1 and 64".into(),
            ));
        }
        if !(100..=60000).contains(&self.connect_timeout_ms) {
            return Err(VoteError::BadRequest(
                "store.connect_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        if !(50..=60000).contains(&self.command_timeout_ms) {
            return Err(VoteError::BadRequest(
                "store.command_timeout_ms must be between 50 and 60000".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_title() -> String {
    "Azure Voting App".into()
}
fn default_option_a() -> String {
    "Cats".into()
}
fn default_option_b() -> String {
    "Dogs".into()
}
fn default_store_url() -> String {
    "redis://127.0.0.1:6379".into()
}
fn default_pool_size() -> usize {
    4
}
fn default_connect_timeout_ms() -> u64 {
    5000
}
fn default_command_timeout_ms() -> u64 {
    2000
}
