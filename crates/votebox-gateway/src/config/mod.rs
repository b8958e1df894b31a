//! Config resolution (strict YAML file + environment overrides).
//!
//! Runs once at startup and produces an immutable `VoteConfig`. Environment
//! variables win over the file, but only when set to a non-empty value.

pub mod schema;

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use votebox_core::error::{Result, VoteError};
use votebox_core::VoteOptions;

pub use schema::{BallotSection, FileConfig, ServerSection, StoreSection};

pub const CONFIG_PATH_ENV: &str = "VOTEBOX_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "votebox.yaml";

pub const ENV_OPTION_A: &str = "VOTE1VALUE";
pub const ENV_OPTION_B: &str = "VOTE2VALUE";
pub const ENV_TITLE: &str = "TITLE";
pub const ENV_SHOW_HOST: &str = "SHOWHOST";
pub const ENV_STORE_URL: &str = "REDIS_URL";
pub const ENV_LISTEN: &str = "VOTEBOX_LISTEN";

/// Resolved, validated configuration.
#[derive(Debug, Clone)]
pub struct VoteConfig {
    pub listen: SocketAddr,
    pub title: String,
    pub options: VoteOptions,
    pub store: StoreSettings,
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub url: String,
    pub pool_size: usize,
    pub connect_timeout_ms: u64,
    pub command_timeout_ms: u64,
}

pub fn load_from_file(path: &str) -> Result<FileConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| VoteError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<FileConfig> {
    let cfg: FileConfig = serde_yaml::from_str(s)
        .map_err(|e| VoteError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Full startup resolution against the process environment.
pub fn load() -> Result<VoteConfig> {
    let env = |k: &str| std::env::var(k).ok();
    resolve(load_file_for(&env)?, &env)
}

/// Pick the config file. An explicitly named file must exist; the default
/// path is optional and falls back to built-in defaults.
pub fn load_file_for(env: &dyn Fn(&str) -> Option<String>) -> Result<FileConfig> {
    match non_empty(env, CONFIG_PATH_ENV) {
        Some(path) => load_from_file(&path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH),
        None => {
            tracing::info!(path = DEFAULT_CONFIG_PATH, "no config file, using defaults");
            Ok(FileConfig::default())
        }
    }
}

/// Apply environment overrides to a parsed file and freeze the result.
pub fn resolve(file: FileConfig, env: &dyn Fn(&str) -> Option<String>) -> Result<VoteConfig> {
    let FileConfig {
        server,
        ballot,
        mut store,
        ..
    } = file;

    let option_a = non_empty(env, ENV_OPTION_A).unwrap_or(ballot.option_a);
    let option_b = non_empty(env, ENV_OPTION_B).unwrap_or(ballot.option_b);
    let options = VoteOptions::new(option_a, option_b)?;

    let show_host = match non_empty(env, ENV_SHOW_HOST) {
        Some(v) => v.eq_ignore_ascii_case("true"),
        None => server.show_host,
    };
    let mut title = non_empty(env, ENV_TITLE).unwrap_or(ballot.title);
    if show_host {
        title = host_name(env)?;
    }

    let listen_raw = non_empty(env, ENV_LISTEN).unwrap_or(server.listen);
    let listen: SocketAddr = listen_raw.parse().map_err(|_| {
        VoteError::BadRequest(format!("listen must be a valid SocketAddr: {listen_raw:?}"))
    })?;

    if let Some(url) = non_empty(env, ENV_STORE_URL) {
        store.url = url;
    }
    store.validate()?;

    Ok(VoteConfig {
        listen,
        title,
        options,
        store: StoreSettings {
            url: store.url,
            pool_size: store.pool_size,
            connect_timeout_ms: store.connect_timeout_ms,
            command_timeout_ms: store.command_timeout_ms,
        },
    })
}

fn non_empty(env: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    env(key).filter(|v| !v.trim().is_empty())
}

fn host_name(env: &dyn Fn(&str) -> Option<String>) -> Result<String> {
    if let Some(h) = non_empty(env, "HOSTNAME") {
        return Ok(h);
    }
    fs::read_to_string("/etc/hostname")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| VoteError::Internal("show_host is set but host name is unknown".into()))
}
