use path_clean::PathClean;
use std::path::PathBuf;
use std::time::Duration;
use utility::{Error, Result};

/// GATEWAY_HOST_ENV base url of the OpenFaaS gateway the bot queries
pub const GATEWAY_HOST_ENV: &str = "gateway_host";
/// SECRET_MOUNT_PATH_ENV overrides the directory secrets are mounted into
pub const SECRET_MOUNT_PATH_ENV: &str = "secret_mount_path";
pub const PORT_ENV: &str = "port";
/// OUTBOUND_TIMEOUT_ENV bounds secret lookups and gateway calls, e.g. `5s` or `1m`
pub const OUTBOUND_TIMEOUT_ENV: &str = "outbound_timeout";

pub const DEFAULT_GATEWAY: &str = "http://gateway.openfaas:8080";
pub const DEFAULT_SECRET_DIR: &str = "/var/openfaas/secrets";
/// secrets mounted by docker swarm / faas-swarm
pub const FALLBACK_SECRET_DIR: &str = "/run/secrets";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_OUTBOUND_TIMEOUT: &str = "10s";

///Settings of the bot, read once at startup and handed to every component that needs them
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub gateway_host: String,
    ///searched in order when a secret is looked up
    pub secret_dirs: Vec<PathBuf>,
    pub port: u16,
    pub outbound_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            gateway_host: DEFAULT_GATEWAY.into(),
            secret_dirs: vec![
                PathBuf::from(DEFAULT_SECRET_DIR),
                PathBuf::from(FALLBACK_SECRET_DIR),
            ],
            port: DEFAULT_PORT,
            outbound_timeout: Duration::from_secs(10),
        }
    }
}

impl Settings {
    /// loads the settings from the process environment
    pub fn from_env() -> Result<Settings> {
        Settings::from_lookup(|key| std::env::var(key).ok())
    }

    /// loads the settings through `lookup`, empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|val| !val.trim().is_empty());

        let gateway_host = get(GATEWAY_HOST_ENV)
            .unwrap_or_else(|| DEFAULT_GATEWAY.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();

        let mut secret_dirs = vec![];
        match get(SECRET_MOUNT_PATH_ENV) {
            Some(dir) => secret_dirs.push(expand_path(dir.as_str())),
            None => secret_dirs.push(PathBuf::from(DEFAULT_SECRET_DIR)),
        }
        let fallback = PathBuf::from(FALLBACK_SECRET_DIR);
        if !secret_dirs.contains(&fallback) {
            secret_dirs.push(fallback);
        }

        let port = match get(PORT_ENV) {
            Some(port) => port.trim().parse::<u16>().map_err(|e| {
                Error::Custom(format!("invalid {} value {:?}: {}", PORT_ENV, port, e))
            })?,
            None => DEFAULT_PORT,
        };

        let timeout = get(OUTBOUND_TIMEOUT_ENV).unwrap_or_else(|| DEFAULT_OUTBOUND_TIMEOUT.into());
        let outbound_timeout = parse_duration::parse(timeout.trim()).map_err(|e| {
            Error::Custom(format!(
                "invalid {} value {:?}: {}",
                OUTBOUND_TIMEOUT_ENV, timeout, e
            ))
        })?;
        if outbound_timeout == Duration::from_secs(0) {
            return Err(Error::Custom(format!(
                "{} must be greater than zero",
                OUTBOUND_TIMEOUT_ENV
            )));
        }

        Ok(Settings {
            gateway_host,
            secret_dirs,
            port,
            outbound_timeout,
        })
    }
}

fn expand_path(dir: &str) -> PathBuf {
    let dir = shellexpand::tilde(dir);
    PathBuf::from(dir.into_owned()).clean()
}
