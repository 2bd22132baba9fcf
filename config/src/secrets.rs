use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};
use utility::{Error, Result};

/// shared token the chat relay sends along with every command
pub const TOKEN_SECRET: &str = "token";
/// password of the gateway's `admin` user
pub const BASIC_AUTH_PASSWORD_SECRET: &str = "basic-auth-password";

///SecretProvider looks up named secret values
#[async_trait]
pub trait SecretProvider: Send + Sync {
    async fn get_secret(&self, name: &str) -> Result<String>;
}

///reads secrets from files named after the secret inside the mounted secret directories
pub struct FileSecretProvider {
    dirs: Vec<PathBuf>,
}

impl FileSecretProvider {
    pub fn new(dirs: Vec<PathBuf>) -> FileSecretProvider {
        FileSecretProvider { dirs }
    }
}

#[async_trait]
impl SecretProvider for FileSecretProvider {
    async fn get_secret(&self, name: &str) -> Result<String> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name == ".." {
            return Err(Error::Secret {
                name: name.into(),
                reason: "invalid secret name".into(),
            });
        }

        let mut reason = String::from("no secret directories configured");
        for dir in &self.dirs {
            let path = dir.join(name);
            match tokio::fs::read_to_string(&path).await {
                Ok(value) => return Ok(value.trim().to_string()),
                Err(e) => {
                    debug!(path = %path.display(), "secret not readable: {}", e);
                    reason = format!("{}: {}", path.display(), e);
                }
            }
        }

        Err(Error::Secret {
            name: name.into(),
            reason,
        })
    }
}

/// looks up a secret, giving up after `timeout`. An expired lookup is retried once.
pub async fn read_secret(
    provider: &dyn SecretProvider,
    name: &str,
    timeout: Duration,
) -> Result<String> {
    for attempt in 1..=2u8 {
        match tokio::time::timeout(timeout, provider.get_secret(name)).await {
            Ok(res) => return res,
            Err(_) => warn!(secret = name, attempt, "secret lookup timed out"),
        }
    }
    Err(Error::Timeout(format!(
        "reading secret {} after {:?}",
        name, timeout
    )))
}
