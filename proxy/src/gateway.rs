use crate::auth::BasicAuth;
use crate::client::Client;
use crate::utils::ADMIN_USER;
use async_trait::async_trait;
use config::secrets::{read_secret, SecretProvider, BASIC_AUTH_PASSWORD_SECRET};
use config::settings::Settings;
use std::sync::Arc;
use std::time::Duration;
use utility::Result;

///Gateway the calls the bot makes against OpenFaaS
#[async_trait]
pub trait Gateway: Send + Sync {
    /// raw body of the function listing
    async fn fetch_functions(&self) -> Result<Vec<u8>>;
    /// raw body of the metrics of one function over `window`
    async fn fetch_metrics(&self, function_name: &str, window: Duration) -> Result<Vec<u8>>;
}

///GatewayClient talks to a real gateway, authenticating listings as the admin user
pub struct GatewayClient {
    client: Client,
    secrets: Arc<dyn SecretProvider>,
    timeout: Duration,
}

impl GatewayClient {
    pub fn new(settings: &Settings, secrets: Arc<dyn SecretProvider>) -> Result<GatewayClient> {
        let client = Client::new(
            settings.gateway_host.as_str(),
            Some(settings.outbound_timeout),
        )?;
        Ok(GatewayClient {
            client,
            secrets,
            timeout: settings.outbound_timeout,
        })
    }
}

#[async_trait]
impl Gateway for GatewayClient {
    async fn fetch_functions(&self) -> Result<Vec<u8>> {
        let password = read_secret(
            self.secrets.as_ref(),
            BASIC_AUTH_PASSWORD_SECRET,
            self.timeout,
        )
        .await?;
        let auth = BasicAuth {
            username: ADMIN_USER.into(),
            password,
        };
        self.client.list_functions(&auth).await
    }

    async fn fetch_metrics(&self, function_name: &str, window: Duration) -> Result<Vec<u8>> {
        self.client.query_metrics(function_name, window).await
    }
}
