use crate::auth::NoAuth;
use crate::client::{add_query_params, Client};
use crate::utils::{FUNCTION_KEY, METRICS_PATH, METRICS_WINDOW_KEY};
use reqwest::Method;
use std::time::Duration;
use tracing::warn;
use utility::{Error, Result};

impl Client {
    /// query_metrics asks the system-metrics function for the stats of `function_name`
    /// over `window`, truncated to whole hours. The body is returned as is.
    pub async fn query_metrics(&self, function_name: &str, window: Duration) -> Result<Vec<u8>> {
        let hours = (window.as_secs() / 3600).to_string();
        let path = add_query_params(
            METRICS_PATH,
            &[(FUNCTION_KEY, function_name), (METRICS_WINDOW_KEY, hours.as_str())],
        )?;

        let req = self
            .new_request(Method::GET, path.as_str(), &NoAuth)?
            .build()
            .map_err(|e| Error::Custom(format!("can't build metrics request: {}", e)))?;

        let (status, body) = self.do_request(req).await.map_err(|e| {
            Error::Custom(format!(
                "can't query metrics from OpenFaaS on URL {}: {}",
                self.gateway.as_str(),
                e
            ))
        })?;
        if !status.is_success() {
            warn!(%status, function = function_name, "metrics query returned unexpected status");
        }

        Ok(body)
    }
}
