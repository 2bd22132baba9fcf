use crate::client::{Client, ClientAuth};
use crate::utils::SYSTEM_PATH;
use reqwest::Method;
use tracing::warn;
use utility::{Error, Result};

impl Client {
    /// list_functions returns the raw body of the gateway's function listing.
    /// The status is not interpreted here, decoding the body is left to the caller.
    pub async fn list_functions(&self, auth: &dyn ClientAuth) -> Result<Vec<u8>> {
        let req = self
            .new_request(Method::GET, SYSTEM_PATH, auth)?
            .build()
            .map_err(|e| {
                Error::Custom(format!(
                    "can't read list from OpenFaaS on URL {}: {}",
                    self.gateway.as_str(),
                    e
                ))
            })?;

        let (status, body) = self.do_request(req).await.map_err(|e| {
            Error::Custom(format!(
                "can't read list from OpenFaaS on URL {}: {}",
                self.gateway.as_str(),
                e
            ))
        })?;
        if !status.is_success() {
            warn!(%status, "gateway returned unexpected status listing functions");
        }

        Ok(body)
    }
}
