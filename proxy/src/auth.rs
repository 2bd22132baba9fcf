use crate::client::ClientAuth;
use reqwest::RequestBuilder;
use utility::{Error, Result};

///basic authentication type
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl ClientAuth for BasicAuth {
    fn set(&self, req: &mut RequestBuilder) -> Result<()> {
        let req2 = req
            .try_clone()
            .ok_or_else(|| Error::Custom(format!("can't clone request :{:?}", req)))?;
        *req = req2.basic_auth(self.username.as_str(), Some(self.password.as_str()));
        Ok(())
    }
}

///no authentication, used for endpoints exposed through the function proxy
pub struct NoAuth;

impl ClientAuth for NoAuth {
    fn set(&self, _req: &mut RequestBuilder) -> Result<()> {
        Ok(())
    }
}
