use crate::form::parse_form;
use crate::functions::read_functions;
use crate::list::Functions;
use crate::metrics::Metrics;
use crate::users::Users;
use crate::{CommandRequest, Reply, State};
use config::secrets::{read_secret, SecretProvider, TOKEN_SECRET};
use hyper::StatusCode;
use proxy::gateway::Gateway;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};
use utility::model::FunctionRecord;

/// window the metrics command reports over
pub const METRICS_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);
pub const NOTHING_TO_DO: &str = "Nothing to do";

///Bot answers slash commands sent by the chat relay
pub struct Bot {
    secrets: Arc<dyn SecretProvider>,
    pub(crate) gateway: Arc<dyn Gateway>,
    timeout: Duration,
}

impl Bot {
    /// `timeout` bounds each secret lookup
    pub fn new(
        secrets: Arc<dyn SecretProvider>,
        gateway: Arc<dyn Gateway>,
        timeout: Duration,
    ) -> Bot {
        Bot {
            secrets,
            gateway,
            timeout,
        }
    }

    /// handles one form encoded request body and returns the reply to write
    pub async fn handle(&self, body: &[u8]) -> Reply {
        let form = match parse_form(body) {
            Ok(form) => form,
            Err(e) => return Reply::error(StatusCode::BAD_REQUEST, e),
        };

        let token = match read_secret(self.secrets.as_ref(), TOKEN_SECRET, self.timeout).await {
            Ok(token) => token,
            Err(e) => {
                error!("can't read token: {}", e);
                return Reply::error(StatusCode::INTERNAL_SERVER_ERROR, e);
            }
        };

        let req = CommandRequest::from_form(&form);
        if req.token != token {
            warn!(command = %req.command, "rejected command with an invalid token");
            return Reply::error(
                StatusCode::UNAUTHORIZED,
                format!("Token: {}, invalid", req.token),
            );
        }

        debug!(command = %req.command, text = %req.text, "processing command");
        match self.process_command(&req).await {
            Ok(()) => Reply::error(StatusCode::BAD_REQUEST, NOTHING_TO_DO),
            Err(State::Matched(reply)) => reply,
            Err(State::Error(e)) => {
                error!(command = %req.command, "command failed: {}", e);
                Reply::error(StatusCode::INTERNAL_SERVER_ERROR, e)
            }
        }
    }

    async fn process_command(&self, req: &CommandRequest) -> crate::Result {
        if req.command.is_empty() {
            return Ok(());
        }

        Metrics::dispatch_command(self, req).await?;
        Functions::dispatch_command(self, req).await?;
        Users::dispatch_command(self, req).await?;
        Ok(())
    }

    pub(crate) async fn fetch_functions(&self) -> utility::Result<Vec<FunctionRecord>> {
        let body = self.gateway.fetch_functions().await?;
        read_functions(&body)
    }
}
