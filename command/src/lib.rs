use crate::dispatch::Bot;
use config::secrets::{FileSecretProvider, SecretProvider};
use config::settings::Settings;
use hyper::StatusCode;
use proxy::gateway::GatewayClient;
use std::borrow::Cow;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub mod dispatch;
pub(crate) mod form;
pub mod functions;
pub(crate) mod list;
pub(crate) mod metrics;
pub mod server;
pub(crate) mod users;

pub use form::{CommandRequest, FormError};

type Result = std::result::Result<(), State>;

///State how a command handler finished.
// handlers return Ok(()) for commands that are not theirs so the next one is tried
#[derive(thiserror::Error, Debug)]
pub enum State {
    #[error("command matched")]
    Matched(Reply),
    #[error("{0}")]
    Error(#[from] utility::Error),
}

/// Reply the status and plain text body written back to the chat relay.
///
/// Error text coming from secrets or the gateway is relayed verbatim. The caller is
/// the internal slash command relay, not a public client.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn ok<B: Into<Vec<u8>>>(body: B) -> Reply {
        Reply {
            status: StatusCode::OK,
            body: body.into(),
        }
    }

    pub fn error<M: ToString>(status: StatusCode, message: M) -> Reply {
        Reply {
            status,
            body: message.to_string().into_bytes(),
        }
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// runs the bot until it is told to shut down
pub async fn exec() {
    init_logging();
    if let Err(err) = run().await {
        error!("{}", err);
        std::process::exit(1);
    }
}

async fn run() -> utility::Result<()> {
    let settings = Settings::from_env()?;
    info!(
        gateway = %settings.gateway_host,
        port = settings.port,
        timeout = ?settings.outbound_timeout,
        "starting ofc-bot"
    );

    let secrets: Arc<dyn SecretProvider> =
        Arc::new(FileSecretProvider::new(settings.secret_dirs.clone()));
    let gateway = GatewayClient::new(&settings, secrets.clone())?;
    let bot = Bot::new(secrets, Arc::new(gateway), settings.outbound_timeout);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    server::serve(Arc::new(bot), addr).await
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
