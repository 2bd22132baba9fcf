use crate::dispatch::{Bot, METRICS_WINDOW};
use crate::{CommandRequest, Reply, State};

pub(crate) const METRICS_COMMAND: &str = "/metrics";
pub(crate) const USAGE_HINT: &str = "Please give a function name with this slash command";

pub(crate) struct Metrics;

impl Metrics {
    /// relays the last day of metrics of the function named in the command text
    pub(crate) async fn dispatch_command(bot: &Bot, req: &CommandRequest) -> crate::Result {
        if req.command != METRICS_COMMAND {
            return Ok(());
        }
        if req.text.is_empty() {
            return Err(State::Matched(Reply::ok(USAGE_HINT)));
        }

        let body = bot
            .gateway
            .fetch_metrics(req.text.as_str(), METRICS_WINDOW)
            .await?;
        Err(State::Matched(Reply::ok(body)))
    }
}
