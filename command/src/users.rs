use crate::dispatch::Bot;
use crate::functions::count_by_owner;
use crate::{CommandRequest, Reply, State};
use std::collections::HashMap;

pub(crate) const USERS_COMMAND: &str = "/users";

pub(crate) struct Users;

impl Users {
    /// lists every owner that has at least one function deployed
    pub(crate) async fn dispatch_command(bot: &Bot, req: &CommandRequest) -> crate::Result {
        if req.command != USERS_COMMAND {
            return Ok(());
        }

        let functions = bot.fetch_functions().await?;
        let owners = count_by_owner(&functions);

        Err(State::Matched(Reply::ok(render_users(&owners))))
    }
}

// owners are listed in map order, no ordering is promised
pub(crate) fn render_users(owners: &HashMap<&str, usize>) -> String {
    if owners.is_empty() {
        return "No users found".to_string();
    }

    let mut out = String::from("Users:\n");
    for owner in owners.keys() {
        out.push_str(format!("- {}\n", owner).as_str());
    }
    out
}
