use crate::dispatch::Bot;
use crate::functions::list_function_names;
use crate::{CommandRequest, Reply, State};

pub(crate) const FUNCTIONS_COMMAND: &str = "/functions";

pub(crate) struct Functions;

impl Functions {
    /// lists the functions of every owner, or of the owner named in the command text
    pub(crate) async fn dispatch_command(bot: &Bot, req: &CommandRequest) -> crate::Result {
        if req.command != FUNCTIONS_COMMAND {
            return Ok(());
        }

        let functions = bot.fetch_functions().await?;
        let owner = req.text.as_str();
        let names = list_function_names(&functions, owner);

        //return error in match to stop trying the next commands
        Err(State::Matched(Reply::ok(render_functions(&names, owner))))
    }
}

pub(crate) fn render_functions(names: &[&str], owner: &str) -> String {
    if names.is_empty() {
        return "No functions found".to_string();
    }

    let mut out = String::from("Functions");
    if !owner.is_empty() {
        out.push_str(format!(" for ({})", owner).as_str());
    }
    out.push_str(":\n");
    for name in names {
        out.push_str(format!("- {}\n", name).as_str());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::render_functions;

    #[test]
    fn test_render_functions() {
        struct TestCase {
            _name: &'static str,
            names: Vec<&'static str>,
            owner: &'static str,
            want: &'static str,
        }
        let tests = vec![
            TestCase {
                _name: "all owners",
                names: vec!["fn1", "fn3"],
                owner: "",
                want: "Functions:\n- fn1\n- fn3\n",
            },
            TestCase {
                _name: "one owner",
                names: vec!["fn3"],
                owner: "bob",
                want: "Functions for (bob):\n- fn3\n",
            },
            TestCase {
                _name: "nothing found",
                names: vec![],
                owner: "carol",
                want: "No functions found",
            },
        ];

        for case in tests {
            assert_eq!(render_functions(&case.names, case.owner), case.want);
        }
    }
}
