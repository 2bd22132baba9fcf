use std::collections::HashMap;
use url::form_urlencoded;

pub(crate) const TOKEN_FIELD: &str = "token";
pub(crate) const COMMAND_FIELD: &str = "command";
pub(crate) const TEXT_FIELD: &str = "text";

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FormError {
    #[error("invalid semicolon separator in query")]
    Semicolon,
    #[error("invalid URL escape {0:?}")]
    Escape(String),
}

/// CommandRequest the fields of one slash command invocation, absent fields are empty
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommandRequest {
    pub token: String,
    pub command: String,
    pub text: String,
}

impl CommandRequest {
    pub(crate) fn from_form(form: &HashMap<String, String>) -> CommandRequest {
        let get = |key: &str| form.get(key).cloned().unwrap_or_default();
        CommandRequest {
            token: get(TOKEN_FIELD),
            command: get(COMMAND_FIELD),
            text: get(TEXT_FIELD),
        }
    }
}

/// decodes an `application/x-www-form-urlencoded` body, keeping the first value of a repeated key.
/// Unlike the lenient decoder in `url`, broken percent escapes and `;` separators are rejected.
pub(crate) fn parse_form(body: &[u8]) -> std::result::Result<HashMap<String, String>, FormError> {
    let mut form = HashMap::new();
    for pair in body.split(|b| *b == b'&') {
        if pair.is_empty() {
            continue;
        }
        if pair.contains(&b';') {
            return Err(FormError::Semicolon);
        }
        check_escapes(pair)?;

        for (key, value) in form_urlencoded::parse(pair) {
            form.entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
    }
    Ok(form)
}

fn check_escapes(pair: &[u8]) -> std::result::Result<(), FormError> {
    let mut i = 0;
    while i < pair.len() {
        if pair[i] != b'%' {
            i += 1;
            continue;
        }
        match pair.get(i + 1..i + 3) {
            Some(hex) if hex.iter().all(|b| b.is_ascii_hexdigit()) => i += 3,
            _ => {
                let end = (i + 3).min(pair.len());
                return Err(FormError::Escape(
                    String::from_utf8_lossy(&pair[i..end]).into_owned(),
                ));
            }
        }
    }
    Ok(())
}
