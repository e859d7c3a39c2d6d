//! Request bodies.

use serde::{Deserialize, Deserializer};

/// Body of `POST /todo` and `POST /todo/{id}/edit`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TodoForm {
    pub title: String,
}

/// Body of `POST /todo/{id}/complete` and `POST /todo/complete_all`.
///
/// `completed` defaults to `false` when omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct CompleteForm {
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub completed: bool,
}

/// Accepts a JSON boolean or the textual values HTML forms send.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "1" | "yes" => Ok(true),
            "false" | "off" | "0" | "no" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "invalid value for `completed`: '{other}'"
            ))),
        },
    }
}
