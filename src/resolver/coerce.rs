//! Turning untrusted input into typed actions.
//!
//! Nothing here fails loudly: every error has a `Noop` reason code it
//! degrades to (see `ActionParseError::reason`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{reasons, Action, ActionKind};
use crate::error::ActionParseError;

/// A committed action as submitted: already typed, or raw JSON.
///
/// Deserializing picks `Typed` whenever the payload is a well-formed
/// action and keeps anything else as `Payload` for coercion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAction {
    Typed(Action),
    Payload(Value),
}

impl RawAction {
    /// Convert into a typed action.
    pub fn coerce(&self) -> Result<Action, ActionParseError> {
        match self {
            RawAction::Typed(action) => Ok(action.clone()),
            RawAction::Payload(value) => action_from_value(value),
        }
    }
}

impl From<Action> for RawAction {
    fn from(action: Action) -> Self {
        RawAction::Typed(action)
    }
}

impl From<Value> for RawAction {
    fn from(value: Value) -> Self {
        RawAction::Payload(value)
    }
}

/// Decode a JSON action payload.
///
/// A missing, non-string or unrecognised `"type"` is an unknown action
/// type; a recognised tag with bad fields is a schema error. Extra fields
/// are ignored.
pub fn action_from_value(value: &Value) -> Result<Action, ActionParseError> {
    let tag = value.get("type").and_then(Value::as_str);
    if tag.and_then(ActionKind::from_tag).is_none() {
        return Err(ActionParseError::UnknownActionType(tag.map(str::to_owned)));
    }
    Action::deserialize(value).map_err(|e| ActionParseError::InvalidSchema(e.to_string()))
}

/// Coerce an optional committed action, substituting a reasoned `Noop`
/// for anything missing or malformed.
#[must_use]
pub fn coerce_action(raw: Option<&RawAction>) -> Action {
    match raw {
        None => Action::noop(reasons::MISSING_ACTION),
        Some(raw) => raw.coerce().unwrap_or_else(|err| Action::noop(err.reason())),
    }
}

/// Parse a free-text reply that should contain a JSON action.
///
/// The whole reply is tried as JSON first. Failing that, the slice from
/// the first `{` to the last `}` is tried, which covers fenced code blocks
/// and surrounding chatter.
pub fn parse_action_response(text: &str) -> Result<Action, ActionParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ActionParseError::EmptyResponse);
    }

    let value = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(whole) => {
            let embedded = match (text.find('{'), text.rfind('}')) {
                (Some(start), Some(end)) if start < end => &text[start..=end],
                _ => return Err(ActionParseError::InvalidJson(whole.to_string())),
            };
            serde_json::from_str(embedded)
                .map_err(|e| ActionParseError::InvalidJson(e.to_string()))?
        }
    };

    action_from_value(&value)
}

/// `parse_action_response`, folding failures into a reasoned `Noop`.
#[must_use]
pub fn parse_action_or_noop(text: &str) -> Action {
    parse_action_response(text).unwrap_or_else(|err| {
        tracing::debug!(error = %err, "unparseable action response");
        Action::noop(err.reason())
    })
}
