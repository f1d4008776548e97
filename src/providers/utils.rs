use serde_json::{json, Value};
use tracing::warn;

use super::base::Reply;
use super::types::{message::Message, source::Source};
use crate::errors::{AssistantError, AssistantResult};

/// Convert the stored history to the assistant's wire format.
///
/// Only `role` and `content` go upstream; sources are inbound-only.
pub fn messages_to_assistant_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            json!({
                "role": message.role,
                "content": message.content,
            })
        })
        .collect()
}

/// Full request body for a non-streaming completion.
pub fn completion_payload(messages: &[Message]) -> Value {
    json!({
        "messages": messages_to_assistant_spec(messages),
        "stream": false,
    })
}

/// Convert a 2xx response body to a [`Reply`].
pub fn assistant_response_to_reply(body: &str) -> AssistantResult<Reply> {
    let data: Value = serde_json::from_str(body).map_err(|e| AssistantError::Protocol {
        detail: e.to_string(),
        body: body.to_string(),
    })?;

    let message = data
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .filter(|message| message.is_object())
        .ok_or_else(|| AssistantError::Shape(format!("missing choices[0].message in {}", data)))?;

    let answer = match message.get("content") {
        None | Some(Value::Null) => return Err(AssistantError::EmptyResponse),
        Some(Value::String(text)) => text,
        Some(other) => {
            return Err(AssistantError::Shape(format!(
                "choices[0].message.content is not text: {}",
                other
            )))
        }
    };

    if answer.is_empty() {
        return Err(AssistantError::EmptyResponse);
    }

    let sources = parse_sources(data.get("sources"));

    Ok(Reply::new(answer.clone(), sources))
}

/// Citations are best effort: anything unusable is logged and skipped so the
/// answer itself is never lost.
fn parse_sources(value: Option<&Value>) -> Option<Vec<Source>> {
    let items = match value {
        None | Some(Value::Null) => return None,
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!("ignoring sources that are not a list: {}", other);
            return None;
        }
    };

    let sources: Vec<Source> = items
        .iter()
        .filter_map(|item| match serde_json::from_value::<Source>(item.clone()) {
            Ok(source) => Some(source),
            Err(e) => {
                warn!("ignoring source {}: {}", item, e);
                None
            }
        })
        .collect();

    (!sources.is_empty()).then_some(sources)
}
