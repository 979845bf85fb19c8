//! JSON rendering of messages and log entries.

use serde_json::{json, Map, Number, Value};

use crate::error::{Message, Messages};
use crate::log::LogEntry;
use crate::message::MessageArg;

/// Trait for converting validation artifacts to JSON.
///
/// # Example
///
/// ```rust
/// use kova::{Message, Path, ToJson};
/// use serde_json::json;
///
/// let message = Message::new("kova.string.notBlank", "must not be blank")
///     .with_root("User")
///     .with_path(Path::root().child("name"));
///
/// assert_eq!(
///     message.to_json(),
///     json!({
///         "constraintId": "kova.string.notBlank",
///         "text": "must not be blank",
///         "root": "User",
///         "path": "name",
///         "args": []
///     })
/// );
/// ```
pub trait ToJson {
    /// Converts this value to a `serde_json::Value`.
    fn to_json(&self) -> Value;
}

impl ToJson for MessageArg {
    fn to_json(&self) -> Value {
        match self {
            MessageArg::Int(value) => json!(value),
            MessageArg::UInt(value) => json!(value),
            // NaN and infinities have no JSON number form
            MessageArg::Float(value) => Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(value.to_string())),
            MessageArg::Text(text) => Value::String(text.clone()),
            MessageArg::Bool(value) => Value::Bool(*value),
            MessageArg::Messages(messages) => {
                Value::Array(messages.iter().map(ToJson::to_json).collect())
            }
            MessageArg::List(items) => Value::Array(items.iter().map(ToJson::to_json).collect()),
        }
    }
}

impl ToJson for Message {
    fn to_json(&self) -> Value {
        json!({
            "constraintId": self.constraint_id,
            "text": self.text,
            "root": self.root,
            "path": self.path.full_name(),
            "args": self.args.iter().map(ToJson::to_json).collect::<Vec<_>>(),
        })
    }
}

impl ToJson for Messages {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ToJson::to_json).collect())
    }
}

impl ToJson for LogEntry {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        let status = if self.is_satisfied() {
            "satisfied"
        } else {
            "violated"
        };
        map.insert("status".to_string(), json!(status));
        map.insert("constraintId".to_string(), json!(self.constraint_id()));
        map.insert("root".to_string(), json!(self.root()));
        map.insert("path".to_string(), json!(self.path()));
        map.insert("input".to_string(), json!(self.input()));
        if let LogEntry::Violated { args, .. } = self {
            map.insert(
                "args".to_string(),
                Value::Array(args.iter().map(ToJson::to_json).collect()),
            );
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;

    #[test]
    fn test_args_to_json() {
        assert_eq!(MessageArg::Int(-3).to_json(), json!(-3));
        assert_eq!(MessageArg::Float(1.5).to_json(), json!(1.5));
        assert_eq!(MessageArg::Float(f64::NAN).to_json(), json!("NaN"));
        assert_eq!(
            MessageArg::List(vec![MessageArg::from("a"), MessageArg::Bool(true)]).to_json(),
            json!(["a", true])
        );
    }

    #[test]
    fn test_nested_messages_to_json() {
        let inner = Message::new("kova.comparable.max", "must be less than or equal to 5")
            .with_args(vec![MessageArg::Int(5)]);
        let outer = Message::new("kova.or", "at least one constraint must be satisfied")
            .with_path(Path::root().child("age"))
            .with_args(vec![MessageArg::Messages(vec![inner])]);

        let value = Messages::single(outer).to_json();
        assert_eq!(value[0]["path"], json!("age"));
        assert_eq!(value[0]["args"][0][0]["constraintId"], json!("kova.comparable.max"));
        assert_eq!(value[0]["args"][0][0]["args"], json!([5]));
    }

    #[test]
    fn test_log_entry_to_json() {
        let entry = LogEntry::Violated {
            constraint_id: "kova.comparable.min".to_string(),
            root: String::new(),
            path: "age".to_string(),
            input: "2".to_string(),
            args: vec![MessageArg::Int(3)],
        };
        assert_eq!(
            entry.to_json(),
            json!({
                "status": "violated",
                "constraintId": "kova.comparable.min",
                "root": "",
                "path": "age",
                "input": "2",
                "args": [3]
            })
        );

        let satisfied = LogEntry::Satisfied {
            constraint_id: "kova.comparable.min".to_string(),
            root: String::new(),
            path: String::new(),
            input: "4".to_string(),
        };
        assert!(satisfied.to_json().get("args").is_none());
    }
}
