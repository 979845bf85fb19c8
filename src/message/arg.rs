//! Arguments interpolated into message templates.

use crate::error::Message;

/// A positional argument for a message template.
///
/// Numbers are formatted per locale when rendered. `Messages` holds already
/// rendered sub-messages, which is how composite constraints such as `or`
/// report the violations of each alternative.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageArg {
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bool(bool),
    Messages(Vec<Message>),
    List(Vec<MessageArg>),
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for MessageArg {
            fn from(value: $t) -> Self {
                MessageArg::Int(value as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for MessageArg {
            fn from(value: $t) -> Self {
                MessageArg::UInt(value as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for MessageArg {
    fn from(value: f32) -> Self {
        MessageArg::Float(f64::from(value))
    }
}

impl From<f64> for MessageArg {
    fn from(value: f64) -> Self {
        MessageArg::Float(value)
    }
}

impl From<bool> for MessageArg {
    fn from(value: bool) -> Self {
        MessageArg::Bool(value)
    }
}

impl From<char> for MessageArg {
    fn from(value: char) -> Self {
        MessageArg::Text(value.to_string())
    }
}

impl From<&str> for MessageArg {
    fn from(value: &str) -> Self {
        MessageArg::Text(value.to_string())
    }
}

impl From<String> for MessageArg {
    fn from(value: String) -> Self {
        MessageArg::Text(value)
    }
}

impl From<&String> for MessageArg {
    fn from(value: &String) -> Self {
        MessageArg::Text(value.clone())
    }
}

impl From<Vec<Message>> for MessageArg {
    fn from(value: Vec<Message>) -> Self {
        MessageArg::Messages(value)
    }
}

impl From<Vec<MessageArg>> for MessageArg {
    fn from(value: Vec<MessageArg>) -> Self {
        MessageArg::List(value)
    }
}
