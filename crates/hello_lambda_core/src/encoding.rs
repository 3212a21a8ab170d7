use serde::Serialize;
use thiserror::Error;

/// The only failure a handler invocation can hit: a value that would not encode.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to encode payload as JSON: {message}")]
pub struct SerializationFailure {
    message: String,
}

impl SerializationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for SerializationFailure {
    fn from(error: serde_json::Error) -> Self {
        Self::new(error.to_string())
    }
}

pub trait PayloadEncoder {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, SerializationFailure>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl PayloadEncoder for JsonEncoder {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, SerializationFailure> {
        Ok(serde_json::to_string(value)?)
    }
}
