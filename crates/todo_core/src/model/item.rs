//! Todo item record.
//!
//! # Responsibility
//! - Define the `Item` record shared by store, service and CLI.
//! - Parse single items from JSON object strings supplied by callers.
//! - Render one item as a single display line.
//!
//! # Invariants
//! - `id` is the primary key; the model never generates ids.
//! - `title` is free text and is never validated.
//! - Wire input must be a JSON object with all three fields present.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-supplied primary key of an item.
pub type ItemId = i64;

/// One todo record as stored in the backing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Primary key, unique across the store.
    pub id: ItemId,
    /// Free-text description.
    pub title: String,
    /// Serialized as `isDone` to stay compatible with existing data files.
    #[serde(rename = "isDone")]
    pub is_done: bool,
}

/// Wire-format parse failure for a single item.
#[derive(Debug)]
pub enum WireFormatError {
    /// Input is not JSON, or a required field is missing or ill-typed.
    Json(serde_json::Error),
    /// Input is valid JSON but not an object.
    NotAnObject(&'static str),
}

impl Display for WireFormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid todo item JSON: {err}"),
            Self::NotAnObject(kind) => {
                write!(f, "invalid todo item JSON: expected an object, got {kind}")
            }
        }
    }
}

impl Error for WireFormatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::NotAnObject(_) => None,
        }
    }
}

impl From<serde_json::Error> for WireFormatError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl Item {
    /// Creates a not-yet-done item.
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            is_done: false,
        }
    }

    /// Parses one item from a JSON object string.
    ///
    /// Unknown extra fields are ignored. Array-shaped input is rejected even
    /// though serde would otherwise accept a positional struct encoding.
    ///
    /// # Errors
    /// - `WireFormatError::Json` when the text is not JSON or a field is
    ///   missing/ill-typed.
    /// - `WireFormatError::NotAnObject` when the JSON value is not an object.
    pub fn from_wire(text: &str) -> Result<Self, WireFormatError> {
        let value: Value = serde_json::from_str(text.trim())?;
        if !value.is_object() {
            return Err(WireFormatError::NotAnObject(json_kind(&value)));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Renders this item as one terminal line: `#<id> [x] <title>`.
    pub fn display_line(&self) -> String {
        let mark = if self.is_done { 'x' } else { ' ' };
        format!("#{} [{}] {}", self.id, mark, self.title)
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_line())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
