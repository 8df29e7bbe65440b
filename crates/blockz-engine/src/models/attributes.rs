use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Key of the structured field object custom blocks store their settings in.
pub const DATA_KEY: &str = "data";
pub const SECTION_ID_KEY: &str = "section_id";
pub const ALIGN_KEY: &str = "align";
pub const CLASS_NAME_KEY: &str = "className";

/// A block's attribute object.
///
/// Attributes are free-form JSON. The pipeline only ever asks for *present*
/// text values: a non-empty string, or a number rendered with its JSON text.
/// Anything else (missing keys, `null`, booleans, nested objects) means the
/// rule asking for it does not apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Present text value of a top-level attribute.
    pub fn text(&self, key: &str) -> Option<Cow<'_, str>> {
        self.0.get(key).and_then(present_text)
    }

    /// Present text value of a field inside the structured `data` object.
    pub fn data_text(&self, key: &str) -> Option<Cow<'_, str>> {
        self.0
            .get(DATA_KEY)
            .and_then(Value::as_object)
            .and_then(|data| data.get(key))
            .and_then(present_text)
    }

    /// Explicit section id, looked up at the top level first, then under `data`.
    ///
    /// Unlike other lookups an empty string counts: a set id is used verbatim.
    pub fn section_id(&self) -> Option<Cow<'_, str>> {
        let data = self.0.get(DATA_KEY).and_then(Value::as_object);
        self.0
            .get(SECTION_ID_KEY)
            .and_then(explicit_text)
            .or_else(|| data.and_then(|data| data.get(SECTION_ID_KEY)).and_then(explicit_text))
    }

    pub fn alignment(&self) -> Option<Alignment> {
        self.text(ALIGN_KEY).and_then(|value| Alignment::parse(&value))
    }

    /// Extra classes supplied by the editor, kept as a single string.
    pub fn class_name(&self) -> Option<&str> {
        self.0
            .get(CLASS_NAME_KEY)
            .and_then(Value::as_str)
            .filter(|class| !class.is_empty())
    }
}

fn present_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(text) if !text.is_empty() => Some(Cow::Borrowed(text.as_str())),
        Value::Number(number) => Some(Cow::Owned(number.to_string())),
        _ => None,
    }
}

fn explicit_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(text) => Some(Cow::Borrowed(text.as_str())),
        other => present_text(other),
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

// Block parsers serialize "no attributes" as `[]` as often as `{}`.
impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            Value::Array(items) if items.is_empty() => Ok(Self::default()),
            other => Err(D::Error::custom(format!(
                "expected an attribute object, found {other}"
            ))),
        }
    }
}

/// The `align` attribute values the pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Full-bleed container.
    Full,
    /// Wide (medium) container.
    Wide,
    Center,
    Left,
    Right,
}

impl Alignment {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "full" => Some(Self::Full),
            "wide" => Some(Self::Wide),
            "center" => Some(Self::Center),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}
