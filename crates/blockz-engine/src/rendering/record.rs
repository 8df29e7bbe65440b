use serde::{Serialize, Serializer};

/// Container decision for a block.
///
/// `Class("")` still produces a container element, just without a size
/// class; `Suppressed` produces no container element at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Container {
    Suppressed,
    Class(String),
}

impl Container {
    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    /// A container element with no size class.
    pub fn bare() -> Self {
        Self::Class(String::new())
    }

    pub fn as_class(&self) -> Option<&str> {
        match self {
            Self::Suppressed => None,
            Self::Class(class) => Some(class),
        }
    }
}

// Templates see either the class string or `false`.
impl Serialize for Container {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Suppressed => serializer.serialize_bool(false),
            Self::Class(class) => serializer.serialize_str(class),
        }
    }
}

/// Derived presentation state for one block, built up stage by stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingRecord {
    pub id: String,
    pub block_type: String,
    pub slug: String,
    pub container: Container,
    /// Alignment class with a leading space, or empty.
    pub alignment: String,
    pub classes: Vec<String>,
    pub styles: Vec<String>,
    pub content: String,
    pub is_dynamic: bool,
}

impl WorkingRecord {
    /// A fresh record starting from the default container and the caller's
    /// content prefix.
    pub fn new(default_container: &str, content: &str) -> Self {
        Self {
            id: String::new(),
            block_type: String::new(),
            slug: String::new(),
            container: Container::class(default_container),
            alignment: String::new(),
            classes: Vec::new(),
            styles: Vec::new(),
            content: content.to_string(),
            is_dynamic: false,
        }
    }
}
