//! Shared fakes for unit tests.

use serde_json::Value;
use std::cell::RefCell;

use crate::collaborators::{BlockType, BlockTypeRegistry};
use crate::error::BoxError;
use crate::models::Attributes;
use crate::template::{TemplateData, TemplateEngine};

/// Template engine that records every data bag it receives and answers
/// `wrapped:{ids}`.
#[derive(Default)]
pub struct RecordingTemplates {
    calls: RefCell<Vec<(String, Value)>>,
    fail: bool,
}

impl RecordingTemplates {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.borrow().clone()
    }
}

impl TemplateEngine for RecordingTemplates {
    fn render(&self, template: &str, data: &TemplateData<'_>) -> Result<String, BoxError> {
        let value = serde_json::to_value(data)?;
        self.calls.borrow_mut().push((template.to_string(), value));
        if self.fail {
            return Err("template exploded".into());
        }
        Ok(format!("wrapped:{}", data.ids))
    }
}

/// A registry holding a single dynamic block type that records its calls.
pub struct FakeDynamicBlock {
    name: String,
    output: Result<String, String>,
    calls: RefCell<Vec<(Attributes, String)>>,
}

impl FakeDynamicBlock {
    pub fn returning(name: &str, output: &str) -> Self {
        Self {
            name: name.to_string(),
            output: Ok(output.to_string()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            output: Err(message.to_string()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(Attributes, String)> {
        self.calls.borrow().clone()
    }
}

impl BlockType for FakeDynamicBlock {
    fn is_dynamic(&self) -> bool {
        true
    }

    fn render(&self, attributes: &Attributes, content: &str) -> Result<String, BoxError> {
        self.calls
            .borrow_mut()
            .push((attributes.clone(), content.to_string()));
        self.output.clone().map_err(Into::into)
    }
}

impl BlockTypeRegistry for FakeDynamicBlock {
    fn get_registered(&self, name: &str) -> Option<&dyn BlockType> {
        (name == self.name).then_some(self as &dyn BlockType)
    }
}
