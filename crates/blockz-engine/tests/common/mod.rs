// Test helper functions - each integration test binary only uses some of them
#![allow(dead_code)]

use blockz_engine::{BoxError, RuleOverrides, RuleTables, TemplateData, TemplateEngine};
use serde_json::Value;
use std::sync::Mutex;

/// Template engine that keeps every data bag it was given.
#[derive(Default)]
pub struct CapturingTemplate {
    bags: Mutex<Vec<Value>>,
}

impl CapturingTemplate {
    pub fn bags(&self) -> Vec<Value> {
        self.bags.lock().unwrap().clone()
    }
}

impl TemplateEngine for CapturingTemplate {
    fn render(&self, _template: &str, data: &TemplateData<'_>) -> Result<String, BoxError> {
        self.bags.lock().unwrap().push(serde_json::to_value(data)?);
        Ok(format!("<wrapped id=\"{}\">{}</wrapped>", data.ids, data.content))
    }
}

/// Rule tables with the given group memberships and built-in classes.
pub fn rules_from_groups(groups: Value) -> RuleTables {
    let mut groups = groups;
    if groups.get("default_inner").is_none() {
        groups["default_inner"] = Value::from("inner--prose");
    }
    RuleTables::resolve(RuleOverrides {
        groups: Some(serde_json::from_value(groups).unwrap()),
        ..RuleOverrides::default()
    })
}
