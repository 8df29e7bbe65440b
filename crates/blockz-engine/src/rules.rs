//! # Rule Tables
//!
//! Process-wide presentation rules: the container size classes, the text
//! alignment classes and the block-name groups that steer container and
//! wrapping decisions.
//!
//! Tables are resolved at most once per process. External code gets a single
//! chance to replace any table wholesale through [`register_rule_overrides`]
//! before the first render reads them; there is no partial merge. After
//! resolution the tables are read-only, so a render tree of any depth sees one
//! consistent set of rules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::{Mutex, OnceLock, PoisonError};

/// CSS classes for the three container sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerClasses {
    pub small: String,
    pub medium: String,
    pub full: String,
}

impl Default for ContainerClasses {
    fn default() -> Self {
        Self {
            small: "inner--prose".to_string(),
            medium: "inner--content".to_string(),
            full: "inner--full".to_string(),
        }
    }
}

/// CSS classes for text alignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentClasses {
    pub center: String,
    pub left: String,
    pub right: String,
}

impl Default for AlignmentClasses {
    fn default() -> Self {
        Self {
            center: "text-center".to_string(),
            left: "text-left".to_string(),
            right: "text-right".to_string(),
        }
    }
}

/// Named sets of block names with special container or wrapping behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerGroups {
    /// Container every block starts from.
    pub default_inner: String,
    /// Always rendered in the small container, whatever else applies.
    #[serde(default)]
    pub inner_prose: BTreeSet<String>,
    /// Rendered with a container element that carries no size class.
    #[serde(default)]
    pub no_container: BTreeSet<String>,
    /// Start from the small container but let alignment widen them.
    #[serde(default)]
    pub prose_default: BTreeSet<String>,
    /// Never handed to the template engine.
    #[serde(default)]
    pub no_wrap: BTreeSet<String>,
}

impl ContainerGroups {
    /// Empty groups starting from `default_inner`.
    pub fn with_default_inner(default_inner: impl Into<String>) -> Self {
        Self {
            default_inner: default_inner.into(),
            inner_prose: BTreeSet::new(),
            no_container: BTreeSet::new(),
            prose_default: BTreeSet::new(),
            no_wrap: BTreeSet::new(),
        }
    }

    /// Whether `name` belongs to `group`. Unnamed blocks belong to no group.
    pub fn contains(&self, group: ContainerGroup, name: Option<&str>) -> bool {
        let Some(name) = name else {
            return false;
        };
        let members = match group {
            ContainerGroup::InnerProse => &self.inner_prose,
            ContainerGroup::NoContainer => &self.no_container,
            ContainerGroup::ProseDefault => &self.prose_default,
            ContainerGroup::NoWrap => &self.no_wrap,
        };
        members.contains(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerGroup {
    InnerProse,
    NoContainer,
    ProseDefault,
    NoWrap,
}

/// Replacement tables supplied by external code. Each present table replaces
/// its built-in counterpart entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containers: Option<ContainerClasses>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<AlignmentClasses>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<ContainerGroups>,
}

impl RuleOverrides {
    pub fn is_empty(&self) -> bool {
        self.containers.is_none() && self.alignment.is_none() && self.groups.is_none()
    }
}

/// The resolved rule tables a renderer reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTables {
    pub containers: ContainerClasses,
    pub alignment: AlignmentClasses,
    pub groups: ContainerGroups,
}

impl RuleTables {
    /// Build the tables from the built-in defaults and `overrides`.
    ///
    /// The container table is resolved first so that the default groups start
    /// from the (possibly replaced) small container class.
    pub fn resolve(overrides: RuleOverrides) -> Self {
        let containers = overrides.containers.unwrap_or_default();
        let alignment = overrides.alignment.unwrap_or_default();
        let groups = overrides
            .groups
            .unwrap_or_else(|| ContainerGroups::with_default_inner(containers.small.clone()));

        Self {
            containers,
            alignment,
            groups,
        }
    }

    pub fn is_member(&self, group: ContainerGroup, name: Option<&str>) -> bool {
        self.groups.contains(group, name)
    }
}

impl Default for RuleTables {
    fn default() -> Self {
        Self::resolve(RuleOverrides::default())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("Rule overrides can only be registered once, before the rule tables are first used")]
    AlreadyResolved,
}

struct Registration {
    overrides: Option<RuleOverrides>,
    resolved: bool,
}

static REGISTRATION: Mutex<Registration> = Mutex::new(Registration {
    overrides: None,
    resolved: false,
});
static RULE_TABLES: OnceLock<RuleTables> = OnceLock::new();

/// Register the process-wide rule overrides.
///
/// Succeeds once, and only before [`rule_tables`] is first called.
pub fn register_rule_overrides(overrides: RuleOverrides) -> Result<(), RulesError> {
    let mut registration = REGISTRATION
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if registration.resolved || registration.overrides.is_some() {
        return Err(RulesError::AlreadyResolved);
    }
    registration.overrides = Some(overrides);
    Ok(())
}

/// The process-wide rule tables, resolved on first use.
pub fn rule_tables() -> &'static RuleTables {
    RULE_TABLES.get_or_init(|| {
        let mut registration = REGISTRATION
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        registration.resolved = true;
        let overrides = registration.overrides.take().unwrap_or_default();
        log::debug!(
            "Resolving rule tables ({})",
            if overrides.is_empty() {
                "built-in defaults"
            } else {
                "with overrides"
            }
        );
        RuleTables::resolve(overrides)
    })
}
