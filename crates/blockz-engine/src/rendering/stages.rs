//! The attribute-inspection stages of the block pipeline.
//!
//! Each stage takes the working record and returns it with its own derived
//! fields filled in. Stages run in [`PIPELINE`] order; later stages may
//! override container decisions made by earlier ones, never the reverse.

use crate::collaborators::PaletteLookup;
use crate::ids::IdGenerator;
use crate::models::Alignment;
use crate::rules::{ContainerGroup, RuleTables};

use super::record::{Container, WorkingRecord};
use super::request::RenderRequest;

pub const CUSTOM_TYPE: &str = "custom";
pub const CUSTOM_SLUG: &str = "content";
pub const CORE_TYPE: &str = "core";

const BACKGROUND_COLOR_FIELD: &str = "block_background_color";
const CORE_BACKGROUND_COLOR: &str = "backgroundColor";
const TEXT_COLOR_FIELD: &str = "block_text_color";
const CORE_TEXT_COLOR: &str = "textColor";
const SPACING_TOP_FIELD: &str = "block_spacing_top";
const SPACING_BOTTOM_FIELD: &str = "block_spacing_bottom";
const SPACING_NONE: &str = "none";

/// Everything a stage may read besides the record itself.
pub struct StageInput<'a> {
    pub request: RenderRequest<'a>,
    pub rules: &'a RuleTables,
    pub palette: &'a dyn PaletteLookup,
    pub ids: &'a dyn IdGenerator,
}

impl StageInput<'_> {
    fn is_member(&self, group: ContainerGroup) -> bool {
        self.rules.is_member(group, self.request.node.name())
    }

    fn small_container(&self) -> Container {
        Container::class(self.rules.containers.small.as_str())
    }
}

pub type Stage = fn(WorkingRecord, &StageInput<'_>) -> WorkingRecord;

pub struct PipelineStage {
    pub name: &'static str,
    pub run: Stage,
}

pub const PIPELINE: [PipelineStage; 8] = [
    PipelineStage {
        name: "type_and_slug",
        run: derive_type_and_slug,
    },
    PipelineStage {
        name: "id",
        run: assign_id,
    },
    PipelineStage {
        name: "container",
        run: resolve_container,
    },
    PipelineStage {
        name: "alignment",
        run: resolve_alignment,
    },
    PipelineStage {
        name: "background",
        run: apply_background,
    },
    PipelineStage {
        name: "text_color",
        run: apply_text_color,
    },
    PipelineStage {
        name: "spacing",
        run: apply_spacing,
    },
    PipelineStage {
        name: "class_name",
        run: apply_class_name,
    },
];

/// Run every stage in order.
pub fn run(record: WorkingRecord, input: &StageInput<'_>) -> WorkingRecord {
    PIPELINE.iter().fold(record, |record, stage| {
        log::trace!(
            "Running stage '{}' for block '{}'",
            stage.name,
            input.request.node.name().unwrap_or(CUSTOM_SLUG)
        );
        (stage.run)(record, input)
    })
}

/// `"<type>/<slug>"` split on the first `/`; unnamed blocks are `custom/content`.
pub fn derive_type_and_slug(mut record: WorkingRecord, input: &StageInput<'_>) -> WorkingRecord {
    let (block_type, slug) = match input.request.node.name() {
        Some(name) => name.split_once('/').unwrap_or((CUSTOM_TYPE, name)),
        None => (CUSTOM_TYPE, CUSTOM_SLUG),
    };
    record.block_type = block_type.to_string();
    record.slug = slug.to_string();
    record
}

/// Explicit section id, or the next generated `"{slug}-{n}"`.
pub fn assign_id(mut record: WorkingRecord, input: &StageInput<'_>) -> WorkingRecord {
    record.id = match input.request.node.attributes.section_id() {
        Some(id) => id.into_owned(),
        None => input.ids.next_id(&record.slug),
    };
    record
}

/// Group-driven container pre-pass. Inner calls never get a container element.
pub fn resolve_container(mut record: WorkingRecord, input: &StageInput<'_>) -> WorkingRecord {
    if input.is_member(ContainerGroup::InnerProse) {
        record.container = input.small_container();
    }

    if input.is_member(ContainerGroup::NoContainer) {
        record.container = Container::bare();
    }

    if input.request.inner {
        record.container = Container::Suppressed;
    }

    record
}

/// Alignment classes and alignment-driven container sizes.
///
/// Container changes only apply to top-level calls; an inner call keeps the
/// suppressed container from the pre-pass.
pub fn resolve_alignment(mut record: WorkingRecord, input: &StageInput<'_>) -> WorkingRecord {
    let sized = !input.request.inner;
    let containers = &input.rules.containers;
    let alignment = &input.rules.alignment;

    if sized && input.is_member(ContainerGroup::ProseDefault) {
        record.container = input.small_container();
    }

    match input.request.node.attributes.alignment() {
        Some(Alignment::Full) if sized => {
            record.container = Container::class(containers.full.as_str())
        }
        Some(Alignment::Wide) if sized => {
            record.container = Container::class(containers.medium.as_str())
        }
        Some(Alignment::Center) => record.alignment = format!(" {}", alignment.center),
        Some(Alignment::Left) => record.alignment = format!(" {}", alignment.left),
        Some(Alignment::Right) => record.alignment = format!(" {}", alignment.right),
        _ => {}
    }

    // Forced last so nothing above can widen an inner-prose block
    if sized && input.is_member(ContainerGroup::InnerProse) {
        record.container = input.small_container();
    }

    record
}

pub fn apply_background(mut record: WorkingRecord, input: &StageInput<'_>) -> WorkingRecord {
    let attributes = &input.request.node.attributes;

    if let Some(color) = attributes.data_text(BACKGROUND_COLOR_FIELD) {
        match input.palette.token_for(&color) {
            Some(token) => record.classes.push(format!("bg-{token} py-8 lg:py-12")),
            None => {
                record.classes.push("py-8 lg:py-12".to_string());
                record.styles.push(format!("background-color:{color};"));
            }
        }
    }

    if let Some(name) = attributes.text(CORE_BACKGROUND_COLOR) {
        record
            .classes
            .push(format!("has-background bg-{name} py-6 lg:py-8"));
    }

    record
}

pub fn apply_text_color(mut record: WorkingRecord, input: &StageInput<'_>) -> WorkingRecord {
    let attributes = &input.request.node.attributes;

    if let Some(color) = attributes.data_text(TEXT_COLOR_FIELD) {
        match input.palette.token_for(&color) {
            Some(token) => record.classes.push(format!("text-{token}")),
            None => record.styles.push(format!("color:{color};")),
        }
    }

    if let Some(name) = attributes.text(CORE_TEXT_COLOR) {
        record.classes.push(format!("text-{name}"));
    }

    record
}

/// Spacing classes for non-core blocks; core markup carries its own spacing.
pub fn apply_spacing(mut record: WorkingRecord, input: &StageInput<'_>) -> WorkingRecord {
    if record.block_type == CORE_TYPE {
        return record;
    }

    let attributes = &input.request.node.attributes;
    for field in [SPACING_TOP_FIELD, SPACING_BOTTOM_FIELD] {
        if let Some(spacing) = attributes.data_text(field)
            && spacing != SPACING_NONE
        {
            record.classes.push(spacing.into_owned());
        }
    }

    record
}

pub fn apply_class_name(mut record: WorkingRecord, input: &StageInput<'_>) -> WorkingRecord {
    if let Some(class_name) = input.request.node.attributes.class_name() {
        record.classes.push(class_name.to_string());
    }
    record
}
