//! Seams to the systems the renderer consults but does not own: the theme
//! palette, the block-type registry (and its server-rendered blocks) and
//! the ambient display context dynamic blocks may mutate.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};

use crate::error::BoxError;
use crate::models::Attributes;

/// Reverse lookup from a raw colour value to a theme token.
pub trait PaletteLookup {
    fn token_for(&self, color: &str) -> Option<String>;
}

/// A palette that knows no colours.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyPalette;

impl PaletteLookup for EmptyPalette {
    fn token_for(&self, _color: &str) -> Option<String> {
        None
    }
}

/// Theme colours keyed by token, e.g. `primary = "#0e7490"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemePalette {
    colors: BTreeMap<String, String>,
}

impl ThemePalette {
    pub fn color(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ThemePalette {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            colors: iter
                .into_iter()
                .map(|(token, color)| (token.into(), color.into()))
                .collect(),
        }
    }
}

impl PaletteLookup for ThemePalette {
    /// First token (in token order) whose colour matches exactly.
    fn token_for(&self, color: &str) -> Option<String> {
        self.colors
            .iter()
            .find(|(_, value)| value.as_str() == color)
            .map(|(token, _)| token.clone())
    }
}

/// A registered block type.
pub trait BlockType {
    /// Whether the block's content is computed at render time.
    fn is_dynamic(&self) -> bool;

    /// Produce the block's markup from its attributes and current content.
    fn render(&self, attributes: &Attributes, content: &str) -> Result<String, BoxError>;
}

pub trait BlockTypeRegistry {
    fn get_registered(&self, name: &str) -> Option<&dyn BlockType>;
}

/// A registry with nothing registered: no block is ever dynamic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBlockTypes;

impl BlockTypeRegistry for NoBlockTypes {
    fn get_registered(&self, _name: &str) -> Option<&dyn BlockType> {
        None
    }
}

/// A block whose markup is stored in the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticBlockType;

impl BlockType for StaticBlockType {
    fn is_dynamic(&self) -> bool {
        false
    }

    fn render(&self, _attributes: &Attributes, content: &str) -> Result<String, BoxError> {
        Ok(content.to_string())
    }
}

/// A dynamic block backed by a render function.
pub struct ServerRenderedBlock<F> {
    render: F,
}

impl<F> ServerRenderedBlock<F>
where
    F: Fn(&Attributes, &str) -> Result<String, BoxError>,
{
    pub fn new(render: F) -> Self {
        Self { render }
    }
}

impl<F> BlockType for ServerRenderedBlock<F>
where
    F: Fn(&Attributes, &str) -> Result<String, BoxError>,
{
    fn is_dynamic(&self) -> bool {
        true
    }

    fn render(&self, attributes: &Attributes, content: &str) -> Result<String, BoxError> {
        (self.render)(attributes, content)
    }
}

/// Block types registered by name.
#[derive(Default)]
pub struct RegisteredBlockTypes {
    types: HashMap<String, Box<dyn BlockType + Send + Sync>>,
}

impl RegisteredBlockTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        block_type: impl BlockType + Send + Sync + 'static,
    ) -> &mut Self {
        self.types.insert(name.into(), Box::new(block_type));
        self
    }
}

impl BlockTypeRegistry for RegisteredBlockTypes {
    fn get_registered(&self, name: &str) -> Option<&dyn BlockType> {
        self.types
            .get(name)
            .map(|block_type| block_type.as_ref() as &dyn BlockType)
    }
}

impl std::fmt::Debug for RegisteredBlockTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("RegisteredBlockTypes")
            .field("types", &names)
            .finish()
    }
}

/// Identifier of the post currently being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub u64);

/// The ambient "current post" that dynamic blocks read and sometimes change
/// (e.g. a latest-posts block looping over other posts).
pub trait DisplayContext {
    fn current_post(&self) -> Option<PostId>;
    fn set_current_post(&self, post: Option<PostId>);
}

/// Single-threaded display context, one per top-level render.
#[derive(Debug, Default)]
pub struct CurrentPost(Cell<Option<PostId>>);

impl CurrentPost {
    pub fn new(post: Option<PostId>) -> Self {
        Self(Cell::new(post))
    }
}

impl DisplayContext for CurrentPost {
    fn current_post(&self) -> Option<PostId> {
        self.0.get()
    }

    fn set_current_post(&self, post: Option<PostId>) {
        self.0.set(post);
    }
}

/// Restores the saved current post when dropped, including on early return.
pub struct DisplayContextGuard<'a> {
    context: &'a dyn DisplayContext,
    saved: Option<PostId>,
}

impl<'a> DisplayContextGuard<'a> {
    pub fn save(context: &'a dyn DisplayContext) -> Self {
        Self {
            saved: context.current_post(),
            context,
        }
    }
}

impl Drop for DisplayContextGuard<'_> {
    fn drop(&mut self) {
        self.context.set_current_post(self.saved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_reverse_lookup() {
        let palette: ThemePalette = [("primary", "#0e7490"), ("accent", "#f59e0b")]
            .into_iter()
            .collect();

        assert_eq!(palette.token_for("#0e7490"), Some("primary".to_string()));
        assert_eq!(palette.token_for("#F59E0B"), None);
        assert_eq!(palette.token_for("#000"), None);
    }

    #[test]
    fn test_palette_lookup_picks_first_token_in_order() {
        let palette: ThemePalette = [("white", "#fff"), ("base", "#fff")]
            .into_iter()
            .collect();

        assert_eq!(palette.token_for("#fff"), Some("base".to_string()));
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = RegisteredBlockTypes::new();
        registry
            .register("core/paragraph", StaticBlockType)
            .register(
                "core/latest-posts",
                ServerRenderedBlock::new(|_, _| Ok("<ul></ul>".to_string())),
            );

        assert!(!registry.get_registered("core/paragraph").unwrap().is_dynamic());
        assert!(registry.get_registered("core/latest-posts").unwrap().is_dynamic());
        assert!(registry.get_registered("core/missing").is_none());
        assert_eq!(
            format!("{registry:?}"),
            "RegisteredBlockTypes { types: [\"core/latest-posts\", \"core/paragraph\"] }"
        );
    }

    #[test]
    fn test_guard_restores_post_on_drop() {
        let context = CurrentPost::new(Some(PostId(7)));

        {
            let _guard = DisplayContextGuard::save(&context);
            context.set_current_post(Some(PostId(99)));
            assert_eq!(context.current_post(), Some(PostId(99)));
        }

        assert_eq!(context.current_post(), Some(PostId(7)));
    }

    #[test]
    fn test_guard_restores_empty_context() {
        let context = CurrentPost::default();

        {
            let _guard = DisplayContextGuard::save(&context);
            context.set_current_post(Some(PostId(1)));
        }

        assert_eq!(context.current_post(), None);
    }
}
