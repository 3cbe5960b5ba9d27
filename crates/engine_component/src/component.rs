//! Core [`Component`] trait.
//!
//! A component is a self-contained unit of data and behaviour attached to
//! exactly one object. The owning object drives it through four hooks:
//!
//! 1. [`Component::initialize`]: once, right after the component has been
//!    attached and its collaborators injected.
//! 2. [`Component::update`]: once per frame while the owner is active.
//! 3. [`Component::teardown`]: once, right before the component is removed
//!    or its owner destroyed, while its links are still set.
//! 4. [`Component::save`] / [`Component::load`]: the component's own field
//!    stream, written and read in one fixed order.
//!
//! Construction cannot fail: every component starts from `Default`.

use std::fmt;

use engine_io::{StreamError, StreamReader, StreamWriter};

use crate::any::ComponentVariant;
use crate::components::Transform;
use crate::entity::ObjectKey;
use crate::kind::ComponentKind;
use crate::links::ComponentLinks;
use crate::services::Services;

/// What a component can see of its owner while a hook runs.
#[derive(Debug, Clone, Copy)]
pub struct ComponentContext<'a> {
    /// The component's back-references and injected collaborators.
    pub links: &'a ComponentLinks,
    /// The owner's transform as it was when dispatch started.
    pub transform: &'a Transform,
}

impl<'a> ComponentContext<'a> {
    #[must_use]
    pub fn new(links: &'a ComponentLinks, transform: &'a Transform) -> Self {
        Self { links, transform }
    }

    /// The owning object, if the component is still attached.
    #[must_use]
    pub fn owner(&self) -> Option<ObjectKey> {
        self.links.owner()
    }

    /// Injected collaborators, if the component is still attached.
    #[must_use]
    pub fn services(&self) -> Option<&'a Services> {
        self.links.services()
    }
}

/// The component contract.
///
/// # Examples
///
/// ```rust
/// use engine_component::{Component, ComponentKind, Script};
/// use engine_io::{StreamReader, StreamWriter};
///
/// let script = Script::new("scripts/spin.lua");
/// let mut w = StreamWriter::new();
/// script.save(&mut w).unwrap();
///
/// let bytes = w.into_bytes();
/// let mut restored = Script::default();
/// restored.load(&mut StreamReader::new(&bytes)).unwrap();
/// assert_eq!(restored, script);
/// assert_eq!(Script::KIND, ComponentKind::Script);
/// ```
pub trait Component: ComponentVariant + Default + Clone + PartialEq + fmt::Debug + 'static {
    /// The tag this component is stored and persisted under.
    const KIND: ComponentKind;

    /// One-time setup after collaborators have been injected.
    fn initialize(&mut self, _cx: &ComponentContext<'_>) {}

    /// Per-frame behaviour. Only called while the owner is active; no order
    /// relative to sibling components is guaranteed.
    fn update(&mut self, _cx: &ComponentContext<'_>) {}

    /// Release whatever [`Component::initialize`] registered with the
    /// collaborators. The links are cleared right after this returns.
    fn teardown(&mut self, _cx: &ComponentContext<'_>) {}

    /// Write this component's fields.
    fn save(&self, w: &mut StreamWriter) -> Result<(), StreamError>;

    /// Read this component's fields, in the order [`Component::save`] wrote
    /// them.
    fn load(&mut self, r: &mut StreamReader<'_>) -> Result<(), StreamError>;
}
