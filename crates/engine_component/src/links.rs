//! Component back-references.
//!
//! A component never owns its object. [`ComponentLinks`] holds a weak handle
//! to the owner (an [`ObjectKey`], resolved through the registry) and the
//! collaborator handles injected when the component was added. The owner's
//! transform is reached through the owner: during a hook it arrives as part
//! of the [`ComponentContext`](crate::ComponentContext), outside of one it
//! is looked up by key in the registry.
//!
//! When the owner is destroyed every link is cleared before the component
//! is dropped.

use crate::entity::ObjectKey;
use crate::services::Services;

/// Weak back-references and injected collaborators of one component.
#[derive(Debug, Clone, Default)]
pub struct ComponentLinks {
    owner: Option<ObjectKey>,
    services: Option<Services>,
}

impl ComponentLinks {
    /// Links for a component attached to `owner`.
    #[must_use]
    pub fn attached(owner: ObjectKey, services: Services) -> Self {
        Self {
            owner: Some(owner),
            services: Some(services),
        }
    }

    #[must_use]
    pub fn owner(&self) -> Option<ObjectKey> {
        self.owner
    }

    #[must_use]
    pub fn services(&self) -> Option<&Services> {
        self.services.as_ref()
    }

    /// Returns `true` while the component is attached to an owner.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.owner.is_some()
    }

    /// Clear every link.
    pub fn detach(&mut self) {
        self.owner = None;
        self.services = None;
    }
}
