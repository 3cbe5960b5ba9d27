//! Component tags and capabilities.
//!
//! [`ComponentKind`] is the closed set of component types an object can
//! hold. Each kind has a stable string tag used as the key in persisted
//! streams. Variants are declared in ascending tag order, so the derived
//! `Ord` and the byte order of the tags agree.
//!
//! [`Capability`] is a coarser grouping: several kinds may share one (a
//! `Collider` and a `MeshCollider` both provide [`Capability::Collision`]).
//! Capability lookups are the compatible-type query of the object API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The tag of a component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    Camera,
    Collider,
    Hinge,
    Light,
    LineRenderer,
    Mesh,
    MeshCollider,
    MeshRenderer,
    RigidBody,
    Script,
    Skybox,
    Transform,
}

/// A behaviour category shared by one or more component kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    /// Placement in space.
    Spatial,
    /// Contributes geometry or pixels to a frame.
    Renderable,
    /// Defines a point of view.
    View,
    /// Emits light.
    Lighting,
    /// Participates in physics simulation.
    Physics,
    /// Has a collision volume.
    Collision,
    /// Driven by a script.
    Scripted,
}

impl ComponentKind {
    /// Every kind, in tag order.
    pub const ALL: [ComponentKind; 12] = [
        ComponentKind::Camera,
        ComponentKind::Collider,
        ComponentKind::Hinge,
        ComponentKind::Light,
        ComponentKind::LineRenderer,
        ComponentKind::Mesh,
        ComponentKind::MeshCollider,
        ComponentKind::MeshRenderer,
        ComponentKind::RigidBody,
        ComponentKind::Script,
        ComponentKind::Skybox,
        ComponentKind::Transform,
    ];

    /// The stable string key written to persisted streams.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            ComponentKind::Camera => "Camera",
            ComponentKind::Collider => "Collider",
            ComponentKind::Hinge => "Hinge",
            ComponentKind::Light => "Light",
            ComponentKind::LineRenderer => "LineRenderer",
            ComponentKind::Mesh => "Mesh",
            ComponentKind::MeshCollider => "MeshCollider",
            ComponentKind::MeshRenderer => "MeshRenderer",
            ComponentKind::RigidBody => "RigidBody",
            ComponentKind::Script => "Script",
            ComponentKind::Skybox => "Skybox",
            ComponentKind::Transform => "Transform",
        }
    }

    /// Resolve a persisted tag. Returns `None` for tags this build does not
    /// know about.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Capabilities declared by this kind.
    #[must_use]
    pub const fn capabilities(self) -> &'static [Capability] {
        match self {
            ComponentKind::Transform => &[Capability::Spatial],
            ComponentKind::Mesh
            | ComponentKind::MeshRenderer
            | ComponentKind::Skybox
            | ComponentKind::LineRenderer => &[Capability::Renderable],
            ComponentKind::Camera => &[Capability::View],
            ComponentKind::Light => &[Capability::Lighting],
            ComponentKind::RigidBody | ComponentKind::Hinge => &[Capability::Physics],
            ComponentKind::Collider | ComponentKind::MeshCollider => {
                &[Capability::Physics, Capability::Collision]
            }
            ComponentKind::Script => &[Capability::Scripted],
        }
    }

    /// Returns `true` if this kind declares `capability`.
    #[must_use]
    pub fn provides(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
