//! Primitive collider component.

use engine_io::{StreamEnum, StreamError, StreamReader, StreamWriter};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentContext};
use crate::kind::ComponentKind;

/// Collision primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColliderShape {
    #[default]
    Box,
    Sphere,
    Capsule,
}

impl StreamEnum for ColliderShape {
    const NAME: &'static str = "ColliderShape";

    fn to_raw(self) -> u32 {
        match self {
            ColliderShape::Box => 0,
            ColliderShape::Sphere => 1,
            ColliderShape::Capsule => 2,
        }
    }

    fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(ColliderShape::Box),
            1 => Some(ColliderShape::Sphere),
            2 => Some(ColliderShape::Capsule),
            _ => None,
        }
    }
}

/// A primitive collision volume centred relative to the owner.
///
/// `extents` holds half sizes for boxes; spheres use `extents.x` as radius,
/// capsules use `extents.x` as radius and `extents.y` as half height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub shape: ColliderShape,
    pub center: Vec3,
    pub extents: Vec3,
    /// Triggers report overlaps but do not collide.
    pub is_trigger: bool,
}

impl Default for Collider {
    fn default() -> Self {
        Self {
            shape: ColliderShape::Box,
            center: Vec3::ZERO,
            extents: Vec3::splat(0.5),
            is_trigger: false,
        }
    }
}

impl Component for Collider {
    const KIND: ComponentKind = ComponentKind::Collider;

    fn initialize(&mut self, cx: &ComponentContext<'_>) {
        if let (Some(owner), Some(services)) = (cx.owner(), cx.services()) {
            services.physics.register_collider(owner, self);
        }
    }

    fn teardown(&mut self, cx: &ComponentContext<'_>) {
        if let (Some(owner), Some(services)) = (cx.owner(), cx.services()) {
            services.physics.unregister_collider(owner);
        }
    }

    fn save(&self, w: &mut StreamWriter) -> Result<(), StreamError> {
        w.write_enum(self.shape);
        w.write_vec3(self.center);
        w.write_vec3(self.extents);
        w.write_bool(self.is_trigger);
        Ok(())
    }

    fn load(&mut self, r: &mut StreamReader<'_>) -> Result<(), StreamError> {
        self.shape = r.read_enum()?;
        self.center = r.read_vec3()?;
        self.extents = r.read_vec3()?;
        self.is_trigger = r.read_bool()?;
        Ok(())
    }
}
