//! Rigid body component.

use engine_io::{StreamError, StreamReader, StreamWriter};
use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentContext};
use crate::kind::ComponentKind;

/// Simulated mass. The physics engine owns the actual body; this component
/// holds its parameters and keeps the simulation in step with the owner's
/// transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    pub mass: f32,
    pub drag: f32,
    pub angular_drag: f32,
    pub restitution: f32,
    pub use_gravity: bool,
    /// Kinematic bodies are moved by their transform, not by forces.
    pub is_kinematic: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            mass: 1.0,
            drag: 0.0,
            angular_drag: 0.05,
            restitution: 0.0,
            use_gravity: true,
            is_kinematic: false,
        }
    }
}

impl Component for RigidBody {
    const KIND: ComponentKind = ComponentKind::RigidBody;

    fn initialize(&mut self, cx: &ComponentContext<'_>) {
        if let (Some(owner), Some(services)) = (cx.owner(), cx.services()) {
            services.physics.register_body(owner, self);
        }
    }

    fn update(&mut self, cx: &ComponentContext<'_>) {
        if let (Some(owner), Some(services)) = (cx.owner(), cx.services()) {
            services.physics.sync_body(owner, cx.transform);
        }
    }

    fn teardown(&mut self, cx: &ComponentContext<'_>) {
        if let (Some(owner), Some(services)) = (cx.owner(), cx.services()) {
            services.physics.unregister_body(owner);
        }
    }

    fn save(&self, w: &mut StreamWriter) -> Result<(), StreamError> {
        w.write_f32(self.mass);
        w.write_f32(self.drag);
        w.write_f32(self.angular_drag);
        w.write_f32(self.restitution);
        w.write_bool(self.use_gravity);
        w.write_bool(self.is_kinematic);
        Ok(())
    }

    fn load(&mut self, r: &mut StreamReader<'_>) -> Result<(), StreamError> {
        self.mass = r.read_f32()?;
        self.drag = r.read_f32()?;
        self.angular_drag = r.read_f32()?;
        self.restitution = r.read_f32()?;
        self.use_gravity = r.read_bool()?;
        self.is_kinematic = r.read_bool()?;
        Ok(())
    }
}
