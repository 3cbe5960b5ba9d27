//! Spatial transform component.
//!
//! Every object carries exactly one [`Transform`]; it is created with the
//! object and cannot be removed.

use engine_io::{StreamError, StreamReader, StreamWriter};
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::kind::ComponentKind;

/// Position, rotation and non-uniform scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Transform {
    /// Origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    #[must_use]
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Self::IDENTITY
        }
    }

    /// The 4×4 model matrix.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Unit vector the transform faces (-Z in local space).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    #[must_use]
    pub fn translated(mut self, offset: Vec3) -> Self {
        self.position += offset;
        self
    }

    #[must_use]
    pub fn rotated(mut self, rotation: Quat) -> Self {
        self.rotation = rotation * self.rotation;
        self
    }

    #[must_use]
    pub fn scaled(mut self, factor: f32) -> Self {
        self.scale *= factor;
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Component for Transform {
    const KIND: ComponentKind = ComponentKind::Transform;

    fn save(&self, w: &mut StreamWriter) -> Result<(), StreamError> {
        w.write_vec3(self.position);
        w.write_quat(self.rotation);
        w.write_vec3(self.scale);
        Ok(())
    }

    fn load(&mut self, r: &mut StreamReader<'_>) -> Result<(), StreamError> {
        self.position = r.read_vec3()?;
        self.rotation = r.read_quat()?;
        self.scale = r.read_vec3()?;
        Ok(())
    }
}
