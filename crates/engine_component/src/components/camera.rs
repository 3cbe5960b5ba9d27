//! Camera component.

use engine_io::{StreamEnum, StreamError, StreamReader, StreamWriter};
use glam::{Mat4, Vec4};
use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentContext};
use crate::components::Transform;
use crate::kind::ComponentKind;

/// How the camera maps view space to clip space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    #[default]
    Perspective,
    Orthographic,
}

impl StreamEnum for Projection {
    const NAME: &'static str = "Projection";

    fn to_raw(self) -> u32 {
        match self {
            Projection::Perspective => 0,
            Projection::Orthographic => 1,
        }
    }

    fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Projection::Perspective),
            1 => Some(Projection::Orthographic),
            _ => None,
        }
    }
}

/// A point of view.
///
/// `aspect` is runtime state refreshed from the render device every frame.
/// It is neither persisted nor compared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub projection: Projection,
    /// Vertical field of view in degrees (perspective only).
    pub fov_degrees: f32,
    /// Half height of the view volume (orthographic only).
    pub orthographic_size: f32,
    pub near: f32,
    pub far: f32,
    pub clear_color: Vec4,
    #[serde(skip)]
    aspect: f32,
}

impl Camera {
    #[must_use]
    pub fn perspective(fov_degrees: f32) -> Self {
        Self {
            fov_degrees,
            ..Self::default()
        }
    }

    /// Aspect ratio seen on the last update.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Right-handed projection matrix with a [0, 1] depth range.
    #[must_use]
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        match self.projection {
            Projection::Perspective => {
                Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, self.near, self.far)
            }
            Projection::Orthographic => {
                let h = self.orthographic_size;
                let w = h * aspect;
                Mat4::orthographic_rh(-w, w, -h, h, self.near, self.far)
            }
        }
    }

    /// World-to-view matrix for a camera placed at `transform`.
    #[must_use]
    pub fn view_matrix(transform: &Transform) -> Mat4 {
        transform.to_matrix().inverse()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            projection: Projection::Perspective,
            fov_degrees: 45.0,
            orthographic_size: 5.0,
            near: 0.1,
            far: 1000.0,
            clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            aspect: 1.0,
        }
    }
}

impl PartialEq for Camera {
    fn eq(&self, other: &Self) -> bool {
        self.projection == other.projection
            && self.fov_degrees == other.fov_degrees
            && self.orthographic_size == other.orthographic_size
            && self.near == other.near
            && self.far == other.far
            && self.clear_color == other.clear_color
    }
}

impl Component for Camera {
    const KIND: ComponentKind = ComponentKind::Camera;

    fn update(&mut self, cx: &ComponentContext<'_>) {
        if let Some(services) = cx.services() {
            self.aspect = services.device.aspect_ratio();
        }
    }

    fn save(&self, w: &mut StreamWriter) -> Result<(), StreamError> {
        w.write_enum(self.projection);
        w.write_f32(self.fov_degrees);
        w.write_f32(self.orthographic_size);
        w.write_f32(self.near);
        w.write_f32(self.far);
        w.write_vec4(self.clear_color);
        Ok(())
    }

    fn load(&mut self, r: &mut StreamReader<'_>) -> Result<(), StreamError> {
        self.projection = r.read_enum()?;
        self.fov_degrees = r.read_f32()?;
        self.orthographic_size = r.read_f32()?;
        self.near = r.read_f32()?;
        self.far = r.read_f32()?;
        self.clear_color = r.read_vec4()?;
        Ok(())
    }
}
