//! Light component.

use engine_io::{StreamEnum, StreamError, StreamReader, StreamWriter};
use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::kind::ComponentKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LightKind {
    #[default]
    Directional,
    Point,
    Spot,
}

impl StreamEnum for LightKind {
    const NAME: &'static str = "LightKind";

    fn to_raw(self) -> u32 {
        match self {
            LightKind::Directional => 0,
            LightKind::Point => 1,
            LightKind::Spot => 2,
        }
    }

    fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(LightKind::Directional),
            1 => Some(LightKind::Point),
            2 => Some(LightKind::Spot),
            _ => None,
        }
    }
}

/// A light source. Direction comes from the owner's transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub kind: LightKind,
    pub color: Vec4,
    pub intensity: f32,
    /// Falloff distance for point and spot lights.
    pub range: f32,
    /// Cone angle in degrees for spot lights.
    pub spot_angle: f32,
    pub cast_shadows: bool,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            kind: LightKind::Directional,
            color: Vec4::ONE,
            intensity: 1.0,
            range: 10.0,
            spot_angle: 30.0,
            cast_shadows: true,
        }
    }
}

impl Component for Light {
    const KIND: ComponentKind = ComponentKind::Light;

    fn save(&self, w: &mut StreamWriter) -> Result<(), StreamError> {
        w.write_enum(self.kind);
        w.write_vec4(self.color);
        w.write_f32(self.intensity);
        w.write_f32(self.range);
        w.write_f32(self.spot_angle);
        w.write_bool(self.cast_shadows);
        Ok(())
    }

    fn load(&mut self, r: &mut StreamReader<'_>) -> Result<(), StreamError> {
        self.kind = r.read_enum()?;
        self.color = r.read_vec4()?;
        self.intensity = r.read_f32()?;
        self.range = r.read_f32()?;
        self.spot_angle = r.read_f32()?;
        self.cast_shadows = r.read_bool()?;
        Ok(())
    }
}
