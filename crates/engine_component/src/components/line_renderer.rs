//! Debug line renderer component.

use engine_io::{StreamError, StreamReader, StreamWriter};
use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::kind::ComponentKind;

/// One coloured line segment in the owner's local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub from: Vec3,
    pub to: Vec3,
    pub color: Vec4,
}

/// A variable-length list of line segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineRenderer {
    pub segments: Vec<LineSegment>,
}

impl LineRenderer {
    pub fn add_line(&mut self, from: Vec3, to: Vec3, color: Vec4) {
        self.segments.push(LineSegment { from, to, color });
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }
}

impl Component for LineRenderer {
    const KIND: ComponentKind = ComponentKind::LineRenderer;

    fn save(&self, w: &mut StreamWriter) -> Result<(), StreamError> {
        w.write_seq(&self.segments, |w, segment| {
            w.write_vec3(segment.from);
            w.write_vec3(segment.to);
            w.write_vec4(segment.color);
            Ok::<_, StreamError>(())
        })
    }

    fn load(&mut self, r: &mut StreamReader<'_>) -> Result<(), StreamError> {
        self.segments = r.read_seq(|r| {
            Ok::<_, StreamError>(LineSegment {
                from: r.read_vec3()?,
                to: r.read_vec3()?,
                color: r.read_vec4()?,
            })
        })?;
        Ok(())
    }
}
