//! Mesh renderer component.

use engine_io::{StreamError, StreamReader, StreamWriter};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::component::{Component, ComponentContext};
use crate::kind::ComponentKind;

/// Draws the object's [`Mesh`](crate::Mesh) with a material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshRenderer {
    /// Id of the material in the material pool.
    pub material_id: String,
    pub cast_shadows: bool,
    pub receive_shadows: bool,
}

impl Default for MeshRenderer {
    fn default() -> Self {
        Self {
            material_id: String::new(),
            cast_shadows: true,
            receive_shadows: true,
        }
    }
}

impl Component for MeshRenderer {
    const KIND: ComponentKind = ComponentKind::MeshRenderer;

    fn initialize(&mut self, cx: &ComponentContext<'_>) {
        if let Some(services) = cx.services()
            && !self.material_id.is_empty()
            && !services.materials.contains(&self.material_id)
        {
            warn!(material = %self.material_id, "material is not in the material pool");
        }
    }

    fn save(&self, w: &mut StreamWriter) -> Result<(), StreamError> {
        w.write_str(&self.material_id)?;
        w.write_bool(self.cast_shadows);
        w.write_bool(self.receive_shadows);
        Ok(())
    }

    fn load(&mut self, r: &mut StreamReader<'_>) -> Result<(), StreamError> {
        self.material_id = r.read_string()?;
        self.cast_shadows = r.read_bool()?;
        self.receive_shadows = r.read_bool()?;
        Ok(())
    }
}
