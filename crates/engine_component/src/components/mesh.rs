//! Mesh data component.

use engine_io::{StreamError, StreamReader, StreamWriter};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::component::{Component, ComponentContext};
use crate::kind::ComponentKind;

/// Reference to geometry held in the mesh pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mesh {
    /// Id of the mesh in the mesh pool. Empty when no mesh is assigned.
    pub mesh_id: String,
    pub name: String,
    pub vertex_count: u32,
    pub index_count: u32,
}

impl Mesh {
    #[must_use]
    pub fn triangle_count(&self) -> u32 {
        self.index_count / 3
    }
}

impl Component for Mesh {
    const KIND: ComponentKind = ComponentKind::Mesh;

    fn initialize(&mut self, cx: &ComponentContext<'_>) {
        if let Some(services) = cx.services()
            && !self.mesh_id.is_empty()
            && !services.meshes.contains(&self.mesh_id)
        {
            warn!(mesh = %self.mesh_id, "mesh is not in the mesh pool");
        }
    }

    fn save(&self, w: &mut StreamWriter) -> Result<(), StreamError> {
        w.write_str(&self.mesh_id)?;
        w.write_str(&self.name)?;
        w.write_u32(self.vertex_count);
        w.write_u32(self.index_count);
        Ok(())
    }

    fn load(&mut self, r: &mut StreamReader<'_>) -> Result<(), StreamError> {
        self.mesh_id = r.read_string()?;
        self.name = r.read_string()?;
        self.vertex_count = r.read_u32()?;
        self.index_count = r.read_u32()?;
        Ok(())
    }
}
