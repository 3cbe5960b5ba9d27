//! Mesh collider component.

use engine_io::{StreamError, StreamReader, StreamWriter};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::component::{Component, ComponentContext};
use crate::kind::ComponentKind;

/// Collision volume built from a mesh in the mesh pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshCollider {
    pub mesh_id: String,
    /// Use the convex hull instead of the triangle soup.
    pub convex: bool,
}

impl Component for MeshCollider {
    const KIND: ComponentKind = ComponentKind::MeshCollider;

    fn initialize(&mut self, cx: &ComponentContext<'_>) {
        if let Some(services) = cx.services()
            && !self.mesh_id.is_empty()
            && !services.meshes.contains(&self.mesh_id)
        {
            warn!(mesh = %self.mesh_id, "collision mesh is not in the mesh pool");
        }
    }

    fn save(&self, w: &mut StreamWriter) -> Result<(), StreamError> {
        w.write_str(&self.mesh_id)?;
        w.write_bool(self.convex);
        Ok(())
    }

    fn load(&mut self, r: &mut StreamReader<'_>) -> Result<(), StreamError> {
        self.mesh_id = r.read_string()?;
        self.convex = r.read_bool()?;
        Ok(())
    }
}
