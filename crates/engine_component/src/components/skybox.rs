//! Skybox component.

use engine_io::{StreamError, StreamReader, StreamWriter};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::component::{Component, ComponentContext};
use crate::kind::ComponentKind;

/// Environment cubemap drawn behind everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skybox {
    /// Id of the cubemap in the texture pool.
    pub cubemap_id: String,
    pub intensity: f32,
}

impl Default for Skybox {
    fn default() -> Self {
        Self {
            cubemap_id: String::new(),
            intensity: 1.0,
        }
    }
}

impl Component for Skybox {
    const KIND: ComponentKind = ComponentKind::Skybox;

    fn initialize(&mut self, cx: &ComponentContext<'_>) {
        if let Some(services) = cx.services()
            && !self.cubemap_id.is_empty()
            && !services.textures.contains(&self.cubemap_id)
        {
            warn!(texture = %self.cubemap_id, "skybox cubemap is not in the texture pool");
        }
    }

    fn save(&self, w: &mut StreamWriter) -> Result<(), StreamError> {
        w.write_str(&self.cubemap_id)?;
        w.write_f32(self.intensity);
        Ok(())
    }

    fn load(&mut self, r: &mut StreamReader<'_>) -> Result<(), StreamError> {
        self.cubemap_id = r.read_string()?;
        self.intensity = r.read_f32()?;
        Ok(())
    }
}
