//! Script component.

use engine_io::{StreamError, StreamReader, StreamWriter};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::component::{Component, ComponentContext};
use crate::kind::ComponentKind;

/// Behaviour implemented in the script engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub path: String,
}

impl Script {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Component for Script {
    const KIND: ComponentKind = ComponentKind::Script;

    fn initialize(&mut self, cx: &ComponentContext<'_>) {
        if let Some(services) = cx.services()
            && !self.path.is_empty()
            && !services.scripts.load_script(&self.path)
        {
            warn!(script = %self.path, "script failed to load");
        }
    }

    fn update(&mut self, cx: &ComponentContext<'_>) {
        if let (Some(owner), Some(services)) = (cx.owner(), cx.services()) {
            services.scripts.call_update(owner, &self.path);
        }
    }

    fn save(&self, w: &mut StreamWriter) -> Result<(), StreamError> {
        w.write_str(&self.path)
    }

    fn load(&mut self, r: &mut StreamReader<'_>) -> Result<(), StreamError> {
        self.path = r.read_string()?;
        Ok(())
    }
}
