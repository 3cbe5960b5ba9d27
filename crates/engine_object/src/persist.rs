//! Object save and load.

use engine_component::{AnyComponent, ComponentKind, ObjectId};
use engine_io::{StreamReader, StreamWriter};
use tracing::{debug, warn};

use crate::config::{LoadOptions, UnknownComponentPolicy};
use crate::error::ObjectError;
use crate::object::GameObject;

/// What a load actually restored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Kinds restored, in stream order.
    pub loaded: Vec<ComponentKind>,
    /// Tags stepped over because this build does not know them.
    pub skipped: Vec<String>,
}

impl LoadReport {
    /// Returns `true` if no component was skipped.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl GameObject {
    /// Write the object header followed by every component, in tag order.
    ///
    /// # Errors
    ///
    /// Fails only if a string or payload is too long for its `u32` prefix.
    pub fn save(&self, w: &mut StreamWriter) -> Result<(), ObjectError> {
        w.write_str(&self.id().to_string())?;
        w.write_str(self.name())?;
        w.write_bool(self.is_active());
        w.write_bool(self.is_visible_in_hierarchy());
        w.write_count(self.component_count())?;

        for (kind, slot) in self.slots() {
            w.write_str(kind.tag())?;
            slot.component.save_block(w)?;
        }

        debug!(object = %self.id(), components = self.component_count(), "object saved");
        Ok(())
    }

    /// Replace this object's state with the one stored in `r`.
    ///
    /// The object is first reset to a bare transform. Each known component
    /// is decoded from its payload before it is attached, so its
    /// `initialize` hook sees the loaded fields. The transform is never
    /// re-attached; only its data is replaced.
    ///
    /// On error the object is left partially loaded and should be
    /// discarded.
    pub(crate) fn load(
        &mut self,
        r: &mut StreamReader<'_>,
        options: &LoadOptions,
    ) -> Result<LoadReport, ObjectError> {
        self.reset();

        let offset = r.position();
        let value = r.read_string()?;
        let id = value
            .parse::<ObjectId>()
            .map_err(|source| ObjectError::InvalidId {
                value,
                offset,
                source,
            })?;
        if !id.is_valid() {
            return Err(ObjectError::NilId { offset });
        }
        self.set_id(id);
        self.set_name(r.read_string()?);
        self.set_active(r.read_bool()?);
        self.set_hierarchy_visibility(r.read_bool()?);

        let count = r.read_count()?;
        let mut report = LoadReport::default();
        for _ in 0..count {
            let tag = r.read_string()?;
            let mut payload = r.read_block()?;

            let Some(kind) = ComponentKind::from_tag(&tag) else {
                match options.unknown_components {
                    UnknownComponentPolicy::Skip => {
                        warn!(
                            object = %id,
                            tag = %tag,
                            bytes = payload.remaining(),
                            "skipping unknown component"
                        );
                        report.skipped.push(tag);
                        continue;
                    }
                    UnknownComponentPolicy::Fail => {
                        return Err(ObjectError::UnknownComponent(tag));
                    }
                }
            };

            let mut component = AnyComponent::new(kind);
            component
                .load(&mut payload)
                .map_err(|source| ObjectError::Component { kind, source })?;
            if !payload.is_empty() {
                return Err(ObjectError::TrailingPayload {
                    kind,
                    remaining: payload.remaining(),
                });
            }

            if report.loaded.contains(&kind) {
                warn!(object = %id, component = %kind, "component stored twice, keeping the last");
            }
            self.install(component);
            report.loaded.push(kind);
        }

        debug!(
            object = %id,
            loaded = report.loaded.len(),
            skipped = report.skipped.len(),
            "object loaded"
        );
        Ok(report)
    }
}
