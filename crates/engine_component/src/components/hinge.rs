//! Hinge joint component.

use engine_io::{StreamError, StreamReader, StreamWriter};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::entity::ObjectId;
use crate::kind::ComponentKind;

/// Joint rotating around one axis, optionally anchored to another object.
///
/// The connected object is referenced by its persistent [`ObjectId`], so the
/// link survives a save/load cycle. An empty string is written when there is
/// no connection; any other string must parse as an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hinge {
    pub connected: Option<ObjectId>,
    /// Pivot in the owner's local space.
    pub pivot: Vec3,
    pub axis: Vec3,
}

impl Default for Hinge {
    fn default() -> Self {
        Self {
            connected: None,
            pivot: Vec3::ZERO,
            axis: Vec3::Y,
        }
    }
}

impl Component for Hinge {
    const KIND: ComponentKind = ComponentKind::Hinge;

    fn save(&self, w: &mut StreamWriter) -> Result<(), StreamError> {
        match self.connected {
            Some(id) => w.write_str(&id.to_string())?,
            None => w.write_str("")?,
        }
        w.write_vec3(self.pivot);
        w.write_vec3(self.axis);
        Ok(())
    }

    fn load(&mut self, r: &mut StreamReader<'_>) -> Result<(), StreamError> {
        let offset = r.position();
        let connected = r.read_string()?;
        self.connected = if connected.is_empty() {
            None
        } else {
            let id = connected
                .parse()
                .map_err(|_| StreamError::InvalidObjectId {
                    offset,
                    value: connected,
                })?;
            Some(id)
        };
        self.pivot = r.read_vec3()?;
        self.axis = r.read_vec3()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_id_round_trip() {
        let hinge = Hinge {
            connected: Some(ObjectId::generate()),
            pivot: Vec3::new(0.0, 1.0, 0.0),
            axis: Vec3::X,
        };
        let mut w = StreamWriter::new();
        hinge.save(&mut w).unwrap();
        let bytes = w.into_bytes();

        let mut restored = Hinge::default();
        restored.load(&mut StreamReader::new(&bytes)).unwrap();
        assert_eq!(restored, hinge);
    }

    #[test]
    fn test_garbage_connection_is_rejected() {
        let mut w = StreamWriter::new();
        w.write_str("not-an-id").unwrap();
        w.write_vec3(Vec3::ONE);
        w.write_vec3(Vec3::Z);
        let bytes = w.into_bytes();

        let mut hinge = Hinge::default();
        let result = hinge.load(&mut StreamReader::new(&bytes));
        assert!(matches!(
            result,
            Err(StreamError::InvalidObjectId { offset: 0, ref value }) if value == "not-an-id"
        ));
    }

    #[test]
    fn test_empty_connection_is_none() {
        let mut w = StreamWriter::new();
        Hinge::default().save(&mut w).unwrap();
        let bytes = w.into_bytes();

        let mut hinge = Hinge {
            connected: Some(ObjectId::generate()),
            ..Hinge::default()
        };
        let mut r = StreamReader::new(&bytes);
        hinge.load(&mut r).unwrap();
        assert_eq!(hinge.connected, None);
        r.finish().unwrap();
    }
}
