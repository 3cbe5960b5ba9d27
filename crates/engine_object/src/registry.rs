//! Object registry: the pool of live objects.
//!
//! Components refer back to their owner by [`ObjectKey`]. The registry is
//! where those keys resolve. Keys are generational, so a key held by a
//! component outliving its owner resolves to `None` instead of to whatever
//! object reused the slot.

use std::collections::HashMap;
use std::path::Path;

use engine_component::{ComponentLinks, ObjectId, ObjectKey, Services, Transform};
use engine_io::{StreamReader, StreamWriter, file};
use slotmap::SlotMap;
use tracing::debug;

use crate::config::LoadOptions;
use crate::error::ObjectError;
use crate::object::GameObject;
use crate::persist::LoadReport;

/// Every live object, addressable by key or by persistent id.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    objects: SlotMap<ObjectKey, GameObject>,
    /// Persistent id to key, for every live object.
    by_id: HashMap<ObjectId, ObjectKey>,
}

impl ObjectRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an object with a fresh id and a default transform.
    pub fn spawn(&mut self, services: Services) -> ObjectKey {
        let key = self.create(services);
        let id = self.objects[key].id();
        self.by_id.insert(id, key);
        debug!(object = %id, "object spawned");
        key
    }

    /// Insert an object without indexing it by id.
    fn create(&mut self, services: Services) -> ObjectKey {
        self.objects.insert_with_key(|key| GameObject::new(key, services))
    }

    #[must_use]
    pub fn get(&self, key: ObjectKey) -> Option<&GameObject> {
        self.objects.get(key)
    }

    #[must_use]
    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut GameObject> {
        self.objects.get_mut(key)
    }

    /// Look up a live object by its persistent id.
    #[must_use]
    pub fn find_by_id(&self, id: &ObjectId) -> Option<&GameObject> {
        self.by_id.get(id).and_then(|&key| self.objects.get(key))
    }

    #[must_use]
    pub fn contains(&self, key: ObjectKey) -> bool {
        self.objects.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectKey, &GameObject)> {
        self.objects.iter()
    }

    /// Destroy the object under `key`.
    ///
    /// Returns `false` if the key was already stale.
    pub fn despawn(&mut self, key: ObjectKey) -> bool {
        let Some(mut object) = self.objects.remove(key) else {
            return false;
        };
        let id = object.id();
        self.by_id.remove(&id);
        object.destroy();
        debug!(object = %id, "object despawned");
        true
    }

    /// The transform of the object under `key`.
    #[must_use]
    pub fn transform_of(&self, key: ObjectKey) -> Option<&Transform> {
        self.get(key).map(GameObject::transform)
    }

    /// The object a component is attached to, if both still exist.
    #[must_use]
    pub fn owner_of(&self, links: &ComponentLinks) -> Option<&GameObject> {
        links.owner().and_then(|key| self.get(key))
    }

    /// Run one frame of every live object.
    pub fn update_all(&mut self) {
        for object in self.objects.values_mut() {
            object.update();
        }
    }

    /// Write the object under `key` to `w`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::StaleKey`] if `key` does not refer to a live
    /// object.
    pub fn save_object(&self, key: ObjectKey, w: &mut StreamWriter) -> Result<(), ObjectError> {
        self.get(key).ok_or(ObjectError::StaleKey(key))?.save(w)
    }

    /// Read one object from `r` and make it live.
    ///
    /// The object is created with `services` and its components are
    /// initialised against them.
    ///
    /// # Errors
    ///
    /// Any decode error, or [`ObjectError::DuplicateId`] if an object with
    /// the stored id is already live. In every error case the partially
    /// loaded object is destroyed and the registry is left as it was.
    pub fn load_object(
        &mut self,
        r: &mut StreamReader<'_>,
        services: Services,
        options: &LoadOptions,
    ) -> Result<(ObjectKey, LoadReport), ObjectError> {
        let key = self.create(services);
        let report = match self.objects[key].load(r, options) {
            Ok(report) => report,
            Err(err) => {
                self.discard(key);
                return Err(err);
            }
        };

        let id = self.objects[key].id();
        if self.by_id.contains_key(&id) {
            self.discard(key);
            return Err(ObjectError::DuplicateId(id));
        }
        self.by_id.insert(id, key);
        Ok((key, report))
    }

    /// Remove an object that never made it into the id index.
    fn discard(&mut self, key: ObjectKey) {
        if let Some(mut object) = self.objects.remove(key) {
            object.destroy();
        }
    }

    /// Save the object under `key` as the whole content of `path`.
    ///
    /// # Errors
    ///
    /// [`ObjectError::StaleKey`] or any I/O failure.
    pub fn save_to_file(&self, key: ObjectKey, path: impl AsRef<Path>) -> Result<(), ObjectError> {
        let mut w = StreamWriter::new();
        self.save_object(key, &mut w)?;
        file::store(path, &w)?;
        Ok(())
    }

    /// Load a file written by [`ObjectRegistry::save_to_file`].
    ///
    /// # Errors
    ///
    /// As [`ObjectRegistry::load_object`], plus I/O failures and trailing
    /// bytes after the object.
    pub fn load_from_file(
        &mut self,
        path: impl AsRef<Path>,
        services: Services,
        options: &LoadOptions,
    ) -> Result<(ObjectKey, LoadReport), ObjectError> {
        let bytes = file::load(path)?;
        let mut r = StreamReader::new(&bytes);
        let (key, report) = self.load_object(&mut r, services, options)?;
        if let Err(err) = r.finish() {
            self.despawn(key);
            return Err(err.into());
        }
        Ok((key, report))
    }

    /// Destroy every object.
    pub fn clear(&mut self) {
        let keys: Vec<_> = self.objects.keys().collect();
        for key in keys {
            self.despawn(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use engine_component::{Camera, Collider, ComponentKind, RigidBody, Script};
    use engine_io::StreamError;
    use glam::Vec3;

    use super::*;
    use crate::testing::{Call, recording_services};

    fn saved(registry: &ObjectRegistry, key: ObjectKey) -> Vec<u8> {
        let mut w = StreamWriter::new();
        registry.save_object(key, &mut w).unwrap();
        w.into_bytes()
    }

    #[test]
    fn test_spawn_and_lookup() {
        let mut registry = ObjectRegistry::new();
        assert!(registry.is_empty());

        let key = registry.spawn(Services::headless());
        let id = registry.get(key).unwrap().id();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(key));
        assert_eq!(registry.get(key).unwrap().key(), key);
        assert_eq!(registry.find_by_id(&id).unwrap().key(), key);
        assert_eq!(registry.transform_of(key), Some(&Transform::IDENTITY));
    }

    #[test]
    fn test_despawn_makes_key_stale() {
        let mut registry = ObjectRegistry::new();
        let key = registry.spawn(Services::headless());
        let id = registry.get(key).unwrap().id();

        assert!(registry.despawn(key));
        assert!(!registry.despawn(key));
        assert!(registry.get(key).is_none());
        assert!(registry.transform_of(key).is_none());
        assert!(registry.find_by_id(&id).is_none());

        // A new object may reuse the slot, but not the key.
        let other = registry.spawn(Services::headless());
        assert_ne!(other, key);
        assert!(registry.transform_of(key).is_none());
    }

    #[test]
    fn test_despawn_unregisters_physics() {
        let (services, _, recorder) = recording_services();
        let mut registry = ObjectRegistry::new();
        let key = registry.spawn(services);
        let object = registry.get_mut(key).unwrap();
        object.add_component::<RigidBody>();
        object.add_component::<Collider>();
        object.remove_component::<RigidBody>().unwrap();

        assert!(registry.despawn(key));
        assert_eq!(
            recorder.calls(),
            vec![
                Call::RegisterBody(key),
                Call::RegisterCollider(key),
                Call::UnregisterBody(key),
                Call::UnregisterCollider(key),
            ]
        );
    }

    #[test]
    fn test_owner_of_resolves_links() {
        let mut registry = ObjectRegistry::new();
        let key = registry.spawn(Services::headless());
        registry.get_mut(key).unwrap().transform_mut().position = Vec3::Y;

        let object = registry.get(key).unwrap();
        let links = object.links(ComponentKind::Transform).unwrap();
        let owner = registry.owner_of(links).unwrap();
        assert_eq!(owner.transform().position, Vec3::Y);
        assert!(registry.owner_of(&ComponentLinks::default()).is_none());
    }

    #[test]
    fn test_update_all_skips_inactive() {
        let (services, _, recorder) = recording_services();
        let mut registry = ObjectRegistry::new();
        let active = registry.spawn(services.clone());
        let inactive = registry.spawn(services);
        for key in [active, inactive] {
            registry.get_mut(key).unwrap().add_component::<RigidBody>();
        }
        registry.get_mut(inactive).unwrap().set_active(false);
        recorder.clear();

        registry.update_all();
        assert_eq!(
            recorder.calls(),
            vec![Call::SyncBody(active, Transform::IDENTITY)]
        );
    }

    #[test]
    fn test_save_stale_key_fails() {
        let mut registry = ObjectRegistry::new();
        let key = registry.spawn(Services::headless());
        registry.despawn(key);

        let result = registry.save_object(key, &mut StreamWriter::new());
        assert!(matches!(result, Err(ObjectError::StaleKey(k)) if k == key));
    }

    #[test]
    fn test_load_object_into_other_registry() {
        let mut source = ObjectRegistry::new();
        let key = source.spawn(Services::headless());
        let object = source.get_mut(key).unwrap();
        object.set_name("Camera Rig");
        object.add_component::<Camera>().fov_degrees = 60.0;
        let id = object.id();
        let bytes = saved(&source, key);

        let (services, _, recorder) = recording_services();
        let mut target = ObjectRegistry::new();
        let (loaded, report) = target
            .load_object(&mut StreamReader::new(&bytes), services, &LoadOptions::default())
            .unwrap();
        assert!(report.is_complete());

        let object = target.find_by_id(&id).unwrap();
        assert_eq!(object.key(), loaded);
        assert_eq!(object.name(), "Camera Rig");
        assert_eq!(object.get_component::<Camera>().unwrap().fov_degrees, 60.0);
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_load_duplicate_id_is_rejected() {
        let mut registry = ObjectRegistry::new();
        let key = registry.spawn(Services::headless());
        let bytes = saved(&registry, key);

        let result = registry.load_object(
            &mut StreamReader::new(&bytes),
            Services::headless(),
            &LoadOptions::default(),
        );
        assert!(matches!(result, Err(ObjectError::DuplicateId(_))));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(key));
    }

    #[test]
    fn test_load_nil_id_is_rejected() {
        let mut w = StreamWriter::new();
        w.write_str(&ObjectId::INVALID.to_string()).unwrap();
        w.write_str("Ghost").unwrap();
        w.write_bool(true);
        w.write_bool(true);
        w.write_i32(0);
        let bytes = w.into_bytes();

        let mut registry = ObjectRegistry::new();
        let result = registry.load_object(
            &mut StreamReader::new(&bytes),
            Services::headless(),
            &LoadOptions::default(),
        );
        assert!(matches!(result, Err(ObjectError::NilId { .. })));
        assert!(registry.is_empty());
        assert!(registry.find_by_id(&ObjectId::INVALID).is_none());
    }

    #[test]
    fn test_failed_load_leaves_registry_unchanged() {
        let mut registry = ObjectRegistry::new();
        let key = registry.spawn(Services::headless());
        let bytes = saved(&registry, key);
        registry.despawn(key);

        let result = registry.load_object(
            &mut StreamReader::new(&bytes[..bytes.len() - 3]),
            Services::headless(),
            &LoadOptions::default(),
        );
        assert!(result.is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("engine-object-{}", ObjectId::generate()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("player.object");

        let mut registry = ObjectRegistry::new();
        let key = registry.spawn(Services::headless());
        registry.get_mut(key).unwrap().add_component::<Script>().path = "player.lua".into();
        registry.save_to_file(key, &path).unwrap();
        registry.clear();
        assert!(registry.is_empty());

        let (key, _) = registry
            .load_from_file(&path, Services::headless(), &LoadOptions::default())
            .unwrap();
        let script = registry.get(key).unwrap().get_component::<Script>().unwrap();
        assert_eq!(script.path, "player.lua");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_from_file_rejects_trailing_bytes() {
        let dir = std::env::temp_dir().join(format!("engine-object-{}", ObjectId::generate()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("padded.object");

        let mut registry = ObjectRegistry::new();
        let key = registry.spawn(Services::headless());
        let mut bytes = saved(&registry, key);
        bytes.push(0);
        std::fs::write(&path, &bytes).unwrap();
        registry.clear();

        let result = registry.load_from_file(&path, Services::headless(), &LoadOptions::default());
        assert!(matches!(
            result,
            Err(ObjectError::Stream(StreamError::TrailingBytes { remaining: 1 }))
        ));
        assert!(registry.is_empty());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
