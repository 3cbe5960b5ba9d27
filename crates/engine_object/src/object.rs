//! The composable game object.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use engine_component::{
    AnyComponent, Capability, Component, ComponentContext, ComponentKind, ComponentLinks,
    ObjectId, ObjectKey, Services, Transform,
};
use tracing::debug;

use crate::error::ObjectError;

/// Name given to objects that have not been renamed.
pub const DEFAULT_NAME: &str = "GameObject";

/// A stored component with its back-references.
#[derive(Debug)]
pub(crate) struct Slot {
    pub(crate) links: ComponentLinks,
    pub(crate) component: AnyComponent,
}

/// An object composed of at most one component per [`ComponentKind`].
///
/// Objects are created by [`ObjectRegistry::spawn`](crate::ObjectRegistry::spawn)
/// and always carry a [`Transform`].
///
/// Components are kept in a map ordered by kind, which is also the byte
/// order of their tags. Updates and saves walk the map in that order. The
/// order is stable but carries no meaning: components must not depend on
/// running before or after a sibling.
#[derive(Debug)]
pub struct GameObject {
    id: ObjectId,
    key: ObjectKey,
    name: String,
    active: bool,
    hierarchy_visible: bool,
    services: Services,
    components: BTreeMap<ComponentKind, Slot>,
}

impl GameObject {
    pub(crate) fn new(key: ObjectKey, services: Services) -> Self {
        let mut object = Self {
            id: ObjectId::generate(),
            key,
            name: DEFAULT_NAME.to_string(),
            active: true,
            hierarchy_visible: true,
            services,
            components: BTreeMap::new(),
        };
        object.add_component::<Transform>();
        object
    }

    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }

    /// The registry key this object was spawned under.
    #[must_use]
    pub fn key(&self) -> ObjectKey {
        self.key
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Inactive objects skip [`GameObject::update`] entirely.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    #[must_use]
    pub fn is_visible_in_hierarchy(&self) -> bool {
        self.hierarchy_visible
    }

    /// Editor presentation only; has no effect on update or physics.
    pub fn set_hierarchy_visibility(&mut self, visible: bool) {
        self.hierarchy_visible = visible;
    }

    /// The collaborators injected into every component of this object.
    #[must_use]
    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Add a component of type `T`, or return the one already present.
    ///
    /// A new component is default-constructed, linked to this object,
    /// initialised once, and reported to the scene as a structural change.
    /// Adding a type that is already present changes nothing.
    pub fn add_component<T: Component>(&mut self) -> &mut T {
        let slot = self.slot_for(T::KIND);
        match T::from_any_mut(&mut slot.component) {
            Some(component) => component,
            None => unreachable!("slot for {} holds another component", T::KIND),
        }
    }

    /// The component of type `T`, if present.
    #[must_use]
    pub fn get_component<T: Component>(&self) -> Option<&T> {
        self.components
            .get(&T::KIND)
            .and_then(|slot| T::from_any(&slot.component))
    }

    #[must_use]
    pub fn get_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .get_mut(&T::KIND)
            .and_then(|slot| T::from_any_mut(&mut slot.component))
    }

    #[must_use]
    pub fn has_component<T: Component>(&self) -> bool {
        self.get_component::<T>().is_some()
    }

    /// The component stored under `kind`, if present.
    #[must_use]
    pub fn component(&self, kind: ComponentKind) -> Option<&AnyComponent> {
        self.components.get(&kind).map(|slot| &slot.component)
    }

    /// Back-references of the component stored under `kind`.
    #[must_use]
    pub fn links(&self, kind: ComponentKind) -> Option<&ComponentLinks> {
        self.components.get(&kind).map(|slot| &slot.links)
    }

    /// The first component whose kind declares `capability`.
    #[must_use]
    pub fn find_capability(&self, capability: Capability) -> Option<&AnyComponent> {
        self.components_with(capability).next()
    }

    /// Every component whose kind declares `capability`, in kind order.
    pub fn components_with(&self, capability: Capability) -> impl Iterator<Item = &AnyComponent> {
        self.components
            .iter()
            .filter(move |(kind, _)| kind.provides(capability))
            .map(|(_, slot)| &slot.component)
    }

    /// Remove the component of type `T`.
    ///
    /// Returns `Ok(false)` if there was nothing to remove.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::TransformRequired`] for `T = Transform`; the
    /// object is left unchanged.
    pub fn remove_component<T: Component>(&mut self) -> Result<bool, ObjectError> {
        self.remove_kind(T::KIND)
    }

    /// Remove the component stored under `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::TransformRequired`] for the transform.
    pub fn remove_kind(&mut self, kind: ComponentKind) -> Result<bool, ObjectError> {
        if kind == ComponentKind::Transform {
            return Err(ObjectError::TransformRequired);
        }
        let transform = *self.transform();
        let Some(mut slot) = self.components.remove(&kind) else {
            return Ok(false);
        };
        retire(&mut slot, &transform);
        drop(slot);

        self.services.scene.make_dirty();
        debug!(object = %self.id, component = %kind, "component removed");
        Ok(true)
    }

    /// The object's transform.
    #[must_use]
    pub fn transform(&self) -> &Transform {
        match self.get_component::<Transform>() {
            Some(transform) => transform,
            None => unreachable!("object {} lost its transform", self.id),
        }
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        self.add_component::<Transform>()
    }

    /// Number of components, including the transform.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Kinds present on this object, in kind order.
    pub fn kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.components.keys().copied()
    }

    /// Every component, in kind order.
    pub fn components(&self) -> impl Iterator<Item = &AnyComponent> {
        self.components.values().map(|slot| &slot.component)
    }

    /// Run one frame of every component.
    ///
    /// Does nothing while the object is inactive. Each component sees the
    /// transform as it was before the first component ran.
    pub fn update(&mut self) {
        if !self.active {
            return;
        }

        let transform = *self.transform();
        for slot in self.components.values_mut() {
            slot.component
                .update(&ComponentContext::new(&slot.links, &transform));
        }
    }

    pub(crate) fn slots(&self) -> impl Iterator<Item = (&ComponentKind, &Slot)> {
        self.components.iter()
    }

    /// The slot for `kind`, attaching a default component first if needed.
    fn slot_for(&mut self, kind: ComponentKind) -> &mut Slot {
        let transform = self.transform_snapshot();
        match self.components.entry(kind) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let slot = attach(
                    self.id,
                    self.key,
                    &self.services,
                    &transform,
                    AnyComponent::new(kind),
                );
                entry.insert(slot)
            }
        }
    }

    /// Store a component whose fields have already been loaded.
    ///
    /// A new component is attached and initialised with its loaded fields.
    /// If the kind is already present its data is replaced in place and the
    /// existing links are kept; any kind but the transform is torn down
    /// first and initialised again with the new fields. Returns `true` in
    /// the second case.
    pub(crate) fn install(&mut self, component: AnyComponent) -> bool {
        let transform = self.transform_snapshot();
        let kind = component.kind();
        match self.components.entry(kind) {
            Entry::Occupied(mut entry) => {
                let slot = entry.get_mut();
                if kind == ComponentKind::Transform {
                    slot.component = component;
                } else {
                    let cx = ComponentContext::new(&slot.links, &transform);
                    slot.component.teardown(&cx);
                    slot.component = component;
                    slot.component.initialize(&cx);
                }
                true
            }
            Entry::Vacant(entry) => {
                let slot = attach(self.id, self.key, &self.services, &transform, component);
                entry.insert(slot);
                false
            }
        }
    }

    /// The current transform, or the identity while the transform itself
    /// is being attached.
    fn transform_snapshot(&self) -> Transform {
        self.get_component::<Transform>()
            .copied()
            .unwrap_or_default()
    }

    /// Return to the state of a freshly spawned object: identity transform,
    /// default name, both flags set. The identifier is kept.
    pub(crate) fn reset(&mut self) {
        let transform = self.transform_snapshot();
        let before = self.components.len();
        self.components.retain(|kind, slot| {
            let keep = *kind == ComponentKind::Transform;
            if !keep {
                retire(slot, &transform);
            }
            keep
        });
        if self.components.len() != before {
            self.services.scene.make_dirty();
        }

        *self.transform_mut() = Transform::IDENTITY;
        self.name = DEFAULT_NAME.to_string();
        self.active = true;
        self.hierarchy_visible = true;
    }

    fn detach_all(&mut self) {
        let transform = self.transform_snapshot();
        for slot in self.components.values_mut() {
            retire(slot, &transform);
        }
    }

    /// Tear the object down: tear down every component and clear its links,
    /// drop the components, invalidate the identifier.
    pub(crate) fn destroy(&mut self) {
        if !self.id.is_valid() && self.components.is_empty() {
            return;
        }
        self.detach_all();
        self.components.clear();
        debug!(object = %self.id, "object destroyed");

        self.id = ObjectId::INVALID;
        self.name.clear();
        self.active = false;
        self.hierarchy_visible = false;
    }
}

impl Drop for GameObject {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Link a component to its owner and run its one-time initialisation.
fn attach(
    owner_id: ObjectId,
    owner: ObjectKey,
    services: &Services,
    transform: &Transform,
    component: AnyComponent,
) -> Slot {
    let kind = component.kind();
    let mut slot = Slot {
        links: ComponentLinks::attached(owner, services.clone()),
        component,
    };
    slot.component
        .initialize(&ComponentContext::new(&slot.links, transform));
    services.scene.make_dirty();
    debug!(object = %owner_id, component = %kind, "component added");
    slot
}

/// Run a component's teardown while its links are still set, then clear
/// them. A second call finds no owner and does nothing.
fn retire(slot: &mut Slot, transform: &Transform) {
    slot.component
        .teardown(&ComponentContext::new(&slot.links, transform));
    slot.links.detach();
}

#[cfg(test)]
mod tests {
    use engine_component::{
        Camera, Collider, Hinge, Light, LineRenderer, Mesh, MeshCollider, MeshRenderer, RigidBody,
        Script, Skybox,
    };
    use glam::Vec3;

    use super::*;
    use crate::testing::{Call, object_with, recording_services};

    #[test]
    fn test_fresh_object_has_only_transform() {
        let object = object_with(Services::headless());
        assert_eq!(object.component_count(), 1);
        assert_eq!(object.get_component::<Transform>(), Some(&Transform::IDENTITY));
        assert_eq!(object.kinds().collect::<Vec<_>>(), vec![ComponentKind::Transform]);
        assert_eq!(object.name(), DEFAULT_NAME);
        assert!(object.is_active());
        assert!(object.is_visible_in_hierarchy());
        assert!(object.id().is_valid());
    }

    #[test]
    fn test_add_component_is_idempotent() {
        let (services, scene, _) = recording_services();
        let mut object = object_with(services);
        scene.take();

        let first = object.add_component::<Camera>() as *const Camera;
        assert!(scene.take());
        object.get_component_mut::<Camera>().unwrap().fov_degrees = 60.0;

        let second = object.add_component::<Camera>() as *const Camera;
        assert!(std::ptr::eq(first, second));
        assert_eq!(object.component_count(), 2);
        // The existing camera was returned unchanged.
        assert_eq!(object.get_component::<Camera>().unwrap().fov_degrees, 60.0);
        assert!(!scene.is_dirty());
    }

    macro_rules! assert_add_twice_returns_same {
        ($($kind:ty),* $(,)?) => {
            let mut object = object_with(Services::headless());
            $(
                let before = object.component_count();
                let first = object.add_component::<$kind>() as *const $kind;
                assert!(object.component_count() <= before + 1, stringify!($kind));
                let count = object.component_count();
                let second = object.add_component::<$kind>() as *const $kind;
                assert!(std::ptr::eq(first, second), stringify!($kind));
                assert_eq!(object.component_count(), count, stringify!($kind));
            )*
            assert_eq!(object.component_count(), ComponentKind::ALL.len());
        };
    }

    #[test]
    fn test_add_component_twice_returns_same_for_every_kind() {
        assert_add_twice_returns_same!(
            Camera,
            Collider,
            Hinge,
            Light,
            LineRenderer,
            Mesh,
            MeshCollider,
            MeshRenderer,
            RigidBody,
            Script,
            Skybox,
            Transform,
        );
    }

    #[test]
    fn test_add_component_links_and_initializes() {
        let (services, _, recorder) = recording_services();
        let mut object = object_with(services);
        object.add_component::<RigidBody>();

        let links = object.links(ComponentKind::RigidBody).unwrap();
        assert_eq!(links.owner(), Some(object.key()));
        assert!(links.services().is_some());
        assert_eq!(recorder.calls(), vec![Call::RegisterBody(object.key())]);
    }

    #[test]
    fn test_missing_component_is_none() {
        let object = object_with(Services::headless());
        assert!(object.get_component::<RigidBody>().is_none());
        assert!(!object.has_component::<RigidBody>());
        assert!(object.component(ComponentKind::RigidBody).is_none());
    }

    #[test]
    fn test_remove_component() {
        let (services, scene, _) = recording_services();
        let mut object = object_with(services);
        object.add_component::<Script>();
        scene.take();

        assert!(object.remove_component::<Script>().unwrap());
        assert!(!object.has_component::<Script>());
        assert!(scene.take());

        // Removing again is a no-op that does not touch the scene.
        assert!(!object.remove_component::<Script>().unwrap());
        assert!(!scene.is_dirty());
    }

    #[test]
    fn test_every_kind_except_transform_is_removable() {
        let mut object = object_with(Services::headless());
        for kind in ComponentKind::ALL {
            object.install(AnyComponent::new(kind));
        }
        assert_eq!(object.component_count(), ComponentKind::ALL.len());

        for kind in ComponentKind::ALL {
            if kind == ComponentKind::Transform {
                continue;
            }
            assert!(object.remove_kind(kind).unwrap(), "{kind}");
            assert!(object.component(kind).is_none(), "{kind}");
        }
        assert_eq!(object.component_count(), 1);
    }

    #[test]
    fn test_remove_tears_down_before_detaching() {
        let (services, _, recorder) = recording_services();
        let mut object = object_with(services);
        object.add_component::<RigidBody>();
        object.add_component::<Collider>();
        recorder.clear();

        assert!(object.remove_component::<RigidBody>().unwrap());
        assert_eq!(recorder.calls(), vec![Call::UnregisterBody(object.key())]);
        assert!(object.has_component::<Collider>());
    }

    #[test]
    fn test_reset_tears_down_dropped_components() {
        let (services, _, recorder) = recording_services();
        let mut object = object_with(services);
        object.add_component::<Collider>();
        object.add_component::<RigidBody>();
        recorder.clear();

        object.reset();
        let key = object.key();
        assert_eq!(
            recorder.calls(),
            vec![Call::UnregisterCollider(key), Call::UnregisterBody(key)]
        );
    }

    #[test]
    fn test_destroy_tears_down_once() {
        let (services, _, recorder) = recording_services();
        let mut object = object_with(services);
        object.add_component::<RigidBody>();
        let key = object.key();
        recorder.clear();

        object.destroy();
        object.destroy();
        drop(object);
        assert_eq!(recorder.calls(), vec![Call::UnregisterBody(key)]);
    }

    #[test]
    fn test_remove_transform_is_rejected() {
        let mut object = object_with(Services::headless());
        let result = object.remove_component::<Transform>();
        assert!(matches!(result, Err(ObjectError::TransformRequired)));
        assert!(object.has_component::<Transform>());
    }

    #[test]
    fn test_find_by_capability() {
        let mut object = object_with(Services::headless());
        assert!(object.find_capability(Capability::Collision).is_none());

        object.add_component::<MeshCollider>().convex = true;
        let found = object.find_capability(Capability::Collision).unwrap();
        assert_eq!(found.kind(), ComponentKind::MeshCollider);

        object.add_component::<Collider>();
        object.add_component::<RigidBody>();
        let physics: Vec<_> = object
            .components_with(Capability::Physics)
            .map(AnyComponent::kind)
            .collect();
        assert_eq!(
            physics,
            vec![
                ComponentKind::Collider,
                ComponentKind::MeshCollider,
                ComponentKind::RigidBody
            ]
        );
    }

    #[test]
    fn test_inactive_object_does_not_update_components() {
        let (services, _, recorder) = recording_services();
        let mut object = object_with(services);
        object.add_component::<RigidBody>();
        object.add_component::<Script>().path = "spin.lua".into();
        recorder.clear();

        object.set_active(false);
        object.update();
        object.update();
        assert_eq!(recorder.update_calls(), 0);

        object.set_active(true);
        object.update();
        assert_eq!(recorder.update_calls(), 2);
    }

    #[test]
    fn test_update_runs_in_tag_order_with_transform_snapshot() {
        let (services, _, recorder) = recording_services();
        let mut object = object_with(services);
        object.add_component::<Script>().path = "a.lua".into();
        object.add_component::<RigidBody>();
        object.transform_mut().position = Vec3::new(1.0, 2.0, 3.0);
        recorder.clear();

        object.update();
        let key = object.key();
        assert_eq!(
            recorder.calls(),
            vec![
                Call::SyncBody(key, Transform::from_position(Vec3::new(1.0, 2.0, 3.0))),
                Call::ScriptUpdate(key, "a.lua".into()),
            ]
        );
    }

    #[test]
    fn test_install_replaces_existing_data() {
        let mut object = object_with(Services::headless());
        let moved = Transform::from_position(Vec3::X);
        assert!(object.install(moved.into()));
        assert_eq!(object.transform(), &moved);
        assert!(object.links(ComponentKind::Transform).unwrap().is_attached());
    }

    #[test]
    fn test_install_initializes_with_loaded_fields() {
        let (services, _, recorder) = recording_services();
        let mut object = object_with(services);
        assert!(!object.install(Script::new("door.lua").into()));
        assert_eq!(recorder.calls(), vec![Call::LoadScript("door.lua".into())]);
    }

    #[test]
    fn test_install_duplicate_reinitializes() {
        let (services, _, recorder) = recording_services();
        let mut object = object_with(services);
        object.install(RigidBody::default().into());
        assert!(!object.install(Script::new("first.lua").into()));
        assert!(object.install(Script::new("second.lua").into()));
        assert!(object.install(RigidBody::default().into()));

        let key = object.key();
        assert_eq!(
            recorder.calls(),
            vec![
                Call::RegisterBody(key),
                Call::LoadScript("first.lua".into()),
                Call::LoadScript("second.lua".into()),
                Call::UnregisterBody(key),
                Call::RegisterBody(key),
            ]
        );
        assert_eq!(object.get_component::<Script>().unwrap().path, "second.lua");
        assert!(object.links(ComponentKind::Script).unwrap().is_attached());
    }

    #[test]
    fn test_destroy_clears_links_then_components() {
        let mut object = object_with(Services::headless());
        object.add_component::<Camera>();

        object.detach_all();
        assert!(object.links(ComponentKind::Camera).is_some_and(|l| !l.is_attached()));
        assert!(object.links(ComponentKind::Transform).is_some_and(|l| !l.is_attached()));

        object.destroy();
        assert_eq!(object.id(), ObjectId::INVALID);
        assert_eq!(object.component_count(), 0);
        assert!(!object.is_active());
        assert!(object.name().is_empty());
    }

    #[test]
    fn test_reset_keeps_only_identity_transform() {
        let mut object = object_with(Services::headless());
        let id = object.id();
        object.set_name("Door");
        object.set_active(false);
        object.transform_mut().position = Vec3::ONE;
        object.add_component::<Camera>();

        object.reset();
        assert_eq!(object.id(), id);
        assert_eq!(object.name(), DEFAULT_NAME);
        assert!(object.is_active());
        assert_eq!(object.component_count(), 1);
        assert_eq!(object.transform(), &Transform::IDENTITY);
    }

    #[test]
    fn test_hierarchy_visibility_is_independent_of_update() {
        let (services, _, recorder) = recording_services();
        let mut object = object_with(services);
        object.add_component::<Script>();
        recorder.clear();

        object.set_hierarchy_visibility(false);
        object.update();
        assert_eq!(recorder.update_calls(), 1);
    }

}
