//! Recording collaborators for tests.

use std::cell::RefCell;
use std::rc::Rc;

use engine_component::{
    Collider, DirtyFlag, ObjectKey, PhysicsEngine, RigidBody, ScriptEngine, Services, Transform,
};
use slotmap::SlotMap;

use crate::object::GameObject;

/// One collaborator call, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    RegisterBody(ObjectKey),
    RegisterCollider(ObjectKey),
    UnregisterBody(ObjectKey),
    UnregisterCollider(ObjectKey),
    SyncBody(ObjectKey, Transform),
    LoadScript(String),
    ScriptUpdate(ObjectKey, String),
}

/// Physics and script engine that log every call into one shared list.
#[derive(Debug, Default)]
pub struct Recorder {
    calls: RefCell<Vec<Call>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Number of per-frame calls (body syncs and script updates).
    pub fn update_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::SyncBody(..) | Call::ScriptUpdate(..)))
            .count()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl PhysicsEngine for Recorder {
    fn register_body(&self, owner: ObjectKey, _body: &RigidBody) {
        self.calls.borrow_mut().push(Call::RegisterBody(owner));
    }

    fn register_collider(&self, owner: ObjectKey, _collider: &Collider) {
        self.calls.borrow_mut().push(Call::RegisterCollider(owner));
    }

    fn unregister_body(&self, owner: ObjectKey) {
        self.calls.borrow_mut().push(Call::UnregisterBody(owner));
    }

    fn unregister_collider(&self, owner: ObjectKey) {
        self.calls.borrow_mut().push(Call::UnregisterCollider(owner));
    }

    fn sync_body(&self, owner: ObjectKey, transform: &Transform) {
        self.calls.borrow_mut().push(Call::SyncBody(owner, *transform));
    }
}

impl ScriptEngine for Recorder {
    fn load_script(&self, path: &str) -> bool {
        self.calls.borrow_mut().push(Call::LoadScript(path.to_string()));
        true
    }

    fn call_update(&self, owner: ObjectKey, path: &str) {
        self.calls
            .borrow_mut()
            .push(Call::ScriptUpdate(owner, path.to_string()));
    }
}

/// Headless services wired to a dirty flag and a recorder.
pub fn recording_services() -> (Services, Rc<DirtyFlag>, Rc<Recorder>) {
    let scene = Rc::new(DirtyFlag::new());
    let recorder = Rc::new(Recorder::default());
    let services = Services::headless()
        .with_scene(scene.clone())
        .with_physics(recorder.clone())
        .with_scripts(recorder.clone());
    (services, scene, recorder)
}

/// An object outside any registry, under a throwaway key.
pub fn object_with(services: Services) -> GameObject {
    let mut keys: SlotMap<ObjectKey, ()> = SlotMap::with_key();
    GameObject::new(keys.insert(()), services)
}
