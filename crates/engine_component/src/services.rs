//! Collaborators injected into components.
//!
//! The rendering device, the owning scene, the asset pools and the physics
//! and script engines live outside this crate. Components only see them
//! through the narrow traits below, bundled in [`Services`] and injected
//! when a component is added to an object.
//!
//! Everything here is single-threaded: handles are `Rc`, and the scene's
//! dirty flag is a `Cell`.

use std::cell::Cell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::components::{Collider, RigidBody, Transform};
use crate::entity::ObjectKey;

/// The rendering device, as far as components need it.
pub trait RenderDevice {
    /// Width divided by height of the current back buffer.
    fn aspect_ratio(&self) -> f32;
}

/// The scene that owns an object.
pub trait SceneNotifier {
    /// Scene-level caches derived from object structure are stale.
    fn make_dirty(&self);
}

/// A pool of named assets (meshes, materials, textures or shaders).
pub trait AssetPool {
    /// Returns `true` if an asset with this id is loaded.
    fn contains(&self, id: &str) -> bool;
}

/// The physics engine.
pub trait PhysicsEngine {
    /// A rigid body was attached to `owner`.
    fn register_body(&self, owner: ObjectKey, body: &RigidBody);

    /// A collision volume was attached to `owner`.
    fn register_collider(&self, owner: ObjectKey, collider: &Collider);

    /// The rigid body of `owner` is going away.
    fn unregister_body(&self, owner: ObjectKey);

    /// The collision volume of `owner` is going away.
    fn unregister_collider(&self, owner: ObjectKey);

    /// Push the owner's current transform into the simulation.
    fn sync_body(&self, owner: ObjectKey, transform: &Transform);
}

/// The script engine.
pub trait ScriptEngine {
    /// Compile or fetch the script at `path`. Returns `false` if it could
    /// not be loaded.
    fn load_script(&self, path: &str) -> bool;

    /// Run the script's per-frame entry point for `owner`.
    fn call_update(&self, owner: ObjectKey, path: &str);
}

/// Handles to every collaborator a component may use.
///
/// Cloning is cheap: every field is an `Rc`.
#[derive(Clone)]
pub struct Services {
    pub device: Rc<dyn RenderDevice>,
    pub scene: Rc<dyn SceneNotifier>,
    pub meshes: Rc<dyn AssetPool>,
    pub materials: Rc<dyn AssetPool>,
    pub textures: Rc<dyn AssetPool>,
    pub shaders: Rc<dyn AssetPool>,
    pub physics: Rc<dyn PhysicsEngine>,
    pub scripts: Rc<dyn ScriptEngine>,
}

impl Services {
    /// Collaborators that do nothing: every asset is reported present,
    /// physics and scripts ignore all calls. Used by tools that load and
    /// save objects without running a simulation.
    #[must_use]
    pub fn headless() -> Self {
        let headless = Rc::new(Headless);
        Self {
            device: headless.clone(),
            scene: headless.clone(),
            meshes: headless.clone(),
            materials: headless.clone(),
            textures: headless.clone(),
            shaders: headless.clone(),
            physics: headless.clone(),
            scripts: headless,
        }
    }

    #[must_use]
    pub fn with_device(mut self, device: Rc<dyn RenderDevice>) -> Self {
        self.device = device;
        self
    }

    #[must_use]
    pub fn with_scene(mut self, scene: Rc<dyn SceneNotifier>) -> Self {
        self.scene = scene;
        self
    }

    #[must_use]
    pub fn with_meshes(mut self, meshes: Rc<dyn AssetPool>) -> Self {
        self.meshes = meshes;
        self
    }

    #[must_use]
    pub fn with_materials(mut self, materials: Rc<dyn AssetPool>) -> Self {
        self.materials = materials;
        self
    }

    #[must_use]
    pub fn with_textures(mut self, textures: Rc<dyn AssetPool>) -> Self {
        self.textures = textures;
        self
    }

    #[must_use]
    pub fn with_shaders(mut self, shaders: Rc<dyn AssetPool>) -> Self {
        self.shaders = shaders;
        self
    }

    #[must_use]
    pub fn with_physics(mut self, physics: Rc<dyn PhysicsEngine>) -> Self {
        self.physics = physics;
        self
    }

    #[must_use]
    pub fn with_scripts(mut self, scripts: Rc<dyn ScriptEngine>) -> Self {
        self.scripts = scripts;
        self
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

/// No-op implementation of every collaborator trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl RenderDevice for Headless {
    fn aspect_ratio(&self) -> f32 {
        16.0 / 9.0
    }
}

impl SceneNotifier for Headless {
    fn make_dirty(&self) {}
}

impl AssetPool for Headless {
    fn contains(&self, _id: &str) -> bool {
        true
    }
}

impl PhysicsEngine for Headless {
    fn register_body(&self, _owner: ObjectKey, _body: &RigidBody) {}

    fn register_collider(&self, _owner: ObjectKey, _collider: &Collider) {}

    fn unregister_body(&self, _owner: ObjectKey) {}

    fn unregister_collider(&self, _owner: ObjectKey) {}

    fn sync_body(&self, _owner: ObjectKey, _transform: &Transform) {}
}

impl ScriptEngine for Headless {
    fn load_script(&self, _path: &str) -> bool {
        true
    }

    fn call_update(&self, _owner: ObjectKey, _path: &str) {}
}

/// A set of asset ids is the simplest pool.
impl AssetPool for HashSet<String> {
    fn contains(&self, id: &str) -> bool {
        HashSet::contains(self, id)
    }
}

/// A scene dirty flag: set on structural change, cleared by whoever
/// rebuilds the caches.
#[derive(Debug, Default)]
pub struct DirtyFlag {
    dirty: Cell<bool>,
}

impl DirtyFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Clear the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.dirty.replace(false)
    }
}

impl SceneNotifier for DirtyFlag {
    fn make_dirty(&self) {
        self.dirty.set(true);
    }
}
