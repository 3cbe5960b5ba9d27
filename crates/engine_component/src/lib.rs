//! # engine_component
//!
//! The "C" of the engine's composable objects: what a component is, which
//! components exist, and what they may reach through their owner.
//!
//! This crate provides:
//!
//! - [`ObjectId`] / [`ObjectKey`]: persistent identifiers and registry handles.
//! - [`ComponentKind`] / [`Capability`]: the closed tag set and the shared
//!   capabilities each tag declares.
//! - [`Component`] trait: lifecycle hooks and the per-component field stream.
//! - [`AnyComponent`]: the sum type an object stores, with exhaustive
//!   construction by tag.
//! - [`ComponentLinks`]: weak back-references plus injected collaborators.
//! - [`Services`]: the collaborator traits handed to every component.
//! - [`components`]: the built-in component set.

pub mod any;
pub mod component;
pub mod components;
pub mod entity;
pub mod kind;
pub mod links;
pub mod services;

pub use any::{AnyComponent, ComponentVariant};
pub use component::{Component, ComponentContext};
pub use components::{
    Camera, Collider, ColliderShape, Hinge, Light, LightKind, LineRenderer, LineSegment, Mesh,
    MeshCollider, MeshRenderer, Projection, RigidBody, Script, Skybox, Transform,
};
pub use entity::{ObjectId, ObjectKey};
pub use kind::{Capability, ComponentKind};
pub use links::ComponentLinks;
pub use services::{
    AssetPool, DirtyFlag, Headless, PhysicsEngine, RenderDevice, SceneNotifier, ScriptEngine,
    Services,
};
