//! The built-in component set.

mod camera;
mod collider;
mod hinge;
mod light;
mod line_renderer;
mod mesh;
mod mesh_collider;
mod mesh_renderer;
mod rigid_body;
mod script;
mod skybox;
mod transform;

pub use camera::{Camera, Projection};
pub use collider::{Collider, ColliderShape};
pub use hinge::Hinge;
pub use light::{Light, LightKind};
pub use line_renderer::{LineRenderer, LineSegment};
pub use mesh::Mesh;
pub use mesh_collider::MeshCollider;
pub use mesh_renderer::MeshRenderer;
pub use rigid_body::RigidBody;
pub use script::Script;
pub use skybox::Skybox;
pub use transform::Transform;
