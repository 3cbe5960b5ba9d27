//! # engine_object
//!
//! Composable game objects and their persistence.
//!
//! A [`GameObject`] owns at most one component of each
//! [`ComponentKind`](engine_component::ComponentKind), always including a
//! transform. Objects live in an [`ObjectRegistry`], the process-scoped pool
//! that hands out the generational keys components use to refer back to
//! their owner.
//!
//! ## Persisted layout
//!
//! ```text
//! [id:str][name:str][active:bool][hierarchyVisible:bool][componentCount:i32]
//! componentCount × [tag:str][payloadLength:u32][payload…]
//! ```
//!
//! Components are written in tag order. Each payload is the component's own
//! field stream behind a length prefix, so a reader can step over a tag it
//! does not know without losing its place.

pub mod config;
pub mod error;
pub mod object;
pub mod persist;
pub mod registry;

#[cfg(test)]
mod testing;

pub use config::{LoadOptions, UnknownComponentPolicy};
pub use error::ObjectError;
pub use object::{DEFAULT_NAME, GameObject};
pub use persist::LoadReport;
pub use registry::ObjectRegistry;
