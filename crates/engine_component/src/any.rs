//! The closed component sum type.
//!
//! Objects store components as [`AnyComponent`]. Construction by tag
//! ([`AnyComponent::new`]) is an exhaustive `match` over [`ComponentKind`],
//! so a kind without a component, or a component without a load path, does
//! not compile.

use engine_io::{StreamError, StreamReader, StreamWriter};
use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentContext};
use crate::components::{
    Camera, Collider, Hinge, Light, LineRenderer, Mesh, MeshCollider, MeshRenderer, RigidBody,
    Script, Skybox, Transform,
};
use crate::kind::ComponentKind;

/// Conversion between a concrete component and [`AnyComponent`].
///
/// Implemented for every built-in component; this is how typed lookups
/// recover `&T` from the stored sum type without a runtime cast.
pub trait ComponentVariant: Sized {
    /// Wrap `self` in its [`AnyComponent`] variant.
    fn into_any(self) -> AnyComponent;

    /// Borrow the concrete component if `any` holds this variant.
    fn from_any(any: &AnyComponent) -> Option<&Self>;

    /// Mutably borrow the concrete component if `any` holds this variant.
    fn from_any_mut(any: &mut AnyComponent) -> Option<&mut Self>;
}

macro_rules! component_set {
    ($($kind:ident),* $(,)?) => {
        /// Any built-in component.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub enum AnyComponent {
            $($kind($kind),)*
        }

        impl AnyComponent {
            /// A default-constructed component of the given kind.
            #[must_use]
            pub fn new(kind: ComponentKind) -> Self {
                match kind {
                    $(ComponentKind::$kind => Self::$kind(<$kind>::default()),)*
                }
            }

            /// The tag of the held component.
            #[must_use]
            pub fn kind(&self) -> ComponentKind {
                match self {
                    $(Self::$kind(_) => ComponentKind::$kind,)*
                }
            }

            pub fn initialize(&mut self, cx: &ComponentContext<'_>) {
                match self {
                    $(Self::$kind(c) => c.initialize(cx),)*
                }
            }

            pub fn update(&mut self, cx: &ComponentContext<'_>) {
                match self {
                    $(Self::$kind(c) => c.update(cx),)*
                }
            }

            pub fn teardown(&mut self, cx: &ComponentContext<'_>) {
                match self {
                    $(Self::$kind(c) => c.teardown(cx),)*
                }
            }

            pub fn save(&self, w: &mut StreamWriter) -> Result<(), StreamError> {
                match self {
                    $(Self::$kind(c) => c.save(w),)*
                }
            }

            pub fn load(&mut self, r: &mut StreamReader<'_>) -> Result<(), StreamError> {
                match self {
                    $(Self::$kind(c) => c.load(r),)*
                }
            }
        }

        $(
            impl ComponentVariant for $kind {
                fn into_any(self) -> AnyComponent {
                    AnyComponent::$kind(self)
                }

                fn from_any(any: &AnyComponent) -> Option<&Self> {
                    match any {
                        AnyComponent::$kind(c) => Some(c),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }

                fn from_any_mut(any: &mut AnyComponent) -> Option<&mut Self> {
                    match any {
                        AnyComponent::$kind(c) => Some(c),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }

            impl From<$kind> for AnyComponent {
                fn from(component: $kind) -> Self {
                    component.into_any()
                }
            }
        )*
    };
}

component_set! {
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
}

impl AnyComponent {
    /// Save into a length-prefixed block so a reader that does not know this
    /// component's tag can skip it.
    pub fn save_block(&self, w: &mut StreamWriter) -> Result<(), StreamError> {
        w.write_block(|w| self.save(w))
    }
}
