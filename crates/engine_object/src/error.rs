//! Object-layer error types.

use engine_component::{ComponentKind, ObjectId, ObjectKey};
use engine_io::StreamError;

/// Errors raised by object operations and object persistence.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    /// The object stream itself could not be read or written.
    #[error("stream error: {0}")]
    Stream(#[from] StreamError),

    /// The persisted identifier is not a UUID.
    #[error("invalid object id {value:?} at offset {offset}")]
    InvalidId {
        value: String,
        offset: usize,
        #[source]
        source: uuid::Error,
    },

    /// The persisted identifier is the nil UUID, which marks a destroyed
    /// object.
    #[error("object id at offset {offset} is the nil id")]
    NilId { offset: usize },

    /// A component payload could not be decoded.
    #[error("failed to load {kind} component")]
    Component {
        kind: ComponentKind,
        #[source]
        source: StreamError,
    },

    /// A component stopped reading before the end of its payload.
    #[error("{kind} payload left {remaining} unread bytes")]
    TrailingPayload {
        kind: ComponentKind,
        remaining: usize,
    },

    /// A component tag is unknown and the load options forbid skipping it.
    #[error("unknown component tag {0:?}")]
    UnknownComponent(String),

    /// Every object must keep its transform.
    #[error("the transform component cannot be removed")]
    TransformRequired,

    /// A loaded object carries the identifier of an object that is already
    /// live in the registry.
    #[error("object {0} is already live")]
    DuplicateId(ObjectId),

    /// The key does not refer to a live object.
    #[error("no live object for {0:?}")]
    StaleKey(ObjectKey),
}
