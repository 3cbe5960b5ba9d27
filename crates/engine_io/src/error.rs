//! Stream error types.

/// Errors that can occur while writing or reading a binary stream.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// A read needed more bytes than the stream holds.
    #[error("unexpected end of stream at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Reader position when the read was attempted.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
        /// Bytes left in the stream.
        remaining: usize,
    },

    /// A boolean byte was neither 0 nor 1.
    #[error("invalid boolean byte {value:#04x} at offset {offset}")]
    InvalidBool {
        /// Offset of the offending byte.
        offset: usize,
        /// The byte that was read.
        value: u8,
    },

    /// A length-prefixed string did not contain UTF-8.
    #[error("string at offset {offset} is not valid UTF-8")]
    InvalidUtf8 {
        /// Offset of the string's length prefix.
        offset: usize,
        /// The underlying conversion error.
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// An enum discriminant was outside the set of legal values.
    #[error("invalid {kind} discriminant {value}")]
    InvalidDiscriminant {
        /// Name of the enum being decoded.
        kind: &'static str,
        /// The raw value that was read.
        value: u32,
    },

    /// A string field meant to hold an object identifier holds something
    /// else.
    #[error("string {value:?} at offset {offset} is not an object id")]
    InvalidObjectId {
        /// Offset of the string's length prefix.
        offset: usize,
        /// The string that was read.
        value: String,
    },

    /// A signed count or length was negative.
    #[error("negative length {0}")]
    NegativeLength(i32),

    /// A length does not fit into the `u32` prefix used by the format.
    #[error("length {0} does not fit into a u32 prefix")]
    LengthOverflow(usize),

    /// A bounded block was not fully consumed by its reader.
    #[error("{remaining} unread bytes left in block")]
    TrailingBytes {
        /// Bytes left after the reader finished.
        remaining: usize,
    },

    /// Filesystem error while loading or storing a stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
