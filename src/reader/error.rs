use crate::decoder::Reference;
use core::fmt;
use thiserror::Error;

#[doc = r#"
A fatal error raised while decoding a project file.

Carries the byte offset at which the problem was detected. No partially
decoded project is returned alongside it.
"#]
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Decoding at position {position}, {kind}")]
pub struct DecodeError {
    position: usize,
    pub(crate) kind: DecodeErrorKind,
}

/// A kind of error that decoding can produce
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeErrorKind {
    /// The outer container is not a supported project file
    #[error("malformed container: {0}")]
    MalformedContainer(#[from] ContainerError),
    /// A count, length or index is outside what the format allows
    #[error("out of range: {0}")]
    OutOfRange(#[from] RangeError),
    /// The buffer ended in the middle of a field
    #[error("buffer exhausted mid-field")]
    Truncated,
    /// An index-based reference has no target (strict mode only)
    #[error("dangling reference to {0}")]
    DanglingReference(Reference),
}

/// Problems with the fixed-size `FLhd` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// The leading tag is not `FLhd`
    #[error("bad magic {0:02X?}")]
    Magic([u8; 4]),
    /// The header body length is not 6
    #[error("header length must be 6, found {0}")]
    HeaderLength(i32),
    /// Only standard projects (type 0) are supported
    #[error("project type {0} is not supported")]
    ProjectType(i16),
}

/// Values outside the bounds the format allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Channel count outside `1..=1000`
    #[error("channel count {0} is outside 1..=1000")]
    ChannelCount(i16),
    /// A chunk declared a negative or absurd length
    #[error("chunk length {0} is outside the sanity bound")]
    ChunkLength(i32),
    /// A length prefix points past the end of the buffer
    #[error("length prefix of {length} bytes exceeds the {remaining} remaining")]
    Length {
        /// Declared payload length
        length: u64,
        /// Bytes left in the buffer after the prefix
        remaining: usize,
    },
    /// An insert or track was referenced before the version event sized the array
    #[error("{0} referenced before a version event sized them")]
    Unsized(Collection),
}

/// Project collections whose size is fixed by the version string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// Mixer inserts
    Inserts,
    /// Playlist tracks
    Tracks,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inserts => f.write_str("inserts"),
            Self::Tracks => f.write_str("tracks"),
        }
    }
}

impl DecodeError {
    /// Create a decode error from a position and kind
    pub const fn new(position: usize, kind: DecodeErrorKind) -> Self {
        Self { position, kind }
    }

    /// True if the buffer ran out mid-field
    pub const fn is_truncated(&self) -> bool {
        matches!(self.kind, DecodeErrorKind::Truncated)
    }

    /// Returns the error kind.
    pub fn error_kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    /// Returns the position where the error was detected.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Create a new malformed container error
    pub const fn container(position: usize, error: ContainerError) -> Self {
        Self {
            position,
            kind: DecodeErrorKind::MalformedContainer(error),
        }
    }

    /// Create a new out of range error
    pub const fn range(position: usize, error: RangeError) -> Self {
        Self {
            position,
            kind: DecodeErrorKind::OutOfRange(error),
        }
    }

    /// Create a new truncation error
    pub const fn truncated(position: usize) -> Self {
        Self {
            position,
            kind: DecodeErrorKind::Truncated,
        }
    }

    /// Create a new dangling reference error
    pub const fn dangling(position: usize, reference: Reference) -> Self {
        Self {
            position,
            kind: DecodeErrorKind::DanglingReference(reference),
        }
    }
}

/// The decode result type (see [`DecodeError`])
pub type DecodeResult<T> = Result<T, DecodeError>;
