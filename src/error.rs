//! Error types for tracklist.

use crate::types::ids::{SequenceId, TrackId};
use crate::types::track::TrackKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Removal index past the end of a collection holding more than one track
    #[error("track index {index} out of range for a collection of {count} tracks")]
    IndexOutOfRange { index: usize, count: usize },

    /// A clip that cannot be copied or loaded as-is
    #[error("invalid clip '{clip}' on track {track}: {reason}")]
    InvalidClip {
        track: TrackId,
        clip: String,
        reason: String,
    },

    #[error("expected a {expected} track, found a {found} track")]
    KindMismatch { expected: TrackKind, found: TrackKind },

    /// A serialized container must hold at least one track
    #[error("{kind} Tracks container is empty")]
    EmptyTracks { kind: TrackKind },

    #[error("sequence not found: {0}")]
    SequenceNotFound(SequenceId),

    #[error("duplicate sequence id: {0}")]
    DuplicateSequence(SequenceId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
