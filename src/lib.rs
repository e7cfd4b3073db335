//! Track collections for a non-linear video editor.
//!
//! A [`Sequence`] owns one [`TrackCollection`] per [`TrackKind`]; each
//! collection owns an ordered, never-empty list of [`Track`]s.

pub mod error;
pub mod ops;
pub mod types;

pub use error::{Error, Result};
pub use types::ids::{CollectionId, SequenceId, TrackId};
pub use types::project::Project;
pub use types::sequence::Sequence;
pub use types::settings::{AudioLayout, SequenceSettings};
pub use types::track::{Track, TrackClips, TrackKind};
pub use types::track_collection::{Removal, TrackCollection, TrackCountChanged};
