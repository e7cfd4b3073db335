//! The ordered set of same-kind tracks that make up one dimension of a sequence.
//!
//! Track order is the compositing order for video and the mixing order for
//! audio, so every operation here preserves it. A collection is never empty:
//! it starts with one track and refuses to remove its last one.

use crate::error::{Error, Result};
use crate::types::ids::{CollectionId, SequenceId, TrackId};
use crate::types::track::{Track, TrackKind};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Read, Write};
use tracing::{debug, warn};

/// Name of the container element wrapping the serialized tracks.
pub const TRACKS_CONTAINER: &str = "Tracks";

/// Emitted once for every change in the number of tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackCountChanged {
    pub collection: CollectionId,
    pub kind: TrackKind,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&TrackCountChanged)>;

/// Result of [`TrackCollection::remove_track`].
#[derive(Debug)]
pub enum Removal {
    Removed(Track),
    /// The collection held a single track, which is kept.
    RefusedLastTrack,
}

pub struct TrackCollection {
    id: CollectionId,
    parent: SequenceId,
    kind: TrackKind,
    tracks: Vec<Track>,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

impl TrackCollection {
    pub fn new(parent: SequenceId, kind: TrackKind) -> Self {
        let id = CollectionId::new();
        TrackCollection {
            id,
            parent,
            kind,
            tracks: vec![Track::new(id, kind)],
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    pub fn id(&self) -> CollectionId {
        self.id
    }

    /// The sequence this collection belongs to. Resolve it through the
    /// [`Project`](crate::types::project::Project); it no longer resolves once
    /// the sequence is removed.
    pub fn parent(&self) -> SequenceId {
        self.parent
    }

    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    pub fn count(&self) -> usize {
        self.tracks.len()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Registers a callback run after every change in track count.
    ///
    /// Callbacks only see the event, never the collection, so they cannot
    /// mutate it while a change is being reported.
    pub fn subscribe(&mut self, observer: impl FnMut(&TrackCountChanged) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Appends an empty track of this collection's kind.
    pub fn add_track(&mut self) -> &mut Track {
        self.tracks.push(Track::new(self.id, self.kind));
        debug!(collection = %self.id, kind = %self.kind, count = self.tracks.len(), "track added");
        self.notify();
        let last = self.tracks.len() - 1;
        &mut self.tracks[last]
    }

    /// Removes the track at `index`, shifting later tracks down by one.
    ///
    /// The last remaining track is never removed, whatever the index.
    pub fn remove_track(&mut self, index: usize) -> Result<Removal> {
        let count = self.tracks.len();
        if count == 1 {
            warn!(collection = %self.id, kind = %self.kind, "refusing to remove the last track");
            return Ok(Removal::RefusedLastTrack);
        }
        if index >= count {
            return Err(Error::IndexOutOfRange { index, count });
        }
        let removed = self.tracks.remove(index);
        debug!(collection = %self.id, index, count = self.tracks.len(), "track removed");
        self.notify();
        Ok(Removal::Removed(removed))
    }

    /// Returns the track at `index`, appending empty tracks until it exists.
    pub fn track_at(&mut self, index: usize) -> &mut Track {
        if index >= self.tracks.len() {
            debug!(collection = %self.id, from = self.tracks.len(), to = index + 1, "extending collection");
        }
        while index >= self.tracks.len() {
            self.add_track();
        }
        &mut self.tracks[index]
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Track> {
        self.tracks.get_mut(index)
    }

    pub fn first(&self) -> &Track {
        &self.tracks[0]
    }

    pub fn last(&self) -> &Track {
        &self.tracks[self.tracks.len() - 1]
    }

    /// Position of the track with the given identity, if this collection owns it.
    pub fn index_of(&self, track: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id() == track)
    }

    pub fn find(&self, track: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id() == track)
    }

    pub fn find_mut(&mut self, track: TrackId) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id() == track)
    }

    /// Deep-copies this collection for `new_parent`.
    ///
    /// Every track is duplicated into a staging buffer owned by the new
    /// collection id; the collection is only assembled once all copies
    /// succeeded, so a failure leaves nothing behind. Observers stay with
    /// the source.
    pub fn clone_into(&self, new_parent: SequenceId) -> Result<TrackCollection> {
        let id = CollectionId::new();
        let mut staged = Self::reserve_slots(self.tracks.len());
        for track in &self.tracks {
            staged.push(track.duplicate(id)?);
        }
        debug!(source = %self.id, copy = %id, count = staged.len(), "collection cloned");
        Ok(TrackCollection {
            id,
            parent: new_parent,
            kind: self.kind,
            tracks: staged,
            observers: Vec::new(),
            next_observer: 0,
        })
    }

    /// Writes `{"Tracks": [...]}` with the tracks in collection order.
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Reads a container written by [`save`](Self::save) into a new
    /// collection for `parent`. Track identities and order are kept.
    pub fn load<R: Read>(reader: R, parent: SequenceId, kind: TrackKind) -> Result<TrackCollection> {
        let document: TracksDocument = serde_json::from_reader(reader)?;
        Self::from_document(document, parent, kind)
    }

    pub(crate) fn from_document(
        document: TracksDocument,
        parent: SequenceId,
        kind: TrackKind,
    ) -> Result<TrackCollection> {
        if document.tracks.is_empty() {
            return Err(Error::EmptyTracks { kind });
        }
        let id = CollectionId::new();
        let mut tracks = Self::reserve_slots(document.tracks.len());
        for mut track in document.tracks {
            if track.kind() != kind {
                return Err(Error::KindMismatch {
                    expected: kind,
                    found: track.kind(),
                });
            }
            track.validate()?;
            track.attach(id);
            tracks.push(track);
        }
        Ok(TrackCollection {
            id,
            parent,
            kind,
            tracks,
            observers: Vec::new(),
            next_observer: 0,
        })
    }

    // Pre-sizes a slot buffer; slots only become visible once filled.
    fn reserve_slots(n: usize) -> Vec<Track> {
        Vec::with_capacity(n)
    }

    fn notify(&mut self) {
        let event = TrackCountChanged {
            collection: self.id,
            kind: self.kind,
            count: self.tracks.len(),
        };
        for (_, observer) in self.observers.iter_mut() {
            observer(&event);
        }
    }
}

impl fmt::Debug for TrackCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackCollection")
            .field("id", &self.id)
            .field("parent", &self.parent)
            .field("kind", &self.kind)
            .field("tracks", &self.tracks)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Serialize for TrackCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(TRACKS_CONTAINER, &self.tracks)?;
        map.end()
    }
}

/// Deserialized form of the `Tracks` container, before it is bound to a sequence.
#[derive(Debug, Deserialize)]
pub struct TracksDocument {
    #[serde(rename = "Tracks")]
    pub tracks: Vec<Track>,
}
