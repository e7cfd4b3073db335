use crate::error::{Error, Result};
use crate::ops::clip_ops::split_first_at;
use crate::types::ids::{CollectionId, TrackId};
use crate::types::media::{AudioClip, Clip, VideoClip};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackKind {
    Video,
    Audio,
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackKind::Video => f.write_str("video"),
            TrackKind::Audio => f.write_str("audio"),
        }
    }
}

/// Clip content of a track. The variant decides the track's kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TrackClips {
    Video(Vec<VideoClip>),
    Audio(Vec<AudioClip>),
}

impl TrackClips {
    pub fn empty(kind: TrackKind) -> Self {
        match kind {
            TrackKind::Video => TrackClips::Video(Vec::new()),
            TrackKind::Audio => TrackClips::Audio(Vec::new()),
        }
    }

    pub fn kind(&self) -> TrackKind {
        match self {
            TrackClips::Video(_) => TrackKind::Video,
            TrackClips::Audio(_) => TrackKind::Audio,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TrackClips::Video(clips) => clips.len(),
            TrackClips::Audio(clips) => clips.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Clip> + '_> {
        match self {
            TrackClips::Video(clips) => Box::new(clips.iter().map(|c| c as &dyn Clip)),
            TrackClips::Audio(clips) => Box::new(clips.iter().map(|c| c as &dyn Clip)),
        }
    }
}

/// One horizontal lane of a sequence.
///
/// A track is owned by exactly one [`TrackCollection`](crate::types::track_collection::TrackCollection);
/// `owner` is a plain back-reference to it and is not persisted.
#[derive(Debug, Serialize, Deserialize)]
pub struct Track {
    id: TrackId,
    #[serde(skip)]
    owner: CollectionId,
    pub name: String,
    pub muted: bool,
    clips: TrackClips,
}

impl Track {
    pub fn new(owner: CollectionId, kind: TrackKind) -> Self {
        Track {
            id: TrackId::new(),
            owner,
            name: String::new(),
            muted: false,
            clips: TrackClips::empty(kind),
        }
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn owner(&self) -> CollectionId {
        self.owner
    }

    pub fn kind(&self) -> TrackKind {
        self.clips.kind()
    }

    pub fn clips(&self) -> &TrackClips {
        &self.clips
    }

    /// Replaces the clip content. The new clips must be of this track's kind.
    pub fn set_clips(&mut self, clips: TrackClips) -> Result<()> {
        if clips.kind() != self.kind() {
            return Err(Error::KindMismatch {
                expected: self.kind(),
                found: clips.kind(),
            });
        }
        self.clips = clips;
        Ok(())
    }

    pub fn video_clips_mut(&mut self) -> Option<&mut Vec<VideoClip>> {
        match &mut self.clips {
            TrackClips::Video(clips) => Some(clips),
            TrackClips::Audio(_) => None,
        }
    }

    pub fn audio_clips_mut(&mut self) -> Option<&mut Vec<AudioClip>> {
        match &mut self.clips {
            TrackClips::Audio(clips) => Some(clips),
            TrackClips::Video(_) => None,
        }
    }

    /// Returns an independent copy with a fresh identity, owned by `new_owner`.
    /// Fails if any clip has unusable timing, so a corrupt track is never propagated.
    pub fn duplicate(&self, new_owner: CollectionId) -> Result<Track> {
        self.validate()?;
        Ok(Track {
            id: TrackId::new(),
            owner: new_owner,
            name: self.name.clone(),
            muted: self.muted,
            clips: self.clips.clone(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        for clip in self.clips.iter() {
            clip.check().map_err(|reason| Error::InvalidClip {
                track: self.id,
                clip: clip.id().to_string(),
                reason,
            })?;
        }
        Ok(())
    }

    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Splits the first clip spanning `playhead`. Returns true if a split occurred.
    pub fn split_at(&mut self, playhead: f64) -> bool {
        match &mut self.clips {
            TrackClips::Video(clips) => split_first_at(clips, playhead),
            TrackClips::Audio(clips) => split_first_at(clips, playhead),
        }
    }

    pub(crate) fn attach(&mut self, owner: CollectionId) {
        self.owner = owner;
    }
}
