use crate::error::Result;
use crate::types::ids::{SequenceId, TrackId};
use crate::types::media::{AudioClip, Clip, VideoClip};
use crate::types::settings::SequenceSettings;
use crate::types::track::{Track, TrackClips, TrackKind};
use crate::types::track_collection::{TrackCollection, TracksDocument};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An edit: one video and one audio track collection sharing a timebase.
#[derive(Debug, Serialize)]
pub struct Sequence {
    id: SequenceId,
    pub name: String,
    pub settings: SequenceSettings,
    video: TrackCollection,
    audio: TrackCollection,
}

impl Sequence {
    pub fn new(name: impl Into<String>, settings: SequenceSettings) -> Self {
        let id = SequenceId::new();
        let mut video = TrackCollection::new(id, TrackKind::Video);
        let mut audio = TrackCollection::new(id, TrackKind::Audio);
        video.track_at(settings.video_tracks.max(1) - 1);
        audio.track_at(settings.audio_tracks.max(1) - 1);
        Sequence {
            id,
            name: name.into(),
            settings,
            video,
            audio,
        }
    }

    pub fn id(&self) -> SequenceId {
        self.id
    }

    pub fn tracks(&self, kind: TrackKind) -> &TrackCollection {
        match kind {
            TrackKind::Video => &self.video,
            TrackKind::Audio => &self.audio,
        }
    }

    pub fn tracks_mut(&mut self, kind: TrackKind) -> &mut TrackCollection {
        match kind {
            TrackKind::Video => &mut self.video,
            TrackKind::Audio => &mut self.audio,
        }
    }

    /// Copies the sequence under a new id. Either both collections are
    /// cloned or nothing is returned.
    pub fn duplicate(&self) -> Result<Sequence> {
        let id = SequenceId::new();
        let video = self.video.clone_into(id)?;
        let audio = self.audio.clone_into(id)?;
        debug!(source = %self.id, copy = %id, "sequence duplicated");
        Ok(Sequence {
            id,
            name: self.name.clone(),
            settings: self.settings.clone(),
            video,
            audio,
        })
    }

    pub fn find_track(&self, track_id: TrackId) -> Option<&Track> {
        self.video.find(track_id).or_else(|| self.audio.find(track_id))
    }

    /// Splits the first clip under the playhead on the given track.
    /// Returns true if a split occurred, false otherwise.
    pub fn split_at(&mut self, track_id: TrackId, playhead: f64) -> bool {
        let track = match self.video.find_mut(track_id) {
            Some(track) => Some(track),
            None => self.audio.find_mut(track_id),
        };
        track.is_some_and(|track| track.split_at(playhead))
    }

    /// Video clips active at `time`, bottom track first.
    pub fn active_video_clips_at(&self, time: f64) -> Vec<&VideoClip> {
        self.video
            .iter()
            .filter(|track| !track.muted)
            .filter_map(|track| match track.clips() {
                TrackClips::Video(clips) => Some(clips),
                TrackClips::Audio(_) => None,
            })
            .flat_map(|clips| clips.iter().filter(move |clip| clip.is_active_at(time)))
            .collect()
    }

    /// Audio clips active at `time`, in mixing order.
    pub fn active_audio_clips_at(&self, time: f64) -> Vec<&AudioClip> {
        self.audio
            .iter()
            .filter(|track| !track.muted)
            .filter_map(|track| match track.clips() {
                TrackClips::Audio(clips) => Some(clips),
                TrackClips::Video(_) => None,
            })
            .flat_map(|clips| clips.iter().filter(move |clip| clip.is_active_at(time)))
            .collect()
    }

    pub(crate) fn from_document(document: SequenceDocument) -> Result<Sequence> {
        let id = document.id;
        Ok(Sequence {
            id,
            name: document.name,
            settings: document.settings,
            video: TrackCollection::from_document(document.video, id, TrackKind::Video)?,
            audio: TrackCollection::from_document(document.audio, id, TrackKind::Audio)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SequenceDocument {
    id: SequenceId,
    name: String,
    #[serde(default)]
    settings: SequenceSettings,
    video: TracksDocument,
    audio: TracksDocument,
}
