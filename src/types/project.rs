use crate::error::{Error, Result};
use crate::types::ids::SequenceId;
use crate::types::sequence::{Sequence, SequenceDocument};
use crate::types::track_collection::TrackCollection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use tracing::{debug, info};

/// Owns every live sequence. Collections refer back to their sequence by
/// id, so a removed sequence simply stops resolving.
#[derive(Debug)]
pub struct Project {
    pub name: String,
    sequences: HashMap<SequenceId, Sequence>,
    order: Vec<SequenceId>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Project {
            name: name.into(),
            sequences: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn add_sequence(&mut self, sequence: Sequence) -> SequenceId {
        let id = sequence.id();
        if self.sequences.insert(id, sequence).is_none() {
            self.order.push(id);
        }
        id
    }

    pub fn sequence(&self, id: SequenceId) -> Option<&Sequence> {
        self.sequences.get(&id)
    }

    pub fn sequence_mut(&mut self, id: SequenceId) -> Option<&mut Sequence> {
        self.sequences.get_mut(&id)
    }

    /// Sequences in the order they were added.
    pub fn sequences(&self) -> impl Iterator<Item = &Sequence> {
        self.order.iter().filter_map(|id| self.sequences.get(id))
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Removes a sequence together with its track collections.
    pub fn remove_sequence(&mut self, id: SequenceId) -> Option<Sequence> {
        let removed = self.sequences.remove(&id)?;
        self.order.retain(|s| *s != id);
        debug!(sequence = %id, "sequence removed");
        Some(removed)
    }

    /// Resolves a collection's back-reference to its sequence.
    pub fn parent_of(&self, collection: &TrackCollection) -> Option<&Sequence> {
        self.sequence(collection.parent())
    }

    pub fn duplicate_sequence(&mut self, id: SequenceId) -> Result<SequenceId> {
        let copy = self
            .sequence(id)
            .ok_or(Error::SequenceNotFound(id))?
            .duplicate()?;
        Ok(self.add_sequence(copy))
    }

    /// Save the project as JSON. The file is written next to `path` first
    /// and moved into place once complete.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        self.save(&mut file)?;
        file.flush()?;
        file.persist(path).map_err(|e| Error::Io(e.error))?;
        info!("Saved project '{}' ({} sequences) to {}", self.name, self.len(), path.display());
        Ok(())
    }

    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        let document = ProjectRef {
            name: &self.name,
            sequences: self.sequences().collect(),
        };
        serde_json::to_writer_pretty(writer, &document)?;
        Ok(())
    }

    /// Load a project from a JSON file at the given path.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Project> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let document: ProjectDocument = serde_json::from_reader(BufReader::new(file))?;
        let mut project = Project::new(document.name);
        for sequence in document.sequences {
            let sequence = Sequence::from_document(sequence)?;
            if project.sequences.contains_key(&sequence.id()) {
                return Err(Error::DuplicateSequence(sequence.id()));
            }
            project.add_sequence(sequence);
        }
        info!("Loaded project '{}' ({} sequences) from {}", project.name, project.len(), path.display());
        Ok(project)
    }
}

#[derive(Serialize)]
struct ProjectRef<'a> {
    name: &'a str,
    sequences: Vec<&'a Sequence>,
}

#[derive(Deserialize)]
struct ProjectDocument {
    name: String,
    sequences: Vec<SequenceDocument>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::media::{VideoClip, VideoMetadata};
    use crate::types::settings::SequenceSettings;
    use crate::types::track::{TrackClips, TrackKind};

    #[test]
    fn test_save_and_load_project() {
        let mut project = Project::new("Test Project");
        let mut sequence = Sequence::new("Main", SequenceSettings::default());
        let video = sequence.tracks_mut(TrackKind::Video);
        video.track_at(2).set_clips(TrackClips::Video(vec![VideoClip {
            id: "v1".to_string(),
            asset_path: "video.mp4".to_string(),
            in_point: 0.0,
            out_point: 10.0,
            start_time: 0.0,
            duration: 10.0,
            metadata: VideoMetadata {
                resolution: (1920, 1080),
                frame_rate: 30.0,
                codec: "h264".to_string(),
            },
        }])).unwrap();
        let order: Vec<_> = video.iter().map(|t| t.id()).collect();
        let id = project.add_sequence(sequence);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.json");
        project.save_to_file(&path).unwrap();
        let loaded = Project::load_from_file(&path).unwrap();

        assert_eq!(loaded.name, "Test Project");
        let sequence = loaded.sequence(id).unwrap();
        let video = sequence.tracks(TrackKind::Video);
        let loaded_order: Vec<_> = video.iter().map(|t| t.id()).collect();
        assert_eq!(loaded_order, order);
        assert_eq!(video.last().clips().len(), 1);
        assert_eq!(sequence.tracks(TrackKind::Audio).count(), 1);
        assert_eq!(loaded.parent_of(video).unwrap().id(), id);
    }

    #[test]
    fn test_removed_sequence_no_longer_resolves() {
        let mut project = Project::new("Test Project");
        let id = project.add_sequence(Sequence::new("Main", SequenceSettings::default()));
        let orphan = project
            .sequence(id)
            .unwrap()
            .tracks(TrackKind::Video)
            .clone_into(id)
            .unwrap();
        assert!(project.parent_of(&orphan).is_some());

        assert!(project.remove_sequence(id).is_some());
        assert!(project.parent_of(&orphan).is_none());
        assert!(project.remove_sequence(id).is_none());
        assert!(project.is_empty());
    }

    #[test]
    fn test_duplicate_sequence() {
        let mut project = Project::new("Test Project");
        let id = project.add_sequence(Sequence::new("Main", SequenceSettings::default()));
        let copy = project.duplicate_sequence(id).unwrap();

        assert_ne!(copy, id);
        assert_eq!(project.len(), 2);
        let names: Vec<&str> = project.sequences().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Main", "Main"]);
        assert!(matches!(
            project.duplicate_sequence(SequenceId::new()),
            Err(Error::SequenceNotFound(_))
        ));
    }

    #[test]
    fn test_load_rejects_repeated_sequence_id() {
        let mut project = Project::new("Test Project");
        project.add_sequence(Sequence::new("Main", SequenceSettings::default()));
        let mut out = Vec::new();
        project.save(&mut out).unwrap();

        let mut value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let sequences = value["sequences"].as_array_mut().unwrap();
        let first = sequences[0].clone();
        sequences.push(first);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.json");
        std::fs::write(&path, serde_json::to_vec(&value).unwrap()).unwrap();
        assert!(matches!(
            Project::load_from_file(&path),
            Err(Error::DuplicateSequence(_))
        ));
    }
}
