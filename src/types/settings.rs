use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioLayout {
    Mono,
    Stereo,
    Surround51,
}

impl AudioLayout {
    pub fn channels(self) -> u32 {
        match self {
            AudioLayout::Mono => 1,
            AudioLayout::Stereo => 2,
            AudioLayout::Surround51 => 6,
        }
    }
}

/// Settings new sequences are created with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceSettings {
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
    pub audio_frequency: u32,
    pub audio_layout: AudioLayout,
    /// Tracks a new sequence starts with; anything below 1 means 1.
    pub video_tracks: usize,
    pub audio_tracks: usize,
}

impl Default for SequenceSettings {
    fn default() -> Self {
        SequenceSettings {
            width: 1920,
            height: 1080,
            frame_rate: 29.97,
            audio_frequency: 48000,
            audio_layout: AudioLayout::Stereo,
            video_tracks: 1,
            audio_tracks: 1,
        }
    }
}

impl SequenceSettings {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Loads settings from `path`, falling back to defaults if it cannot be read.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load sequence settings from {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sequence.json");
        let settings = SequenceSettings {
            width: 3840,
            height: 2160,
            audio_layout: AudioLayout::Surround51,
            video_tracks: 3,
            ..SequenceSettings::default()
        };
        settings.save_to_file(&path).unwrap();
        let loaded = SequenceSettings::load_from_file(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.audio_layout.channels(), 6);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: SequenceSettings = serde_json::from_str(r#"{"width": 1280, "height": 720}"#).unwrap();
        assert_eq!(settings.resolution(), (1280, 720));
        assert_eq!(settings.audio_frequency, 48000);
        assert_eq!(settings.video_tracks, 1);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SequenceSettings::load_or_default(dir.path().join("absent.json"));
        assert_eq!(settings, SequenceSettings::default());
    }
}
