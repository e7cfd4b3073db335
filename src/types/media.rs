use serde::{Deserialize, Serialize};

/// Placement of a piece of media on a track, in seconds.
pub trait Clip {
    fn id(&self) -> &str;
    fn asset_path(&self) -> &str;
    fn in_point(&self) -> f64;
    fn out_point(&self) -> f64;
    fn start_time(&self) -> f64;
    fn duration(&self) -> f64;

    fn end_time(&self) -> f64 {
        self.start_time() + self.duration()
    }

    fn is_active_at(&self, time: f64) -> bool {
        time >= self.start_time() && time < self.end_time()
    }

    /// Checks the timing fields, returning a description of the first problem found.
    fn check(&self) -> Result<(), String> {
        let fields = [
            ("in_point", self.in_point()),
            ("out_point", self.out_point()),
            ("start_time", self.start_time()),
            ("duration", self.duration()),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(format!("{name} is not finite"));
            }
            if value < 0.0 {
                return Err(format!("{name} is negative ({value})"));
            }
        }
        if self.out_point() < self.in_point() {
            return Err(format!(
                "out_point {} is before in_point {}",
                self.out_point(),
                self.in_point()
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub resolution: (u32, u32),
    pub frame_rate: f64,
    pub codec: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoClip {
    pub id: String,
    pub asset_path: String,
    pub in_point: f64,
    pub out_point: f64,
    pub start_time: f64,
    pub duration: f64,
    pub metadata: VideoMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioMetadata {
    pub sample_rate: u32,
    pub channels: u32,
    pub codec: String,
    pub bitrate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioClip {
    pub id: String,
    pub asset_path: String,
    pub in_point: f64,
    pub out_point: f64,
    pub start_time: f64,
    pub duration: f64,
    pub metadata: AudioMetadata,
}

macro_rules! impl_clip {
    ($ty:ty) => {
        impl Clip for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn asset_path(&self) -> &str {
                &self.asset_path
            }

            fn in_point(&self) -> f64 {
                self.in_point
            }

            fn out_point(&self) -> f64 {
                self.out_point
            }

            fn start_time(&self) -> f64 {
                self.start_time
            }

            fn duration(&self) -> f64 {
                self.duration
            }
        }
    };
}

impl_clip!(VideoClip);
impl_clip!(AudioClip);

#[cfg(test)]
mod tests {
    use super::*;

    fn video_clip(in_point: f64, out_point: f64, duration: f64) -> VideoClip {
        VideoClip {
            id: "v1".to_string(),
            asset_path: "video.mp4".to_string(),
            in_point,
            out_point,
            start_time: 1.0,
            duration,
            metadata: VideoMetadata {
                resolution: (1920, 1080),
                frame_rate: 30.0,
                codec: "h264".to_string(),
            },
        }
    }

    #[test]
    fn test_check_accepts_well_formed_clip() {
        assert!(video_clip(0.0, 4.0, 4.0).check().is_ok());
    }

    #[test]
    fn test_check_rejects_reversed_points() {
        let err = video_clip(5.0, 2.0, 3.0).check().unwrap_err();
        assert!(err.contains("before in_point"));
    }

    #[test]
    fn test_check_rejects_non_finite_duration() {
        let err = video_clip(0.0, 2.0, f64::NAN).check().unwrap_err();
        assert!(err.contains("duration"));
    }

    #[test]
    fn test_is_active_at_is_half_open() {
        let clip = video_clip(0.0, 4.0, 4.0);
        assert!(!clip.is_active_at(0.5));
        assert!(clip.is_active_at(1.0));
        assert!(clip.is_active_at(4.9));
        assert!(!clip.is_active_at(5.0));
    }
}
