use crate::types::media::{AudioClip, Clip, VideoClip};

/// Clips that can be re-timed when a cut produces two halves.
pub trait ClipSplit: Clip + Clone {
    fn retime(&mut self, id: String, in_point: f64, out_point: f64, start_time: f64, duration: f64);
}

macro_rules! impl_clip_split {
    ($ty:ty) => {
        impl ClipSplit for $ty {
            fn retime(
                &mut self,
                id: String,
                in_point: f64,
                out_point: f64,
                start_time: f64,
                duration: f64,
            ) {
                self.id = id;
                self.in_point = in_point;
                self.out_point = out_point;
                self.start_time = start_time;
                self.duration = duration;
            }
        }
    };
}

impl_clip_split!(VideoClip);
impl_clip_split!(AudioClip);

/// Cuts a clip at the given playhead position, returning the left and right halves.
/// Returns None unless the playhead lies strictly inside the clip.
pub fn cut_clip_at<T: ClipSplit>(clip: &T, playhead: f64) -> Option<(T, T)> {
    let clip_start = clip.start_time();
    let clip_end = clip.end_time();

    if playhead <= clip_start || playhead >= clip_end {
        return None;
    }

    let offset = playhead - clip_start;
    let mut left = clip.clone();
    left.retime(
        format!("{}_left", clip.id()),
        clip.in_point(),
        clip.in_point() + offset,
        clip_start,
        offset,
    );

    let mut right = clip.clone();
    right.retime(
        format!("{}_right", clip.id()),
        clip.in_point() + offset,
        clip.out_point(),
        playhead,
        clip_end - playhead,
    );

    Some((left, right))
}

/// Replaces the first clip spanning `playhead` with its two halves.
/// Returns true if a split occurred.
pub fn split_first_at<T: ClipSplit>(clips: &mut Vec<T>, playhead: f64) -> bool {
    for i in 0..clips.len() {
        if let Some((left, right)) = cut_clip_at(&clips[i], playhead) {
            clips[i] = right;
            clips.insert(i, left);
            return true;
        }
    }
    false
}
