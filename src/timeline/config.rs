use crate::{
    animation::spring::SpringProfile,
    foundation::core::Fps,
    foundation::error::{CapcueError, CapcueResult},
};

/// Timeline preparation options shared by both modes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineConfig {
    pub fps: Fps,
    /// Words per display line (timestamped mode).
    pub line_capacity: usize,
    /// Lines per display page (timestamped mode).
    pub lines_per_page: usize,
    /// Silence inserted between sentence units (proportional mode).
    pub pause_seconds: f64,
    pub spring: SpringProfile,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            fps: Fps { num: 30, den: 1 },
            line_capacity: 8,
            lines_per_page: 2,
            pause_seconds: 0.45,
            spring: SpringProfile::default(),
        }
    }
}

impl TimelineConfig {
    pub fn with_fps(fps: Fps) -> Self {
        Self {
            fps,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> CapcueResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.line_capacity == 0 {
            return Err(CapcueError::validation("line_capacity must be > 0"));
        }
        if self.lines_per_page == 0 {
            return Err(CapcueError::validation("lines_per_page must be > 0"));
        }
        if !self.pause_seconds.is_finite() || self.pause_seconds < 0.0 {
            return Err(CapcueError::validation(
                "pause_seconds must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Pause length in whole frames, rounded to the nearest frame.
    pub fn pause_frames(&self) -> u64 {
        self.fps.secs_to_frames_round(self.pause_seconds)
    }
}
