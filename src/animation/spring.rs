use crate::foundation::core::Fps;

/// Damping/stiffness profile for word and page entrance animation.
///
/// The response is a critically-damped convergence toward 1.0: progress is 0
/// at the start frame and settles within roughly one second at the default
/// profile. Presentation-only; timing authority stays with the schedule.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringProfile {
    pub damping: f64,
    pub stiffness: f64,
}

impl Default for SpringProfile {
    fn default() -> Self {
        Self {
            damping: 8.0,
            stiffness: 120.0,
        }
    }
}

impl SpringProfile {
    /// Entrance progress in `[0, 1]` for a frame `frames_since_start` frames
    /// past the animated element's start frame.
    pub fn progress(self, fps: Fps, frames_since_start: u64) -> f64 {
        let secs = fps.frames_to_secs(frames_since_start);
        let omega = self.stiffness.max(0.0);
        let d = self.damping.max(0.0);
        let rate = (omega / (1.0 + d)).max(1e-6);
        let e = (-rate * secs).exp();
        // Critically-damped-like response.
        (1.0 - e * (1.0 + rate * secs)).clamp(0.0, 1.0)
    }
}
