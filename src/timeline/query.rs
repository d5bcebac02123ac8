//! Per-frame query surface.
//!
//! The renderer calls [`Timeline::query`] once per output frame. Every call is
//! a pure function of the frame number and the prepared schedule, so frames
//! may be queried out of order or from multiple threads; [`TimelineCursor`] is
//! an optional per-caller cache for the common increasing-frame sweep and is
//! result-identical to the plain scan.

use crate::{
    animation::spring::SpringProfile,
    foundation::core::{Fps, FrameIndex},
    foundation::error::{CapcueError, CapcueResult},
    timeline::allocator::{Schedule, allocate},
    timeline::config::TimelineConfig,
    timeline::paginate::PageBook,
    transcript::segment::{Word, split_sentences},
};

/// What the renderer needs for one frame: the display unit on screen, the word
/// being spoken inside it, and bounded entrance-animation progress values.
///
/// `unit_index` is a sentence index in proportional mode and a page index in
/// timestamped mode. Progress values are presentation-only and never influence
/// which unit or word is active.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActiveState {
    pub unit_index: usize,
    /// Line-major word index within the unit; `None` during inter-word
    /// silence (timestamped mode only).
    pub active_word: Option<usize>,
    /// Entrance progress of the active word, in `[0, 1]`.
    pub word_progress: f64,
    /// Entrance progress of the unit/page itself, in `[0, 1]`.
    pub page_progress: f64,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
enum Mode {
    Proportional(Schedule),
    Timestamped(PageBook),
}

/// A prepared caption timeline: immutable after construction, queried once per
/// rendered frame.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    mode: Mode,
    fps: Fps,
    spring: SpringProfile,
    lead_in_frames: u64,
}

impl Timeline {
    /// Prepare a proportional-mode timeline from raw transcript text and a
    /// total frame budget.
    pub fn proportional(
        transcript: &str,
        total_frames: u64,
        config: &TimelineConfig,
    ) -> CapcueResult<Self> {
        config.validate()?;
        let sentences = split_sentences(transcript);
        let schedule = allocate(total_frames, &sentences, config.pause_frames())?;
        Ok(Self {
            mode: Mode::Proportional(schedule),
            fps: config.fps,
            spring: config.spring,
            lead_in_frames: 0,
        })
    }

    /// Prepare a proportional-mode timeline from the narration collaborator's
    /// duration in seconds (`total_frames = ceil(duration * fps)`).
    pub fn proportional_for_duration(
        transcript: &str,
        duration_secs: f64,
        config: &TimelineConfig,
    ) -> CapcueResult<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(CapcueError::validation(
                "narration duration must be finite and > 0 seconds",
            ));
        }
        config.validate()?;
        let total_frames = config.fps.secs_to_frames_ceil(duration_secs).max(1);
        Self::proportional(transcript, total_frames, config)
    }

    /// Prepare a timestamped-mode timeline from an aligned word list.
    pub fn timestamped(words: &[Word], config: &TimelineConfig) -> CapcueResult<Self> {
        let book = PageBook::build(words, config)?;
        Ok(Self {
            mode: Mode::Timestamped(book),
            fps: config.fps,
            spring: config.spring,
            lead_in_frames: 0,
        })
    }

    /// Delay the whole caption track by `frames` (e.g. after an intro card).
    /// Frames inside the lead-in resolve to nothing.
    pub fn with_lead_in(mut self, frames: u64) -> Self {
        self.lead_in_frames = frames;
        self
    }

    /// The prepared proportional schedule, when in that mode.
    pub fn schedule(&self) -> Option<&Schedule> {
        match &self.mode {
            Mode::Proportional(schedule) => Some(schedule),
            Mode::Timestamped(_) => None,
        }
    }

    /// The prepared page book, when in timestamped mode.
    pub fn page_book(&self) -> Option<&PageBook> {
        match &self.mode {
            Mode::Proportional(_) => None,
            Mode::Timestamped(book) => Some(book),
        }
    }

    /// Resolve the active state for one frame, or `None` when nothing is on
    /// screen (lead-in, pause gap, between pages, or past the end).
    pub fn query(&self, frame: FrameIndex) -> Option<ActiveState> {
        self.resolve(frame, 0).map(|(_, state)| state)
    }

    fn resolve(&self, frame: FrameIndex, hint: usize) -> Option<(usize, ActiveState)> {
        let local = frame.0.checked_sub(self.lead_in_frames)?;
        let local = FrameIndex(local);
        match &self.mode {
            Mode::Proportional(schedule) => {
                let idx = schedule.unit_at_from(local, hint)?;
                let entry = &schedule.entries[idx];
                let unit_local = local.0 - entry.range.start.0;

                // Word reveal inside a sentence: the unit's frames are divided
                // evenly across its words with a 3-frame floor, and the last
                // revealed word is the active one.
                let words = entry.word_count.max(1) as u64;
                let frames_per_word = (entry.range.len_frames() / words).max(3);
                let visible = (unit_local / frames_per_word + 1).min(words);
                let active = visible - 1;
                let word_start = active * frames_per_word;

                let state = ActiveState {
                    unit_index: idx,
                    active_word: Some(active as usize),
                    word_progress: self
                        .spring
                        .progress(self.fps, unit_local.saturating_sub(word_start)),
                    page_progress: self.spring.progress(self.fps, unit_local),
                };
                Some((idx, state))
            }
            Mode::Timestamped(book) => {
                let idx = book.page_at_from(local, hint)?;
                let page = &book.pages()[idx];
                let span = page.span?;
                let active = book.active_word(idx, local);

                let word_progress = active
                    .and_then(|w| page.words().nth(w))
                    .and_then(|word| word.start)
                    .map_or(0.0, |start| {
                        self.spring
                            .progress(self.fps, local.0.saturating_sub(start.0))
                    });
                let state = ActiveState {
                    unit_index: idx,
                    active_word: active,
                    word_progress,
                    page_progress: self
                        .spring
                        .progress(self.fps, local.0.saturating_sub(span.start.0)),
                };
                Some((idx, state))
            }
        }
    }

    /// Whether units/pages are ordered and disjoint, making hint-based
    /// skipping equivalent to the full scan.
    fn supports_skip(&self) -> bool {
        match &self.mode {
            Mode::Proportional(_) => true, // by construction
            Mode::Timestamped(book) => book.spans_are_ordered(),
        }
    }
}

/// Monotone-frame query cache.
///
/// Remembers the last matched unit index and starts the next scan there when
/// frames are non-decreasing, falling back to the full scan otherwise. Results
/// are identical to [`Timeline::query`] for every frame.
#[derive(Debug)]
pub struct TimelineCursor<'a> {
    timeline: &'a Timeline,
    hint: usize,
    last_frame: Option<FrameIndex>,
}

impl<'a> TimelineCursor<'a> {
    pub fn new(timeline: &'a Timeline) -> Self {
        Self {
            timeline,
            hint: 0,
            last_frame: None,
        }
    }

    pub fn query(&mut self, frame: FrameIndex) -> Option<ActiveState> {
        let monotone = self.last_frame.is_none_or(|prev| prev.0 <= frame.0);
        if !monotone {
            self.hint = 0;
        }
        self.last_frame = Some(frame);

        let hint = if self.timeline.supports_skip() {
            self.hint
        } else {
            0
        };
        match self.timeline.resolve(frame, hint) {
            Some((idx, state)) => {
                self.hint = idx;
                Some(state)
            }
            None => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/query.rs"]
mod tests;
