//! Capcue is a caption timeline synchronization engine.
//!
//! Given a narration's total duration (and, when an alignment step supplies
//! them, per-word speech timestamps) plus the transcript text, capcue produces
//! a frame-exact schedule of which caption words, lines, and pages are visible
//! at any video frame, and which word is currently "active" for highlight
//! animation.
//!
//! # Pipeline overview
//!
//! 1. **Segment**: transcript text -> [`SentenceUnit`]s / [`Word`]s
//! 2. **Prepare**: either
//!    - *proportional mode*: distribute a frame budget across sentence units
//!      by word count ([`allocate`] -> [`Schedule`]), or
//!    - *timestamped mode*: group aligned words into lines and pages
//!      ([`PageBook`])
//! 3. **Query**: the renderer calls [`Timeline::query`] once per output frame
//!    and receives an [`ActiveState`] (or `None` when nothing is on screen)
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: preparation and queries are pure and stable
//!   for a given input.
//! - **No IO**: the engine consumes already-computed durations and timestamps;
//!   audio analysis, text generation, and rendering live in the host.
//! - **Build once, read many**: schedules and page books are immutable values,
//!   so frames may be queried out of order or concurrently without locks.
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod timeline;
mod transcript;

pub use animation::spring::SpringProfile;
pub use foundation::core::{Fps, FrameIndex, FrameRange};
pub use foundation::error::{CapcueError, CapcueResult};
pub use timeline::allocator::{Schedule, ScheduleEntry, allocate};
pub use timeline::config::TimelineConfig;
pub use timeline::paginate::{Line, Page, PageBook, PageSpan, TimedWord};
pub use timeline::query::{ActiveState, Timeline, TimelineCursor};
pub use transcript::segment::{SentenceUnit, Word, split_sentences, split_words};
