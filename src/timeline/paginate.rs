//! Timestamped-mode display grouping.
//!
//! Aligned words are chunked into fixed-capacity lines and lines into pages.
//! Chunking is pure and complete: every word lands in exactly one line and one
//! page, in order, with no overlap. Frame spans are precomputed here so the
//! locator never touches float seconds at query time.

use crate::{
    foundation::core::{Fps, FrameIndex},
    foundation::error::CapcueResult,
    timeline::config::TimelineConfig,
    transcript::segment::Word,
};

/// One caption word with its alignment converted to frames.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimedWord {
    pub text: String,
    /// First frame at which the word is visible; `None` when the aligner
    /// supplied no start time (the word is then visible for its whole page).
    pub start: Option<FrameIndex>,
    /// Exclusive end frame of the word's speech interval.
    pub end: Option<FrameIndex>,
    aligned: bool,
}

impl TimedWord {
    /// Whether this word carries usable, monotonic timestamps. Words without
    /// them are shown but never highlighted.
    pub fn is_aligned(&self) -> bool {
        self.aligned
    }

    /// Visibility is "has started", independent of being the active word.
    pub fn visible_at(&self, frame: FrameIndex) -> bool {
        self.start.is_none_or(|s| s.0 <= frame.0)
    }

    /// Whether the narrator is speaking this word at `frame`.
    pub fn active_at(&self, frame: FrameIndex) -> bool {
        if !self.aligned {
            return false;
        }
        match (self.start, self.end) {
            (Some(s), Some(e)) => s.0 <= frame.0 && frame.0 < e.0,
            _ => false,
        }
    }
}

/// Inclusive frame span of a page, from its first word's start to its last
/// word's end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PageSpan {
    pub start: FrameIndex,
    pub end: FrameIndex, // inclusive
}

impl PageSpan {
    pub fn contains(self, frame: FrameIndex) -> bool {
        self.start.0 <= frame.0 && frame.0 <= self.end.0
    }
}

/// A fixed-capacity window of consecutive words.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Line {
    pub words: Vec<TimedWord>,
}

/// A fixed-capacity window of consecutive lines.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Page {
    pub lines: Vec<Line>,
    /// `None` when the boundary words lack timestamps; such a page can never
    /// become active.
    pub span: Option<PageSpan>,
}

impl Page {
    /// Words in line-major (display) order.
    pub fn words(&self) -> impl Iterator<Item = &TimedWord> {
        self.lines.iter().flat_map(|line| line.words.iter())
    }

    pub fn word_count(&self) -> usize {
        self.lines.iter().map(|line| line.words.len()).sum()
    }
}

/// All pages for a transcript, prepared once and read-only afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageBook {
    pages: Vec<Page>,
    /// True when page spans are ordered and disjoint; the monotone query
    /// cursor only skips ahead under this guarantee.
    ordered: bool,
}

impl PageBook {
    /// Group `words` into lines of `config.line_capacity` words and pages of
    /// `config.lines_per_page` lines, converting timestamps to frame spans.
    #[tracing::instrument(skip(words, config))]
    pub fn build(words: &[Word], config: &TimelineConfig) -> CapcueResult<Self> {
        config.validate()?;
        let fps = config.fps;

        let timed = convert_words(words, fps);

        let lines: Vec<Line> = timed
            .chunks(config.line_capacity)
            .map(|chunk| Line {
                words: chunk.to_vec(),
            })
            .collect();

        let pages: Vec<Page> = lines
            .chunks(config.lines_per_page)
            .map(|chunk| {
                let lines = chunk.to_vec();
                let span = page_span(&lines);
                Page { lines, span }
            })
            .collect();

        let ordered = spans_ordered(&pages);
        tracing::debug!(
            words = words.len(),
            lines = lines.len(),
            pages = pages.len(),
            ordered,
            "built page book"
        );
        Ok(Self { pages, ordered })
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub(crate) fn spans_are_ordered(&self) -> bool {
        self.ordered
    }
}

fn convert_words(words: &[Word], fps: Fps) -> Vec<TimedWord> {
    let mut out = Vec::with_capacity(words.len());
    // Timestamps must be non-decreasing across the sequence; words breaking
    // that (or missing either bound) keep their visibility but lose highlight
    // eligibility.
    let mut prev_start = f64::NEG_INFINITY;
    for word in words {
        let aligned = match (word.start_secs, word.end_secs) {
            (Some(s), Some(e)) => {
                let ok = s.is_finite() && e.is_finite() && e >= s && s >= prev_start;
                if ok {
                    prev_start = s;
                }
                ok
            }
            _ => false,
        };
        out.push(TimedWord {
            text: word.text.clone(),
            start: word.start_secs.map(|s| FrameIndex(fps.secs_to_frames_floor(s))),
            end: word.end_secs.map(|e| FrameIndex(fps.secs_to_frames_floor(e))),
            aligned,
        });
    }
    out
}

fn page_span(lines: &[Line]) -> Option<PageSpan> {
    let first = lines.first()?.words.first()?;
    let last = lines.last()?.words.last()?;
    let (start, end) = (first.start?, last.end?);
    if end.0 < start.0 {
        return None;
    }
    Some(PageSpan { start, end })
}

fn spans_ordered(pages: &[Page]) -> bool {
    let mut prev_end: Option<u64> = None;
    for page in pages {
        let Some(span) = page.span else { continue };
        if let Some(end) = prev_end
            && span.start.0 <= end
        {
            return false;
        }
        prev_end = Some(span.end.0);
    }
    true
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/paginate.rs"]
mod tests;
