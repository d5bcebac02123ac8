//! Timestamped-mode frame resolution.
//!
//! `page_at` answers "which page is on screen at this frame" and
//! `active_word` answers "which word inside it is being spoken". Both are pure
//! scans over the prepared [`PageBook`]; a frame matching no page span is a
//! valid "show nothing" result, not an error.

use crate::{
    foundation::core::FrameIndex,
    timeline::paginate::PageBook,
};

impl PageBook {
    /// First page whose span contains `frame`, or `None` between pages and
    /// outside the book's overall span. Spans do not overlap in well-formed
    /// input, so the match is unique when one exists.
    pub fn page_at(&self, frame: FrameIndex) -> Option<usize> {
        self.page_at_from(frame, 0)
    }

    pub(crate) fn page_at_from(&self, frame: FrameIndex, hint: usize) -> Option<usize> {
        self.pages()
            .iter()
            .enumerate()
            .skip(hint)
            .find(|(_, page)| page.span.is_some_and(|span| span.contains(frame)))
            .map(|(idx, _)| idx)
    }

    /// Line-major index of the word being spoken at `frame` within page
    /// `page_idx`, or `None` during inter-word silence (previously started
    /// words stay visible regardless).
    pub fn active_word(&self, page_idx: usize, frame: FrameIndex) -> Option<usize> {
        let page = self.pages().get(page_idx)?;
        page.words().position(|word| word.active_at(frame))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/locator.rs"]
mod tests;
