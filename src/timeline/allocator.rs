//! Proportional-mode frame budgeting.
//!
//! When no per-word timestamps exist, the narration's total frame budget is
//! distributed across sentence units proportionally to word count, with a
//! fixed pause gap between consecutive units. Rounding error is reconciled so
//! the frame sum matches the budget exactly.

use crate::{
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{CapcueError, CapcueResult},
    transcript::segment::SentenceUnit,
};

/// Timeline placement for one sentence unit.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleEntry {
    pub range: FrameRange,
    pub word_count: usize,
}

/// Per-unit frame placement for a whole transcript, in transcript order.
///
/// Entries are disjoint and strictly increasing; consecutive entries are
/// separated by exactly `pause_frames` frames.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Schedule {
    pub entries: Vec<ScheduleEntry>,
    pub pause_frames: u64,
    /// End frame of the last entry. When the requested budget is smaller than
    /// the per-unit 1-frame floors this exceeds the request; callers treat the
    /// request as a target, not a ceiling.
    pub actual_total_frames: u64,
}

impl Schedule {
    /// Index of the unit on screen at `frame`, or `None` during a pause gap
    /// and before/after the scheduled span.
    pub fn unit_at(&self, frame: FrameIndex) -> Option<usize> {
        self.unit_at_from(frame, 0)
    }

    /// Scan starting at `hint`. Entries are ordered and disjoint, so for
    /// monotonically increasing frames this matches the full scan.
    pub(crate) fn unit_at_from(&self, frame: FrameIndex, hint: usize) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .skip(hint)
            .find(|(_, entry)| entry.range.contains(frame))
            .map(|(idx, _)| idx)
    }

    /// Total frames of speech, excluding pause gaps.
    pub fn speech_frames(&self) -> u64 {
        self.entries.iter().map(|e| e.range.len_frames()).sum()
    }
}

/// Distribute `total_frames` across `sentences` proportionally to word count.
///
/// The frame-sum invariant holds exactly: speech frames plus pause gaps equal
/// `max(1, total_frames - gaps)` plus the gaps, unless the per-unit 1-frame
/// floors cannot fit the budget, in which case the schedule overruns and the
/// overrun is observable via [`Schedule::actual_total_frames`].
#[tracing::instrument(skip(sentences))]
pub fn allocate(
    total_frames: u64,
    sentences: &[SentenceUnit],
    pause_frames: u64,
) -> CapcueResult<Schedule> {
    if total_frames == 0 {
        return Err(CapcueError::validation("total_frames must be > 0"));
    }

    // Degenerate input collapses to a single synthetic unit so rendering
    // always has at least a placeholder caption.
    let word_counts: Vec<u64> = if sentences.is_empty() {
        vec![1]
    } else {
        sentences
            .iter()
            .map(|s| s.word_count.max(1) as u64)
            .collect()
    };
    let n = word_counts.len();
    let total_words: u64 = word_counts.iter().sum::<u64>().max(1);

    let gap_frames = pause_frames * (n as u64 - 1);
    let speech_budget = total_frames.saturating_sub(gap_frames).max(1);

    let mut frames: Vec<u64> = word_counts
        .iter()
        .map(|&wc| {
            let base = ((wc as f64 / total_words as f64) * speech_budget as f64).floor() as u64;
            base.max(1)
        })
        .collect();

    // Round-robin reconciliation of rounding drift. Addition always succeeds;
    // subtraction only applies to entries above the 1-frame floor, so a budget
    // below the summed floors is left as an accepted overrun. Only visits that
    // actually adjust an entry count toward the cap, so the surplus can drain
    // through a few reducible entries no matter how many sit at the floor.
    let current: u64 = frames.iter().sum();
    let mut diff = speech_budget as i64 - current as i64;
    let cap = 4 * n as u64 + diff.unsigned_abs();
    let mut adjustments = 0u64;
    let mut idx = 0usize;
    while diff != 0 {
        if adjustments >= cap {
            return Err(CapcueError::internal(format!(
                "frame reconciliation did not converge (residual {diff} after {adjustments} adjustments)"
            )));
        }
        let i = idx % n;
        if diff > 0 {
            frames[i] += 1;
            diff -= 1;
            adjustments += 1;
        } else if frames[i] > 1 {
            frames[i] -= 1;
            diff += 1;
            adjustments += 1;
        } else if frames.iter().all(|&f| f == 1) {
            break;
        }
        idx += 1;
    }

    let mut entries = Vec::with_capacity(n);
    let mut acc = 0u64;
    for (i, &len) in frames.iter().enumerate() {
        let range = FrameRange::new(FrameIndex(acc), FrameIndex(acc + len))?;
        let word_count = sentences.get(i).map_or(1, |s| s.word_count.max(1));
        entries.push(ScheduleEntry { range, word_count });
        acc += len;
        if i + 1 < n {
            acc += pause_frames;
        }
    }
    let actual_total_frames = entries.last().map_or(0, |e| e.range.end.0);

    tracing::debug!(
        units = n,
        speech_budget,
        gap_frames,
        actual_total_frames,
        overrun = actual_total_frames > total_frames,
        "allocated proportional schedule"
    );

    Ok(Schedule {
        entries,
        pause_frames,
        actual_total_frames,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/allocator.rs"]
mod tests;
