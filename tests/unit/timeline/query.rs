use super::*;

fn config() -> TimelineConfig {
    TimelineConfig::default()
}

fn timed_words(n: usize) -> Vec<Word> {
    (0..n)
        .map(|i| {
            let start = i as f64 * 0.5;
            Word::timed(format!("w{i}"), start, start + 0.4)
        })
        .collect()
}

#[test]
fn proportional_tracks_units_and_reveals_words() {
    // pause_seconds 1/6 at 30fps is exactly 5 pause frames, matching the
    // worked allocation: [(0, 17), (22, 68)].
    let mut cfg = config();
    cfg.pause_seconds = 1.0 / 6.0;
    let timeline = Timeline::proportional("Hi. This is a test.", 90, &cfg).unwrap();

    let first = timeline.query(FrameIndex(0)).unwrap();
    assert_eq!(first.unit_index, 0);
    assert_eq!(first.active_word, Some(0));

    // Pause gap between the sentences.
    assert_eq!(timeline.query(FrameIndex(18)), None);

    // Unit 1 is 68 frames for 4 words: 17 frames per word.
    let early = timeline.query(FrameIndex(22)).unwrap();
    assert_eq!(early.unit_index, 1);
    assert_eq!(early.active_word, Some(0));
    let later = timeline.query(FrameIndex(22 + 35)).unwrap();
    assert_eq!(later.active_word, Some(2));
    let last = timeline.query(FrameIndex(89)).unwrap();
    assert_eq!(last.active_word, Some(3));

    assert_eq!(timeline.query(FrameIndex(90)), None);
}

#[test]
fn word_progress_starts_at_zero_and_rises() {
    let mut cfg = config();
    cfg.pause_seconds = 1.0 / 6.0;
    let timeline = Timeline::proportional("Hi. This is a test.", 90, &cfg).unwrap();

    // Frame 39 is the start of unit 1's word 1 (17 frames per word).
    let at_start = timeline.query(FrameIndex(22 + 17)).unwrap();
    assert_eq!(at_start.active_word, Some(1));
    assert_eq!(at_start.word_progress, 0.0);

    let a_bit_in = timeline.query(FrameIndex(22 + 17 + 5)).unwrap();
    assert_eq!(a_bit_in.active_word, Some(1));
    assert!(a_bit_in.word_progress > at_start.word_progress);
    assert!(a_bit_in.word_progress <= 1.0);
}

#[test]
fn page_progress_settles_within_a_unit() {
    let timeline = Timeline::proportional("One single sentence only.", 90, &config()).unwrap();
    let start = timeline.query(FrameIndex(0)).unwrap();
    let settled = timeline.query(FrameIndex(60)).unwrap();
    assert_eq!(start.page_progress, 0.0);
    assert!(settled.page_progress > 0.99);
}

#[test]
fn timestamped_resolves_pages_words_and_silence() {
    let timeline = Timeline::timestamped(&timed_words(20), &config()).unwrap();

    let state = timeline.query(FrameIndex(45)).unwrap();
    assert_eq!(state.unit_index, 0);
    assert_eq!(state.active_word, Some(3));
    assert_eq!(state.word_progress, 0.0); // exactly at the word's start frame

    // Breath between words: page stays, no active word, no word progress.
    let silent = timeline.query(FrameIndex(13)).unwrap();
    assert_eq!(silent.unit_index, 0);
    assert_eq!(silent.active_word, None);
    assert_eq!(silent.word_progress, 0.0);

    // Second page, and nothing before the first word or past the last.
    assert_eq!(timeline.query(FrameIndex(250)).unwrap().unit_index, 1);
    assert_eq!(timeline.query(FrameIndex(298)), None);
}

#[test]
fn query_is_idempotent() {
    let timeline = Timeline::timestamped(&timed_words(20), &config()).unwrap();
    for frame in [0u64, 13, 45, 238, 250, 500] {
        assert_eq!(
            timeline.query(FrameIndex(frame)),
            timeline.query(FrameIndex(frame))
        );
    }

    let prop = Timeline::proportional("Hi. This is a test.", 90, &config()).unwrap();
    for frame in [0u64, 10, 17, 40, 89, 90] {
        assert_eq!(prop.query(FrameIndex(frame)), prop.query(FrameIndex(frame)));
    }
}

#[test]
fn duration_constructor_ceils_to_frames() {
    let cfg = config();
    let by_duration = Timeline::proportional_for_duration("Hi there.", 3.001, &cfg).unwrap();
    let by_frames = Timeline::proportional("Hi there.", 91, &cfg).unwrap();
    assert_eq!(
        by_duration.schedule().unwrap().actual_total_frames,
        by_frames.schedule().unwrap().actual_total_frames
    );

    assert!(Timeline::proportional_for_duration("Hi.", 0.0, &cfg).is_err());
    assert!(Timeline::proportional_for_duration("Hi.", f64::NAN, &cfg).is_err());
}

#[test]
fn lead_in_shifts_the_whole_track() {
    let base = Timeline::timestamped(&timed_words(20), &config()).unwrap();
    let delayed = Timeline::timestamped(&timed_words(20), &config())
        .unwrap()
        .with_lead_in(60);

    assert_eq!(delayed.query(FrameIndex(0)), None);
    assert_eq!(delayed.query(FrameIndex(59)), None);
    for frame in [0u64, 13, 45, 250] {
        assert_eq!(
            delayed.query(FrameIndex(frame + 60)),
            base.query(FrameIndex(frame))
        );
    }
}

#[test]
fn cursor_matches_plain_scan_over_a_full_sweep() {
    let timelines = [
        Timeline::timestamped(&timed_words(20), &config()).unwrap(),
        Timeline::proportional("Hi. This is a test. And another one.", 200, &config()).unwrap(),
    ];
    for timeline in &timelines {
        let mut cursor = TimelineCursor::new(timeline);
        for frame in 0..350u64 {
            assert_eq!(
                cursor.query(FrameIndex(frame)),
                timeline.query(FrameIndex(frame)),
                "frame {frame}"
            );
        }
    }
}

#[test]
fn cursor_survives_backward_jumps() {
    let timeline = Timeline::timestamped(&timed_words(20), &config()).unwrap();
    let mut cursor = TimelineCursor::new(&timeline);
    for frame in [0u64, 100, 250, 40, 260, 5, 297] {
        assert_eq!(
            cursor.query(FrameIndex(frame)),
            timeline.query(FrameIndex(frame)),
            "frame {frame}"
        );
    }
}

#[test]
fn cursor_falls_back_to_full_scan_on_unordered_spans() {
    // One word per page, second page nested inside the first page's span: the
    // prepared book is flagged unordered and the cursor must not skip ahead.
    let mut cfg = config();
    cfg.line_capacity = 1;
    cfg.lines_per_page = 1;
    let words = vec![
        Word::timed("long", 0.0, 10.0),
        Word::timed("nested", 2.0, 4.0),
    ];
    let timeline = Timeline::timestamped(&words, &cfg).unwrap();
    assert!(!timeline.page_book().unwrap().spans_are_ordered());

    let mut cursor = TimelineCursor::new(&timeline);
    for frame in 0..320u64 {
        assert_eq!(
            cursor.query(FrameIndex(frame)),
            timeline.query(FrameIndex(frame)),
            "frame {frame}"
        );
    }
}

#[test]
fn timeline_is_shareable_across_threads() {
    let timeline = Timeline::timestamped(&timed_words(20), &config()).unwrap();
    let expected = timeline.query(FrameIndex(45));
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(timeline.query(FrameIndex(45)), expected);
            });
        }
    });
}

#[test]
fn json_roundtrip_preserves_queries() {
    let timeline = Timeline::timestamped(&timed_words(20), &config()).unwrap();
    let s = serde_json::to_string(&timeline).unwrap();
    let de: Timeline = serde_json::from_str(&s).unwrap();
    for frame in [0u64, 13, 45, 250, 400] {
        assert_eq!(de.query(FrameIndex(frame)), timeline.query(FrameIndex(frame)));
    }
}
