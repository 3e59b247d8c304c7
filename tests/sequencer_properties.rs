use interval_timer::{
    model::{CountdownSetting, Interval, IntervalColor, TimerSettings},
    CueKind, RunState, Sequencer,
};

const COMPOSITIONS: &[&[u64]] = &[&[1], &[5], &[30, 10], &[1, 1, 1], &[3, 7, 2, 9], &[12, 1, 4, 1]];

fn start(durations: &[u64], countdown_beep: CountdownSetting) -> Sequencer {
    let intervals = durations
        .iter()
        .map(|&seconds| Interval::new("step", seconds, IntervalColor::Orange))
        .collect();
    let settings = TimerSettings {
        countdown_beep,
        ..TimerSettings::default()
    };
    let mut sequencer = Sequencer::start(intervals, settings).unwrap();
    sequencer.toggle_pause();
    sequencer
}

/// Index of the interval containing elapsed second `k`
fn interval_at(durations: &[u64], k: u64) -> usize {
    let mut boundary = 0;
    for (index, &seconds) in durations.iter().enumerate() {
        boundary += seconds;
        if k < boundary {
            return index;
        }
    }
    durations.len() - 1
}

#[test]
fn total_ticks_reach_the_terminal_state() {
    for durations in COMPOSITIONS {
        let mut sequencer = start(durations, CountdownSetting::None);
        let total: u64 = durations.iter().sum();
        for _ in 0..total {
            sequencer.advance();
        }
        assert_eq!(
            sequencer.snapshot(),
            RunState {
                running: false,
                current_index: durations.len() - 1,
                remaining_seconds: 0,
                elapsed_total_seconds: total,
            },
            "composition {:?}",
            durations
        );
    }
}

#[test]
fn elapsed_and_index_follow_cumulative_boundaries() {
    for durations in COMPOSITIONS {
        let mut sequencer = start(durations, CountdownSetting::None);
        let total: u64 = durations.iter().sum();
        for k in 0..total {
            let state = sequencer.snapshot();
            assert_eq!(state.elapsed_total_seconds, k);
            assert_eq!(state.current_index, interval_at(durations, k), "composition {:?} at {}", durations, k);
            assert!(state.running);
            sequencer.advance();
        }
    }
}

#[test]
fn restart_equals_a_fresh_start() {
    for durations in COMPOSITIONS {
        let mut fresh = start(durations, CountdownSetting::Ten);
        fresh.toggle_pause();
        let expected = fresh.snapshot();

        let mut sequencer = start(durations, CountdownSetting::Ten);
        for _ in 0..4 {
            sequencer.advance();
        }
        sequencer.skip_forward();
        assert_eq!(sequencer.restart(), expected);
    }
}

#[test]
fn countdown_fires_once_per_threshold_value() {
    let mut sequencer = start(&[10, 4, 6], CountdownSetting::Five);
    let mut countdowns = Vec::new();
    let mut transitions = 0;
    for _ in 0..20 {
        let report = sequencer.advance();
        for cue in report.cues {
            match cue {
                CueKind::Countdown => countdowns.push((report.state.current_index, report.state.remaining_seconds)),
                CueKind::Transition => transitions += 1,
            }
        }
    }

    assert_eq!(
        countdowns,
        vec![
            (0, 5),
            (0, 4),
            (0, 3),
            (0, 2),
            (0, 1),
            (1, 4),
            (1, 3),
            (1, 2),
            (1, 1),
            (2, 5),
            (2, 4),
            (2, 3),
            (2, 2),
            (2, 1),
        ]
    );
    assert_eq!(transitions, 2);
    assert!(countdowns.iter().all(|&(_, remaining)| remaining > 0));
}

#[test]
fn paused_ticks_never_cue() {
    let mut sequencer = start(&[4, 4], CountdownSetting::Ten);
    sequencer.toggle_pause();
    for _ in 0..8 {
        assert!(sequencer.advance().cues.is_empty());
    }
}

#[test]
fn skipping_back_never_pushes_elapsed_past_total() {
    for durations in COMPOSITIONS {
        let mut sequencer = start(durations, CountdownSetting::None);
        let total: u64 = durations.iter().sum();
        let mut last = 0;
        for tick in 1..=total * 3 {
            if tick % 4 == 0 {
                sequencer.skip_back();
            }
            if !sequencer.snapshot().running {
                sequencer.skip_back();
                sequencer.toggle_pause();
            }
            let elapsed = sequencer.advance().state.elapsed_total_seconds;
            assert!(elapsed >= last, "composition {:?} went backwards", durations);
            assert!(elapsed <= total, "composition {:?}: elapsed {} > total {}", durations, elapsed, total);
            last = elapsed;
        }
    }
}
