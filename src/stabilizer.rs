// Debounces the per-frame gesture label.
//
// Raw labels flicker for a frame or two whenever a finger hovers near the
// extension threshold. The stabilizer keeps the last B labels and only lets a
// label through once it wins a majority of the newest W of them.

use crate::config::StabilizerConfig;
use crate::gesture::GestureLabel;
use crate::ring::Ring;

/// Distinct labels that can appear in one voting window.
const LABEL_KINDS: usize = 5;

pub struct GestureStabilizer {
    buffer: Ring<GestureLabel>,
    window: usize,
    confirm: usize,
}

impl GestureStabilizer {
    pub fn new(config: &StabilizerConfig) -> Self {
        Self {
            buffer: Ring::with_capacity(config.buffer_size),
            window: config.confirmation_window,
            confirm: config.confirmation_count,
        }
    }

    /// Feed this frame's raw label and get the label the board should act on.
    pub fn stabilize(&mut self, raw: GestureLabel) -> GestureLabel {
        self.buffer.push(raw);

        // Warm-up: not enough history to vote yet.
        if self.buffer.len() < self.window {
            return raw;
        }

        let (mode, votes) = self.window_mode();
        if votes >= self.confirm {
            return mode;
        }

        // No clear majority: hold on to last frame's raw label.
        self.buffer.back(1).unwrap_or(raw)
    }

    /// Forget every label, e.g. after the hand left the frame.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Most frequent label among the newest W entries and its count.
    /// Ties go to whichever label was first seen scanning oldest → newest.
    fn window_mode(&self) -> (GestureLabel, usize) {
        // (label, count) in first-seen order; at most five distinct labels.
        let mut tally: [(GestureLabel, usize); LABEL_KINDS] = [(GestureLabel::None, 0); LABEL_KINDS];
        let mut distinct = 0;
        for label in self.buffer.recent(self.window) {
            match tally[..distinct].iter_mut().find(|(l, _)| *l == label) {
                Some((_, count)) => *count += 1,
                None => {
                    tally[distinct] = (label, 1);
                    distinct += 1;
                }
            }
        }

        let mut best = tally[0];
        for &(label, count) in &tally[1..distinct] {
            // strictly greater keeps the earlier label on ties
            if count > best.1 {
                best = (label, count);
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use GestureLabel::{Drawing, PalmErase, Pause, ShapeMode};

    fn stabilizer() -> GestureStabilizer {
        GestureStabilizer::new(&StabilizerConfig::default())
    }

    fn feed(s: &mut GestureStabilizer, labels: &[GestureLabel]) -> Vec<GestureLabel> {
        labels.iter().map(|l| s.stabilize(*l)).collect()
    }

    #[test]
    fn four_of_six_confirms_the_majority() {
        let mut s = stabilizer();
        let out = feed(&mut s, &[Drawing, Drawing, Drawing, Drawing, GestureLabel::None, GestureLabel::None]);
        assert_eq!(out[5], Drawing);
    }

    #[test]
    fn single_frame_outlier_is_absorbed() {
        let mut s = stabilizer();
        feed(&mut s, &[Drawing; 6]);
        assert_eq!(s.stabilize(PalmErase), Drawing);
        assert_eq!(s.stabilize(Drawing), Drawing);
    }

    #[test]
    fn a_new_gesture_takes_over_after_enough_frames() {
        let mut s = stabilizer();
        feed(&mut s, &[Drawing; 6]);
        let out = feed(&mut s, &[Pause; 4]);
        // window after 3 pauses: D D D P P P -> tie at 3 below C, falls back to previous raw
        assert_eq!(out[2], Pause);
        // after 4 pauses: D D P P P P -> Pause has 4 votes
        assert_eq!(out[3], Pause);
    }

    #[test]
    fn without_majority_the_previous_raw_label_is_returned() {
        let mut s = stabilizer();
        let out = feed(&mut s, &[Drawing, ShapeMode, Pause, GestureLabel::None, PalmErase, Drawing, ShapeMode]);
        // 6th sample: votes {Drawing:2, ...} < 4 -> previous raw (PalmErase)
        assert_eq!(out[5], PalmErase);
        // 7th sample: window ShapeMode..ShapeMode, no majority -> previous raw (Drawing)
        assert_eq!(out[6], Drawing);
    }

    #[test]
    fn ties_prefer_the_first_seen_label() {
        let config = StabilizerConfig {
            buffer_size: 4,
            confirmation_window: 4,
            confirmation_count: 2,
            ..StabilizerConfig::default()
        };
        let mut s = GestureStabilizer::new(&config);
        let out = feed(&mut s, &[Pause, Drawing, Drawing, Pause]);
        // {Pause:2, Drawing:2}; Pause was seen first
        assert_eq!(out[3], Pause);

        let out = feed(&mut s, &[Drawing]);
        // window: Drawing Drawing Pause Drawing -> Drawing 3
        assert_eq!(out[0], Drawing);
    }

    #[test]
    fn only_the_newest_window_votes() {
        let mut s = stabilizer();
        // Six old Drawings stay in the 12-slot buffer but fall out of the window.
        feed(&mut s, &[Drawing; 6]);
        let out = feed(&mut s, &[Pause, Pause, Pause, Pause, Pause, Pause]);
        assert_eq!(out[5], Pause);
        assert_eq!(s.len(), 12);
    }

    #[test]
    fn reset_restarts_the_warm_up() {
        let mut s = stabilizer();
        feed(&mut s, &[Drawing; 8]);
        s.reset();
        assert!(s.is_empty());
        // first frames after the reset pass straight through
        assert_eq!(s.stabilize(PalmErase), PalmErase);
        assert_eq!(s.stabilize(Pause), Pause);
    }

    fn any_label() -> impl Strategy<Value = GestureLabel> {
        prop_oneof![Just(Drawing), Just(PalmErase), Just(ShapeMode), Just(Pause), Just(GestureLabel::None)]
    }

    proptest! {
        #[test]
        fn warm_up_passes_raw_labels_through(labels in prop::collection::vec(any_label(), 0..6)) {
            let mut s = stabilizer();
            for l in labels {
                prop_assert_eq!(s.stabilize(l), l);
            }
        }

        #[test]
        fn buffer_never_exceeds_capacity(labels in prop::collection::vec(any_label(), 0..60)) {
            let mut s = stabilizer();
            for l in labels {
                s.stabilize(l);
                prop_assert!(s.len() <= 12);
            }
        }
    }
}
