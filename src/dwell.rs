//! Dwell ("hover to click") selection.
//!
//! Each frame the selector is given the pointer position (if any) and the
//! targets that may currently be selected. Keeping the pointer inside one
//! target for the full dwell duration activates it exactly once; the target
//! can fire again only after the hover is broken and re-established.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::targets::{Point, Target, TargetId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwellState {
    /// Pointer has been inside `target` since `since`.
    Hovering { target: TargetId, since: Instant },
    /// `target` already fired during this hover; it re-arms once the hover breaks.
    Fired { target: TargetId },
}

impl DwellState {
    pub fn target(&self) -> TargetId {
        match *self {
            DwellState::Hovering { target, .. } | DwellState::Fired { target } => target,
        }
    }
}

/// Result of one [`DwellSelector::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DwellOutcome {
    pub hovered: Option<TargetId>,
    /// Fraction of the dwell duration accumulated so far, in `0.0..=1.0`.
    pub progress: f32,
    pub activated: bool,
}

impl DwellOutcome {
    pub const IDLE: DwellOutcome = DwellOutcome {
        hovered: None,
        progress: 0.0,
        activated: false,
    };

    pub fn activated_target(&self) -> Option<TargetId> {
        if self.activated {
            self.hovered
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct DwellSelector {
    duration: Duration,
    state: Option<DwellState>,
}

impl DwellSelector {
    /// `duration` must be non-zero; configuration validation guarantees it.
    pub fn new(duration: Duration) -> Self {
        assert!(!duration.is_zero(), "dwell duration must be positive");
        Self {
            duration,
            state: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn state(&self) -> Option<&DwellState> {
        self.state.as_ref()
    }

    pub fn clear(&mut self) {
        self.state = None;
    }

    pub fn update<'a, I>(
        &mut self,
        pointer: Option<Point>,
        targets: I,
        now: Instant,
    ) -> DwellOutcome
    where
        I: IntoIterator<Item = &'a Target>,
    {
        let hit = pointer.and_then(|p| {
            targets
                .into_iter()
                .find(|t| t.is_hoverable() && t.bounds.contains(p))
                .map(|t| t.id)
        });

        let Some(target) = hit else {
            self.state = None;
            return DwellOutcome::IDLE;
        };

        let since = match self.state {
            Some(DwellState::Hovering { target: t, since }) if t == target => since,
            Some(DwellState::Fired { target: t }) if t == target => {
                return DwellOutcome {
                    hovered: Some(target),
                    progress: 0.0,
                    activated: false,
                };
            }
            _ => {
                debug!(?target, "hover started");
                self.state = Some(DwellState::Hovering { target, since: now });
                now
            }
        };

        // Instant is monotonic, but a caller may hand us an older sample.
        let elapsed = now.saturating_duration_since(since);

        if elapsed >= self.duration {
            debug!(?target, ?elapsed, "dwell activated");
            self.state = Some(DwellState::Fired { target });
            return DwellOutcome {
                hovered: Some(target),
                progress: 1.0,
                activated: true,
            };
        }

        let progress = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        DwellOutcome {
            hovered: Some(target),
            progress,
            activated: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::Bounds;

    const DWELL: Duration = Duration::from_secs(1);

    fn targets() -> Vec<Target> {
        vec![
            Target::new(TargetId::Letter('A'), Bounds::new(0.0, 0.0, 40.0, 40.0)),
            Target::new(TargetId::Letter('B'), Bounds::new(50.0, 0.0, 40.0, 40.0)),
        ]
    }

    fn in_a() -> Option<Point> {
        Some(Point::new(20.0, 20.0))
    }

    fn in_b() -> Option<Point> {
        Some(Point::new(70.0, 20.0))
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn no_pointer_is_idle() {
        let mut sel = DwellSelector::new(DWELL);
        let t0 = Instant::now();
        assert_eq!(sel.update(None, &targets(), t0), DwellOutcome::IDLE);
        assert!(sel.state().is_none());
    }

    #[test]
    fn pointer_outside_targets_is_idle() {
        let mut sel = DwellSelector::new(DWELL);
        let t0 = Instant::now();
        let out = sel.update(Some(Point::new(45.0, 20.0)), &targets(), t0);
        assert_eq!(out, DwellOutcome::IDLE);
    }

    #[test]
    fn progress_accumulates_while_hovering() {
        let mut sel = DwellSelector::new(DWELL);
        let ts = targets();
        let t0 = Instant::now();

        let first = sel.update(in_a(), &ts, t0);
        assert_eq!(first.hovered, Some(TargetId::Letter('A')));
        assert_eq!(first.progress, 0.0);
        assert!(!first.activated);

        let half = sel.update(in_a(), &ts, t0 + ms(500));
        assert!((half.progress - 0.5).abs() < 1e-3);
        assert!(!half.activated);
    }

    #[test]
    fn continuous_hover_activates_exactly_once() {
        let mut sel = DwellSelector::new(DWELL);
        let ts = targets();
        let t0 = Instant::now();

        let mut activations = 0;
        for frame in 0..=90u64 {
            let out = sel.update(in_a(), &ts, t0 + ms(frame * 33));
            if out.activated {
                activations += 1;
                assert_eq!(out.progress, 1.0);
                assert_eq!(out.activated_target(), Some(TargetId::Letter('A')));
            }
        }
        assert_eq!(activations, 1);
    }

    #[test]
    fn frame_after_activation_does_not_fire() {
        let mut sel = DwellSelector::new(DWELL);
        let ts = targets();
        let t0 = Instant::now();

        sel.update(in_a(), &ts, t0);
        assert!(sel.update(in_a(), &ts, t0 + ms(1000)).activated);

        let after = sel.update(in_a(), &ts, t0 + ms(1033));
        assert!(!after.activated);
        assert_eq!(after.hovered, Some(TargetId::Letter('A')));
        assert_eq!(after.progress, 0.0);
        assert!(!sel.update(in_a(), &ts, t0 + ms(5000)).activated);

        // breaking the hover re-arms the target
        sel.update(None, &ts, t0 + ms(5033));
        sel.update(in_a(), &ts, t0 + ms(5066));
        assert!(sel.update(in_a(), &ts, t0 + ms(6066)).activated);
    }

    #[test]
    fn moving_to_another_target_restarts_the_timer() {
        let mut sel = DwellSelector::new(DWELL);
        let ts = targets();
        let t0 = Instant::now();

        sel.update(in_a(), &ts, t0);
        assert!(sel.update(in_a(), &ts, t0 + ms(900)).progress > 0.8);

        let on_b = sel.update(in_b(), &ts, t0 + ms(950));
        assert_eq!(on_b.hovered, Some(TargetId::Letter('B')));
        assert_eq!(on_b.progress, 0.0);

        let later = sel.update(in_b(), &ts, t0 + ms(1100));
        assert!(!later.activated);
        assert!(later.progress < 0.2);
    }

    #[test]
    fn leaving_and_returning_restarts_the_timer() {
        let mut sel = DwellSelector::new(DWELL);
        let ts = targets();
        let t0 = Instant::now();

        sel.update(in_a(), &ts, t0);
        sel.update(in_a(), &ts, t0 + ms(800));
        sel.update(None, &ts, t0 + ms(850));
        let back = sel.update(in_a(), &ts, t0 + ms(900));
        assert_eq!(back.progress, 0.0);
        assert!(!sel.update(in_a(), &ts, t0 + ms(1500)).activated);
        assert!(sel.update(in_a(), &ts, t0 + ms(1900)).activated);
    }

    #[test]
    fn just_short_of_dwell_then_leave_never_fires() {
        let mut sel = DwellSelector::new(DWELL);
        let ts = targets();
        let t0 = Instant::now();

        sel.update(in_a(), &ts, t0);
        let almost = sel.update(in_a(), &ts, t0 + DWELL - ms(1));
        assert!(!almost.activated);
        assert!(almost.progress < 1.0);
        assert_eq!(sel.update(None, &ts, t0 + DWELL), DwellOutcome::IDLE);
    }

    #[test]
    fn consumed_targets_are_ignored() {
        let mut sel = DwellSelector::new(DWELL);
        let mut ts = targets();
        ts[0].consumed = true;
        let t0 = Instant::now();
        assert_eq!(sel.update(in_a(), &ts, t0), DwellOutcome::IDLE);
    }

    #[test]
    fn overlapping_targets_pick_the_first() {
        let mut sel = DwellSelector::new(DWELL);
        let ts = vec![
            Target::new(TargetId::Letter('X'), Bounds::new(0.0, 0.0, 40.0, 40.0)),
            Target::new(TargetId::Letter('Y'), Bounds::new(20.0, 20.0, 40.0, 40.0)),
        ];
        let out = sel.update(Some(Point::new(30.0, 30.0)), &ts, Instant::now());
        assert_eq!(out.hovered, Some(TargetId::Letter('X')));
    }

    #[test]
    fn clock_going_backwards_clamps_to_zero() {
        let mut sel = DwellSelector::new(DWELL);
        let ts = targets();
        let t0 = Instant::now() + ms(5000);

        sel.update(in_a(), &ts, t0);
        let out = sel.update(in_a(), &ts, t0 - ms(300));
        assert_eq!(out.progress, 0.0);
        assert!(!out.activated);
    }

    #[test]
    #[should_panic(expected = "dwell duration must be positive")]
    fn zero_duration_is_rejected() {
        DwellSelector::new(Duration::ZERO);
    }
}
