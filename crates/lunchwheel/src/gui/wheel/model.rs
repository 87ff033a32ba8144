use placepick::spin::{self, SpinPlan};
use placepick::wheel::WheelLayout;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
struct ActiveSpin {
    plan: SpinPlan,
    duration: Duration,
    started_us: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinFrame {
    pub rotation: f64,
    pub finished: bool,
}

/// What the wheel widget shows: its sectors and how far they have turned.
pub struct WheelState {
    pub layout: WheelLayout,
    /// Clockwise, degrees.
    pub rotation: f64,
    spin: Option<ActiveSpin>,
}

impl Default for WheelState {
    fn default() -> Self {
        Self {
            layout: WheelLayout::draft(),
            rotation: 0.0,
            spin: None,
        }
    }
}

impl WheelState {
    /// Redraws from scratch with new labels. An empty list shows the draft wheel.
    pub fn set_labels(&mut self, labels: Vec<String>) {
        self.layout = WheelLayout::for_labels(labels);
        self.rotation = 0.0;
    }

    pub fn show_draft(&mut self) {
        self.set_labels(Vec::new());
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    pub fn start_spin(&mut self, plan: SpinPlan, duration: Duration) {
        self.rotation = 0.0;
        self.spin = Some(ActiveSpin {
            plan,
            duration,
            started_us: None,
        });
    }

    /// Steps the running spin to frame time `now_us` (microseconds, any epoch).
    pub fn advance(&mut self, now_us: i64) -> SpinFrame {
        let Some(active) = self.spin.as_mut() else {
            return SpinFrame {
                rotation: self.rotation,
                finished: true,
            };
        };

        let started = *active.started_us.get_or_insert(now_us);
        let elapsed = Duration::from_micros(now_us.saturating_sub(started).max(0) as u64);
        let progress = spin::progress(elapsed, active.duration);

        self.rotation = active.plan.rotation_at(progress);
        SpinFrame {
            rotation: self.rotation,
            finished: progress >= 1.0,
        }
    }

    /// Ends the spin, leaving the wheel at its resting angle. Returns the winner.
    pub fn finish_spin(&mut self) -> Option<usize> {
        let active = self.spin.take()?;
        self.rotation = active.plan.target_rotation;
        Some(active.plan.winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use placepick::wheel::sector_under_pointer;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Place {i}")).collect()
    }

    #[test]
    fn test_starts_as_draft() {
        let state = WheelState::default();
        assert!(state.layout.draft);
        assert!(!state.is_spinning());
    }

    #[test]
    fn test_empty_labels_show_draft() {
        let mut state = WheelState::default();
        state.set_labels(labels(3));
        assert!(!state.layout.draft);
        assert_eq!(state.layout.len(), 3);

        state.show_draft();
        assert!(state.layout.draft);
    }

    #[test]
    fn test_spin_runs_on_frame_clock() {
        let mut state = WheelState::default();
        state.set_labels(labels(5));
        let plan = SpinPlan::for_index(5, 2, 3).unwrap();
        state.start_spin(plan, Duration::from_secs(4));

        let first = state.advance(1_000_000);
        assert_eq!(first.rotation, 0.0);
        assert!(!first.finished);

        let middle = state.advance(3_000_000);
        assert!(middle.rotation > 0.0 && middle.rotation < plan.target_rotation);
        assert!(!middle.finished);

        let last = state.advance(5_000_000);
        assert!(last.finished);
        assert_eq!(last.rotation, plan.target_rotation);

        assert_eq!(state.finish_spin(), Some(2));
        assert!(!state.is_spinning());
        assert_eq!(sector_under_pointer(5, state.rotation), Some(2));
    }

    #[test]
    fn test_finish_without_spin() {
        let mut state = WheelState::default();
        assert_eq!(state.finish_spin(), None);
        assert!(state.advance(42).finished);
    }
}
