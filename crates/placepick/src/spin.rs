use crate::wheel::FULL_TURN;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;

pub const MIN_TURNS: u32 = 3;
pub const DEFAULT_DURATION: Duration = Duration::from_secs(4);

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinError {
    #[error("Nothing selected to spin")]
    Empty,
    #[error("Sector {index} out of range for a {count}-sector wheel")]
    OutOfRange { index: usize, count: usize },
}

/// Where a spin will stop. The winner is chosen up front and the rotation is
/// derived from it, so the animation can only land on the winner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub winner: usize,
    pub count: usize,
    pub target_rotation: f64,
}

impl SpinPlan {
    pub fn random<R: Rng + ?Sized>(count: usize, turns: u32, rng: &mut R) -> Result<Self, SpinError> {
        if count == 0 {
            return Err(SpinError::Empty);
        }
        Self::for_index(count, rng.random_range(0..count), turns)
    }

    pub fn for_index(count: usize, winner: usize, turns: u32) -> Result<Self, SpinError> {
        if count == 0 {
            return Err(SpinError::Empty);
        }
        if winner >= count {
            return Err(SpinError::OutOfRange {
                index: winner,
                count,
            });
        }

        let degrees_per_option = FULL_TURN / count as f64;
        let midpoint = winner as f64 * degrees_per_option + degrees_per_option / 2.0;
        let turns = turns.max(MIN_TURNS) as f64;

        Ok(Self {
            winner,
            count,
            target_rotation: turns * FULL_TURN - midpoint,
        })
    }

    /// Rotation in degrees at `progress` (0..=1) through the animation.
    pub fn rotation_at(&self, progress: f64) -> f64 {
        self.target_rotation * ease_out_cubic(progress)
    }
}

pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Fraction of `duration` covered after `elapsed`.
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::sector_under_pointer;

    #[test]
    fn test_winner_lands_under_pointer() {
        for count in 1..=10 {
            for winner in 0..count {
                let plan = SpinPlan::for_index(count, winner, MIN_TURNS).unwrap();
                assert_eq!(
                    sector_under_pointer(count, plan.target_rotation),
                    Some(winner),
                    "count {count} winner {winner}"
                );
            }
        }
    }

    #[test]
    fn test_random_plans_land_on_winner() {
        let mut rng = rand::rng();
        for count in 1..=10 {
            for _ in 0..50 {
                let plan = SpinPlan::random(count, MIN_TURNS, &mut rng).unwrap();
                assert!(plan.winner < count);
                assert_eq!(
                    sector_under_pointer(count, plan.rotation_at(1.0)),
                    Some(plan.winner)
                );
            }
        }
    }

    #[test]
    fn test_turns_have_a_floor() {
        let plan = SpinPlan::for_index(2, 0, 1).unwrap();
        assert_eq!(plan.target_rotation, 3.0 * 360.0 - 90.0);
        let plan = SpinPlan::for_index(2, 1, 5).unwrap();
        assert_eq!(plan.target_rotation, 5.0 * 360.0 - 270.0);
    }

    #[test]
    fn test_empty_and_out_of_range() {
        let mut rng = rand::rng();
        assert_eq!(SpinPlan::random(0, 3, &mut rng), Err(SpinError::Empty));
        assert_eq!(
            SpinPlan::for_index(3, 3, 3),
            Err(SpinError::OutOfRange { index: 3, count: 3 })
        );
    }

    #[test]
    fn test_ease_out_is_monotonic_and_bounded() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);

        let samples: Vec<f64> = (0..=20).map(|i| ease_out_cubic(i as f64 / 20.0)).collect();
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_progress() {
        assert_eq!(progress(Duration::from_secs(2), DEFAULT_DURATION), 0.5);
        assert_eq!(progress(Duration::from_secs(9), DEFAULT_DURATION), 1.0);
        assert_eq!(progress(Duration::from_secs(1), Duration::ZERO), 1.0);
    }
}
