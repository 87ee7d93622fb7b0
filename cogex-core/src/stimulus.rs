use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which of the two blades carries the reference orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Key name the observer presses to pick this side.
    pub fn as_key(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

/// A pair of blades, angles in degrees from horizontal.
///
/// The target blade sits at the reference angle, the other one is tilted
/// away from it by the staircase intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BladePair {
    pub left_angle: f64,
    pub right_angle: f64,
}

impl BladePair {
    pub fn for_target(target: Side, intensity: f64, reference: f64) -> Self {
        match target {
            Side::Left => Self {
                left_angle: reference,
                right_angle: reference - intensity,
            },
            Side::Right => Self {
                left_angle: reference - intensity,
                right_angle: reference,
            },
        }
    }

    /// Rotation applied to each blade when drawn, `(left, right)`.
    pub fn orientations(&self, reference: f64) -> (f64, f64) {
        (reference - self.left_angle, reference - self.right_angle)
    }
}
