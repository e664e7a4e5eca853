//! Letter grades curved against the mode leader.
//!
//! The grade is not a percentile: it measures how far a player's accuracy
//! sits below the #1 ranked player of the same mode. A mode with a weak
//! leader therefore lifts everyone's grade.

use serde::{Serialize, Serializer};

/// Letter grade on the leader-relative curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    S,
    APlus,
    A,
    BPlus,
    B,
    CPlus,
    C,
    DPlus,
    D,
    F,
}

impl Grade {
    /// Grade ladder over the adjusted fraction, highest matching threshold
    /// wins (inclusive lower bounds).
    pub fn from_adjusted(fraction: f64) -> Grade {
        const LADDER: [(f64, Grade); 9] = [
            (0.98, Grade::S),
            (0.94, Grade::APlus),
            (0.90, Grade::A),
            (0.85, Grade::BPlus),
            (0.80, Grade::B),
            (0.75, Grade::CPlus),
            (0.70, Grade::C),
            (0.60, Grade::DPlus),
            (0.50, Grade::D),
        ];
        for (threshold, grade) in LADDER {
            if fraction >= threshold {
                return grade;
            }
        }
        Grade::F
    }

    pub fn letter(&self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.letter())
    }
}

/// A graded accuracy relative to the mode leader.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GradeReport {
    pub grade: Grade,
    /// `(1 - (leader - player)) * 100`, so the leader scores 100.00.
    pub adjusted_percentage: f64,
}

/// Grade a player's accuracy against the leader's accuracy for the mode.
pub fn grade_against_leader(player_accuracy: f64, leader_accuracy: f64) -> GradeReport {
    let fraction = 1.0 - (leader_accuracy - player_accuracy);
    GradeReport {
        grade: Grade::from_adjusted(fraction),
        adjusted_percentage: fraction * 100.0,
    }
}
