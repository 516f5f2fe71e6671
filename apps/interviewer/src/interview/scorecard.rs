//! Scorecard: numeric aggregation of every evaluation in an interview.
//!
//! Pure and deterministic: used for the results view and as the basis of the
//! templated report when the model cannot produce one.

use serde::{Deserialize, Serialize};

use crate::interview::models::Evaluation;

/// Overall average at or above which the candidate is rated Intermediate.
pub const INTERMEDIATE_THRESHOLD: f64 = 6.0;
/// Overall average at or above which the candidate is rated Advanced.
pub const ADVANCED_THRESHOLD: f64 = 8.0;

/// Coarse proficiency rating derived from the overall average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProficiencyTier {
    Beginner,
    Intermediate,
    Advanced,
}

impl ProficiencyTier {
    pub fn from_score(overall: f64) -> Self {
        if overall >= ADVANCED_THRESHOLD {
            ProficiencyTier::Advanced
        } else if overall >= INTERMEDIATE_THRESHOLD {
            ProficiencyTier::Intermediate
        } else {
            ProficiencyTier::Beginner
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProficiencyTier::Beginner => "Beginner",
            ProficiencyTier::Intermediate => "Intermediate",
            ProficiencyTier::Advanced => "Advanced",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub answered: usize,
    pub correctness: f64,
    pub efficiency: f64,
    pub clarity: f64,
    pub overall: f64,
    pub tier: ProficiencyTier,
    /// Overall score of each question, in the order asked.
    pub per_question: Vec<f64>,
}

impl Scorecard {
    /// Averages every dimension. Returns `None` when nothing has been evaluated.
    pub fn compute(evaluations: &[Evaluation]) -> Option<Self> {
        if evaluations.is_empty() {
            return None;
        }

        let mean = |score: fn(&Evaluation) -> f64| {
            evaluations.iter().map(score).sum::<f64>() / evaluations.len() as f64
        };
        let overall = mean(|e| e.overall);

        Some(Scorecard {
            answered: evaluations.len(),
            correctness: mean(|e| e.correctness),
            efficiency: mean(|e| e.efficiency),
            clarity: mean(|e| e.clarity),
            overall,
            tier: ProficiencyTier::from_score(overall),
            per_question: evaluations.iter().map(|e| e.overall).collect(),
        })
    }

    /// The weakest of the three scored dimensions, by name.
    pub fn weakest_dimension(&self) -> &'static str {
        let dimensions = [
            ("correctness", self.correctness),
            ("efficiency", self.efficiency),
            ("clarity", self.clarity),
        ];
        dimensions
            .iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(name, _)| *name)
            .unwrap_or("correctness")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_evaluation(correctness: f64, efficiency: f64, clarity: f64, overall: f64) -> Evaluation {
        Evaluation {
            correctness,
            efficiency,
            clarity,
            overall,
            feedback: String::new(),
            strengths: vec![],
            areas_for_improvement: vec![],
            recommendation: String::new(),
        }
    }

    #[test]
    fn test_empty_evaluations_have_no_scorecard() {
        assert!(Scorecard::compute(&[]).is_none());
    }

    #[test]
    fn test_averages_each_dimension() {
        let card = Scorecard::compute(&[
            make_evaluation(8.0, 6.0, 4.0, 6.0),
            make_evaluation(6.0, 4.0, 8.0, 7.0),
        ])
        .unwrap();
        assert_eq!(card.answered, 2);
        assert_eq!(card.correctness, 7.0);
        assert_eq!(card.efficiency, 5.0);
        assert_eq!(card.clarity, 6.0);
        assert_eq!(card.overall, 6.5);
        assert_eq!(card.per_question, vec![6.0, 7.0]);
        assert_eq!(card.tier, ProficiencyTier::Intermediate);
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(ProficiencyTier::from_score(5.9), ProficiencyTier::Beginner);
        assert_eq!(ProficiencyTier::from_score(6.0), ProficiencyTier::Intermediate);
        assert_eq!(ProficiencyTier::from_score(7.99), ProficiencyTier::Intermediate);
        assert_eq!(ProficiencyTier::from_score(8.0), ProficiencyTier::Advanced);
    }

    #[test]
    fn test_weakest_dimension() {
        let card = Scorecard::compute(&[make_evaluation(9.0, 3.0, 7.0, 6.0)]).unwrap();
        assert_eq!(card.weakest_dimension(), "efficiency");
    }
}
