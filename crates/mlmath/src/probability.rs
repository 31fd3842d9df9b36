//! Elementary probability: conditional, Bayes, joint and marginal.

use crate::error::{MathError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tolerance applied when checking that a sum of probabilities does not exceed 1.
pub const SUM_TOLERANCE: f64 = 1e-12;

/// Raw counts for the classic "emails containing *free*" example.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpamCounts {
    pub total: u64,
    pub contains_free: u64,
    pub spam: u64,
    pub spam_and_free: u64,
}

/// The input shapes accepted by [`conditional_probability`].
#[derive(Debug, Clone, PartialEq)]
pub enum EventData {
    /// Count data for the spam/free scenario.
    Spam(SpamCounts),
    /// Probabilities of two events and of their intersection.
    Direct { p_a: f64, p_b: f64, p_a_and_b: f64 },
    /// Arbitrary named counts out of a common total.
    Counts {
        total: f64,
        counts: BTreeMap<String, f64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpamConditionals {
    pub p_spam: f64,
    pub p_free: f64,
    pub p_free_given_spam: f64,
    pub p_spam_given_free: f64,
    pub p_spam_and_free: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectConditionals {
    pub p_a: f64,
    pub p_b: f64,
    pub p_a_and_b: f64,
    pub p_a_given_b: f64,
    pub p_b_given_a: f64,
}

/// Output of [`conditional_probability`], one variant per [`EventData`] variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Conditional {
    Spam(SpamConditionals),
    Direct(DirectConditionals),
    /// `P_<name>` for every named count.
    Counts(BTreeMap<String, f64>),
}

/// Whether the second probability passed to [`joint_probability`] is marginal or conditional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dependence {
    /// `P(A and B) = P(A) × P(B)`
    #[default]
    Independent,
    /// The second argument is `P(B|A)`, so `P(A and B) = P(A) × P(B|A)`.
    Dependent,
}

fn check_probability(name: &'static str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(MathError::ProbabilityOutOfRange { name, value });
    }
    Ok(())
}

/// Ratio that falls back to zero when the conditioning event never occurs.
fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Calculates conditional probabilities from counts or from direct probabilities.
///
/// # Examples
///
/// ```
/// use mlmath::{conditional_probability, Conditional, EventData, SpamCounts};
///
/// let events = EventData::Spam(SpamCounts { total: 1000, contains_free: 300, spam: 400, spam_and_free: 120 });
/// let Conditional::Spam(p) = conditional_probability(&events).unwrap() else { unreachable!() };
/// assert!((p.p_spam_given_free - 0.4).abs() < 1e-12);
/// ```
pub fn conditional_probability(events: &EventData) -> Result<Conditional> {
    match events {
        EventData::Spam(counts) => spam_conditionals(counts).map(Conditional::Spam),
        EventData::Direct {
            p_a,
            p_b,
            p_a_and_b,
        } => direct_conditionals(*p_a, *p_b, *p_a_and_b).map(Conditional::Direct),
        EventData::Counts { total, counts } => {
            general_probabilities(*total, counts).map(Conditional::Counts)
        }
    }
}

fn spam_conditionals(c: &SpamCounts) -> Result<SpamConditionals> {
    if c.total == 0 {
        return Err(MathError::InvalidCounts("Total must be positive".to_string()));
    }
    if c.contains_free > c.total || c.spam > c.total {
        return Err(MathError::InvalidCounts(
            "Individual counts cannot exceed total".to_string(),
        ));
    }
    if c.spam_and_free > c.contains_free.min(c.spam) {
        return Err(MathError::InvalidCounts(
            "Joint count cannot exceed individual counts".to_string(),
        ));
    }

    let total = c.total as f64;
    let free = c.contains_free as f64;
    let spam = c.spam as f64;
    let both = c.spam_and_free as f64;

    Ok(SpamConditionals {
        p_spam: spam / total,
        p_free: free / total,
        p_free_given_spam: ratio_or_zero(both, spam),
        p_spam_given_free: ratio_or_zero(both, free),
        p_spam_and_free: both / total,
    })
}

fn direct_conditionals(p_a: f64, p_b: f64, p_a_and_b: f64) -> Result<DirectConditionals> {
    check_probability("P(A)", p_a)?;
    check_probability("P(B)", p_b)?;
    check_probability("P(A and B)", p_a_and_b)?;
    if p_a_and_b > p_a.min(p_b) {
        return Err(MathError::JointExceedsMarginal);
    }

    Ok(DirectConditionals {
        p_a,
        p_b,
        p_a_and_b,
        p_a_given_b: ratio_or_zero(p_a_and_b, p_b),
        p_b_given_a: ratio_or_zero(p_a_and_b, p_a),
    })
}

fn general_probabilities(total: f64, counts: &BTreeMap<String, f64>) -> Result<BTreeMap<String, f64>> {
    if !total.is_finite() || total <= 0.0 {
        return Err(MathError::InvalidCounts("Total must be positive".to_string()));
    }

    counts
        .iter()
        .map(|(key, &value)| {
            if !value.is_finite() || value < 0.0 {
                return Err(MathError::InvalidCounts(format!(
                    "Count for {key} cannot be negative"
                )));
            }
            if value > total {
                return Err(MathError::InvalidCounts(format!(
                    "Count for {key} cannot exceed total"
                )));
            }
            Ok((format!("P_{key}"), value / total))
        })
        .collect()
}

/// Bayes' theorem: `P(A|B) = P(B|A) × P(A) / P(B)`.
///
/// # Arguments
///
/// * `prior` - `P(A)`
/// * `likelihood` - `P(B|A)`
/// * `evidence` - `P(B)`, must be non-zero
///
/// # Examples
///
/// ```
/// use mlmath::bayes_theorem;
///
/// assert!((bayes_theorem(0.4, 0.3, 0.3).unwrap() - 0.4).abs() < 1e-12);
/// assert!((bayes_theorem(0.01, 0.9, 0.05).unwrap() - 0.18).abs() < 1e-12);
/// ```
pub fn bayes_theorem(prior: f64, likelihood: f64, evidence: f64) -> Result<f64> {
    check_probability("Prior probability", prior)?;
    check_probability("Likelihood", likelihood)?;
    check_probability("Evidence probability", evidence)?;
    if evidence == 0.0 {
        return Err(MathError::ZeroEvidence);
    }
    Ok(likelihood * prior / evidence)
}

/// `P(A and B)`.
///
/// For [`Dependence::Dependent`] events, `prob_b` must already be `P(B|A)`; the
/// arithmetic is the same product either way.
pub fn joint_probability(prob_a: f64, prob_b: f64, dependence: Dependence) -> Result<f64> {
    check_probability("Probability of A", prob_a)?;
    check_probability("Probability of B", prob_b)?;
    match dependence {
        Dependence::Independent | Dependence::Dependent => Ok(prob_a * prob_b),
    }
}

/// `P(A) = Σ P(A and Bi)` over a partition `Bi`.
pub fn marginal_probability(joint_probs: &[f64]) -> Result<f64> {
    if joint_probs.is_empty() {
        return Err(MathError::EmptyList);
    }
    for &p in joint_probs {
        check_probability("Joint probability", p)?;
    }
    let sum: f64 = joint_probs.iter().sum();
    if sum > 1.0 + SUM_TOLERANCE {
        return Err(MathError::ProbabilitySumExceedsOne(sum));
    }
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_bayes_literal_inputs() {
        assert!(close(bayes_theorem(0.4, 0.3, 0.3).expect("valid"), 0.4));
        assert!(close(bayes_theorem(0.01, 0.9, 0.05).expect("valid"), 0.18));
    }

    #[test]
    fn test_bayes_matches_identity() {
        for &(prior, likelihood, evidence) in &[(0.2, 0.5, 0.25), (0.7, 0.1, 0.9), (1.0, 1.0, 1.0)] {
            let posterior = bayes_theorem(prior, likelihood, evidence).expect("valid");
            assert!(close(posterior * evidence, likelihood * prior));
        }
    }

    #[test]
    fn test_bayes_validation() {
        assert_eq!(bayes_theorem(0.5, 0.5, 0.0), Err(MathError::ZeroEvidence));
        let err = bayes_theorem(1.5, 0.5, 0.5).unwrap_err();
        assert_eq!(err.to_string(), "Prior probability must be between 0 and 1, got 1.5");
        assert!(bayes_theorem(0.5, -0.1, 0.5).is_err());
        assert!(bayes_theorem(0.5, 0.5, 1.1).is_err());
        assert!(bayes_theorem(f64::NAN, 0.5, 0.5).is_err());
    }

    #[test]
    fn test_conditional_spam_counts() {
        let events = EventData::Spam(SpamCounts {
            total: 1000,
            contains_free: 300,
            spam: 400,
            spam_and_free: 120,
        });
        let Conditional::Spam(p) = conditional_probability(&events).expect("valid counts") else {
            panic!("expected spam conditionals");
        };
        assert!(close(p.p_spam, 0.4));
        assert!(close(p.p_free, 0.3));
        assert!(close(p.p_free_given_spam, 0.3));
        assert!(close(p.p_spam_given_free, 0.4));
        assert!(close(p.p_spam_and_free, 0.12));
    }

    #[test]
    fn test_conditional_spam_counts_invalid() {
        let base = SpamCounts {
            total: 10,
            contains_free: 5,
            spam: 5,
            spam_and_free: 2,
        };
        let zero_total = SpamCounts { total: 0, ..base };
        let too_many = SpamCounts { spam: 11, ..base };
        let joint = SpamCounts {
            spam_and_free: 6,
            ..base
        };
        for counts in [zero_total, too_many, joint] {
            assert!(matches!(
                conditional_probability(&EventData::Spam(counts)),
                Err(MathError::InvalidCounts(_))
            ));
        }
    }

    #[test]
    fn test_conditional_spam_zero_condition_counts() {
        let events = EventData::Spam(SpamCounts {
            total: 10,
            contains_free: 0,
            spam: 0,
            spam_and_free: 0,
        });
        let Conditional::Spam(p) = conditional_probability(&events).expect("valid counts") else {
            panic!("expected spam conditionals");
        };
        assert_eq!(p.p_free_given_spam, 0.0);
        assert_eq!(p.p_spam_given_free, 0.0);
    }

    #[test]
    fn test_conditional_direct() {
        let events = EventData::Direct {
            p_a: 0.3,
            p_b: 0.4,
            p_a_and_b: 0.12,
        };
        let Conditional::Direct(p) = conditional_probability(&events).expect("valid") else {
            panic!("expected direct conditionals");
        };
        assert!(close(p.p_a_given_b, 0.3));
        assert!(close(p.p_b_given_a, 0.4));

        let bad = EventData::Direct {
            p_a: 0.1,
            p_b: 0.4,
            p_a_and_b: 0.2,
        };
        assert_eq!(
            conditional_probability(&bad),
            Err(MathError::JointExceedsMarginal)
        );
    }

    #[test]
    fn test_conditional_general_counts() {
        let mut counts = BTreeMap::new();
        counts.insert("rain".to_string(), 30.0);
        counts.insert("sun".to_string(), 70.0);
        let events = EventData::Counts {
            total: 100.0,
            counts,
        };
        let Conditional::Counts(p) = conditional_probability(&events).expect("valid") else {
            panic!("expected count probabilities");
        };
        assert!(close(p["P_rain"], 0.3));
        assert!(close(p["P_sun"], 0.7));

        let mut over = BTreeMap::new();
        over.insert("x".to_string(), 101.0);
        let err = conditional_probability(&EventData::Counts {
            total: 100.0,
            counts: over,
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid counts: Count for x cannot exceed total");
    }

    #[test]
    fn test_joint_probability() {
        assert!(close(
            joint_probability(0.3, 0.4, Dependence::Independent).expect("valid"),
            0.12
        ));
        assert!(close(
            joint_probability(0.5, 0.6, Dependence::Dependent).expect("valid"),
            0.3
        ));
        assert!(joint_probability(1.2, 0.5, Dependence::Independent).is_err());
    }

    #[test]
    fn test_marginal_probability() {
        assert!(close(marginal_probability(&[0.2, 0.3, 0.1]).expect("valid"), 0.6));
        assert!(close(marginal_probability(&[0.15, 0.25, 0.35]).expect("valid"), 0.75));
        assert_eq!(marginal_probability(&[]), Err(MathError::EmptyList));
        assert!(matches!(
            marginal_probability(&[0.6, 0.6]),
            Err(MathError::ProbabilitySumExceedsOne(_))
        ));
        assert!(marginal_probability(&[0.1, 0.2, 0.3, 0.4]).is_ok());
    }
}
