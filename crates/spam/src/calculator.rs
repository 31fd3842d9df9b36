use crate::error::SpamError;
use mlmath::bayes_theorem;
use serde::{Deserialize, Serialize};

/// Counts describing an email dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailStats {
    pub total_emails: u64,
    pub emails_with_free: u64,
    pub spam_emails: u64,
    /// Emails that are spam and contain "free".
    pub spam_and_free: u64,
}

impl EmailStats {
    pub fn new(total_emails: u64, emails_with_free: u64, spam_emails: u64, spam_and_free: u64) -> Self {
        Self {
            total_emails,
            emails_with_free,
            spam_emails,
            spam_and_free,
        }
    }

    /// 1000 emails, 300 containing "free", 400 spam, 120 both.
    pub fn default_example() -> Self {
        Self::new(1000, 300, 400, 120)
    }

    /// Checks every count against the dataset's logical constraints, reporting
    /// the first violation.
    pub fn validate(&self) -> Result<(), SpamError> {
        if self.total_emails < 1 {
            return Err(SpamError::BelowMinimum {
                field: "total_emails",
                min: 1,
            });
        }
        if self.emails_with_free > self.total_emails {
            return Err(SpamError::ExceedsLimit {
                field: "emails_with_free",
                limit: "total_emails",
            });
        }
        if self.spam_emails > self.total_emails {
            return Err(SpamError::ExceedsLimit {
                field: "spam_emails",
                limit: "total_emails",
            });
        }
        if self.spam_and_free > self.emails_with_free {
            return Err(SpamError::ExceedsLimit {
                field: "spam_and_free",
                limit: "emails_with_free",
            });
        }
        if self.spam_and_free > self.spam_emails {
            return Err(SpamError::ExceedsLimit {
                field: "spam_and_free",
                limit: "spam_emails",
            });
        }
        Ok(())
    }
}

impl Default for EmailStats {
    fn default() -> Self {
        Self::default_example()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpamProbabilities {
    pub p_spam: f64,
    pub p_free: f64,
    pub p_free_given_spam: f64,
    pub p_spam_given_free: f64,
}

/// Validates `stats` and applies Bayes' theorem.
///
/// # Examples
///
/// ```
/// use spam::{calculate_spam_probability, EmailStats};
///
/// let p = calculate_spam_probability(&EmailStats::default_example()).unwrap();
/// assert!((p.p_spam_given_free - 0.4).abs() < 1e-12);
/// ```
pub fn calculate_spam_probability(stats: &EmailStats) -> Result<SpamProbabilities, SpamError> {
    stats.validate()?;

    let total = stats.total_emails as f64;
    let p_spam = stats.spam_emails as f64 / total;
    let p_free = stats.emails_with_free as f64 / total;
    let p_free_given_spam = if stats.spam_emails > 0 {
        stats.spam_and_free as f64 / stats.spam_emails as f64
    } else {
        0.0
    };
    let p_spam_given_free = if p_free > 0.0 {
        bayes_theorem(p_spam, p_free_given_spam, p_free)?
    } else {
        0.0
    };

    tracing::debug!(p_spam, p_free, p_free_given_spam, p_spam_given_free, "Spam probability computed");
    Ok(SpamProbabilities {
        p_spam,
        p_free,
        p_free_given_spam,
        p_spam_given_free,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_example() {
        let p = calculate_spam_probability(&EmailStats::default_example()).expect("valid stats");
        assert!((p.p_spam - 0.4).abs() < 1e-12);
        assert!((p.p_free - 0.3).abs() < 1e-12);
        assert!((p.p_free_given_spam - 0.3).abs() < 1e-12);
        assert!((p.p_spam_given_free - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_zero_denominators_give_zero() {
        let no_spam = calculate_spam_probability(&EmailStats::new(10, 5, 0, 0)).expect("valid stats");
        assert_eq!(no_spam.p_free_given_spam, 0.0);
        assert_eq!(no_spam.p_spam_given_free, 0.0);

        let no_free = calculate_spam_probability(&EmailStats::new(10, 0, 5, 0)).expect("valid stats");
        assert_eq!(no_free.p_spam_given_free, 0.0);
    }

    #[test]
    fn test_every_free_email_is_spam() {
        let p = calculate_spam_probability(&EmailStats::new(100, 20, 50, 20)).expect("valid stats");
        assert!((p.p_spam_given_free - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_validation_messages() {
        let cases = [
            (EmailStats::new(0, 0, 0, 0), "total_emails must be at least 1"),
            (EmailStats::new(10, 11, 0, 0), "emails_with_free cannot exceed total_emails"),
            (EmailStats::new(10, 5, 11, 0), "spam_emails cannot exceed total_emails"),
            (EmailStats::new(10, 3, 8, 4), "spam_and_free cannot exceed emails_with_free"),
            (EmailStats::new(10, 8, 3, 4), "spam_and_free cannot exceed spam_emails"),
        ];
        for (stats, message) in cases {
            let err = calculate_spam_probability(&stats).expect_err("invalid stats");
            assert_eq!(err.to_string(), message);
        }
    }
}
