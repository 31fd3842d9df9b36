use crate::calculator::{calculate_spam_probability, EmailStats, SpamProbabilities};
use crate::error::SpamError;
use serde::Serialize;
use std::fmt;

/// The inputs and results of one calculation, printable as a worked example.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpamReport {
    pub stats: EmailStats,
    pub probabilities: SpamProbabilities,
}

impl SpamReport {
    pub fn new(stats: EmailStats) -> Result<Self, SpamError> {
        let probabilities = calculate_spam_probability(&stats)?;
        Ok(Self {
            stats,
            probabilities,
        })
    }
}

/// Formats a count with comma thousands separators: `1234567` -> `"1,234,567"`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for SpamReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = &self.stats;
        let p = &self.probabilities;
        let rule = "=".repeat(60);

        writeln!(f, "{rule}")?;
        writeln!(f, "BAYES' THEOREM SPAM PROBABILITY CALCULATION")?;
        writeln!(f, "{rule}")?;

        writeln!(f, "\nInput Data:")?;
        writeln!(f, "- Total emails: {}", thousands(s.total_emails))?;
        writeln!(f, "- Emails containing 'free': {}", thousands(s.emails_with_free))?;
        writeln!(f, "- Spam emails: {}", thousands(s.spam_emails))?;
        writeln!(
            f,
            "- Emails that are both spam and contain 'free': {}",
            thousands(s.spam_and_free)
        )?;

        writeln!(f, "\nCalculated Probabilities:")?;
        writeln!(f, "- P(Spam) = {}/{} = {:.4}", s.spam_emails, s.total_emails, p.p_spam)?;
        writeln!(f, "- P(Free) = {}/{} = {:.4}", s.emails_with_free, s.total_emails, p.p_free)?;
        writeln!(
            f,
            "- P(Free | Spam) = {}/{} = {:.4}",
            s.spam_and_free, s.spam_emails, p.p_free_given_spam
        )?;

        writeln!(f, "\nBayes' Theorem:")?;
        writeln!(f, "P(Spam | Free) = P(Free | Spam) × P(Spam) / P(Free)")?;
        writeln!(
            f,
            "P(Spam | Free) = {:.4} × {:.4} / {:.4}",
            p.p_free_given_spam, p.p_spam, p.p_free
        )?;
        writeln!(f, "P(Spam | Free) = {:.4}", p.p_spam_given_free)?;

        writeln!(f, "\nRESULT:")?;
        writeln!(f, "P(Spam | Email contains 'free') = {:.4}", p.p_spam_given_free)?;
        write!(
            f,
            "This means {:.1}% of emails containing 'free' are spam.",
            p.p_spam_given_free * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_separator() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_report_text() {
        let report = SpamReport::new(EmailStats::default_example()).expect("valid stats");
        let text = report.to_string();
        assert!(text.contains("- Total emails: 1,000"));
        assert!(text.contains("- P(Spam) = 400/1000 = 0.4000"));
        assert!(text.contains("P(Spam | Free) = 0.3000 × 0.4000 / 0.3000"));
        assert!(text.ends_with("This means 40.0% of emails containing 'free' are spam."));
    }

    #[test]
    fn test_report_rejects_invalid_stats() {
        assert!(SpamReport::new(EmailStats::new(10, 20, 0, 0)).is_err());
    }
}
