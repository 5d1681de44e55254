// src/report/classifier.rs
//! Score tiers and the sub-score bars built on the same thresholds

use serde::Serialize;
use std::fmt;

pub const HIGH_THRESHOLD: f64 = 80.0;
pub const MEDIUM_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    /// Lower bounds are inclusive: 80 is high, 60 is medium.
    pub fn classify(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            Self::High => "Excellent! Your resume is highly ATS compatible.",
            Self::Medium => "Good. Your resume needs some improvements.",
            Self::Low => "Needs work. Your resume may not pass ATS systems.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four parts of the total, each with its own maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Relevance,
    KeywordMatch,
    Formatting,
    ContactCompleteness,
}

impl Component {
    pub const ALL: [Component; 4] = [
        Self::Relevance,
        Self::KeywordMatch,
        Self::Formatting,
        Self::ContactCompleteness,
    ];

    pub fn max(&self) -> f64 {
        match self {
            Self::Relevance => 40.0,
            Self::KeywordMatch => 30.0,
            Self::Formatting => 20.0,
            Self::ContactCompleteness => 10.0,
        }
    }

    /// Key in the `ats_score.breakdown` object
    pub fn wire_key(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::KeywordMatch => "keyword_match",
            Self::Formatting => "formatting",
            Self::ContactCompleteness => "contact_completeness",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Relevance => "Relevance",
            Self::KeywordMatch => "Keyword Match",
            Self::Formatting => "Formatting",
            Self::ContactCompleteness => "Contact Info",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Relevance => "How well your resume matches the job",
            Self::KeywordMatch => "Important keywords found",
            Self::Formatting => "Resume structure and readability",
            Self::ContactCompleteness => "Contact details completeness",
        }
    }

    /// Share of the component maximum, in percent
    pub fn percentage(&self, value: f64) -> f64 {
        value / self.max() * 100.0
    }

    /// Visual band of a sub-score bar
    pub fn band(&self, value: f64) -> Tier {
        Tier::classify(self.percentage(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(Tier::classify(80.0), Tier::High);
        assert_eq!(Tier::classify(79.0), Tier::Medium);
        assert_eq!(Tier::classify(60.0), Tier::Medium);
        assert_eq!(Tier::classify(59.0), Tier::Low);
        assert_eq!(Tier::classify(59.9), Tier::Low);
        assert_eq!(Tier::classify(0.0), Tier::Low);
        assert_eq!(Tier::classify(100.0), Tier::High);
    }

    #[test]
    fn test_component_maxima() {
        let maxima: Vec<f64> = Component::ALL.iter().map(Component::max).collect();
        assert_eq!(maxima, vec![40.0, 30.0, 20.0, 10.0]);
    }

    #[test]
    fn test_component_bands() {
        // 32/40 = 80%
        assert_eq!(Component::Relevance.band(32.0), Tier::High);
        // 18/30 = 60%
        assert_eq!(Component::KeywordMatch.band(18.0), Tier::Medium);
        // 11/20 = 55%
        assert_eq!(Component::Formatting.band(11.0), Tier::Low);
        assert_eq!(Component::ContactCompleteness.band(7.0), Tier::Medium);
        assert_eq!(Component::ContactCompleteness.percentage(7.0), 70.0);
    }

    #[test]
    fn test_verdicts() {
        assert!(Tier::High.verdict().starts_with("Excellent"));
        assert!(Tier::Medium.verdict().starts_with("Good"));
        assert!(Tier::Low.verdict().starts_with("Needs work"));
    }
}
