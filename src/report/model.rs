// src/report/model.rs
//! Fully defaulted view of an analysis response
//!
//! The service may leave out any field. Everything is resolved here once, so
//! renderers and observers can read the report without guarding.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use super::classifier::{Component, Tier};
use crate::utils::format_number;

pub const NOT_FOUND: &str = "Not found";
pub const UNAVAILABLE: &str = "N/A";

/// A numeric score, or the marker that the service did not send one.
/// `Unavailable` is never treated as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    Available(f64),
    Unavailable,
}

impl Score {
    fn from_value(value: Option<&Value>) -> Self {
        value
            .and_then(Value::as_f64)
            .map(Score::Available)
            .unwrap_or(Score::Unavailable)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Available(v) => Some(*v),
            Self::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Tier of an overall score; `None` when there is nothing to classify.
    pub fn tier(&self) -> Option<Tier> {
        self.value().map(Tier::classify)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available(v) => f.write_str(&format_number(*v)),
            Self::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Available(v) => serializer.serialize_f64(*v),
            Self::Unavailable => serializer.serialize_none(),
        }
    }
}

/// A contact detail, or the explicit "Not found" placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValue {
    Found(String),
    NotFound,
}

impl ContactValue {
    fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some(s) if !s.is_empty() => Self::Found(s.to_string()),
            _ => Self::NotFound,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Found(s) => s,
            Self::NotFound => NOT_FOUND,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

impl fmt::Display for ContactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ContactValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub relevance: Score,
    pub keyword_match: Score,
    pub formatting: Score,
    pub contact_completeness: Score,
}

impl Breakdown {
    pub fn score(&self, component: Component) -> Score {
        match component {
            Component::Relevance => self.relevance,
            Component::KeywordMatch => self.keyword_match,
            Component::Formatting => self.formatting,
            Component::ContactCompleteness => self.contact_completeness,
        }
    }

    /// Band of one bar. `None` when the sub-score is missing, so the
    /// placeholder is shown instead of an empty red bar.
    pub fn band(&self, component: Component) -> Option<Tier> {
        self.score(component).value().map(|v| component.band(v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, Score)> + '_ {
        Component::ALL.into_iter().map(move |c| (c, self.score(c)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtsScore {
    pub total: Score,
    pub breakdown: Breakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactInfo {
    pub email: ContactValue,
    pub linkedin: ContactValue,
    pub github: ContactValue,
    pub portfolio: ContactValue,
}

impl ContactInfo {
    pub fn entries(&self) -> [(&'static str, &ContactValue); 4] {
        [
            ("Email", &self.email),
            ("LinkedIn", &self.linkedin),
            ("GitHub", &self.github),
            ("Portfolio", &self.portfolio),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MissingSections {
    pub critical: Vec<String>,
    pub recommended: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MissingSkills {
    pub must_have: Vec<String>,
    pub nice_to_have: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub ats_score: AtsScore,
    pub contact_info: ContactInfo,
    pub missing_sections: MissingSections,
    pub missing_skills: MissingSkills,
    pub missing_achievements: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<DateTime<Utc>>,
}

impl AnalysisReport {
    /// Build the report from the whole response body, reading its
    /// `analysis` object. Anything else in the body is ignored.
    pub fn from_response(body: &Value) -> Self {
        Self::normalize(body.get("analysis").unwrap_or(&Value::Null))
    }

    /// Resolve every field of a raw `analysis` object. Never fails: wrong
    /// types count as missing, non-string list items are dropped.
    pub fn normalize(raw: &Value) -> Self {
        let score = |pointer: &str| Score::from_value(raw.pointer(pointer));
        let contact = |key: &str| ContactValue::from_value(raw.pointer(&format!("/contact_info/{key}")));
        let component = |c: Component| {
            Score::from_value(raw.pointer(&format!("/ats_score/breakdown/{}", c.wire_key())))
        };

        Self {
            ats_score: AtsScore {
                total: score("/ats_score/total"),
                breakdown: Breakdown {
                    relevance: component(Component::Relevance),
                    keyword_match: component(Component::KeywordMatch),
                    formatting: component(Component::Formatting),
                    contact_completeness: component(Component::ContactCompleteness),
                },
            },
            contact_info: ContactInfo {
                email: contact("email"),
                linkedin: contact("linkedin"),
                github: contact("github"),
                portfolio: contact("portfolio"),
            },
            missing_sections: MissingSections {
                critical: string_list(raw.pointer("/missing_sections/critical")),
                recommended: string_list(raw.pointer("/missing_sections/recommended")),
            },
            missing_skills: MissingSkills {
                must_have: string_list(raw.pointer("/missing_skills/must_have")),
                nice_to_have: string_list(raw.pointer("/missing_skills/nice_to_have")),
            },
            missing_achievements: string_list(raw.get("missing_achievements")),
            suggestions: string_list(raw.get("suggestions")),
            received_at: None,
        }
    }

    pub fn with_received_at(mut self, at: DateTime<Utc>) -> Self {
        self.received_at = Some(at);
        self
    }

    pub fn total(&self) -> Score {
        self.ats_score.total
    }

    pub fn tier(&self) -> Option<Tier> {
        self.ats_score.total.tier()
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_empty_object() {
        let report = AnalysisReport::normalize(&json!({}));

        assert_eq!(report.total(), Score::Unavailable);
        assert_eq!(report.tier(), None);
        assert!(report.ats_score.breakdown.iter().all(|(_, s)| !s.is_available()));
        for (_, value) in report.contact_info.entries() {
            assert_eq!(value.as_str(), "Not found");
        }
        assert!(report.missing_sections.critical.is_empty());
        assert!(report.missing_sections.recommended.is_empty());
        assert!(report.missing_skills.must_have.is_empty());
        assert!(report.missing_skills.nice_to_have.is_empty());
        assert!(report.missing_achievements.is_empty());
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_normalize_non_object_inputs() {
        for raw in [json!(null), json!([]), json!("analysis"), json!(42)] {
            let report = AnalysisReport::normalize(&raw);
            assert_eq!(report.total(), Score::Unavailable);
            assert!(report.suggestions.is_empty());
        }
    }

    #[test]
    fn test_unavailable_distinct_from_zero() {
        let zero = AnalysisReport::normalize(&json!({"ats_score": {"total": 0}}));
        let missing = AnalysisReport::normalize(&json!({"ats_score": {}}));

        assert_eq!(zero.total(), Score::Available(0.0));
        assert_eq!(zero.total().to_string(), "0");
        assert_eq!(zero.tier(), Some(Tier::Low));
        assert_eq!(missing.total().to_string(), "N/A");
        assert_ne!(zero.total(), missing.total());
    }

    #[test]
    fn test_from_response_full_body() {
        let body = json!({
            "analysis": {
                "ats_score": {
                    "total": 85,
                    "breakdown": {
                        "relevance": 35,
                        "keyword_match": 25,
                        "formatting": 18,
                        "contact_completeness": 7
                    }
                },
                "contact_info": {
                    "email": "jane@example.com",
                    "linkedin": "",
                    "github": "github.com/jane"
                },
                "missing_sections": {"critical": ["Experience"], "recommended": ["Projects"]},
                "missing_skills": {"must_have": ["Rust"], "nice_to_have": ["Kubernetes", 3]},
                "missing_achievements": ["Quantify impact"],
                "suggestions": ["Add a summary"]
            }
        });

        let report = AnalysisReport::from_response(&body);
        assert_eq!(report.total(), Score::Available(85.0));
        assert_eq!(report.tier(), Some(Tier::High));
        assert_eq!(report.ats_score.breakdown.relevance, Score::Available(35.0));
        assert_eq!(
            report.ats_score.breakdown.band(Component::ContactCompleteness),
            Some(Tier::Medium)
        );
        assert_eq!(report.contact_info.email.as_str(), "jane@example.com");
        assert_eq!(report.contact_info.linkedin, ContactValue::NotFound);
        assert!(report.contact_info.github.is_found());
        assert_eq!(report.contact_info.portfolio.as_str(), NOT_FOUND);
        assert_eq!(report.missing_sections.critical, vec!["Experience"]);
        assert_eq!(report.missing_skills.nice_to_have, vec!["Kubernetes"]);
        assert_eq!(report.missing_achievements, vec!["Quantify impact"]);
        assert_eq!(report.suggestions, vec!["Add a summary"]);
    }

    #[test]
    fn test_from_response_without_analysis() {
        let report = AnalysisReport::from_response(&json!({"status": "ok"}));
        assert_eq!(report.total(), Score::Unavailable);
    }

    #[test]
    fn test_wrong_types_count_as_missing() {
        let report = AnalysisReport::normalize(&json!({
            "ats_score": {"total": "85", "breakdown": []},
            "contact_info": {"email": 12},
            "suggestions": {"first": "x"}
        }));
        assert_eq!(report.total(), Score::Unavailable);
        assert_eq!(report.ats_score.breakdown.band(Component::Relevance), None);
        assert_eq!(report.contact_info.email, ContactValue::NotFound);
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_serialized_placeholders() {
        let report = AnalysisReport::normalize(&json!({}));
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["ats_score"]["total"], Value::Null);
        assert_eq!(value["contact_info"]["email"], "Not found");
        assert_eq!(value["suggestions"], json!([]));
        assert!(value.get("received_at").is_none());
    }
}
