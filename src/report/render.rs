// src/report/render.rs
//! Plain terminal rendering of a report, one tab at a time

use colored::{ColoredString, Colorize};
use std::fmt;

use super::classifier::{Component, Tier};
use super::model::{AnalysisReport, Score};
use super::tabs::ActiveTab;

const DEFAULT_BAR_WIDTH: usize = 30;

pub struct ReportRenderer {
    bar_width: usize,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self {
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }
}

impl ReportRenderer {
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width.max(1);
        self
    }

    /// Tab strip with the active tab marked
    pub fn render_tab_bar(&self, active: ActiveTab) -> String {
        ActiveTab::ALL
            .iter()
            .map(|tab| {
                if *tab == active {
                    format!("[{}]", tab.title()).bold().to_string()
                } else {
                    format!(" {} ", tab.title()).dimmed().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    pub fn render(&self, report: &AnalysisReport, tab: ActiveTab) -> String {
        let mut out = self.render_tab_bar(tab);
        out.push_str("\n\n");
        out.push_str(&match tab {
            ActiveTab::Score => self.render_score(report),
            ActiveTab::Missing => self.render_missing(report),
            ActiveTab::Suggestions => self.render_suggestions(report),
        });
        out
    }

    pub fn render_score(&self, report: &AnalysisReport) -> String {
        let mut out = String::new();
        let total = report.total();

        push_line(
            &mut out,
            format!(
                "{} {}",
                "ATS Compatibility Score:".bold(),
                paint(&total.to_string(), total.tier()).bold()
            ),
        );
        match total.tier() {
            Some(tier) => push_line(&mut out, paint(tier.verdict(), Some(tier))),
            None => push_line(&mut out, "Score unavailable for this resume.".dimmed()),
        }
        if let Some(at) = report.received_at {
            let stamp = format!("Analyzed at {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
            push_line(&mut out, stamp.dimmed());
        }
        out.push('\n');

        for (component, score) in report.ats_score.breakdown.iter() {
            push_line(&mut out, component.label().bold());
            push_line(&mut out, format!("  {}", self.progress_bar(component, score)));
            push_line(
                &mut out,
                format!(
                    "  Score: {}/{}  {}",
                    score,
                    component.max(),
                    component.description().dimmed()
                ),
            );
        }

        out.push('\n');
        push_line(&mut out, "Contact Information Found".bold());
        for (label, value) in report.contact_info.entries() {
            let shown = if value.is_found() {
                value.as_str().normal()
            } else {
                value.as_str().dimmed()
            };
            push_line(&mut out, format!("  {:<10} {}", format!("{}:", label), shown));
        }
        out
    }

    pub fn render_missing(&self, report: &AnalysisReport) -> String {
        let mut out = String::new();

        push_line(&mut out, "Missing Sections".bold());
        list_block(
            &mut out,
            "Critical Sections",
            &report.missing_sections.critical,
            "No critical sections missing!",
        );
        list_block(
            &mut out,
            "Recommended Sections",
            &report.missing_sections.recommended,
            "No recommended sections missing!",
        );

        out.push('\n');
        push_line(&mut out, "Missing Skills".bold());
        list_block(
            &mut out,
            "Must-Have Skills",
            &report.missing_skills.must_have,
            "No must-have skills missing!",
        );
        list_block(
            &mut out,
            "Nice-to-Have Skills",
            &report.missing_skills.nice_to_have,
            "No nice-to-have skills missing!",
        );

        out.push('\n');
        push_line(&mut out, "Missing Achievements".bold());
        push_line(
            &mut out,
            "  Consider adding these quantifiable achievements to strengthen your resume:",
        );
        list_items(
            &mut out,
            &report.missing_achievements,
            "No specific achievements suggested!",
        );
        out
    }

    pub fn render_suggestions(&self, report: &AnalysisReport) -> String {
        let mut out = String::new();
        push_line(&mut out, "Improvement Suggestions".bold());
        if report.suggestions.is_empty() {
            push_line(&mut out, format!("  {}", "No specific suggestions available".dimmed()));
        } else {
            for (i, item) in report.suggestions.iter().enumerate() {
                push_line(&mut out, format!("  {}. {}", i + 1, item));
            }
        }
        out
    }

    /// `[#####.....]  62%`; missing sub-scores get an empty bar and `N/A`
    pub fn progress_bar(&self, component: Component, score: Score) -> String {
        let Some(value) = score.value() else {
            return format!("[{}]  {}", " ".repeat(self.bar_width), "N/A".dimmed());
        };

        let percentage = component.percentage(value);
        let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * self.bar_width as f64).round() as usize;
        let bar = format!(
            "{}{}",
            "#".repeat(filled),
            ".".repeat(self.bar_width - filled)
        );
        format!(
            "[{}]  {}",
            paint(&bar, Some(component.band(value))),
            format!("{:.0}%", percentage)
        )
    }
}

fn paint(text: &str, tier: Option<Tier>) -> ColoredString {
    match tier {
        Some(Tier::High) => text.green(),
        Some(Tier::Medium) => text.yellow(),
        Some(Tier::Low) => text.red(),
        None => text.dimmed(),
    }
}

fn push_line(out: &mut String, line: impl fmt::Display) {
    out.push_str(&line.to_string());
    out.push('\n');
}

fn list_block(out: &mut String, title: &str, items: &[String], empty: &str) {
    push_line(out, format!("  {}", title.underline()));
    list_items(out, items, empty);
}

fn list_items(out: &mut String, items: &[String], empty: &str) {
    if items.is_empty() {
        push_line(out, format!("    {}", empty.green()));
    } else {
        for item in items {
            push_line(out, format!("    - {}", item));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> AnalysisReport {
        AnalysisReport::from_response(&json!({
            "analysis": {
                "ats_score": {
                    "total": 85,
                    "breakdown": {"relevance": 35, "keyword_match": 25, "formatting": 18, "contact_completeness": 7}
                },
                "contact_info": {"email": "jane@example.com"},
                "missing_skills": {"must_have": ["Terraform"]},
                "suggestions": ["Lead with measurable results"]
            }
        }))
    }

    #[test]
    fn test_score_tab_shows_total_and_verdict() {
        let text = ReportRenderer::default().render(&sample(), ActiveTab::Score);
        assert!(text.contains("85"));
        assert!(text.contains("Excellent! Your resume is highly ATS compatible."));
        assert!(text.contains("Score: 35/40"));
        assert!(text.contains("Score: 7/10"));
        assert!(text.contains("jane@example.com"));
        assert!(text.contains("Not found"));
    }

    #[test]
    fn test_empty_report_renders_placeholders() {
        let report = AnalysisReport::normalize(&json!({}));
        let renderer = ReportRenderer::default();

        let score = renderer.render_score(&report);
        assert!(score.contains("N/A"));
        assert!(score.contains("Score: N/A/40"));
        assert!(!score.contains("Excellent"));

        let missing = renderer.render_missing(&report);
        assert!(missing.contains("No critical sections missing!"));
        assert!(missing.contains("No specific achievements suggested!"));

        let suggestions = renderer.render_suggestions(&report);
        assert!(suggestions.contains("No specific suggestions available"));
    }

    #[test]
    fn test_missing_and_suggestion_items_listed() {
        let renderer = ReportRenderer::default();
        assert!(renderer.render_missing(&sample()).contains("- Terraform"));
        assert!(renderer
            .render_suggestions(&sample())
            .contains("1. Lead with measurable results"));
    }

    #[test]
    fn test_each_entry_on_its_own_line() {
        let text = ReportRenderer::default().render_suggestions(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("1. Lead with measurable results"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_progress_bar_fill() {
        let renderer = ReportRenderer::default().with_bar_width(10);
        let bar = renderer.progress_bar(Component::Relevance, Score::Available(20.0));
        assert!(bar.contains("#####....."));
        assert!(bar.ends_with("50%"));

        let over = renderer.progress_bar(Component::ContactCompleteness, Score::Available(12.0));
        assert!(over.contains("##########"));

        let missing = renderer.progress_bar(Component::Formatting, Score::Unavailable);
        assert!(missing.contains("N/A"));
        assert!(!missing.contains('#'));
    }
}
