// src/report/parser.rs
// Score extraction from the Markdown report the model writes

use once_cell::sync::Lazy;
use regex::Regex;

use crate::session::Scores;

/// Neutral score for a dimension the report does not mention
pub const DEFAULT_DIMENSION_SCORE: f64 = 3.0;

pub const INTENT_EXPERIMENTATION: &str = "Experimentation & Learning";
pub const INTENT_TOOL_ADOPTION: &str = "Tool Adoption";
pub const INTENT_TRANSFORMATION: &str = "Strategic Transformation";

/// `| <label> | <number> |`, optionally written as `<number>/5`
static RE_SCORE_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\|\s*([^|\n]+?)\s*\|\s*(\d+(?:\.\d+)?)(?:\s*/\s*5)?\s*\|").expect("valid regex")
});

/// "Strategic Intent" followed by a table cell or a prose label
static RE_INTENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)strategic\s+intent\s*(?:\*\*)?\s*(?:\||:)\s*(?:\*\*)?\s*([^|\n]+)")
        .expect("valid regex")
});

/// Turns free-form report text into a scores record.
///
/// Implementations must be pure: the same text always yields the same record.
pub trait ReportParser: Send + Sync {
    fn extract_scores(&self, report: &str) -> Scores;
}

/// Regex scan of scorecard rows with a default of 3 per missing dimension
#[derive(Debug, Default, Clone)]
pub struct MarkdownScoreParser;

impl MarkdownScoreParser {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dimension {
    PainPoints,
    DataReadiness,
    OrgReadiness,
    ProcessMaturity,
    StrategicPriorities,
}

fn classify(label: &str) -> Option<Dimension> {
    let label = label.to_lowercase();
    if label.contains("pain") || label.contains("opportunit") {
        Some(Dimension::PainPoints)
    } else if label.contains("data") {
        Some(Dimension::DataReadiness)
    } else if label.contains("organizational") {
        Some(Dimension::OrgReadiness)
    } else if label.contains("process") {
        Some(Dimension::ProcessMaturity)
    } else if label.contains("strategic") && label.contains("priorities") {
        Some(Dimension::StrategicPriorities)
    } else {
        None
    }
}

fn classify_intent(text: &str) -> &'static str {
    let text = text.to_lowercase();
    if text.contains("experimentation") {
        INTENT_EXPERIMENTATION
    } else if text.contains("transformation") {
        INTENT_TRANSFORMATION
    } else {
        INTENT_TOOL_ADOPTION
    }
}

/// Round half away from zero to one decimal place
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl ReportParser for MarkdownScoreParser {
    fn extract_scores(&self, report: &str) -> Scores {
        let mut pain_points = DEFAULT_DIMENSION_SCORE;
        let mut data_readiness = DEFAULT_DIMENSION_SCORE;
        let mut org_readiness = DEFAULT_DIMENSION_SCORE;
        let mut process_maturity = DEFAULT_DIMENSION_SCORE;
        let mut strategic_priorities = DEFAULT_DIMENSION_SCORE;

        // Later rows overwrite earlier ones
        for caps in RE_SCORE_ROW.captures_iter(report) {
            let Ok(score) = caps[2].parse::<f64>() else {
                continue;
            };
            match classify(&caps[1]) {
                Some(Dimension::PainPoints) => pain_points = score,
                Some(Dimension::DataReadiness) => data_readiness = score,
                Some(Dimension::OrgReadiness) => org_readiness = score,
                Some(Dimension::ProcessMaturity) => process_maturity = score,
                Some(Dimension::StrategicPriorities) => strategic_priorities = score,
                None => {}
            }
        }

        let strategic_intent = RE_INTENT
            .captures(report)
            .map(|caps| classify_intent(caps[1].trim()))
            .unwrap_or(INTENT_TOOL_ADOPTION)
            .to_string();

        let overall = round_one_decimal(
            (pain_points + data_readiness + org_readiness + process_maturity + strategic_priorities)
                / 5.0,
        );

        Scores {
            pain_points,
            data_readiness,
            org_readiness,
            process_maturity,
            strategic_priorities,
            strategic_intent,
            overall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::script::SCRIPTED_REPORT;

    #[test]
    fn test_partial_scorecard_uses_defaults() {
        let report = "| Assessment Dimension | Score (1-5) | Key Observations |\n\
                      |---|---|---|\n\
                      | Business Pain Points | 4 | Clear challenges |\n\
                      | Data Readiness | 2.5 | Siloed |\n";
        let scores = MarkdownScoreParser::new().extract_scores(report);

        assert_eq!(scores.pain_points, 4.0);
        assert_eq!(scores.data_readiness, 2.5);
        assert_eq!(scores.org_readiness, 3.0);
        assert_eq!(scores.process_maturity, 3.0);
        assert_eq!(scores.strategic_priorities, 3.0);
        assert_eq!(scores.overall, 3.1);
        assert_eq!(scores.strategic_intent, INTENT_TOOL_ADOPTION);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let parser = MarkdownScoreParser::new();
        assert_eq!(parser.extract_scores(SCRIPTED_REPORT), parser.extract_scores(SCRIPTED_REPORT));
    }

    #[test]
    fn test_full_scorecard() {
        let scores = MarkdownScoreParser::new().extract_scores(SCRIPTED_REPORT);
        assert_eq!(scores.pain_points, 4.0);
        assert_eq!(scores.data_readiness, 3.0);
        assert_eq!(scores.org_readiness, 3.5);
        assert_eq!(scores.process_maturity, 3.2);
        assert_eq!(scores.strategic_priorities, 3.8);
        assert_eq!(scores.overall, 3.5);
        assert_eq!(scores.strategic_intent, INTENT_TOOL_ADOPTION);
    }

    #[test]
    fn test_last_row_wins() {
        let report = "| Process Maturity | 2 |\n| Process Maturity | 5 |\n";
        let scores = MarkdownScoreParser::new().extract_scores(report);
        assert_eq!(scores.process_maturity, 5.0);
    }

    #[test]
    fn test_strategic_needs_priorities() {
        let report = "| Strategic Focus | 5 |\n| Strategic Priorities | 1 |\n";
        let scores = MarkdownScoreParser::new().extract_scores(report);
        assert_eq!(scores.strategic_priorities, 1.0);
    }

    #[test]
    fn test_score_with_out_of_five_suffix() {
        let scores = MarkdownScoreParser::new().extract_scores("| Organizational Readiness | 3.5/5 | ok |");
        assert_eq!(scores.org_readiness, 3.5);
    }

    #[test]
    fn test_intent_from_table_and_prose() {
        let parser = MarkdownScoreParser::new();

        let table = "| AI Strategic Intent | Strategic Transformation | Long-term |";
        assert_eq!(parser.extract_scores(table).strategic_intent, INTENT_TRANSFORMATION);

        let prose = "**Strategic Intent:** Experimentation - small pilots first";
        assert_eq!(parser.extract_scores(prose).strategic_intent, INTENT_EXPERIMENTATION);

        let unknown = "| AI Strategic Intent | Undecided |";
        assert_eq!(parser.extract_scores(unknown).strategic_intent, INTENT_TOOL_ADOPTION);
    }

    #[test]
    fn test_empty_report_is_all_defaults() {
        let scores = MarkdownScoreParser::new().extract_scores("");
        assert_eq!(scores.overall, 3.0);
        assert_eq!(scores.strategic_intent, INTENT_TOOL_ADOPTION);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(round_one_decimal(3.25), 3.3);
        assert_eq!(round_one_decimal(3.14), 3.1);
        assert_eq!(round_one_decimal(15.5 / 5.0), 3.1);
    }
}
