//! Audit report types and the placeholder generator.
//!
//! There is no scoring engine behind this yet; `mock_report()` returns the
//! same fixed report on every call and never looks at the form input.

use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub overall_score: u8,
    pub grade: String,
    pub scores: CategoryScores,
    pub top_recommendations: Vec<String>,
    pub competitor_comparison: Vec<CompetitorScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub conversion: u8,
    pub user_experience: u8,
    pub content_quality: u8,
    pub technical: u8,
}

impl CategoryScores {
    /// Labeled scores in display order.
    pub fn entries(&self) -> [(&'static str, u8); 4] {
        [
            ("Conversion", self.conversion),
            ("User Experience", self.user_experience),
            ("Content Quality", self.content_quality),
            ("Technical", self.technical),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorScore {
    pub name: String,
    pub score: u8,
}

/// Exported report wrapper: the report plus the page it claims to cover.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportExport<'a> {
    pub primary_url: &'a str,
    pub company_name: &'a str,
    #[serde(flatten)]
    pub report: &'a AuditReport,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("could not serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Write the report as pretty JSON to `path`.
pub fn export_report(export: &ReportExport<'_>, path: &Path) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(export)?;
    std::fs::write(path, json).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })
}

/// Fixed placeholder report, identical on every call.
pub fn mock_report() -> AuditReport {
    AuditReport {
        overall_score: 78,
        grade: "B+".to_string(),
        scores: CategoryScores {
            conversion: 85,
            user_experience: 72,
            content_quality: 80,
            technical: 75,
        },
        top_recommendations: vec![
            "Add more prominent call-to-action buttons above the fold".to_string(),
            "Improve mobile responsiveness for better user experience".to_string(),
            "Include customer testimonials for social proof".to_string(),
            "Optimize page load speed (currently 4.2s)".to_string(),
            "Strengthen value proposition clarity in headlines".to_string(),
        ],
        competitor_comparison: vec![
            CompetitorScore {
                name: "Competitor 1".to_string(),
                score: 72,
            },
            CompetitorScore {
                name: "Competitor 2".to_string(),
                score: 81,
            },
            CompetitorScore {
                name: "Your Page".to_string(),
                score: 78,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_report_is_fixed() {
        let report = mock_report();
        assert_eq!(report.overall_score, 78);
        assert_eq!(report.grade, "B+");
        assert_eq!(report.scores.conversion, 85);
        assert_eq!(report.scores.user_experience, 72);
        assert_eq!(report.scores.content_quality, 80);
        assert_eq!(report.scores.technical, 75);
        assert_eq!(report.top_recommendations.len(), 5);
        assert_eq!(report.competitor_comparison.len(), 3);
        assert_eq!(report.competitor_comparison[2].name, "Your Page");
        assert_eq!(report.competitor_comparison[2].score, 78);
    }

    #[test]
    fn mock_report_is_deterministic() {
        assert_eq!(mock_report(), mock_report());
    }

    #[test]
    fn export_serializes_camel_case() {
        let report = mock_report();
        let export = ReportExport {
            primary_url: "https://example.com",
            company_name: "Acme",
            report: &report,
        };
        let json = serde_json::to_string(&export).unwrap();
        assert!(json.contains("\"primaryUrl\""));
        assert!(json.contains("\"overallScore\":78"));
        assert!(json.contains("\"userExperience\":72"));
        assert!(json.contains("\"topRecommendations\""));
    }
}
