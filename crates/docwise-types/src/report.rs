//! Signature-analysis report
//!
//! The report is computed entirely by the backend; this side only reads and
//! renders it. Statuses are free-form strings such as `"Verified"`,
//! `"Potential Match"` or `"Mismatch"`, so badges are derived with
//! [`ReportTone::classify`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct SignatureAnalysisReportData {
    pub proposal_id: i64,
    pub proposal_name: String,
    #[serde(default)]
    pub proposal_application_number: Option<String>,
    pub generated_at: String,
    pub overall_summary: OverallSummary,
    #[serde(default)]
    pub stakeholder_analyses: Vec<StakeholderAnalysis>,
    #[serde(default)]
    pub cross_stakeholder_uniqueness: Vec<CrossStakeholderComparison>,
}

impl SignatureAnalysisReportData {
    pub fn stakeholder(&self, stakeholder_id: &str) -> Option<&StakeholderAnalysis> {
        self.stakeholder_analyses
            .iter()
            .find(|s| s.stakeholder_id == stakeholder_id)
    }

    /// Look up a signature instance across all stakeholders
    pub fn signature_instance(
        &self,
        signature_instance_id: i64,
    ) -> Option<(&StakeholderAnalysis, &SignatureInstanceDetail)> {
        self.stakeholder_analyses.iter().find_map(|stakeholder| {
            stakeholder
                .signature_instances
                .iter()
                .find(|i| i.signature_instance_id == signature_instance_id)
                .map(|instance| (stakeholder, instance))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct OverallSummary {
    pub documents_analyzed: NamedCount,
    pub stakeholders_identified: NamedCount,
    pub overall_status: StatusSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedCount {
    pub count: u32,
    #[serde(default)]
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub status: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct StakeholderAnalysis {
    /// Backends have sent both numbers and strings here
    #[serde(deserialize_with = "string_or_number")]
    pub stakeholder_id: String,
    pub stakeholder_name: String,
    #[serde(default)]
    pub roles: String,
    pub status: String,
    #[serde(default)]
    pub signature_instances: Vec<SignatureInstanceDetail>,
    pub analysis_results: AnalysisResults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct SignatureInstanceDetail {
    pub signature_instance_id: i64,
    pub document_name: String,
    pub page_number: u32,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct AnalysisResults {
    pub intra_stakeholder_consistency: ConsistencyResult,
    pub inter_stakeholder_uniqueness: UniquenessResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyResult {
    pub result: String,
    /// 0.0 to 1.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ConsistencyResult {
    /// Confidence as a whole percentage, e.g. `0.874` -> `87`
    pub fn confidence_percent(&self) -> Option<u32> {
        self.confidence
            .filter(|c| c.is_finite())
            .map(|c| (c.clamp(0.0, 1.0) * 100.0).round() as u32)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniquenessResult {
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct CrossStakeholderComparison {
    pub stakeholder_pair: String,
    pub comparison_result_description: String,
    pub status: String,
}

/// Visual tone of a free-form report status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportTone {
    Positive,
    Warning,
    Negative,
    Neutral,
}

impl ReportTone {
    pub fn classify(status: &str) -> Self {
        let status = status.to_lowercase();
        // Narrower patterns first: "mismatch" and "potential match" both contain "match".
        if status.contains("mismatch") || status.contains("error") {
            ReportTone::Negative
        } else if status.contains("warning")
            || status.contains("potential match")
            || status.contains("requires review")
        {
            ReportTone::Warning
        } else if status.contains("verified") || status.contains("match") || status.contains("unique")
        {
            ReportTone::Positive
        } else {
            ReportTone::Neutral
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
