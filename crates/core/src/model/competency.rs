use serde::{Deserialize, Serialize};
use std::fmt;

/// The five core competencies every question is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Competency {
    /// Macroscopic identification and microscopic analysis.
    MacroMicro,
    /// Change concepts and equilibrium thinking.
    ChangeBalance,
    /// Evidence-based reasoning and model cognition.
    EvidenceModel,
    /// Scientific inquiry and innovation.
    InquiryInnovation,
    /// Scientific attitude and social responsibility.
    AttitudeResponsibility,
}

impl Competency {
    pub const ALL: [Self; 5] = [
        Self::MacroMicro,
        Self::ChangeBalance,
        Self::EvidenceModel,
        Self::InquiryInnovation,
        Self::AttitudeResponsibility,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::MacroMicro => "Macro identification & micro analysis",
            Self::ChangeBalance => "Change & equilibrium",
            Self::EvidenceModel => "Evidence reasoning & modelling",
            Self::InquiryInnovation => "Inquiry & innovation",
            Self::AttitudeResponsibility => "Attitude & social responsibility",
        }
    }
}

impl fmt::Display for Competency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_round_trip() {
        let json = serde_json::to_string(&Competency::EvidenceModel).unwrap();
        assert_eq!(json, "\"evidence_model\"");
        let parsed: Competency = serde_json::from_str("\"attitude_responsibility\"").unwrap();
        assert_eq!(parsed, Competency::AttitudeResponsibility);
    }

    #[test]
    fn all_lists_five_distinct_categories() {
        let mut all = Competency::ALL.to_vec();
        all.dedup();
        assert_eq!(all.len(), 5);
    }
}
