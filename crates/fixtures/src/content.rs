//! Canned assistant strings and the canned report analysis

use serde::{Deserialize, Serialize};

/// Fixed strings standing in for assistant replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CannedResponse {
    /// Seed message of every new conversation
    Greeting,
    /// Reply to every user turn
    FollowUp,
}

impl CannedResponse {
    pub fn text(&self) -> &'static str {
        match self {
            Self::Greeting => GREETING,
            Self::FollowUp => FOLLOW_UP,
        }
    }
}

const GREETING: &str = "I'm your AI health assistant. To help you better, could you describe \
your main symptoms and how long you've had them?";

const FOLLOW_UP: &str = "Thank you for sharing. Based on what you've described, I recommend:\n\n\
1. Rest and hydration\n\
2. Over-the-counter pain relief if needed (e.g. paracetamol)\n\
3. Monitor your temperature\n\n\
**This is guidance only, not a diagnosis or prescription.** Please consult a certified doctor \
for a proper evaluation. Would you like me to help you book an appointment?";

/// Location reported by the emergency flow in place of real geolocation
pub const MOCK_LOCATION: &str = "123 Main St, City (Mock)";

/// Result of analyzing an uploaded medical report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportAnalysis {
    pub summary: String,
    pub observations: Vec<String>,
    pub suggested_steps: Vec<String>,
}

pub(crate) fn canned_analysis() -> ReportAnalysis {
    ReportAnalysis {
        summary: "The uploaded report appears to be a routine blood panel. Key metrics are \
within normal ranges with minor variations noted below."
            .to_string(),
        observations: vec![
            "Hemoglobin: Within normal range".to_string(),
            "Blood sugar (fasting): Slightly elevated – consider follow-up".to_string(),
            "Cholesterol: Borderline – lifestyle advice may help".to_string(),
        ],
        suggested_steps: vec![
            "Discuss results with a certified doctor for personalized advice".to_string(),
            "Consider a follow-up test in 3 months if advised".to_string(),
            "Maintain a balanced diet and regular exercise".to_string(),
        ],
    }
}
