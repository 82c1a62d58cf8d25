use serde::{Deserialize, Serialize};

/// Eligibility state embedded in the page, read once per load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub streak: i64,
    pub can_claim: bool,
    pub claimed_today: bool,
    pub next_reward: u64,
}

/// Note left in local storage when an allowed claim is triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimIntent {
    pub streak_before: i64,
    pub at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warn,
}

impl ToastKind {
    pub fn class_name(self) -> &'static str {
        match self {
            ToastKind::Success => "signin-toast--success",
            ToastKind::Warn => "signin-toast--warn",
        }
    }
}

/// Fixture persisted by the preview server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PreviewData {
    pub streak: u8,
    pub tasks_done: bool,
    /// Date of the most recent claim, `YYYY-MM-DD`.
    pub claimed_on: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateUpdate {
    pub streak: Option<u8>,
    pub tasks_done: Option<bool>,
    pub claimed_today: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_uses_camel_case_fields() {
        let intent = ClaimIntent {
            streak_before: 3,
            at: 1_700_000_000_000,
        };
        let json = serde_json::to_value(intent).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "streakBefore": 3, "at": 1_700_000_000_000i64 })
        );
    }

    #[test]
    fn intent_rejects_fractional_streak() {
        let parsed = serde_json::from_str::<ClaimIntent>(r#"{"streakBefore":2.5,"at":1}"#);
        assert!(parsed.is_err());
    }
}
