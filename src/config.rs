use std::time::Duration;

/// Day 1 through Day 5 payouts, plus the bonus paid on completing Day 5.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardSchedule {
    pub amounts: [u64; 5],
    pub bonus: u64,
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self {
            amounts: [10, 30, 50, 100, 200],
            bonus: 350,
        }
    }
}

impl RewardSchedule {
    /// Index of the final day of a round.
    pub const LAST_DAY: usize = 4;

    pub fn amount_for(&self, day_index: i64) -> Option<u64> {
        usize::try_from(day_index)
            .ok()
            .and_then(|index| self.amounts.get(index).copied())
    }

    pub fn final_day_amount(&self) -> u64 {
        self.amounts[Self::LAST_DAY]
    }
}

/// Names of the data attributes on the eligibility element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateAttributes {
    pub streak: &'static str,
    pub can_claim: &'static str,
    pub claimed_today: &'static str,
    pub next_reward: &'static str,
}

impl Default for StateAttributes {
    fn default() -> Self {
        Self {
            streak: "data-streak",
            can_claim: "data-can-claim",
            claimed_today: "data-claimed-today",
            next_reward: "data-next-reward",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastConfig {
    pub state_element_id: &'static str,
    pub state_attributes: StateAttributes,
    pub trigger_attribute: &'static str,
    pub trigger_class: &'static str,
    pub feature_token: &'static str,
    pub claim_token: &'static str,
    pub storage_key: &'static str,
    pub intent_ttl: Duration,
    pub toast_id: &'static str,
    pub style_id: &'static str,
    pub toast_duration: Duration,
    pub schedule: RewardSchedule,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            state_element_id: "signin-state",
            state_attributes: StateAttributes::default(),
            trigger_attribute: "data-signin-claim",
            trigger_class: "js-signin-claim",
            feature_token: "signin",
            claim_token: "claim",
            storage_key: "signin_claim_intent",
            intent_ttl: Duration::from_secs(120),
            toast_id: "signin-toast",
            style_id: "signin-toast-style",
            toast_duration: Duration::from_millis(3500),
            schedule: RewardSchedule::default(),
        }
    }
}

impl ToastConfig {
    /// True when `url` names the claim action: both tokens, any case.
    pub fn is_claim_url(&self, url: &str) -> bool {
        let url = url.to_ascii_lowercase();
        url.contains(&self.feature_token.to_ascii_lowercase())
            && url.contains(&self.claim_token.to_ascii_lowercase())
    }

    pub fn intent_ttl_millis(&self) -> i64 {
        i64::try_from(self.intent_ttl.as_millis()).unwrap_or(i64::MAX)
    }
}
