use crate::config::ToastConfig;
use crate::host::{PageDocument, PageNode};
use crate::models::Snapshot;
use tracing::debug;

/// Reads the eligibility snapshot, or `None` when the page has no state
/// element and the toast layer should stay inactive.
pub fn read_state<D: PageDocument>(document: &D, config: &ToastConfig) -> Option<Snapshot> {
    let Some(element) = document.element_by_id(config.state_element_id) else {
        debug!(id = config.state_element_id, "no eligibility element on page");
        return None;
    };

    let attrs = &config.state_attributes;
    let snapshot = Snapshot {
        streak: parse_int(element.attribute(attrs.streak).as_deref()),
        can_claim: parse_flag(element.attribute(attrs.can_claim).as_deref()),
        claimed_today: parse_flag(element.attribute(attrs.claimed_today).as_deref()),
        next_reward: parse_int(element.attribute(attrs.next_reward).as_deref())
            .try_into()
            .unwrap_or(0),
    };
    debug!(?snapshot, "read eligibility snapshot");
    Some(snapshot)
}

/// Leading-integer parse in the manner of `parseInt(value, 10)`, 0 on failure.
fn parse_int(value: Option<&str>) -> i64 {
    let Some(value) = value else {
        return 0;
    };
    let trimmed = value.trim_start();
    let digits_end = trimmed
        .char_indices()
        .find(|&(index, ch)| !(ch.is_ascii_digit() || (index == 0 && (ch == '-' || ch == '+'))))
        .map(|(index, _)| index)
        .unwrap_or(trimmed.len());
    trimmed[..digits_end].parse().unwrap_or(0)
}

fn parse_flag(value: Option<&str>) -> bool {
    value == Some("1")
}
