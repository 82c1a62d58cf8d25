use crate::config::ToastConfig;
use crate::errors::IntentError;
use crate::host::{Clock, LocalStore};
use crate::models::ClaimIntent;
use tracing::{debug, warn};

/// Records the streak seen just before an allowed claim. Overwrites any
/// previous record.
pub fn record_intent<H>(host: &H, config: &ToastConfig, streak_before: i64)
where
    H: LocalStore + Clock,
{
    let intent = ClaimIntent {
        streak_before,
        at: host.now_millis(),
    };
    let payload = match serde_json::to_string(&intent) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(%err, "claim intent could not be encoded");
            return;
        }
    };
    match host.set_item(config.storage_key, &payload) {
        Ok(()) => debug!(?intent, "recorded claim intent"),
        Err(err) => warn!(%err, "claim intent could not be stored"),
    }
}

/// Reads and deletes the stored intent. Returns it only when it parses and
/// is still inside the TTL window.
pub fn take_intent<H>(host: &H, config: &ToastConfig) -> Option<ClaimIntent>
where
    H: LocalStore + Clock,
{
    let raw = match host.get_item(config.storage_key) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(%err, "claim intent could not be read");
            None
        }
    };
    if let Err(err) = host.remove_item(config.storage_key) {
        warn!(%err, "claim intent could not be removed");
    }

    let raw = raw?;
    match decode_intent(&raw, host.now_millis(), config.intent_ttl_millis()) {
        Ok(intent) => Some(intent),
        Err(err) => {
            debug!(%err, "discarding claim intent");
            None
        }
    }
}

fn decode_intent(raw: &str, now_ms: i64, ttl_ms: i64) -> Result<ClaimIntent, IntentError> {
    let intent: ClaimIntent = serde_json::from_str(raw)?;
    let age_ms = now_ms.saturating_sub(intent.at);
    if age_ms > ttl_ms {
        return Err(IntentError::Expired { age_ms });
    }
    Ok(intent)
}
