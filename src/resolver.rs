use crate::config::{RewardSchedule, ToastConfig};
use crate::host::{Clock, LocalStore};
use crate::intent::take_intent;
use crate::messages;
use crate::models::{ClaimIntent, Snapshot};
use tracing::debug;

/// Success message for a claim that moved the streak from
/// `intent.streak_before` to `snapshot.streak`, or `None` when the streak did
/// not advance by exactly one day.
pub fn success_message(
    intent: &ClaimIntent,
    snapshot: &Snapshot,
    schedule: &RewardSchedule,
) -> Option<String> {
    let before = intent.streak_before;
    if before.checked_add(1) != Some(snapshot.streak) {
        debug!(before, after = snapshot.streak, "streak did not advance by one");
        return None;
    }

    let day_index = before;
    let message = if day_index == RewardSchedule::LAST_DAY as i64 {
        messages::received_with_bonus(schedule.final_day_amount(), schedule.bonus)
    } else if let Some(amount) = schedule.amount_for(day_index) {
        messages::received(amount)
    } else if snapshot.next_reward > 0 {
        messages::received(snapshot.next_reward)
    } else {
        messages::GENERIC_SUCCESS.to_string()
    };
    Some(message)
}

/// Consumes the pending intent (whatever its fate) and returns the message
/// to show for it, if any.
pub fn resolve_pending<H>(host: &H, config: &ToastConfig, snapshot: &Snapshot) -> Option<String>
where
    H: LocalStore + Clock,
{
    let intent = take_intent(host, config)?;
    success_message(&intent, snapshot, &config.schedule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(streak: i64, next_reward: u64) -> Snapshot {
        Snapshot {
            streak,
            next_reward,
            ..Snapshot::default()
        }
    }

    fn intent(streak_before: i64) -> ClaimIntent {
        ClaimIntent {
            streak_before,
            at: 0,
        }
    }

    #[test]
    fn middle_day_uses_schedule_amount() {
        let schedule = RewardSchedule::default();
        assert_eq!(
            success_message(&intent(2), &snapshot(3, 0), &schedule).as_deref(),
            Some("Congratulations! You received €50.")
        );
        assert_eq!(
            success_message(&intent(0), &snapshot(1, 0), &schedule).as_deref(),
            Some("Congratulations! You received €10.")
        );
    }

    #[test]
    fn final_day_adds_bonus() {
        assert_eq!(
            success_message(&intent(4), &snapshot(5, 0), &RewardSchedule::default()).as_deref(),
            Some("Congratulations! You received €200 + €350 bonus.")
        );
    }

    #[test]
    fn unchanged_or_reset_streak_shows_nothing() {
        let schedule = RewardSchedule::default();
        assert_eq!(success_message(&intent(2), &snapshot(2, 0), &schedule), None);
        assert_eq!(success_message(&intent(2), &snapshot(0, 0), &schedule), None);
        assert_eq!(success_message(&intent(1), &snapshot(3, 0), &schedule), None);
    }

    #[test]
    fn out_of_range_day_falls_back() {
        let schedule = RewardSchedule::default();
        assert_eq!(
            success_message(&intent(5), &snapshot(6, 75), &schedule).as_deref(),
            Some("Congratulations! You received €75.")
        );
        assert_eq!(
            success_message(&intent(7), &snapshot(8, 0), &schedule).as_deref(),
            Some("Congratulations! You received a reward.")
        );
        assert_eq!(
            success_message(&intent(-1), &snapshot(0, 0), &schedule).as_deref(),
            Some("Congratulations! You received a reward.")
        );
    }

    #[test]
    fn overflowing_streak_is_not_an_advance() {
        let schedule = RewardSchedule::default();
        assert_eq!(
            success_message(&intent(i64::MAX), &snapshot(i64::MIN, 0), &schedule),
            None
        );
    }
}
