use crate::config::RewardSchedule;
use crate::models::{PreviewData, Snapshot, StateUpdate};
use chrono::NaiveDate;

/// Streak length that closes a round.
const ROUND_DAYS: u8 = 5;

pub fn snapshot_on(data: &PreviewData, today: NaiveDate, schedule: &RewardSchedule) -> Snapshot {
    let claimed_today = claimed_on(data, today);
    let streak = current_streak(data, claimed_today);
    let can_claim = data.tasks_done && !claimed_today && streak < ROUND_DAYS;
    let next_reward = if can_claim {
        schedule.amounts[usize::from(streak)]
    } else {
        0
    };

    Snapshot {
        streak: i64::from(streak),
        can_claim,
        claimed_today,
        next_reward,
    }
}

/// Advances the fixture by one claimed day. Returns false when the fixture
/// is not claimable today.
pub fn claim_on(data: &mut PreviewData, today: NaiveDate, schedule: &RewardSchedule) -> bool {
    if !snapshot_on(data, today, schedule).can_claim {
        return false;
    }
    data.streak = current_streak(data, false) + 1;
    data.claimed_on = Some(date_key(today));
    true
}

pub fn apply_update(
    data: &mut PreviewData,
    update: &StateUpdate,
    today: NaiveDate,
) -> Result<(), String> {
    if let Some(streak) = update.streak {
        if streak > ROUND_DAYS {
            return Err(format!("streak must be between 0 and {ROUND_DAYS}"));
        }
        data.streak = streak;
    }
    if let Some(tasks_done) = update.tasks_done {
        data.tasks_done = tasks_done;
    }
    match update.claimed_today {
        Some(true) => data.claimed_on = Some(date_key(today)),
        Some(false) => data.claimed_on = None,
        None => {}
    }
    Ok(())
}

fn claimed_on(data: &PreviewData, today: NaiveDate) -> bool {
    data.claimed_on.as_deref() == Some(date_key(today).as_str())
}

/// A finished round reads as a fresh one once its last claim day has passed.
fn current_streak(data: &PreviewData, claimed_today: bool) -> u8 {
    if data.streak >= ROUND_DAYS && !claimed_today {
        0
    } else {
        data.streak
    }
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
