pub const ALREADY_CLAIMED: &str = "You already claimed today.";
pub const NEEDS_MORE_TASKS: &str = "Complete more tasks to get reward.";
pub const GENERIC_SUCCESS: &str = "Congratulations! You received a reward.";

pub fn received(amount: u64) -> String {
    format!("Congratulations! You received €{amount}.")
}

pub fn received_with_bonus(amount: u64, bonus: u64) -> String {
    format!("Congratulations! You received €{amount} + €{bonus} bonus.")
}
