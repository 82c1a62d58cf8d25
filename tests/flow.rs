use proptest::prelude::*;
use signin_toast::headless::{HeadlessEvent, HeadlessNode, HeadlessPage};
use signin_toast::host::{LocalStore, PageDocument, PageNode};
use signin_toast::{ClaimGuard, Outcome, ToastConfig};
use std::time::Duration;

const PAGE_URL: &str = "https://example.test/signin_reward/";
const INTENT_KEY: &str = "signin_claim_intent";

fn mount_state(page: &HeadlessPage, streak: i64, can_claim: bool, claimed_today: bool) {
    let state = page.create_element("div").unwrap();
    state.set_attribute("id", "signin-state").unwrap();
    state.set_attribute("data-streak", &streak.to_string()).unwrap();
    state
        .set_attribute("data-can-claim", if can_claim { "1" } else { "0" })
        .unwrap();
    state
        .set_attribute("data-claimed-today", if claimed_today { "1" } else { "0" })
        .unwrap();
    state.set_attribute("data-next-reward", "0").unwrap();
    page.append_to_body(&state).unwrap();
}

fn mount_claim_form(page: &HeadlessPage) -> (HeadlessNode, HeadlessNode) {
    let form = page.create_element("form").unwrap();
    form.set_attribute("method", "post").unwrap();
    form.set_attribute("action", "/signin_reward/claim/").unwrap();
    let button = page.create_element("button").unwrap();
    button.set_attribute("type", "submit").unwrap();
    page.append_child(&form, &button).unwrap();
    page.append_to_body(&form).unwrap();
    (form, button)
}

/// Claims on a fresh page, then reloads onto a page showing `streak_after`
/// once `delay` has passed. Returns the reloaded page and its resolution.
fn claim_then_reload(
    streak_before: i64,
    streak_after: i64,
    delay: Duration,
) -> (HeadlessPage, Option<String>) {
    let page = HeadlessPage::new(PAGE_URL);
    page.set_now(1_760_000_000_000);
    mount_state(&page, streak_before, true, false);
    let (form, _) = mount_claim_form(&page);

    let guard = ClaimGuard::boot(page.clone(), ToastConfig::default()).unwrap();
    assert_eq!(guard.resolve_after_redirect(), None);
    let event = HeadlessEvent::default();
    assert_eq!(guard.on_submit(Some(&form), &event), Outcome::Allowed);
    assert!(!event.is_cancelled());

    page.advance(delay);
    let reloaded = page.navigate(PAGE_URL);
    mount_state(&reloaded, streak_after, false, true);
    let guard = ClaimGuard::boot(reloaded.clone(), ToastConfig::default()).unwrap();
    let message = guard.resolve_after_redirect();
    (reloaded, message)
}

#[test]
fn successful_claim_shows_day_reward_after_reload() {
    let (page, message) = claim_then_reload(2, 3, Duration::from_secs(2));
    assert_eq!(message.as_deref(), Some("Congratulations! You received €50."));
    assert_eq!(
        page.toast_text().as_deref(),
        Some("Congratulations! You received €50.")
    );

    let toast = page.element_by_id("signin-toast").unwrap();
    assert!(toast.has_class("signin-toast--success"));
    page.run_frames();
    assert!(toast.has_class("is-visible"));
    assert_eq!(page.get_item(INTENT_KEY).unwrap(), None);
}

#[test]
fn fifth_day_includes_bonus() {
    let (_, message) = claim_then_reload(4, 5, Duration::from_secs(1));
    assert_eq!(
        message.as_deref(),
        Some("Congratulations! You received €200 + €350 bonus.")
    );
}

#[test]
fn stale_intent_is_dropped_silently() {
    let (page, message) = claim_then_reload(2, 3, Duration::from_secs(121));
    assert_eq!(message, None);
    assert_eq!(page.toast_text(), None);
    assert_eq!(page.get_item(INTENT_KEY).unwrap(), None);
}

#[test]
fn unchanged_or_reset_streak_shows_nothing() {
    for after in [2, 0] {
        let (page, message) = claim_then_reload(2, after, Duration::from_secs(1));
        assert_eq!(message, None);
        assert_eq!(page.toast_text(), None);
        assert_eq!(page.get_item(INTENT_KEY).unwrap(), None);
    }
}

#[test]
fn intent_is_consumed_by_the_first_reload_only() {
    let (page, message) = claim_then_reload(0, 1, Duration::from_secs(1));
    assert!(message.is_some());

    let again = page.navigate(PAGE_URL);
    mount_state(&again, 1, false, true);
    let guard = ClaimGuard::boot(again.clone(), ToastConfig::default()).unwrap();
    assert_eq!(guard.resolve_after_redirect(), None);
}

#[test]
fn repeated_blocked_clicks_leave_one_toast() {
    let page = HeadlessPage::new(PAGE_URL);
    mount_state(&page, 3, false, true);
    let (_, button) = mount_claim_form(&page);
    let guard = ClaimGuard::boot(page.clone(), ToastConfig::default()).unwrap();

    for _ in 0..5 {
        let event = HeadlessEvent::default();
        assert_eq!(guard.on_click(Some(&button), &event), Outcome::Blocked);
        assert!(event.is_cancelled());
        page.advance(Duration::from_millis(200));
    }
    page.run_frames();

    assert_eq!(page.count_by_id("signin-toast"), 1);
    assert_eq!(page.toast_text().as_deref(), Some("You already claimed today."));
    assert_eq!(page.get_item(INTENT_KEY).unwrap(), None);

    page.advance(Duration::from_secs(4));
    let toast = page.element_by_id("signin-toast").unwrap();
    assert!(!toast.has_class("is-visible"));
}

#[test]
fn page_without_state_element_never_intercepts() {
    let page = HeadlessPage::new(PAGE_URL);
    mount_claim_form(&page);
    assert!(ClaimGuard::boot(page, ToastConfig::default()).is_none());
}

proptest! {
    #[test]
    fn unrelated_elements_pass_through(
        streak in 0i64..=5,
        can_claim: bool,
        claimed_today: bool,
        href in "/(wallet|tasks|info/help|signin_reward)/",
    ) {
        let page = HeadlessPage::new(PAGE_URL);
        mount_state(&page, streak, can_claim, claimed_today);
        let link = page.create_element("a").unwrap();
        link.set_attribute("href", &href).unwrap();
        page.append_to_body(&link).unwrap();
        let form = page.create_element("form").unwrap();
        form.set_attribute("method", "post").unwrap();
        form.set_attribute("action", &href).unwrap();
        page.append_to_body(&form).unwrap();

        let guard = ClaimGuard::boot(page.clone(), ToastConfig::default()).unwrap();
        let click = HeadlessEvent::default();
        let submit = HeadlessEvent::default();
        prop_assert_eq!(guard.on_click(Some(&link), &click), Outcome::Ignored);
        prop_assert_eq!(guard.on_submit(Some(&form), &submit), Outcome::Ignored);
        prop_assert!(!click.is_cancelled());
        prop_assert!(!submit.is_cancelled());
        prop_assert_eq!(page.get_item(INTENT_KEY).unwrap(), None);
        prop_assert_eq!(page.toast_text(), None);
    }

    #[test]
    fn eligible_triggers_record_the_current_streak(streak in 0i64..5) {
        let page = HeadlessPage::new(PAGE_URL);
        mount_state(&page, streak, true, false);
        let marked = page.create_element("span").unwrap();
        marked.set_class_name("js-signin-claim").unwrap();
        page.append_to_body(&marked).unwrap();

        let guard = ClaimGuard::boot(page.clone(), ToastConfig::default()).unwrap();
        let event = HeadlessEvent::default();
        prop_assert_eq!(guard.on_click(Some(&marked), &event), Outcome::Allowed);
        prop_assert!(!event.is_cancelled());
        let stored = page.get_item(INTENT_KEY).unwrap().unwrap();
        let intent: serde_json::Value = serde_json::from_str(&stored).unwrap();
        prop_assert_eq!(intent["streakBefore"].as_i64(), Some(streak));
    }
}
