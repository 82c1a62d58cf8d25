//! Heuristic recognition of claim triggers and the block/allow decision.
//!
//! The host markup is not ours, so an element counts as a trigger when it
//! carries the marker attribute, the marker class, or points at a URL naming
//! the claim action. Anything unrecognised passes through.

use crate::config::ToastConfig;
use crate::errors::HostError;
use crate::host::PageNode;
use crate::messages;
use crate::models::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Cancel the event and warn with the message.
    Block(&'static str),
    /// Let the event through and record a claim intent.
    Allow,
}

pub fn decide(snapshot: &Snapshot) -> Verdict {
    if snapshot.claimed_today {
        Verdict::Block(messages::ALREADY_CLAIMED)
    } else if !snapshot.can_claim {
        Verdict::Block(messages::NEEDS_MORE_TASKS)
    } else {
        Verdict::Allow
    }
}

pub fn is_click_trigger<N: PageNode>(target: &N, config: &ToastConfig) -> bool {
    let marked = target
        .closest(|node| {
            node.attribute(config.trigger_attribute).is_some()
                || node.has_class(config.trigger_class)
        })
        .is_some();
    if marked {
        return true;
    }

    target
        .closest(is_action_control::<N>)
        .and_then(|control| action_url(&control))
        .is_some_and(|url| config.is_claim_url(&url))
}

/// A submitted form is a trigger when it POSTs to the claim URL.
pub fn is_submit_trigger<N: PageNode>(form: &N, config: &ToastConfig) -> Result<bool, HostError> {
    let fields = form.inspect_form()?;
    Ok(fields.method.trim().eq_ignore_ascii_case("post") && config.is_claim_url(&fields.action))
}

fn is_action_control<N: PageNode>(node: &N) -> bool {
    match node.tag_name().as_str() {
        "a" | "button" => true,
        "input" => node
            .attribute("type")
            .is_some_and(|kind| kind.eq_ignore_ascii_case("submit")),
        _ => false,
    }
}

fn action_url<N: PageNode>(control: &N) -> Option<String> {
    if control.tag_name() == "a" {
        control.resolved_href()
    } else {
        control.form_action()
    }
}
