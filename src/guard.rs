use crate::config::ToastConfig;
use crate::host::{CancelableEvent, Host, PageNode};
use crate::intent::record_intent;
use crate::intercept::{Verdict, decide, is_click_trigger, is_submit_trigger};
use crate::models::{Snapshot, ToastKind};
use crate::reader::read_state;
use crate::resolver::resolve_pending;
use crate::toast::ToastPresenter;
use tracing::{debug, info};

/// What a handler did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not a claim trigger; the event was left alone.
    Ignored,
    /// The event was cancelled and a warning shown.
    Blocked,
    /// The event proceeds and a claim intent was recorded.
    Allowed,
}

/// Claim interception for one page load, closed over the snapshot read at
/// boot.
pub struct ClaimGuard<H: Host> {
    host: H,
    config: ToastConfig,
    snapshot: Snapshot,
    toast: ToastPresenter,
}

impl<H: Host> ClaimGuard<H> {
    /// `None` when the page carries no eligibility element.
    pub fn boot(host: H, config: ToastConfig) -> Option<Self> {
        let snapshot = read_state(&host, &config)?;
        let toast = ToastPresenter::new(&config);
        Some(Self {
            host,
            config,
            snapshot,
            toast,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn on_click<E: CancelableEvent>(&self, target: Option<&H::Node>, event: &E) -> Outcome {
        let Some(target) = target else {
            return Outcome::Ignored;
        };
        if !is_click_trigger(target, &self.config) {
            return Outcome::Ignored;
        }
        debug!(tag = %target.tag_name(), "claim trigger clicked");
        self.apply(event)
    }

    /// Inspection failures let the submission through untouched.
    pub fn on_submit<E: CancelableEvent>(&self, form: Option<&H::Node>, event: &E) -> Outcome {
        let Some(form) = form else {
            return Outcome::Ignored;
        };
        match is_submit_trigger(form, &self.config) {
            Ok(true) => {
                debug!("claim form submitted");
                self.apply(event)
            }
            Ok(false) => Outcome::Ignored,
            Err(err) => {
                debug!(%err, "submit inspection failed, letting it through");
                Outcome::Ignored
            }
        }
    }

    /// Runs once per load after the listeners are in place.
    pub fn resolve_after_redirect(&self) -> Option<String> {
        let message = resolve_pending(&self.host, &self.config, &self.snapshot)?;
        info!(%message, "claim confirmed after reload");
        self.toast.show(&self.host, &message, ToastKind::Success);
        Some(message)
    }

    fn apply<E: CancelableEvent>(&self, event: &E) -> Outcome {
        match decide(&self.snapshot) {
            Verdict::Block(message) => {
                event.cancel();
                self.toast.show(&self.host, message, ToastKind::Warn);
                debug!(message, "claim blocked");
                Outcome::Blocked
            }
            Verdict::Allow => {
                record_intent(&self.host, &self.config, self.snapshot.streak);
                Outcome::Allowed
            }
        }
    }
}
