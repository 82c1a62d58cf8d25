use crate::config::ToastConfig;
use crate::errors::HostError;
use crate::host::{PageDocument, PageNode, Scheduler};
use crate::models::ToastKind;
use std::time::Duration;
use tracing::{debug, warn};

const BASE_CLASS: &str = "signin-toast";
const VISIBLE_CLASS: &str = "is-visible";

const TOAST_CSS: &str = r#"
#signin-toast {
  position: fixed;
  left: 50%;
  bottom: 24px;
  transform: translate(-50%, 12px);
  max-width: min(420px, calc(100vw - 32px));
  padding: 12px 18px;
  border-radius: 12px;
  font: 500 15px/1.4 system-ui, sans-serif;
  color: #fff;
  box-shadow: 0 12px 32px rgba(0, 0, 0, 0.18);
  opacity: 0;
  pointer-events: none;
  transition: opacity 220ms ease, transform 220ms ease;
  z-index: 2147483000;
}
#signin-toast.is-visible {
  opacity: 1;
  transform: translate(-50%, 0);
}
#signin-toast.signin-toast--success { background: #1f9d55; }
#signin-toast.signin-toast--warn { background: #d97706; }
"#;

/// Singleton notification element with a timed fade.
#[derive(Debug, Clone)]
pub struct ToastPresenter {
    toast_id: &'static str,
    style_id: &'static str,
    default_duration: Duration,
}

impl ToastPresenter {
    pub fn new(config: &ToastConfig) -> Self {
        Self {
            toast_id: config.toast_id,
            style_id: config.style_id,
            default_duration: config.toast_duration,
        }
    }

    pub fn show<H>(&self, host: &H, text: &str, kind: ToastKind)
    where
        H: PageDocument + Scheduler,
    {
        self.show_for(host, text, kind, self.default_duration);
    }

    /// Later calls overwrite earlier ones; nothing is queued.
    pub fn show_for<H>(&self, host: &H, text: &str, kind: ToastKind, duration: Duration)
    where
        H: PageDocument + Scheduler,
    {
        if let Err(err) = self.try_show(host, text, kind, duration) {
            warn!(%err, "toast could not be shown");
        }
    }

    fn try_show<H>(
        &self,
        host: &H,
        text: &str,
        kind: ToastKind,
        duration: Duration,
    ) -> Result<(), HostError>
    where
        H: PageDocument + Scheduler,
    {
        let element = self.ensure_element(host)?;
        element.set_class_name(&format!("{BASE_CLASS} {}", kind.class_name()))?;
        element.set_text(text)?;
        debug!(?kind, text, "showing toast");

        let fade_in = element.clone();
        host.next_frame(Box::new(move || {
            if let Err(err) = fade_in.add_class(VISIBLE_CLASS) {
                warn!(%err, "toast fade-in failed");
            }
        }));
        host.set_timeout(
            duration,
            Box::new(move || {
                if let Err(err) = element.remove_class(VISIBLE_CLASS) {
                    warn!(%err, "toast fade-out failed");
                }
            }),
        );
        Ok(())
    }

    fn ensure_element<D: PageDocument>(&self, document: &D) -> Result<D::Node, HostError> {
        if document.element_by_id(self.style_id).is_none() {
            let style = document.create_element("style")?;
            style.set_attribute("id", self.style_id)?;
            style.set_text(TOAST_CSS)?;
            document.append_to_head(&style)?;
        }

        if let Some(existing) = document.element_by_id(self.toast_id) {
            return Ok(existing);
        }

        let element = document.create_element("div")?;
        element.set_attribute("id", self.toast_id)?;
        element.set_attribute("role", "status")?;
        element.set_attribute("aria-live", "polite")?;
        element.set_attribute("aria-atomic", "true")?;
        element.set_class_name(BASE_CLASS)?;
        document.append_to_body(&element)?;
        Ok(element)
    }
}
