//! Site-wide affordances present on every page: navigation toggle, onboarding
//! banner, toasts, the shared confirm dialog and submit button loading state.

use std::time::Duration;
use tracing::debug;

use crate::dom::{Display, Document, Event, EventKind, Listener, NodeId};
use crate::timers::TimerQueue;

pub const TOAST_VISIBLE_FOR: Duration = Duration::from_millis(5000);
pub const TOAST_EXIT_ANIMATION: Duration = Duration::from_millis(300);

pub const CONFIRM_TITLE: &str = "Bekräfta";
pub const CONFIRM_ATTR: &str = "data-confirm";
pub const DEMO_NOTICE: &str =
    "Detta är en demo – använd registreringssidan för att skapa ett konto.";

#[derive(Debug, Clone)]
pub struct Hamburger {
    toggle: NodeId,
}

impl Hamburger {
    pub fn attach(doc: &Document) -> Option<Self> {
        let toggle = doc.get_element_by_id("hamburgerToggle")?;
        Some(Self { toggle })
    }
}

impl Listener for Hamburger {
    fn handle(&mut self, doc: &mut Document, event: &mut Event) {
        if event.kind != EventKind::Click || !doc.contains(self.toggle, event.target) {
            return;
        }
        let nav = doc
            .query_tag("header")
            .into_iter()
            .find_map(|header| doc.descendants_with_tag(header, "nav").into_iter().next());
        if let Some(nav) = nav {
            doc.toggle_class(nav, "active");
        }
    }
}

#[derive(Debug, Clone)]
pub struct OnboardingBanner {
    close: NodeId,
}

impl OnboardingBanner {
    pub fn attach(doc: &Document) -> Option<Self> {
        let close = doc.get_element_by_id("closeBannerBtn")?;
        Some(Self { close })
    }
}

impl Listener for OnboardingBanner {
    fn handle(&mut self, doc: &mut Document, event: &mut Event) {
        if event.kind != EventKind::Click || !doc.contains(self.close, event.target) {
            return;
        }
        if let Some(banner) = doc.get_element_by_id("onboardingBanner") {
            doc.set_display(banner, Display::None);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastTimer {
    Dismiss(NodeId),
    Remove(NodeId),
}

/// Schedules the dismissal of every toast rendered with the page.
pub fn schedule_toasts(doc: &Document, timers: &mut TimerQueue<ToastTimer>) -> usize {
    let toasts: Vec<NodeId> = doc
        .query_class("toast-container")
        .into_iter()
        .flat_map(|container| doc.descendants_with_class(container, "toast"))
        .collect();
    for &toast in &toasts {
        timers.schedule(TOAST_VISIBLE_FOR, ToastTimer::Dismiss(toast));
    }
    toasts.len()
}

pub fn run_toast_timer(doc: &mut Document, timers: &mut TimerQueue<ToastTimer>, timer: ToastTimer) {
    match timer {
        ToastTimer::Dismiss(toast) => {
            doc.add_class(toast, "toast-dismiss");
            timers.schedule(TOAST_EXIT_ANIMATION, ToastTimer::Remove(toast));
        }
        ToastTimer::Remove(toast) => doc.remove(toast),
    }
}

/// The page-wide confirm dialog. Holds at most one pending form; a second
/// request before the first resolves replaces it.
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    overlay: NodeId,
    title: Option<NodeId>,
    text: Option<NodeId>,
    confirm: Option<NodeId>,
    cancel: Option<NodeId>,
    guarded: Vec<NodeId>,
    pending: Option<NodeId>,
}

impl ConfirmDialog {
    pub fn attach(doc: &Document) -> Option<Self> {
        let Some(overlay) = doc.get_element_by_id("confirmModalOverlay") else {
            debug!("no confirm dialog on page");
            return None;
        };
        let dialog = doc.descendants_with_class(overlay, "confirm-modal").into_iter().next();
        let first = |class: &str| doc.descendants_with_class(overlay, class).into_iter().next();
        let in_dialog = |tag: &str| {
            dialog.and_then(|dialog| doc.descendants_with_tag(dialog, tag).into_iter().next())
        };
        let guarded = doc
            .query_tag("form")
            .into_iter()
            .filter(|&form| doc.attr(form, CONFIRM_ATTR).is_some())
            .collect();

        Some(Self {
            overlay,
            title: in_dialog("h3"),
            text: in_dialog("p"),
            confirm: first("btn-confirm"),
            cancel: first("btn-cancel-modal"),
            guarded,
            pending: None,
        })
    }

    pub fn show(&mut self, doc: &mut Document, title: &str, message: &str, form: NodeId) {
        if let Some(title_node) = self.title {
            doc.set_content(title_node, title);
        }
        if let Some(text_node) = self.text {
            doc.set_content(text_node, message);
        }
        self.pending = Some(form);
        doc.add_class(self.overlay, "visible");
    }

    pub fn hide(&mut self, doc: &mut Document) {
        doc.remove_class(self.overlay, "visible");
        self.pending = None;
    }

    pub fn is_visible(&self, doc: &Document) -> bool {
        doc.has_class(self.overlay, "visible")
    }

    pub fn pending(&self) -> Option<NodeId> {
        self.pending
    }

    /// Submits the pending form. The marker is stripped first so the
    /// resubmission is not intercepted again.
    pub fn accept(&mut self, doc: &mut Document) {
        if let Some(form) = self.pending {
            doc.remove_attr(form, CONFIRM_ATTR);
            doc.submit_form(form);
        }
        self.hide(doc);
    }

    fn on_submit(&mut self, doc: &mut Document, event: &mut Event) {
        let form = event.target;
        if !self.guarded.contains(&form) {
            return;
        }
        let Some(message) = doc.attr(form, CONFIRM_ATTR).map(str::to_string) else {
            return;
        };
        event.prevent_default();
        self.show(doc, CONFIRM_TITLE, &message, form);
    }

    fn on_click(&mut self, doc: &mut Document, target: NodeId) {
        let hit = |node: Option<NodeId>| node.is_some_and(|node| doc.contains(node, target));
        let accepted = hit(self.confirm);
        let dismissed = hit(self.cancel) || target == self.overlay;
        if accepted {
            self.accept(doc);
        } else if dismissed {
            self.hide(doc);
        }
    }
}

impl Listener for ConfirmDialog {
    fn handle(&mut self, doc: &mut Document, event: &mut Event) {
        match event.kind {
            EventKind::Submit => self.on_submit(doc, event),
            EventKind::Click => self.on_click(doc, event.target),
        }
    }
}

/// Blocks the registration form on the public demo.
#[derive(Debug, Clone)]
pub struct DemoFormGuard {
    form: NodeId,
}

impl DemoFormGuard {
    pub fn attach(doc: &Document) -> Option<Self> {
        let form = doc.get_element_by_id("demoRegistrationForm")?;
        Some(Self { form })
    }
}

impl Listener for DemoFormGuard {
    fn handle(&mut self, doc: &mut Document, event: &mut Event) {
        if event.kind == EventKind::Submit && event.target == self.form {
            event.prevent_default();
            doc.alert(DEMO_NOTICE);
        }
    }
}

/// Disables the submit button of a form as it submits. There is no way back:
/// the page navigates away.
#[derive(Debug, Clone, Default)]
pub struct LoadingState;

impl Listener for LoadingState {
    fn handle(&mut self, doc: &mut Document, event: &mut Event) {
        if event.kind != EventKind::Submit || event.default_prevented() {
            return;
        }
        let button = doc
            .descendants_with_tag(event.target, "button")
            .into_iter()
            .find(|&button| doc.attr(button, "type") == Some("submit"));
        if let Some(button) = button {
            if !doc.has_class(button, "btn-loading") {
                doc.add_class(button, "btn-loading");
                doc.set_disabled(button, true);
            }
        }
    }
}
