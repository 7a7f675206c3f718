use tracing::debug;

use crate::dom::{Display, Document, Event, EventKind, Listener, NodeId};
use crate::schedule::ACTIVE_CLASS;

const TAB: &str = "booking-tab";
const PANEL: &str = "booking-panel";
const TAB_ATTR: &str = "data-tab";

/// Tabs on the booking page. `.booking-tab[data-tab]` controls select the
/// `.booking-panel` whose id equals the tab's target.
#[derive(Debug, Clone, Default)]
pub struct BookingTabs {
    active: Option<String>,
}

impl BookingTabs {
    pub fn attach(doc: &Document) -> Option<Self> {
        if doc.query_class(TAB).is_empty() {
            debug!("no booking tabs on page");
            return None;
        }
        Some(Self::default())
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn select(&mut self, doc: &mut Document, tab: NodeId) {
        let Some(target) = doc.attr(tab, TAB_ATTR).map(str::to_string) else {
            return;
        };

        for control in doc.query_class(TAB) {
            doc.remove_class(control, ACTIVE_CLASS);
        }
        doc.add_class(tab, ACTIVE_CLASS);

        for panel in doc.query_class(PANEL) {
            let shown = doc.id_of(panel) == Some(target.as_str());
            doc.set_display(panel, if shown { Display::Block } else { Display::None });
        }
        self.active = Some(target);
    }
}

impl Listener for BookingTabs {
    fn handle(&mut self, doc: &mut Document, event: &mut Event) {
        if event.kind != EventKind::Click {
            return;
        }
        if let Some(tab) = doc.closest_class(event.target, TAB) {
            self.select(doc, tab);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    #[test]
    fn clicking_a_tab_shows_only_its_panel() {
        let mut doc = Document::new();
        let root = doc.root();
        let upcoming = doc.append(
            root,
            Element::new("button")
                .with_class("booking-tab active")
                .with_attr("data-tab", "upcoming"),
        );
        let history = doc.append(
            root,
            Element::new("button").with_class("booking-tab").with_attr("data-tab", "history"),
        );
        let upcoming_panel = doc.append(
            root,
            Element::new("div").with_id("upcoming").with_class("booking-panel"),
        );
        let history_panel = doc.append(
            root,
            Element::new("div")
                .with_id("history")
                .with_class("booking-panel")
                .with_display(Display::None),
        );

        let mut tabs = BookingTabs::attach(&doc).unwrap();
        tabs.handle(&mut doc, &mut Event::click(history));

        assert_eq!(tabs.active(), Some("history"));
        assert!(doc.has_class(history, ACTIVE_CLASS));
        assert!(!doc.has_class(upcoming, ACTIVE_CLASS));
        assert_eq!(doc.display(history_panel), Display::Block);
        assert_eq!(doc.display(upcoming_panel), Display::None);
    }
}
