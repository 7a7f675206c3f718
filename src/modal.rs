use tracing::debug;

use crate::content::ContentRegistry;
use crate::dom::{Display, Document, Event, EventKind, Listener, NodeId};

/// DOM anchors of one modal instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalIds {
    pub overlay: &'static str,
    pub body: &'static str,
    /// Attribute carrying the registry key on trigger elements.
    pub trigger_attr: &'static str,
    pub close_class: &'static str,
}

impl ModalIds {
    pub const TRAINERS: ModalIds = ModalIds {
        overlay: "trainerModal",
        body: "modalBody",
        trigger_attr: "data-trainer",
        close_class: "close",
    };

    pub const MEMBERSHIPS: ModalIds = ModalIds {
        overlay: "modal",
        body: "modal-body",
        trigger_attr: "data-membership",
        close_class: "close",
    };
}

/// Overlay showing a registry fragment. Visible while its inline display is `block`.
#[derive(Debug, Clone)]
pub struct ModalController {
    ids: ModalIds,
    registry: ContentRegistry,
    overlay: NodeId,
    body: NodeId,
    close: Option<NodeId>,
    current: Option<String>,
}

impl ModalController {
    pub fn attach(doc: &Document, ids: ModalIds, registry: ContentRegistry) -> Option<Self> {
        let Some(overlay) = doc.get_element_by_id(ids.overlay) else {
            debug!("no #{} on page, modal disabled", ids.overlay);
            return None;
        };
        let body = doc.get_element_by_id(ids.body)?;
        let close = doc
            .descendants_with_class(overlay, ids.close_class)
            .into_iter()
            .next();

        Some(Self {
            ids,
            registry,
            overlay,
            body,
            close,
            current: None,
        })
    }

    pub fn ids(&self) -> ModalIds {
        self.ids
    }

    pub fn open(&mut self, doc: &mut Document, key: &str) {
        let fragment = self.registry.resolve(key);
        self.open_fragment(doc, fragment);
        self.current = Some(key.to_string());
    }

    pub fn open_fragment(&mut self, doc: &mut Document, fragment: &str) {
        doc.set_content(self.body, fragment);
        doc.set_display(self.overlay, Display::Block);
        self.current = None;
    }

    pub fn close(&mut self, doc: &mut Document) {
        doc.set_display(self.overlay, Display::None);
        self.current = None;
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        doc.display(self.overlay) == Display::Block
    }

    /// Key of the fragment on display, if it came from the registry.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

impl Listener for ModalController {
    fn handle(&mut self, doc: &mut Document, event: &mut Event) {
        if event.kind != EventKind::Click {
            return;
        }
        let target = event.target;

        if let Some(trigger) = doc.closest_attr(target, self.ids.trigger_attr) {
            event.prevent_default();
            let key = doc
                .attr(trigger, self.ids.trigger_attr)
                .unwrap_or_default()
                .to_string();
            self.open(doc, &key);
        } else if self.close.is_some_and(|close| doc.contains(close, target)) {
            self.close(doc);
        } else if target == self.overlay {
            // Only the backdrop itself, never the dialog inside it.
            self.close(doc);
        }
    }
}
