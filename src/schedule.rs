//! Weekly class schedule: one day panel open at a time, plus a category filter
//! over the class rows.
//!
//! Markup contract:
//! - day panels: `.day-schedule` with the weekday as element id (`monday`, ...),
//!   hidden by the stylesheet until shown with an inline `display: block`;
//! - day selectors: `[data-day]` inside `.day-buttons`;
//! - category selectors: `[data-category]` inside `.category-filter`;
//! - class rows: `.class-entry[data-category]` inside a day panel.

use chrono::Weekday;
use tracing::debug;

use crate::dom::{Display, Document, Event, EventKind, Listener, NodeId};

pub const ALL_CATEGORIES: &str = "all";
pub const ACTIVE_CLASS: &str = "active";

const DAY_PANEL: &str = "day-schedule";
const DAY_BUTTONS: &str = "day-buttons";
const CATEGORY_FILTER: &str = "category-filter";
const CLASS_ENTRY: &str = "class-entry";
const DAY_ATTR: &str = "data-day";
const CATEGORY_ATTR: &str = "data-category";

/// Weekday ids, indexed from Sunday = 0.
pub const WEEKDAYS: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

pub fn weekday_id(day: Weekday) -> &'static str {
    WEEKDAYS[day.num_days_from_sunday() as usize]
}

/// Page-lifetime selection. Reset on reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSelection {
    pub day: Option<String>,
    pub category: String,
}

impl Default for ActiveSelection {
    fn default() -> Self {
        Self {
            day: None,
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOptions {
    /// Hide every day panel when a click lands outside the schedule.
    pub dismiss_on_outside_click: bool,
    /// Clicks inside elements with these classes never count as outside.
    pub modal_classes: Vec<&'static str>,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            dismiss_on_outside_click: true,
            modal_classes: vec!["modal", "confirm-modal-overlay"],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleView {
    selection: ActiveSelection,
    options: ScheduleOptions,
}

impl ScheduleView {
    /// Binds to the page and opens today's panel if the page has one.
    pub fn attach(doc: &mut Document, today: Weekday, options: ScheduleOptions) -> Option<Self> {
        if doc.query_class(DAY_PANEL).is_empty() {
            debug!("no day panels on page, schedule disabled");
            return None;
        }

        let mut view = Self {
            selection: ActiveSelection::default(),
            options,
        };
        let today = weekday_id(today);
        if view.panel(doc, today).is_some() {
            view.select_day(doc, today);
        } else {
            debug!("no panel for {today}, leaving schedule closed");
        }
        Some(view)
    }

    pub fn selection(&self) -> &ActiveSelection {
        &self.selection
    }

    pub fn active_day(&self) -> Option<&str> {
        self.selection.day.as_deref()
    }

    pub fn active_category(&self) -> &str {
        &self.selection.category
    }

    fn panel(&self, doc: &Document, day_id: &str) -> Option<NodeId> {
        doc.get_element_by_id(day_id)
            .filter(|&node| doc.has_class(node, DAY_PANEL))
    }

    fn day_controls(&self, doc: &Document) -> Vec<NodeId> {
        doc.query_class(DAY_BUTTONS)
            .into_iter()
            .flat_map(|group| {
                doc.subtree(group)
                    .into_iter()
                    .filter(|&node| doc.attr(node, DAY_ATTR).is_some())
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn category_controls(&self, doc: &Document) -> Vec<NodeId> {
        doc.query_class(CATEGORY_FILTER)
            .into_iter()
            .flat_map(|group| {
                doc.subtree(group)
                    .into_iter()
                    .filter(|&node| doc.attr(node, CATEGORY_ATTR).is_some())
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Opens `day_id` and closes every other panel. No-op for an unknown day.
    pub fn select_day(&mut self, doc: &mut Document, day_id: &str) {
        let Some(target) = self.panel(doc, day_id) else {
            debug!("no schedule panel #{day_id}");
            return;
        };

        for panel in doc.query_class(DAY_PANEL) {
            doc.set_display(panel, Display::None);
        }
        doc.set_display(target, Display::Block);
        self.selection.day = Some(day_id.to_string());

        for control in self.day_controls(doc) {
            let active = doc.attr(control, DAY_ATTR) == Some(day_id);
            doc.set_class(control, ACTIVE_CLASS, active);
        }

        self.apply_category_filter(doc);
    }

    pub fn select_category(&mut self, doc: &mut Document, category: &str) {
        self.selection.category = category.to_string();

        for control in self.category_controls(doc) {
            let active = doc.attr(control, CATEGORY_ATTR) == Some(category);
            doc.set_class(control, ACTIVE_CLASS, active);
        }

        self.apply_category_filter(doc);
    }

    /// Shows the rows matching the active category and hides the rest.
    pub fn apply_category_filter(&self, doc: &mut Document) {
        let category = self.selection.category.as_str();
        for entry in doc.query_class(CLASS_ENTRY) {
            let matches =
                category == ALL_CATEGORIES || doc.attr(entry, CATEGORY_ATTR) == Some(category);
            doc.set_display(entry, if matches { Display::Unset } else { Display::None });
        }
    }

    /// Closes every day panel and releases the day controls. The category filter
    /// is kept for the next open.
    pub fn dismiss(&mut self, doc: &mut Document) {
        for panel in doc.query_class(DAY_PANEL) {
            doc.set_display(panel, Display::None);
        }
        for control in self.day_controls(doc) {
            doc.remove_class(control, ACTIVE_CLASS);
        }
        self.selection.day = None;
    }

    pub fn visible_panels(&self, doc: &Document) -> Vec<NodeId> {
        doc.query_class(DAY_PANEL)
            .into_iter()
            .filter(|&panel| doc.display(panel) == Display::Block)
            .collect()
    }

    /// A row is visible when its day panel is open and the filter lets it through.
    pub fn is_entry_visible(&self, doc: &Document, entry: NodeId) -> bool {
        let panel_open = doc
            .closest_class(entry, DAY_PANEL)
            .is_some_and(|panel| doc.display(panel) == Display::Block && doc.is_shown(panel));
        panel_open && doc.display(entry) != Display::None
    }

    fn is_outside(&self, doc: &Document, target: NodeId) -> bool {
        let inside = [DAY_BUTTONS, DAY_PANEL, CATEGORY_FILTER]
            .iter()
            .chain(self.options.modal_classes.iter())
            .any(|class| doc.closest_class(target, class).is_some());
        !inside
    }
}

impl Listener for ScheduleView {
    fn handle(&mut self, doc: &mut Document, event: &mut Event) {
        if event.kind != EventKind::Click {
            return;
        }
        let target = event.target;

        let day_control = doc
            .closest_attr(target, DAY_ATTR)
            .filter(|&node| doc.closest_class(node, DAY_BUTTONS).is_some());
        if let Some(control) = day_control {
            if let Some(day) = doc.attr(control, DAY_ATTR).map(str::to_string) {
                self.select_day(doc, &day);
            }
            return;
        }

        let category_control = doc
            .closest_attr(target, CATEGORY_ATTR)
            .filter(|&node| doc.closest_class(node, CATEGORY_FILTER).is_some());
        if let Some(control) = category_control {
            if let Some(category) = doc.attr(control, CATEGORY_ATTR).map(str::to_string) {
                self.select_category(doc, &category);
            }
            return;
        }

        if self.options.dismiss_on_outside_click && self.is_outside(doc, target) {
            self.dismiss(doc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    fn schedule_page() -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        let buttons = doc.append(root, Element::new("div").with_class("day-buttons"));
        for day in ["monday", "tuesday"] {
            doc.append(buttons, Element::new("button").with_attr("data-day", day));
        }
        for day in ["monday", "tuesday"] {
            let panel = doc.append(
                root,
                Element::new("div").with_id(day).with_class("day-schedule"),
            );
            for category in ["BJJ", "BOXNING"] {
                doc.append(
                    panel,
                    Element::new("div")
                        .with_class("class-entry")
                        .with_attr("data-category", category),
                );
            }
        }
        doc
    }

    fn attach(doc: &mut Document, today: Weekday) -> ScheduleView {
        ScheduleView::attach(doc, today, ScheduleOptions::default()).unwrap()
    }

    #[test]
    fn weekday_ids_start_on_sunday() {
        assert_eq!(weekday_id(Weekday::Sun), "sunday");
        assert_eq!(weekday_id(Weekday::Sat), "saturday");
    }

    #[test]
    fn attach_opens_today() {
        let mut doc = schedule_page();
        let view = attach(&mut doc, Weekday::Tue);
        assert_eq!(view.active_day(), Some("tuesday"));
        assert_eq!(view.visible_panels(&doc), vec![doc.get_element_by_id("tuesday").unwrap()]);
    }

    #[test]
    fn attach_without_today_panel_stays_closed() {
        let mut doc = schedule_page();
        let view = attach(&mut doc, Weekday::Sun);
        assert_eq!(view.active_day(), None);
        assert!(view.visible_panels(&doc).is_empty());
    }

    #[test]
    fn attach_without_panels_is_a_no_op() {
        let mut doc = Document::new();
        assert!(ScheduleView::attach(&mut doc, Weekday::Mon, ScheduleOptions::default()).is_none());
    }

    #[test]
    fn reselecting_the_open_day_keeps_it_open() {
        let mut doc = schedule_page();
        let mut view = attach(&mut doc, Weekday::Sun);
        view.select_day(&mut doc, "monday");
        view.select_day(&mut doc, "monday");
        assert_eq!(view.visible_panels(&doc).len(), 1);
        assert_eq!(view.active_day(), Some("monday"));
    }

    #[test]
    fn unknown_day_changes_nothing() {
        let mut doc = schedule_page();
        let mut view = attach(&mut doc, Weekday::Mon);
        view.select_day(&mut doc, "funday");
        assert_eq!(view.active_day(), Some("monday"));
        assert_eq!(view.visible_panels(&doc).len(), 1);
    }

    #[test]
    fn dismiss_keeps_category() {
        let mut doc = schedule_page();
        let mut view = attach(&mut doc, Weekday::Mon);
        view.select_category(&mut doc, "BJJ");
        view.dismiss(&mut doc);
        assert!(view.visible_panels(&doc).is_empty());
        assert_eq!(view.active_category(), "BJJ");
    }

    #[test]
    fn dismiss_releases_the_day_controls() {
        let mut doc = schedule_page();
        let mut view = attach(&mut doc, Weekday::Mon);
        let control = |doc: &Document, day: &str| {
            doc.query_attr("data-day")
                .into_iter()
                .find(|&node| doc.attr(node, "data-day") == Some(day))
                .unwrap()
        };
        let monday = control(&doc, "monday");
        assert!(doc.has_class(monday, ACTIVE_CLASS));

        view.dismiss(&mut doc);
        assert!(!doc.has_class(monday, ACTIVE_CLASS));
        assert_eq!(view.active_day(), None);

        view.select_day(&mut doc, "tuesday");
        let tuesday = control(&doc, "tuesday");
        assert!(doc.has_class(tuesday, ACTIVE_CLASS));
        assert!(!doc.has_class(monday, ACTIVE_CLASS));
    }
}
