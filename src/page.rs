//! Page-ready wiring. Each component scans the document for its anchors and
//! stays out of the way when they are missing; events are then dispatched to
//! the attached components in attachment order.

use chrono::{Datelike, Local, Weekday};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::{Instant, sleep_until};
use tracing::info;

use crate::booking::BookingTabs;
use crate::charts::ChartBackend;
use crate::chrome::{
    ConfirmDialog, DemoFormGuard, Hamburger, LoadingState, OnboardingBanner, ToastTimer,
    run_toast_timer, schedule_toasts,
};
use crate::content::ContentRegistry;
use crate::dom::{Document, Event, Listener, NodeId};
use crate::modal::{ModalController, ModalIds};
use crate::models::EmbeddedData;
use crate::schedule::{ScheduleOptions, ScheduleView};
use crate::stats::render_charts;
use crate::timers::TimerQueue;

#[derive(Debug, Clone)]
pub struct PageConfig {
    pub today: Weekday,
    pub schedule: ScheduleOptions,
    pub trainers: ContentRegistry,
    pub memberships: ContentRegistry,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            today: Local::now().weekday(),
            schedule: ScheduleOptions::default(),
            trainers: ContentRegistry::trainers(),
            memberships: ContentRegistry::memberships(),
        }
    }
}

pub struct Page {
    document: Document,
    hamburger: Option<Hamburger>,
    banner: Option<OnboardingBanner>,
    confirm: Option<ConfirmDialog>,
    modals: Vec<ModalController>,
    demo_guard: Option<DemoFormGuard>,
    schedule: Option<ScheduleView>,
    booking: Option<BookingTabs>,
    loading: LoadingState,
    timers: TimerQueue<ToastTimer>,
    charts_drawn: usize,
}

impl Page {
    pub fn ready(
        mut document: Document,
        data: &EmbeddedData,
        backend: Option<&mut dyn ChartBackend>,
        config: PageConfig,
    ) -> Self {
        let mut timers = TimerQueue::new();
        let toasts = schedule_toasts(&document, &mut timers);

        let modals: Vec<ModalController> = [
            (ModalIds::TRAINERS, config.trainers),
            (ModalIds::MEMBERSHIPS, config.memberships),
        ]
        .into_iter()
        .filter_map(|(ids, registry)| ModalController::attach(&document, ids, registry))
        .collect();

        let schedule = ScheduleView::attach(&mut document, config.today, config.schedule);
        let charts_drawn = render_charts(&document, backend, data);

        info!(
            toasts,
            charts = charts_drawn,
            modals = modals.len(),
            schedule = schedule.is_some(),
            "page ready"
        );

        Self {
            hamburger: Hamburger::attach(&document),
            banner: OnboardingBanner::attach(&document),
            confirm: ConfirmDialog::attach(&document),
            demo_guard: DemoFormGuard::attach(&document),
            booking: BookingTabs::attach(&document),
            loading: LoadingState,
            modals,
            schedule,
            timers,
            charts_drawn,
            document,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// For tests and hosts that need to poke the markup directly.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn schedule(&self) -> Option<&ScheduleView> {
        self.schedule.as_ref()
    }

    pub fn schedule_mut(&mut self) -> Option<(&mut ScheduleView, &mut Document)> {
        self.schedule.as_mut().map(|view| (view, &mut self.document))
    }

    pub fn modal(&self, ids: ModalIds) -> Option<&ModalController> {
        self.modals.iter().find(|modal| modal.ids() == ids)
    }

    pub fn confirm_dialog(&self) -> Option<&ConfirmDialog> {
        self.confirm.as_ref()
    }

    pub fn booking(&self) -> Option<&BookingTabs> {
        self.booking.as_ref()
    }

    pub fn charts_drawn(&self) -> usize {
        self.charts_drawn
    }

    pub fn click(&mut self, target: NodeId) -> Event {
        let mut event = Event::click(target);
        self.dispatch(&mut event);
        event
    }

    /// Fires a submit event; an uncancelled submit navigates.
    pub fn submit(&mut self, form: NodeId) -> Event {
        let mut event = Event::submit(form);
        self.dispatch(&mut event);
        if !event.default_prevented() {
            self.document.submit_form(form);
        }
        event
    }

    fn dispatch(&mut self, event: &mut Event) {
        let Page {
            document,
            hamburger,
            banner,
            confirm,
            modals,
            demo_guard,
            schedule,
            booking,
            loading,
            ..
        } = self;

        let mut listeners: Vec<&mut dyn Listener> = Vec::new();
        listeners.extend(hamburger.as_mut().map(|l| l as &mut dyn Listener));
        listeners.extend(banner.as_mut().map(|l| l as &mut dyn Listener));
        listeners.extend(confirm.as_mut().map(|l| l as &mut dyn Listener));
        listeners.extend(modals.iter_mut().map(|l| l as &mut dyn Listener));
        listeners.extend(demo_guard.as_mut().map(|l| l as &mut dyn Listener));
        listeners.extend(schedule.as_mut().map(|l| l as &mut dyn Listener));
        listeners.extend(booking.as_mut().map(|l| l as &mut dyn Listener));
        // Last, so it sees whether anything above cancelled the submit.
        listeners.push(loading);

        for listener in listeners {
            listener.handle(document, event);
        }
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn next_timer_due(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    pub fn advance(&mut self, by: Duration) {
        self.advance_to(self.timers.now() + by);
    }

    /// Runs every timer due by `deadline` on the page clock.
    pub fn advance_to(&mut self, deadline: Duration) {
        while let Some(timer) = self.timers.pop_due_by(deadline) {
            run_toast_timer(&mut self.document, &mut self.timers, timer);
        }
        self.timers.settle(deadline);
    }
}

/// Shared page driven by the tokio clock.
#[derive(Clone)]
pub struct PageHandle {
    page: Arc<Mutex<Page>>,
}

impl PageHandle {
    pub fn new(page: Page) -> Self {
        Self {
            page: Arc::new(Mutex::new(page)),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, Page> {
        self.page.lock().await
    }

    /// Sleeps until each pending timer is due and fires it, until none are left.
    /// The page clock is anchored to the moment this is called.
    pub async fn run_timers(&self) {
        let offset = self.page.lock().await.now();
        let started = Instant::now();
        loop {
            let Some(due) = self.page.lock().await.next_timer_due() else {
                break;
            };
            sleep_until(started + due.saturating_sub(offset)).await;
            self.page.lock().await.advance_to(due);
        }
    }
}
