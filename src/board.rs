//! A mounted digest page.
//!
//! [`Board`] wires the view controller and the event logger to the page's
//! elements and routes control changes, link clicks, feedback buttons and
//! the export trigger to them.

use crate::config::DeckConfig;
use crate::io::DownloadSink;
use crate::models::{Card, Controls, FeedbackButton, LinkClick};
use crate::storage::LogStore;
use crate::tracking::{AnalyticsReporter, Clock, EventLogger, SystemClock};
use crate::view::{Counter, ViewController};
use tracing::{debug, warn};

/// The elements found on a page when it loads.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Cards in the card container, or `None` if the container is missing.
    pub cards: Option<Vec<Card>>,
    /// Whether the visible-result counter is present.
    pub result_counter: bool,
    /// Whether the today's-clicks counter is present.
    pub click_counter: bool,
    /// Whether the total-feedback counter is present.
    pub feedback_counter: bool,
    /// Control values at load time.
    pub controls: Controls,
}

impl Page {
    /// Creates a page with a card container holding `cards` and every counter present.
    #[must_use]
    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self {
            cards: Some(cards),
            result_counter: true,
            click_counter: true,
            feedback_counter: true,
            controls: Controls::default(),
        }
    }

    /// Sets the initial control values.
    #[must_use]
    pub fn with_controls(mut self, controls: Controls) -> Self {
        self.controls = controls;
        self
    }
}

/// Live page state: the view over the cards plus the interaction logs.
pub struct Board<S, R, C = SystemClock> {
    controller: ViewController,
    logger: EventLogger<S, R, C>,
}

impl<S: LogStore, R: AnalyticsReporter> Board<S, R> {
    /// Mounts the board on `page` using the system clock.
    ///
    /// Returns `None`, leaving the page inert, when the card container is
    /// missing or holds no cards.
    pub fn mount(page: Page, store: S, reporter: R, config: &DeckConfig) -> Option<Self> {
        Self::mount_with_clock(page, store, reporter, SystemClock, config)
    }
}

impl<S: LogStore, R: AnalyticsReporter, C: Clock> Board<S, R, C> {
    /// Mounts the board on `page` reading time from `clock`.
    ///
    /// On mount the local counters are rendered and the view is brought in
    /// line with the initial controls.
    pub fn mount_with_clock(
        page: Page,
        store: S,
        reporter: R,
        clock: C,
        config: &DeckConfig,
    ) -> Option<Self> {
        let Some(cards) = page.cards else {
            debug!("no card container, board inert");
            return None;
        };
        let result_counter = page.result_counter.then(Counter::new);
        let mut controller = ViewController::mount(cards, result_counter)?;

        let mut logger = EventLogger::with_clock(store, reporter, clock, config.logs.clone())
            .with_counters(
                page.click_counter.then(Counter::new),
                page.feedback_counter.then(Counter::new),
            );
        logger.render_local_counts();
        controller.update(&page.controls);

        Some(Self { controller, logger })
    }

    /// Recomputes order and visibility after a control change.
    ///
    /// Returns the number of visible cards.
    pub fn on_controls_changed(&mut self, controls: &Controls) -> usize {
        self.controller.update(controls)
    }

    /// Handles a click on a link inside a card.
    pub fn on_link_click(&mut self, click: &LinkClick) -> bool {
        let card = self.controller.card(&click.card_id);
        self.logger.track_click(card, &click.href)
    }

    /// Handles a press of a feedback button.
    pub fn on_feedback(&mut self, button: &FeedbackButton) -> bool {
        let card = self.controller.card(&button.card_id);
        self.logger.track_feedback(card, button.label())
    }

    /// Handles the export trigger.
    ///
    /// Returns the number of exported records, or `None` if the export
    /// failed; failures are logged and not surfaced further.
    pub fn on_export<D: DownloadSink>(&self, sink: &mut D) -> Option<usize> {
        match self.logger.download_feedback(sink) {
            Ok(count) => Some(count),
            Err(e) => {
                warn!(error = %e, "feedback export failed");
                None
            },
        }
    }

    /// Returns the view controller.
    pub const fn controller(&self) -> &ViewController {
        &self.controller
    }

    /// Returns the event logger.
    pub const fn logger(&self) -> &EventLogger<S, R, C> {
        &self.logger
    }
}
