//! Headless model of the desk page: form submit state, card reveal on scroll and
//! the page reload that follows every successful mutation.
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Sender, after, bounded, select};
use log::{debug, info};
use parking_common::Result;

/// Label a submit button shows while its form is in flight.
pub const PROCESSING_LABEL: &str = "Processing...";
/// Fraction of a card that must be inside the viewport before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// Offset applied to the bottom edge of the viewport, in pixels.
pub const REVEAL_BOTTOM_MARGIN: f64 = -50.0;
/// CSS transition applied to observed cards.
pub const REVEAL_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";

/// Re-synchronizes the view with the server after a mutation.
///
/// There is no incremental refresh: the whole view is rebuilt.
pub trait Reload {
    /// Requests a reload once `delay` has elapsed.
    fn schedule(&self, delay: Duration);
}

impl<R: Reload + ?Sized> Reload for &R {
    fn schedule(&self, delay: Duration) {
        (**self).schedule(delay)
    }
}

/// Reload for the terminal: waits out the delay, then reports the refresh.
pub struct ConsoleReload;

impl Reload for ConsoleReload {
    fn schedule(&self, delay: Duration) {
        thread::sleep(delay);
        info!("Server state changed, reloading view after {} ms", delay.as_millis());
    }
}

/// Submit control of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: String,
    pub disabled: bool,
}

impl SubmitButton {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            disabled: false,
        }
    }
}

/// Loading state of one form.
///
/// Submitting disables the button and swaps its label to [`PROCESSING_LABEL`].
/// A background timer puts the original label back after `reset_after` in case
/// nothing else does; the request itself is never cancelled by it.
pub struct FormLoading {
    button: Arc<Mutex<SubmitButton>>,
    reset_after: Duration,
    cancel: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl FormLoading {
    pub fn new(button: SubmitButton, reset_after: Duration) -> Self {
        Self {
            button: Arc::new(Mutex::new(button)),
            reset_after,
            cancel: None,
            worker: None,
        }
    }

    /// Snapshot of the button as currently rendered.
    pub fn button(&self) -> Result<SubmitButton> {
        Ok(self.button.lock()?.clone())
    }

    /// Handles a submit. Returns `false` when the button was already disabled.
    pub fn submit(&mut self) -> Result<bool> {
        let original = {
            let mut button = self.button.lock()?;
            if button.disabled {
                return Ok(false);
            }
            button.disabled = true;
            std::mem::replace(&mut button.label, PROCESSING_LABEL.to_string())
        };

        let (cancel_tx, cancel_rx) = bounded::<()>(1);
        let timeout = after(self.reset_after);
        let shared = Arc::clone(&self.button);
        let worker = thread::spawn(move || {
            select! {
                recv(timeout) -> _ => debug!("Submit button restored by fallback timer"),
                recv(cancel_rx) -> _ => debug!("Submit button restored"),
            }
            if let Ok(mut button) = shared.lock() {
                button.label = original;
                button.disabled = false;
            }
        });

        self.cancel = Some(cancel_tx);
        self.worker = Some(worker);
        Ok(true)
    }

    /// Restores the button immediately.
    pub fn finish(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
        self.join();
    }

    /// Blocks until the fallback timer has restored the button.
    pub fn wait(&mut self) {
        self.join();
        self.cancel = None;
    }

    fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Inline style of an observed card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardStyle {
    pub opacity: f64,
    pub translate_y: f64,
}

impl CardStyle {
    const HIDDEN: CardStyle = CardStyle {
        opacity: 0.0,
        translate_y: 20.0,
    };
    const SHOWN: CardStyle = CardStyle {
        opacity: 1.0,
        translate_y: 0.0,
    };
}

/// A card positioned in document coordinates (pixels from the top).
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub top: f64,
    pub height: f64,
    pub style: CardStyle,
    pub transition: &'static str,
}

/// Fades and slides cards in as they scroll into view.
pub struct RevealObserver {
    threshold: f64,
    bottom_margin: f64,
    cards: Vec<Card>,
}

impl Default for RevealObserver {
    fn default() -> Self {
        Self::new(REVEAL_THRESHOLD, REVEAL_BOTTOM_MARGIN)
    }
}

impl RevealObserver {
    pub fn new(threshold: f64, bottom_margin: f64) -> Self {
        Self {
            threshold,
            bottom_margin,
            cards: Vec::new(),
        }
    }

    /// Starts observing a card; it is hidden until revealed. Returns its index.
    pub fn observe(&mut self, top: f64, height: f64) -> usize {
        self.cards.push(Card {
            top,
            height,
            style: CardStyle::HIDDEN,
            transition: REVEAL_TRANSITION,
        });
        self.cards.len() - 1
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Updates the viewport and reveals every card that crossed the threshold.
    ///
    /// Returns the indices of cards revealed by this call. Revealed cards stay
    /// revealed when scrolled away.
    pub fn on_scroll(&mut self, scroll_top: f64, viewport_height: f64) -> Vec<usize> {
        let root_top = scroll_top;
        let root_bottom = scroll_top + viewport_height + self.bottom_margin;
        let mut revealed = Vec::new();

        for (index, card) in self.cards.iter_mut().enumerate() {
            if card.style == CardStyle::SHOWN {
                continue;
            }
            let card_bottom = card.top + card.height;
            let overlap = card_bottom.min(root_bottom) - card.top.max(root_top);
            let intersecting = if card.height > 0.0 {
                overlap > 0.0 && overlap / card.height >= self.threshold
            } else {
                card.top >= root_top && card.top <= root_bottom
            };
            if intersecting {
                card.style = CardStyle::SHOWN;
                revealed.push(index);
            }
        }
        revealed
    }
}
