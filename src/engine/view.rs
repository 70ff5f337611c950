//! What a UI holds on to: either the live engine or a fixed preview.

use super::model::{ExchangeRateEvent, Notification, ViewState};
use super::runtime::ExchangeEngine;
use tokio::sync::{broadcast, watch};

pub trait ExchangeView: Send + Sync {
    fn current(&self) -> ViewState;

    fn subscribe(&self) -> watch::Receiver<ViewState>;

    fn notifications(&self) -> broadcast::Receiver<Notification>;

    fn on_event(&self, event: ExchangeRateEvent);

    /// A static view never reacts to events, so there is nothing to wait for.
    fn is_static(&self) -> bool {
        false
    }
}

impl ExchangeView for ExchangeEngine {
    fn current(&self) -> ViewState {
        self.view()
    }

    fn subscribe(&self) -> watch::Receiver<ViewState> {
        ExchangeEngine::subscribe(self)
    }

    fn notifications(&self) -> broadcast::Receiver<Notification> {
        ExchangeEngine::notifications(self)
    }

    fn on_event(&self, event: ExchangeRateEvent) {
        self.send(event);
    }
}
