use super::model::{ExchangeRateEvent, Notification, ReceivingAmountPhase, ViewState};
use super::view::ExchangeView;
use crate::core::currency::Currency;
use tokio::sync::{broadcast, watch};
use tracing::debug;

/// A fixed view for rendering checks; ignores every event and never notifies.
pub struct PreviewView {
    view: watch::Sender<ViewState>,
    notifications: broadcast::Sender<Notification>,
}

impl PreviewView {
    pub fn new() -> Self {
        Self::with_state(Self::fixture())
    }

    pub fn with_state(state: ViewState) -> Self {
        let (view, _) = watch::channel(state);
        let (notifications, _) = broadcast::channel(1);
        PreviewView {
            view,
            notifications,
        }
    }

    pub fn fixture() -> ViewState {
        ViewState {
            sending_currency: Currency::USD,
            receiving_currency: Currency::KRW,
            exchange_rate: "1,130.05".to_string(),
            lookup_time: "2019-03-20 16:13".to_string(),
            sending_amount: "100".to_string(),
            receiving_amount: "113,004.98 KRW".to_string(),
            receiving_amount_phase: ReceivingAmountPhase::Error,
        }
    }
}

impl Default for PreviewView {
    fn default() -> Self {
        Self::new()
    }
}

impl ExchangeView for PreviewView {
    fn current(&self) -> ViewState {
        self.view.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view.subscribe()
    }

    fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    fn on_event(&self, event: ExchangeRateEvent) {
        debug!(?event, "Preview ignores event");
    }

    fn is_static(&self) -> bool {
        true
    }
}
