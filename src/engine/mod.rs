//! The exchange engine: state machine, async driver and UI-facing views

pub mod model;
pub mod preview;
pub mod runtime;
pub mod state;
pub mod view;

pub use model::{ExchangeRateEvent, Notification, ReceivingAmountPhase, ViewState};
pub use preview::PreviewView;
pub use runtime::ExchangeEngine;
pub use view::ExchangeView;
