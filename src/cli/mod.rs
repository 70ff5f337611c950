//! Terminal front-ends over an [`ExchangeView`](crate::engine::ExchangeView)

pub mod convert;
pub mod interactive;
pub mod setup;
pub mod ui;
