//! Async driver for [`ExchangeState`].
//!
//! One tokio task owns the state. UI events arrive on an unbounded queue and
//! in-flight fetches are polled inside the same task, so handlers never run
//! concurrently. The view is pushed through a `watch` channel; notifications go
//! through a `broadcast` channel and are dropped when nobody is listening.

use super::model::{ExchangeRateEvent, Notification, ViewState};
use super::state::{Effect, ExchangeState};
use crate::core::error::ExchangeError;
use crate::core::quote::{QuoteSource, QuoteTable};
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const NOTIFICATION_CAPACITY: usize = 16;

type FetchFuture = BoxFuture<'static, (u64, Result<QuoteTable, ExchangeError>)>;

pub struct ExchangeEngine {
    events: mpsc::UnboundedSender<ExchangeRateEvent>,
    view: watch::Receiver<ViewState>,
    notifications: broadcast::Sender<Notification>,
    task: JoinHandle<()>,
}

impl ExchangeEngine {
    /// Starts the engine on the current tokio runtime. The first fetch is issued
    /// immediately.
    pub fn spawn(source: Arc<dyn QuoteSource>) -> Self {
        let state = ExchangeState::new();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(state.view().clone());
        let (notifications, _) = broadcast::channel(NOTIFICATION_CAPACITY);

        let task = tokio::spawn(run_event_loop(
            state,
            source,
            events_rx,
            view_tx,
            notifications.clone(),
        ));

        ExchangeEngine {
            events: events_tx,
            view: view_rx,
            notifications,
            task,
        }
    }

    pub fn send(&self, event: ExchangeRateEvent) {
        if self.events.send(event).is_err() {
            warn!("Exchange engine has stopped, event dropped");
        }
    }

    pub fn view(&self) -> ViewState {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view.clone()
    }

    /// Only notifications emitted after this call are received.
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    /// Stops the engine and abandons in-flight fetches.
    pub fn shutdown(&self) {
        self.task.abort();
    }
}

impl Drop for ExchangeEngine {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_event_loop(
    mut state: ExchangeState,
    source: Arc<dyn QuoteSource>,
    mut events: mpsc::UnboundedReceiver<ExchangeRateEvent>,
    view: watch::Sender<ViewState>,
    notifications: broadcast::Sender<Notification>,
) {
    info!("Exchange engine started");
    let mut in_flight: FuturesUnordered<FetchFuture> = FuturesUnordered::new();

    let effects = state.start();
    dispatch(effects, &source, &mut in_flight, &notifications);

    loop {
        let effects = tokio::select! {
            event = events.recv() => match event {
                Some(event) => {
                    debug!(?event, "Handling event");
                    state.handle_event(event)
                }
                None => break,
            },
            Some((generation, result)) = in_flight.next(), if !in_flight.is_empty() => {
                debug!(generation, ok = result.is_ok(), "Quote fetch completed");
                state.handle_fetch_result(generation, result)
            }
        };

        publish(&view, state.view());
        dispatch(effects, &source, &mut in_flight, &notifications);
    }

    info!("Exchange engine stopped");
}

fn publish(view: &watch::Sender<ViewState>, current: &ViewState) {
    view.send_if_modified(|published| {
        if published == current {
            return false;
        }
        *published = current.clone();
        true
    });
}

fn dispatch(
    effects: Vec<Effect>,
    source: &Arc<dyn QuoteSource>,
    in_flight: &mut FuturesUnordered<FetchFuture>,
    notifications: &broadcast::Sender<Notification>,
) {
    for effect in effects {
        match effect {
            Effect::Fetch { generation } => {
                debug!(generation, "Fetching quotes");
                let source = Arc::clone(source);
                in_flight.push(async move { (generation, source.fetch().await) }.boxed());
            }
            Effect::Notify(notification) => {
                if notifications.send(notification).is_err() {
                    debug!("No notification listener, message dropped");
                }
            }
        }
    }
}
