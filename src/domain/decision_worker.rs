//! Background worker that records and forwards decision events.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::domain::decision_event::DecisionEvent;
use crate::infrastructure::dispatch::DecisionSink;

/// Upper bound on sink dispatches running at the same time.
pub const MAX_IN_FLIGHT_DISPATCHES: usize = 64;

/// Drains the decision channel until every sender is dropped.
///
/// Each event is written as a structured `tracing` record on target
/// `decision`, then handed to `sink` exactly once on a separate task so a
/// slow sink never holds up the local record of later events. When
/// [`MAX_IN_FLIGHT_DISPATCHES`] are already pending the dispatch is skipped.
/// Sink failures are logged and counted, never retried.
pub async fn run_decision_worker(
    mut rx: mpsc::Receiver<DecisionEvent>,
    sink: Arc<dyn DecisionSink>,
) {
    let mut in_flight = JoinSet::new();

    while let Some(event) = rx.recv().await {
        record_decision(&event);

        while in_flight.try_join_next().is_some() {}
        if in_flight.len() >= MAX_IN_FLIGHT_DISPATCHES {
            metrics::counter!("decision_dispatch_skipped_total").increment(1);
            debug!("Decision dispatch skipped, {} still pending", in_flight.len());
            continue;
        }

        let sink = sink.clone();
        in_flight.spawn(async move {
            if let Err(e) = sink.dispatch(&event).await {
                metrics::counter!("decision_dispatch_failures_total").increment(1);
                warn!("Decision dispatch failed: {}", e);
            }
        });
    }

    while in_flight.join_next().await.is_some() {}

    info!("Decision worker stopped");
}

fn record_decision(event: &DecisionEvent) {
    metrics::counter!(
        "redirect_decisions_total",
        "network" => event.network,
        "affiliate" => if event.is_affiliate { "true" } else { "false" }
    )
    .increment(1);

    info!(
        target: "decision",
        timestamp = %event.timestamp.to_rfc3339(),
        outcome = event.outcome,
        host = %event.host,
        network = event.network,
        is_affiliate = event.is_affiliate,
        expanded = event.expanded,
        correlation_id = event.correlation_id.as_deref().unwrap_or(""),
        user_agent = event.user_agent.as_deref().unwrap_or(""),
        "redirect decision"
    );
}
