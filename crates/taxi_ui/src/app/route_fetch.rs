//! Background route fetches with latest-request sequencing.
//!
//! Each dispatch gets a fresh sequence number. When results drain, anything
//! but the latest issued number is discarded, so a slow superseded response
//! can never clobber a newer one even though requests are never cancelled.

use std::sync::mpsc::{channel, Receiver, Sender};

use taxi_core::geo::GeoPoint;
use taxi_core::routing::{OsrmRouteClient, Route, RouteError};

pub struct RouteFetchResult {
    pub request_id: u64,
    pub outcome: Result<Route, RouteError>,
}

pub struct RouteFetchState {
    sender: Sender<RouteFetchResult>,
    receiver: Receiver<RouteFetchResult>,
    latest_request_id: u64,
}

impl RouteFetchState {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            latest_request_id: 0,
        }
    }

    /// Dispatch a fetch on a background thread; returns its sequence number.
    pub fn dispatch(&mut self, client: OsrmRouteClient, from: GeoPoint, to: GeoPoint) -> u64 {
        self.latest_request_id += 1;
        let request_id = self.latest_request_id;
        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let outcome = client.route(from, to);
            if let Err(err) = &outcome {
                tracing::warn!(request_id, %err, "route fetch failed");
            }
            let _ = sender.send(RouteFetchResult {
                request_id,
                outcome,
            });
        });
        request_id
    }

    /// Drain finished fetches, keeping only a result for the latest issued
    /// request; superseded responses are dropped unseen.
    pub fn drain_latest(&mut self) -> Option<RouteFetchResult> {
        let mut latest = None;
        while let Ok(result) = self.receiver.try_recv() {
            if result.request_id == self.latest_request_id {
                latest = Some(result);
            }
        }
        latest
    }

    pub fn latest_request_id(&self) -> u64 {
        self.latest_request_id
    }
}
