use dashmap::DashMap;
use tokio::sync::{broadcast, Mutex};

use crate::catalog::RateCard;
use crate::engine::desk::PickupDesk;
use crate::engine::intake::BookingIntake;
use crate::engine::simulation::NetworkSimulator;
use crate::models::booking::GeoPoint;
use crate::models::event::JobEvent;
use crate::models::job::CompletedJob;
use crate::models::session::VendorSession;
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub desk: Mutex<PickupDesk>,
    pub completed: DashMap<String, CompletedJob>,
    pub simulator: NetworkSimulator,
    pub job_events_tx: broadcast::Sender<JobEvent>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(
        session: VendorSession,
        fallback_location: GeoPoint,
        simulator: NetworkSimulator,
        event_buffer_size: usize,
    ) -> Self {
        let desk = PickupDesk::new(
            session,
            BookingIntake::with_fixtures(fallback_location),
            RateCard::default(),
        );
        Self::with_desk(desk, simulator, event_buffer_size)
    }

    pub fn with_desk(
        desk: PickupDesk,
        simulator: NetworkSimulator,
        event_buffer_size: usize,
    ) -> Self {
        let (job_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        Self {
            desk: Mutex::new(desk),
            completed: DashMap::new(),
            simulator,
            job_events_tx,
            metrics: Metrics::new(),
        }
    }

    pub fn publish(&self, event: JobEvent) {
        let _ = self.job_events_tx.send(event);
    }
}
