use crate::core::payment::{self, PaymentMethod, PaymentSimulation};
use std::time::Duration;
use tokio::sync::watch;

/// Timer settings of the payment simulation
#[derive(Debug, Clone, Copy)]
pub struct PaymentTiming {
    pub tick_interval: Duration,
    pub progress_step: u8,
}

impl Default for PaymentTiming {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(200),
            progress_step: 5,
        }
    }
}

/// Running payment simulations, polled by id
///
/// Each simulation runs in its own task and publishes through a watch
/// channel; the registry keeps the receiving end until the entry expires.
pub struct PaymentRegistry {
    simulations: moka::future::Cache<String, watch::Receiver<PaymentSimulation>>,
    timing: PaymentTiming,
}

impl PaymentRegistry {
    pub fn new(timing: PaymentTiming, session_ttl_secs: u64) -> Self {
        let simulations = moka::future::CacheBuilder::new(10_000)
            .time_to_live(Duration::from_secs(session_ttl_secs))
            .build();

        Self { simulations, timing }
    }

    /// Create a simulation, move it to processing and start its timer
    pub async fn start(
        &self,
        listing_id: &str,
        amount: u32,
        method: PaymentMethod,
    ) -> Result<PaymentSimulation, payment::PaymentError> {
        let mut simulation = PaymentSimulation::new(listing_id, amount, method);
        simulation.begin()?;

        let (tx, rx) = watch::channel(simulation.clone());
        self.simulations.insert(simulation.id.clone(), rx).await;

        let id = simulation.id.clone();
        let timing = self.timing;
        let driven = simulation.clone();
        tokio::spawn(async move {
            if let Err(e) = payment::run(driven, timing.tick_interval, timing.progress_step, tx).await {
                tracing::error!("Payment simulation {} stopped: {}", id, e);
            }
        });

        tracing::info!(
            "Started payment simulation {} for {} ({} DZD via {:?})",
            simulation.id,
            listing_id,
            amount,
            method
        );
        Ok(simulation)
    }

    /// Latest state of a simulation
    pub async fn get(&self, id: &str) -> Option<PaymentSimulation> {
        self.simulations.get(id).await.map(|rx| rx.borrow().clone())
    }
}
