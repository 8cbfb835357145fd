//! Mocked payment flow.
//!
//! No gateway is contacted. A simulation goes through
//! `selection -> processing -> success`, with the processing progress driven
//! by a timer and the transaction id fabricated locally.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::watch;

pub const PROGRESS_COMPLETE: u8 = 100;

/// Local payment methods offered by the checkout form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Edahabia,
    Cib,
    Baridimob,
}

/// Phase of a payment simulation, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum PaymentPhase {
    Selection,
    Processing { progress: u8 },
    Success { transaction_id: String },
}

impl PaymentPhase {
    pub fn progress(&self) -> u8 {
        match self {
            PaymentPhase::Selection => 0,
            PaymentPhase::Processing { progress } => *progress,
            PaymentPhase::Success { .. } => PROGRESS_COMPLETE,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, PaymentPhase::Success { .. })
    }
}

/// Errors raised by an invalid phase transition
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("payment already started")]
    AlreadyStarted,

    #[error("payment has not been started")]
    NotStarted,

    #[error("progress step must be between 1 and 100")]
    InvalidStep,
}

/// Payment simulation state machine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSimulation {
    pub id: String,
    #[serde(rename = "listingId")]
    pub listing_id: String,
    pub amount: u32,
    pub method: PaymentMethod,
    #[serde(flatten)]
    pub phase: PaymentPhase,
    #[serde(rename = "startedAt")]
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl PaymentSimulation {
    pub fn new(listing_id: &str, amount: u32, method: PaymentMethod) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            listing_id: listing_id.to_string(),
            amount,
            method,
            phase: PaymentPhase::Selection,
            started_at: chrono::Utc::now(),
        }
    }

    /// Leave the selection phase
    pub fn begin(&mut self) -> Result<(), PaymentError> {
        match self.phase {
            PaymentPhase::Selection => {
                self.phase = PaymentPhase::Processing { progress: 0 };
                Ok(())
            }
            _ => Err(PaymentError::AlreadyStarted),
        }
    }

    /// Advance the progress by `step`
    ///
    /// Progress is clamped to 100. Reaching 100 moves the simulation to
    /// success; returns `true` only on that transition. Ticking a completed
    /// simulation is a no-op.
    pub fn tick(&mut self, step: u8) -> Result<bool, PaymentError> {
        if step == 0 || step > PROGRESS_COMPLETE {
            return Err(PaymentError::InvalidStep);
        }

        match self.phase {
            PaymentPhase::Selection => Err(PaymentError::NotStarted),
            PaymentPhase::Success { .. } => Ok(false),
            PaymentPhase::Processing { progress } => {
                let next = progress.saturating_add(step).min(PROGRESS_COMPLETE);
                if next == PROGRESS_COMPLETE {
                    self.phase = PaymentPhase::Success {
                        transaction_id: fabricate_transaction_id(),
                    };
                    Ok(true)
                } else {
                    self.phase = PaymentPhase::Processing { progress: next };
                    Ok(false)
                }
            }
        }
    }
}

/// `TXN-` followed by 10 uppercase hex characters
pub fn fabricate_transaction_id() -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
    format!("TXN-{}", &raw[..10])
}

/// Drive a started simulation to completion on a fixed interval, publishing
/// every change on `updates`
///
/// Stops early when every receiver has been dropped.
pub async fn run(
    mut simulation: PaymentSimulation,
    tick_interval: Duration,
    step: u8,
    updates: watch::Sender<PaymentSimulation>,
) -> Result<PaymentSimulation, PaymentError> {
    let mut interval = tokio::time::interval(tick_interval);
    // The first tick of a tokio interval completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;
        let completed = simulation.tick(step)?;

        if updates.send(simulation.clone()).is_err() {
            tracing::debug!("Payment {} abandoned by every watcher", simulation.id);
            return Ok(simulation);
        }

        if completed {
            tracing::info!("Payment simulation {} completed", simulation.id);
            return Ok(simulation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_monotonic_and_completes_once() {
        let mut sim = PaymentSimulation::new("kg-1", 4500, PaymentMethod::Edahabia);
        sim.begin().unwrap();

        let mut last = 0;
        let mut transitions = 0;
        for _ in 0..50 {
            if sim.tick(7).unwrap() {
                transitions += 1;
            }
            assert!(sim.phase.progress() >= last);
            last = sim.phase.progress();
        }

        assert_eq!(transitions, 1);
        assert_eq!(last, PROGRESS_COMPLETE);
        assert!(sim.phase.is_complete());
    }

    #[test]
    fn test_transitions_are_guarded() {
        let mut sim = PaymentSimulation::new("kg-1", 4500, PaymentMethod::Cib);
        assert_eq!(sim.tick(5), Err(PaymentError::NotStarted));

        sim.begin().unwrap();
        assert_eq!(sim.begin(), Err(PaymentError::AlreadyStarted));
        assert_eq!(sim.tick(0), Err(PaymentError::InvalidStep));
    }

    #[test]
    fn test_transaction_id_format() {
        let id = fabricate_transaction_id();
        assert_eq!(id.len(), 14);
        assert!(id.starts_with("TXN-"));
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[tokio::test]
    async fn test_run_reaches_success() {
        let mut sim = PaymentSimulation::new("kg-1", 4500, PaymentMethod::Baridimob);
        sim.begin().unwrap();
        let (tx, mut rx) = watch::channel(sim.clone());

        let handle = tokio::spawn(run(sim, Duration::from_millis(10), 25, tx));

        let mut seen = vec![];
        while rx.changed().await.is_ok() {
            let phase = rx.borrow_and_update().phase.clone();
            let done = phase.is_complete();
            seen.push(phase.progress());
            if done {
                break;
            }
        }

        let finished = handle.await.unwrap().unwrap();
        assert!(finished.phase.is_complete());
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(seen.last(), Some(&PROGRESS_COMPLETE));
    }
}
