//! # Calculation Service
//!
//! Runs calculations and health checks off the event loop. Each job is a
//! spawned tokio task that reports back through a channel; the controller
//! drains the channel between input events.

use super::calculation::CalculationClient;
use crate::repl::models::{BackendStatus, CalculationOutcome, CalculationTicket, RequestId};
use std::time::Duration;
use tokio::sync::mpsc;

/// Capacity of the result channel
const CHANNEL_CAPACITY: usize = 16;

/// Results reported by background jobs
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceMessage {
    /// A calculation ticket completed
    CalculationFinished {
        id: RequestId,
        outcome: CalculationOutcome,
    },
    /// A health check completed; `check` numbers increase with each schedule
    HealthChecked { check: u64, status: BackendStatus },
}

/// Background runner for calculation jobs
pub struct CalculationService {
    client: CalculationClient,
    /// Channel for receiving job results
    message_receiver: mpsc::Receiver<ServiceMessage>,
    /// Channel sender cloned into every job
    message_sender: mpsc::Sender<ServiceMessage>,
    last_health_check: u64,
}

impl CalculationService {
    pub fn new(client: CalculationClient) -> Self {
        let (message_sender, message_receiver) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            client,
            message_receiver,
            message_sender,
            last_health_check: 0,
        }
    }

    /// Run the ticket's request in the background
    pub fn execute_async(&self, ticket: CalculationTicket) {
        let client = self.client.clone();
        let sender = self.message_sender.clone();

        tracing::debug!(id = ticket.id.value(), "spawning calculation");
        tokio::spawn(async move {
            let outcome = client.compute(&ticket.request).await;
            // The receiver is gone only when the app is shutting down
            let _ = sender
                .send(ServiceMessage::CalculationFinished {
                    id: ticket.id,
                    outcome,
                })
                .await;
        });
    }

    /// Check backend health in the background after `delay`, returning the
    /// number its report will carry
    pub fn check_health_async(&mut self, delay: Duration) -> u64 {
        self.last_health_check += 1;
        let check = self.last_health_check;
        let client = self.client.clone();
        let sender = self.message_sender.clone();

        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let status = client.check_health().await;
            tracing::debug!(?status, "health check finished");
            let _ = sender
                .send(ServiceMessage::HealthChecked { check, status })
                .await;
        });
        check
    }

    /// Take a finished result without waiting
    pub fn poll_response(&mut self) -> Option<ServiceMessage> {
        self.message_receiver.try_recv().ok()
    }

    /// Wait for the next finished result
    pub async fn next_message(&mut self) -> Option<ServiceMessage> {
        self.message_receiver.recv().await
    }
}
