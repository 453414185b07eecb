//! In-process broadcast gateway.
//!
//! Fans pushed messages out over a tokio broadcast channel with sequence
//! numbering. Consumers (tests, the CLI simulator, a future network
//! transport) subscribe for the stream; a push with no subscribers still
//! succeeds, matching the gateway's fire-and-forget contract.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;

use crate::domain::ports::{BroadcastGateway, BroadcastMessage};

/// Envelope delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastEnvelope {
    /// Monotonically increasing sequence number assigned at push
    pub sequence: u64,

    /// When the message was pushed
    pub timestamp: DateTime<Utc>,

    /// Session the message concerns
    pub session_id: String,

    /// The pushed payload
    pub message: BroadcastMessage,
}

/// Broadcast-channel implementation of [`BroadcastGateway`].
pub struct ChannelBroadcastGateway {
    sender: broadcast::Sender<BroadcastEnvelope>,
    sequence: AtomicU64,
}

impl ChannelBroadcastGateway {
    /// Creates a gateway whose channel buffers `capacity` envelopes per
    /// subscriber before lagging.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            sequence: AtomicU64::new(0),
        }
    }

    /// Subscribes to the message stream from this point forward.
    pub fn subscribe(&self) -> broadcast::Receiver<BroadcastEnvelope> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChannelBroadcastGateway {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl BroadcastGateway for ChannelBroadcastGateway {
    async fn push(&self, session_id: &str, message: BroadcastMessage) -> Result<()> {
        let envelope = BroadcastEnvelope {
            sequence: self.sequence.fetch_add(1, Ordering::SeqCst),
            timestamp: Utc::now(),
            session_id: session_id.to_string(),
            message,
        };

        // A send error only means no subscriber is listening right now;
        // fire-and-forget delivery treats that as success
        let _ = self.sender.send(envelope);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{QuestionRecord, QuestionType, TerminationReason};
    use crate::domain::ports::CONTINUE_IMMEDIATELY;

    fn test_question() -> QuestionRecord {
        QuestionRecord::new(
            "q_1".to_string(),
            "Explain CRDTs".to_string(),
            QuestionType::Technical,
            0.5,
            "technical".to_string(),
        )
    }

    #[tokio::test]
    async fn test_subscriber_receives_pushed_message() {
        let gateway = ChannelBroadcastGateway::new(16);
        let mut receiver = gateway.subscribe();

        gateway
            .push("sess_1", BroadcastMessage::next_question("sess_1", test_question()))
            .await
            .unwrap();

        let envelope = receiver.recv().await.unwrap();
        assert_eq!(envelope.session_id, "sess_1");
        assert_eq!(envelope.sequence, 0);
        match envelope.message {
            BroadcastMessage::NextQuestionImmediate { instruction, .. } => {
                assert_eq!(instruction, CONTINUE_IMMEDIATELY);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_push_without_subscribers_succeeds() {
        let gateway = ChannelBroadcastGateway::new(16);

        let result = gateway
            .push(
                "sess_1",
                BroadcastMessage::SessionCompleted {
                    session_id: "sess_1".to_string(),
                    reason: TerminationReason::MaxQuestions,
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_sequence_numbers_increase() {
        let gateway = ChannelBroadcastGateway::new(16);
        let mut receiver = gateway.subscribe();

        for _ in 0..3 {
            gateway
                .push("sess_1", BroadcastMessage::next_question("sess_1", test_question()))
                .await
                .unwrap();
        }

        let first = receiver.recv().await.unwrap();
        let second = receiver.recv().await.unwrap();
        let third = receiver.recv().await.unwrap();
        assert_eq!(
            (first.sequence, second.sequence, third.sequence),
            (0, 1, 2)
        );
    }

    #[tokio::test]
    async fn test_multiple_subscribers_each_receive() {
        let gateway = ChannelBroadcastGateway::new(16);
        let mut a = gateway.subscribe();
        let mut b = gateway.subscribe();
        assert_eq!(gateway.subscriber_count(), 2);

        gateway
            .push("sess_1", BroadcastMessage::next_question("sess_1", test_question()))
            .await
            .unwrap();

        assert!(a.recv().await.is_ok());
        assert!(b.recv().await.is_ok());
    }
}
