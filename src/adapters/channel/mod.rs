//! In-process channel implementations of the push-oriented ports.

pub mod broadcast;

pub use broadcast::{BroadcastEnvelope, ChannelBroadcastGateway};
