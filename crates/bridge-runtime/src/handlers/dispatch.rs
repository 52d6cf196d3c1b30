//! # Gate Handler
//!
//! Runs the event gate over a stream of post events until shutdown.

use std::sync::Arc;

use mb_03_mentions::MessageContent;
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

use super::event_gate::{EventGate, GateDecision, PostEvent};

/// Content cleared for the opposite platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForwardedPost {
    pub post_id: String,
    pub channel_id: String,
    pub content: MessageContent,
}

/// Counters for one handler run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub forwarded: u64,
    pub skipped_remote: u64,
    pub skipped_echo: u64,
}

/// Handler for local post events.
pub struct GateHandler {
    /// Incoming post events.
    receiver: mpsc::Receiver<PostEvent>,
    /// Decision logic.
    gate: Arc<EventGate>,
    /// Posts cleared for forwarding.
    outbound: mpsc::Sender<ForwardedPost>,
}

impl GateHandler {
    pub fn new(
        receiver: mpsc::Receiver<PostEvent>,
        gate: Arc<EventGate>,
        outbound: mpsc::Sender<ForwardedPost>,
    ) -> Self {
        Self {
            receiver,
            gate,
            outbound,
        }
    }

    /// Run the handler loop until the input closes or shutdown is signalled.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> DispatchStats {
        let mut stats = DispatchStats::default();

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    info!("Gate handler: shutdown signal received");
                    break;
                }
                event = self.receiver.recv() => {
                    let Some(event) = event else {
                        break;
                    };
                    if !self.handle(event, &mut stats).await {
                        break;
                    }
                }
            }
        }

        stats
    }

    /// Returns false once the outbound side has gone away.
    async fn handle(&self, event: PostEvent, stats: &mut DispatchStats) -> bool {
        match self.gate.evaluate(&event).await {
            GateDecision::SkipRemoteActor => stats.skipped_remote += 1,
            GateDecision::SkipOwnEcho => stats.skipped_echo += 1,
            GateDecision::Forward(content) => {
                let forwarded = ForwardedPost {
                    post_id: event.post_id,
                    channel_id: event.channel_id,
                    content,
                };
                if self.outbound.send(forwarded).await.is_err() {
                    warn!("Gate handler: outbound channel closed, stopping");
                    return false;
                }
                stats.forwarded += 1;
            }
        }
        true
    }
}
