//! Follow-up triggers.
//!
//! Some messages start work with unrelated latency (asking for the character
//! list, picking a character). Triggers return immediately; the request is
//! sent from a spawned task so the router never waits on the socket.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;

use mulink_core::packets::characters::CharacterSummary;
use mulink_core::protocol::request;

use crate::error::{ClientError, Result};
use crate::session::SessionSink;

/// Fire-and-forget hooks invoked by handlers.
pub trait FollowUp: Send + Sync {
    /// Authentication succeeded; ask for the account's characters.
    fn request_character_list(&self);
    /// A non-empty character list arrived; pick one and enter the game.
    fn begin_character_selection(&self, characters: Vec<CharacterSummary>);
}

/// Client-to-server packet sink.
#[async_trait]
pub trait Outbound: Send + Sync {
    async fn send(&self, packet: Bytes) -> Result<()>;
}

/// [`Outbound`] backed by the connection's writer queue.
#[derive(Clone)]
pub struct ChannelOutbound {
    tx: mpsc::Sender<Bytes>,
}

impl ChannelOutbound {
    pub fn new(tx: mpsc::Sender<Bytes>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl Outbound for ChannelOutbound {
    async fn send(&self, packet: Bytes) -> Result<()> {
        self.tx
            .send(packet)
            .await
            .map_err(|_| ClientError::OutboundClosed)
    }
}

/// Pick `preferred` when listed, otherwise the first character.
pub fn choose_character<'a>(
    characters: &'a [CharacterSummary],
    preferred: Option<&str>,
) -> Option<&'a CharacterSummary> {
    preferred
        .and_then(|want| characters.iter().find(|c| c.name == want))
        .or_else(|| characters.first())
}

/// Default triggers: send the matching requests through an [`Outbound`].
pub struct OutboundFollowUp {
    outbound: Arc<dyn Outbound>,
    session: Arc<dyn SessionSink>,
    preferred: Option<String>,
}

impl OutboundFollowUp {
    pub fn new(
        outbound: Arc<dyn Outbound>,
        session: Arc<dyn SessionSink>,
        preferred: Option<String>,
    ) -> Self {
        Self {
            outbound,
            session,
            preferred,
        }
    }

    fn spawn_send(&self, request: &'static str, packet: Bytes) {
        let outbound = Arc::clone(&self.outbound);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = outbound.send(packet).await {
                        tracing::warn!(request, error = %e, "follow-up request not sent");
                    }
                });
            }
            Err(_) => {
                tracing::warn!(request, "no runtime available, follow-up request dropped");
            }
        }
    }
}

impl FollowUp for OutboundFollowUp {
    fn request_character_list(&self) {
        tracing::debug!("requesting character list");
        self.spawn_send("character_list", request::character_list());
    }

    fn begin_character_selection(&self, characters: Vec<CharacterSummary>) {
        let Some(chosen) = choose_character(&characters, self.preferred.as_deref()) else {
            return;
        };
        if let Some(want) = &self.preferred {
            if want != &chosen.name {
                tracing::warn!(preferred = %want, chosen = %chosen.name, "preferred character not on account");
            }
        }
        tracing::info!(name = %chosen.name, level = chosen.level, "selecting character");
        // Name must be known before the scope list that carries our id arrives.
        self.session.set_character_name(&chosen.name);
        self.spawn_send("select_character", request::select_character(&chosen.name));
    }
}
