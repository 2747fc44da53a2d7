//! Shared client state: one session, one router, one outbound queue.
//!
//! Startup errors are returned, never panicked on.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;

use mulink_core::protocol::subcode::has_sub_opcode;

use crate::config::ClientConfig;
use crate::dispatch::{DispatchKey, DispatchTable};
use crate::error::Result;
use crate::followup::{ChannelOutbound, OutboundFollowUp};
use crate::router::PacketRouter;
use crate::session::SessionState;

#[derive(Clone)]
pub struct ClientState {
    cfg: Arc<ClientConfig>,
    session: Arc<SessionState>,
    router: Arc<PacketRouter>,
}

impl ClientState {
    /// Wire the standard dispatch table to a fresh session.
    ///
    /// `outbound` is the writer queue of the connection the router will serve.
    pub fn new(cfg: ClientConfig, outbound: mpsc::Sender<Bytes>) -> Result<Self> {
        let table = DispatchTable::standard();
        check_table(&table);

        let session = Arc::new(SessionState::new());
        let follow_up = OutboundFollowUp::new(
            Arc::new(ChannelOutbound::new(outbound)),
            session.clone(),
            cfg.client.character.clone(),
        );
        let router = PacketRouter::with_table(
            cfg.client.protocol,
            Arc::new(table),
            session.clone(),
            Arc::new(follow_up),
        );

        tracing::info!(
            protocol = %cfg.client.protocol,
            routes = router.table().len(),
            "client state ready"
        );

        Ok(Self {
            cfg: Arc::new(cfg),
            session,
            router: Arc::new(router),
        })
    }

    pub fn cfg(&self) -> &ClientConfig {
        &self.cfg
    }

    pub fn session(&self) -> Arc<SessionState> {
        Arc::clone(&self.session)
    }

    pub fn router(&self) -> Arc<PacketRouter> {
        Arc::clone(&self.router)
    }
}

/// Routes keyed on a sub-code the header decoder never produces are dead.
/// Returns the dead keys after warning about each.
fn check_table(table: &DispatchTable) -> Vec<DispatchKey> {
    let dead: Vec<DispatchKey> = table
        .registered_keys()
        .into_iter()
        .filter(|key| key.sub.is_some() && !has_sub_opcode(key.code))
        .collect();
    for key in &dead {
        tracing::warn!(%key, "route expects a sub-code the header decoder never reads");
    }
    dead
}
