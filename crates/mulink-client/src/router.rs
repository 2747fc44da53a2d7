//! Packet router: header decode, dispatch lookup, handler invocation.
//!
//! `dispatch` is the single fault boundary. Whatever goes wrong while one
//! message is processed (malformed header, unknown opcode, short payload,
//! decode fault, even a panicking sink) is logged and counted, and the
//! router stays usable for the next message. A fault in a movement family
//! also acknowledges movement so no caller stays blocked on it.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use mulink_core::error::{ErrorKind, PacketError};
use mulink_core::protocol::codes::is_movement;
use mulink_core::protocol::header::{decode_header, Header};
use mulink_core::{Packet, ProtocolVersion};

use crate::dispatch::{DispatchTable, HandlerCtx};
use crate::followup::FollowUp;
use crate::obs::RouterMetrics;
use crate::session::SessionSink;

/// What happened to one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A handler ran to completion.
    Handled(&'static str),
    /// The message was dropped.
    Dropped(ErrorKind),
    /// A handler panicked; the panic was contained.
    Panicked,
}

pub struct PacketRouter {
    version: ProtocolVersion,
    table: Arc<DispatchTable>,
    session: Arc<dyn SessionSink>,
    follow_up: Arc<dyn FollowUp>,
    metrics: Arc<RouterMetrics>,
}

impl PacketRouter {
    /// Router over the standard dispatch table.
    pub fn new(
        version: ProtocolVersion,
        session: Arc<dyn SessionSink>,
        follow_up: Arc<dyn FollowUp>,
    ) -> Self {
        Self::with_table(version, Arc::new(DispatchTable::standard()), session, follow_up)
    }

    pub fn with_table(
        version: ProtocolVersion,
        table: Arc<DispatchTable>,
        session: Arc<dyn SessionSink>,
        follow_up: Arc<dyn FollowUp>,
    ) -> Self {
        Self {
            version,
            table,
            session,
            follow_up,
            metrics: Arc::new(RouterMetrics::default()),
        }
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    pub fn metrics(&self) -> Arc<RouterMetrics> {
        Arc::clone(&self.metrics)
    }

    fn route_header(&self, header: Header, raw: &[u8]) -> Result<&'static str, PacketError> {
        let route = self
            .table
            .resolve(header.code, header.sub_code)
            .ok_or(PacketError::UnresolvedOpcode {
                code: header.code,
                sub: header.sub_code,
            })?;

        let ctx = HandlerCtx {
            version: self.version,
            session: self.session.as_ref(),
            follow_up: self.follow_up.as_ref(),
        };
        (route.handler)(&ctx, &Packet::with_header(header, raw))?;
        Ok(route.name)
    }

    /// Route one message, containing every fault.
    pub fn dispatch(&self, raw: &[u8]) -> DispatchOutcome {
        let header = match decode_header(raw) {
            Ok(h) => h,
            Err(e) => {
                tracing::warn!(len = raw.len(), raw = %hex::encode(raw), error = %e, "dropping message with malformed header");
                self.count(ErrorKind::HeaderMalformed.as_str(), None);
                return DispatchOutcome::Dropped(ErrorKind::HeaderMalformed);
            }
        };

        let started = Instant::now();
        let result = catch_unwind(AssertUnwindSafe(|| self.route_header(header, raw)));
        let code = Some(header.code);

        match result {
            Ok(Ok(name)) => {
                self.metrics
                    .dispatch_duration
                    .observe(&[("route", name)], started.elapsed());
                self.count("HANDLED", code);
                DispatchOutcome::Handled(name)
            }
            Ok(Err(e)) => {
                let kind = e.kind();
                match kind {
                    ErrorKind::UnresolvedOpcode => {
                        tracing::warn!(code = header.code, sub = ?header.sub_code, len = raw.len(), "unhandled message");
                    }
                    ErrorKind::HeaderMalformed | ErrorKind::DecodeLengthMismatch => {
                        tracing::warn!(code = header.code, sub = ?header.sub_code, len = raw.len(), error = %e, "dropping message");
                        self.recover_movement(&header);
                    }
                    ErrorKind::DecodeFault => {
                        tracing::error!(code = header.code, sub = ?header.sub_code, raw = %hex::encode(raw), error = %e, "decode fault");
                        self.recover_movement(&header);
                    }
                }
                self.count(kind.as_str(), code);
                DispatchOutcome::Dropped(kind)
            }
            Err(_) => {
                tracing::error!(code = header.code, sub = ?header.sub_code, raw = %hex::encode(raw), "handler panicked");
                self.recover_movement(&header);
                self.count("PANICKED", code);
                DispatchOutcome::Panicked
            }
        }
    }

    /// Connection teardown. Call once per connection.
    pub fn on_disconnected(&self) {
        tracing::info!("disconnected");
        self.session.set_connected(false);
    }

    fn recover_movement(&self, header: &Header) {
        if !is_movement(header.code) {
            return;
        }
        let code = format!("{:02x}", header.code);
        self.metrics.movement_recoveries.inc(&[("code", &code)]);
        if catch_unwind(AssertUnwindSafe(|| self.session.signal_movement_acknowledged())).is_err() {
            tracing::error!(code = header.code, "movement acknowledgement panicked");
        }
    }

    fn count(&self, outcome: &str, code: Option<u8>) {
        let code = code.map(|c| format!("{c:02x}")).unwrap_or_else(|| "-".into());
        self.metrics
            .dispatch_outcomes
            .inc(&[("outcome", outcome), ("code", &code)]);
    }
}
