//! Dispatch table and the handler routines registered in it.
//!
//! Re-exports the table types so downstream consumers can depend on this
//! module directly.

pub mod dispatcher;
pub mod handlers;

pub use dispatcher::{DispatchKey, DispatchTable, HandlerCtx, HandlerFn, Route};
pub use handlers::ROUTES;

impl DispatchTable {
    /// Table with every built-in handler.
    pub fn standard() -> Self {
        Self::from_routes(ROUTES)
    }
}
