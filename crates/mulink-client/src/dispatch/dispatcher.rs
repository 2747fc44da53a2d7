use std::collections::HashMap;
use std::fmt;

use mulink_core::error::Result;
use mulink_core::{Packet, ProtocolVersion};

use crate::followup::FollowUp;
use crate::session::SessionSink;

/// What a handler may touch while processing one message.
pub struct HandlerCtx<'a> {
    pub version: ProtocolVersion,
    pub session: &'a dyn SessionSink,
    pub follow_up: &'a dyn FollowUp,
}

/// Decode-and-apply routine for one message family.
pub type HandlerFn = fn(&HandlerCtx<'_>, &Packet<'_>) -> Result<()>;

/// Lookup key. A `None` sub-code registers the family-wide catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DispatchKey {
    pub code: u8,
    pub sub: Option<u8>,
}

impl fmt::Display for DispatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub {
            Some(sub) => write!(f, "{:02X}/{:02X}", self.code, sub),
            None => write!(f, "{:02X}", self.code),
        }
    }
}

#[derive(Clone, Copy)]
pub struct Route {
    pub key: DispatchKey,
    pub name: &'static str,
    pub handler: HandlerFn,
}

impl Route {
    pub const fn new(code: u8, sub: Option<u8>, name: &'static str, handler: HandlerFn) -> Self {
        Self {
            key: DispatchKey { code, sub },
            name,
            handler,
        }
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("key", &self.key)
            .field("name", &self.name)
            .finish()
    }
}

/// Registry of handlers keyed by (code, sub-code). Built once, read-only after.
#[derive(Debug, Default)]
pub struct DispatchTable {
    routes: HashMap<DispatchKey, Route>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    pub fn from_routes(routes: &[Route]) -> Self {
        let mut table = Self::new();
        for route in routes {
            table.register(*route);
        }
        table
    }

    /// Register a route. The first registration of a key wins; duplicates
    /// are dropped with a warning and `false` is returned.
    pub fn register(&mut self, route: Route) -> bool {
        if let Some(existing) = self.routes.get(&route.key) {
            tracing::warn!(
                key = %route.key,
                kept = existing.name,
                dropped = route.name,
                "duplicate dispatch registration ignored"
            );
            return false;
        }
        self.routes.insert(route.key, route);
        true
    }

    /// Exact match first, then the family-wide `(code, None)` catch-all.
    pub fn resolve(&self, code: u8, sub: Option<u8>) -> Option<&Route> {
        let exact = self.routes.get(&DispatchKey { code, sub });
        match (exact, sub) {
            (Some(route), _) => Some(route),
            (None, Some(_)) => self.routes.get(&DispatchKey { code, sub: None }),
            (None, None) => None,
        }
    }

    pub fn registered_keys(&self) -> Vec<DispatchKey> {
        self.routes.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
