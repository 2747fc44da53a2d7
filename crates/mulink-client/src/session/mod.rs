//! Session state sink.
//!
//! Decoders never read session state back except for the character identity
//! and name. Every update overwrites the previous value (last message wins).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::Notify;

use mulink_core::packets::characters::Attributes;

/// Mutable per-connection facts written by packet handlers.
///
/// Implementations provide their own synchronization: handlers run one at a
/// time, but presentation code may read concurrently.
pub trait SessionSink: Send + Sync {
    /// Own position applied; this also completes a pending move.
    fn set_position(&self, x: u8, y: u8);
    fn update_current_health_shield(&self, health: u32, shield: u32);
    fn update_maximum_health_shield(&self, health: u32, shield: u32);
    fn update_current_mana_ability(&self, mana: u32, ability: u32);
    fn update_maximum_mana_ability(&self, mana: u32, ability: u32);
    fn update_primary_attributes(&self, attributes: Attributes);
    fn set_character_id(&self, id: u16);
    fn character_id(&self) -> Option<u16>;
    fn set_character_name(&self, name: &str);
    fn character_name(&self) -> Option<String>;
    fn set_in_game(&self, in_game: bool);
    /// A pending move finished without (or regardless of) a position change.
    fn signal_movement_acknowledged(&self);
    fn set_connected(&self, connected: bool);
}

/// Point-in-time copy of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub position: Option<(u8, u8)>,
    pub health: u32,
    pub max_health: u32,
    pub shield: u32,
    pub max_shield: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub ability: u32,
    pub max_ability: u32,
    pub attributes: Attributes,
    pub character_id: Option<u16>,
    pub character_name: Option<String>,
    pub in_game: bool,
    pub connected: bool,
}

/// Default in-memory sink.
#[derive(Default)]
pub struct SessionState {
    inner: RwLock<SessionSnapshot>,
    movement_epoch: AtomicU64,
    movement: Notify,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.read().clone()
    }

    /// Number of completed or acknowledged moves so far.
    pub fn movement_epoch(&self) -> u64 {
        self.movement_epoch.load(Ordering::Acquire)
    }

    /// Wait until a move completes or is acknowledged after `since`.
    pub async fn wait_for_movement(&self, since: u64) -> u64 {
        loop {
            let notified = self.movement.notified();
            let epoch = self.movement_epoch();
            if epoch > since {
                return epoch;
            }
            notified.await;
        }
    }

    fn advance_movement(&self) {
        self.movement_epoch.fetch_add(1, Ordering::AcqRel);
        self.movement.notify_waiters();
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionSnapshot> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionSnapshot> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionSink for SessionState {
    fn set_position(&self, x: u8, y: u8) {
        self.write().position = Some((x, y));
        // An applied position also ends any pending move.
        self.advance_movement();
    }

    fn update_current_health_shield(&self, health: u32, shield: u32) {
        let mut s = self.write();
        s.health = health;
        s.shield = shield;
    }

    fn update_maximum_health_shield(&self, health: u32, shield: u32) {
        let mut s = self.write();
        s.max_health = health;
        s.max_shield = shield;
    }

    fn update_current_mana_ability(&self, mana: u32, ability: u32) {
        let mut s = self.write();
        s.mana = mana;
        s.ability = ability;
    }

    fn update_maximum_mana_ability(&self, mana: u32, ability: u32) {
        let mut s = self.write();
        s.max_mana = mana;
        s.max_ability = ability;
    }

    fn update_primary_attributes(&self, attributes: Attributes) {
        self.write().attributes = attributes;
    }

    fn set_character_id(&self, id: u16) {
        self.write().character_id = Some(id);
    }

    fn character_id(&self) -> Option<u16> {
        self.read().character_id
    }

    fn set_character_name(&self, name: &str) {
        self.write().character_name = Some(name.to_string());
    }

    fn character_name(&self) -> Option<String> {
        self.read().character_name.clone()
    }

    fn set_in_game(&self, in_game: bool) {
        self.write().in_game = in_game;
    }

    fn signal_movement_acknowledged(&self) {
        self.advance_movement();
    }

    fn set_connected(&self, connected: bool) {
        self.write().connected = connected;
    }
}
