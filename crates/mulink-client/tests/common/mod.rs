//! Shared fixtures: recording sink, recording follow-up, message builders.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use mulink_client::followup::FollowUp;
use mulink_client::session::SessionSink;
use mulink_client::PacketRouter;
use mulink_core::packets::characters::{Attributes, CharacterSummary};
use mulink_core::ProtocolVersion;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Position(u8, u8),
    CurrentHealthShield(u32, u32),
    MaximumHealthShield(u32, u32),
    CurrentManaAbility(u32, u32),
    MaximumManaAbility(u32, u32),
    Attributes(Attributes),
    CharacterId(u16),
    CharacterName(String),
    InGame(bool),
    MovementAcknowledged,
    Connected(bool),
}

/// Records every mutation; reads answer from the recorded identity.
#[derive(Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<SinkCall>>,
    id: Mutex<Option<u16>>,
    name: Mutex<Option<String>>,
    panic_on_position: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(id: Option<u16>, name: Option<&str>) -> Self {
        Self {
            id: Mutex::new(id),
            name: Mutex::new(name.map(str::to_string)),
            ..Self::default()
        }
    }

    /// Own character id 0x0042 whose `set_position` panics.
    pub fn panicking() -> Self {
        Self {
            id: Mutex::new(Some(0x42)),
            panic_on_position: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &SinkCall) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    fn push(&self, call: SinkCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl SessionSink for RecordingSink {
    fn set_position(&self, x: u8, y: u8) {
        if self.panic_on_position {
            panic!("sink failure");
        }
        self.push(SinkCall::Position(x, y));
    }

    fn update_current_health_shield(&self, health: u32, shield: u32) {
        self.push(SinkCall::CurrentHealthShield(health, shield));
    }

    fn update_maximum_health_shield(&self, health: u32, shield: u32) {
        self.push(SinkCall::MaximumHealthShield(health, shield));
    }

    fn update_current_mana_ability(&self, mana: u32, ability: u32) {
        self.push(SinkCall::CurrentManaAbility(mana, ability));
    }

    fn update_maximum_mana_ability(&self, mana: u32, ability: u32) {
        self.push(SinkCall::MaximumManaAbility(mana, ability));
    }

    fn update_primary_attributes(&self, attributes: Attributes) {
        self.push(SinkCall::Attributes(attributes));
    }

    fn set_character_id(&self, id: u16) {
        *self.id.lock().unwrap() = Some(id);
        self.push(SinkCall::CharacterId(id));
    }

    fn character_id(&self) -> Option<u16> {
        *self.id.lock().unwrap()
    }

    fn set_character_name(&self, name: &str) {
        *self.name.lock().unwrap() = Some(name.to_string());
        self.push(SinkCall::CharacterName(name.to_string()));
    }

    fn character_name(&self) -> Option<String> {
        self.name.lock().unwrap().clone()
    }

    fn set_in_game(&self, in_game: bool) {
        self.push(SinkCall::InGame(in_game));
    }

    fn signal_movement_acknowledged(&self) {
        self.push(SinkCall::MovementAcknowledged);
    }

    fn set_connected(&self, connected: bool) {
        self.push(SinkCall::Connected(connected));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUpCall {
    CharacterList,
    Selection(Vec<CharacterSummary>),
}

#[derive(Default)]
pub struct RecordingFollowUp {
    calls: Mutex<Vec<FollowUpCall>>,
}

impl RecordingFollowUp {
    pub fn calls(&self) -> Vec<FollowUpCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl FollowUp for RecordingFollowUp {
    fn request_character_list(&self) {
        self.calls.lock().unwrap().push(FollowUpCall::CharacterList);
    }

    fn begin_character_selection(&self, characters: Vec<CharacterSummary>) {
        self.calls
            .lock()
            .unwrap()
            .push(FollowUpCall::Selection(characters));
    }
}

pub fn router(
    version: ProtocolVersion,
    sink: &Arc<RecordingSink>,
    follow_up: &Arc<RecordingFollowUp>,
) -> PacketRouter {
    PacketRouter::new(version, sink.clone(), follow_up.clone())
}

/// C1 message: `C1 len code [sub] body`.
pub fn c1(code: u8, sub: Option<u8>, body: &[u8]) -> Vec<u8> {
    let mut out = vec![0xC1, 0x00, code];
    out.extend(sub);
    out.extend_from_slice(body);
    out[1] = u8::try_from(out.len()).unwrap();
    out
}

/// C2 message: `C2 len_hi len_lo code [sub] body`.
pub fn c2(code: u8, sub: Option<u8>, body: &[u8]) -> Vec<u8> {
    let mut out = vec![0xC2, 0x00, 0x00, code];
    out.extend(sub);
    out.extend_from_slice(body);
    let len = u16::try_from(out.len()).unwrap().to_be_bytes();
    out[1] = len[0];
    out[2] = len[1];
    out
}

/// Name field padded with zeros to the wire width.
pub fn name10(name: &str) -> [u8; 10] {
    let mut out = [0u8; 10];
    out[..name.len()].copy_from_slice(name.as_bytes());
    out
}

/// Season 6 scope record for a character without effects.
pub fn scope_record_s6(id: u16, name: &str, x: u8, y: u8) -> Vec<u8> {
    let mut rec = vec![0u8; 36];
    rec[0..2].copy_from_slice(&id.to_be_bytes());
    rec[2] = x;
    rec[3] = y;
    rec[22..32].copy_from_slice(&name10(name));
    rec[32] = x;
    rec[33] = y;
    rec
}
