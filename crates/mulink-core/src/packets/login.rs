//! Login group (`F1`): game server entered, login result, logout.
//!
//! These layouts are identical across all protocol generations.

use crate::error::Result;
use crate::protocol::reader::BodyReader;
use crate::protocol::version::ProtocolVersion;

/// Outcome of a login request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginResult {
    InvalidPassword,
    Okay,
    AccountInvalid,
    AlreadyConnected,
    ServerFull,
    AccountBlocked,
    WrongVersion,
    ConnectionError,
    TooManyFailedAttempts,
    NoPaymentInfo,
    Other(u8),
}

impl LoginResult {
    pub fn from_byte(b: u8) -> Self {
        match b {
            0 => LoginResult::InvalidPassword,
            1 => LoginResult::Okay,
            2 => LoginResult::AccountInvalid,
            3 => LoginResult::AlreadyConnected,
            4 => LoginResult::ServerFull,
            5 => LoginResult::AccountBlocked,
            6 => LoginResult::WrongVersion,
            7 => LoginResult::ConnectionError,
            8 => LoginResult::TooManyFailedAttempts,
            9 => LoginResult::NoPaymentInfo,
            other => LoginResult::Other(other),
        }
    }

    pub fn is_success(self) -> bool {
        self == LoginResult::Okay
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub result: LoginResult,
}

pub fn decode_login_response(body: &[u8], _version: ProtocolVersion) -> Result<LoginResponse> {
    let r = BodyReader::new("login_response", body);
    r.require(1)?;
    Ok(LoginResponse {
        result: LoginResult::from_byte(r.u8(0)?),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameServerEntered {
    pub success: bool,
    pub player_id: u16,
    /// Client version the server expects, e.g. `"10404"`.
    pub server_version: String,
}

pub fn decode_game_server_entered(
    body: &[u8],
    _version: ProtocolVersion,
) -> Result<GameServerEntered> {
    let r = BodyReader::new("game_server_entered", body);
    r.require(8)?;
    Ok(GameServerEntered {
        success: r.u8(0)? == 1,
        player_id: r.u16_be(1)?,
        server_version: r.text(3, 5)?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutKind {
    CloseGame,
    BackToCharacterSelection,
    BackToServerSelection,
    Other(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logout {
    pub kind: LogoutKind,
}

pub fn decode_logout(body: &[u8], _version: ProtocolVersion) -> Result<Logout> {
    let r = BodyReader::new("logout", body);
    r.require(1)?;
    let kind = match r.u8(0)? {
        0 => LogoutKind::CloseGame,
        1 => LogoutKind::BackToCharacterSelection,
        2 => LogoutKind::BackToServerSelection,
        other => LogoutKind::Other(other),
    };
    Ok(Logout { kind })
}
