//! Handler routines: decode with the version-aware decoder, then apply the
//! event to the session sink and/or log it.

use mulink_core::protocol::codes::*;

use super::dispatcher::Route;

mod character;
mod chat;
mod login;
mod movement;
mod scope;
mod vitals;

/// Every built-in route, registered in order at startup.
pub static ROUTES: &[Route] = &[
    Route::new(CHAT_MESSAGE, None, "chat_message", chat::chat_message),
    Route::new(WHISPER, None, "whisper", chat::whisper),
    Route::new(SERVER_MESSAGE, None, "server_message", chat::server_message),
    Route::new(ADD_CHARACTERS_TO_SCOPE, None, "characters_in_scope", scope::characters_in_scope),
    Route::new(ADD_NPCS_TO_SCOPE, None, "npcs_in_scope", scope::npcs_in_scope),
    Route::new(OBJECTS_OUT_OF_SCOPE, None, "objects_out_of_scope", scope::objects_out_of_scope),
    Route::new(OBJECT_GOT_KILLED, None, "object_got_killed", scope::object_got_killed),
    Route::new(OBJECT_MOVED, None, "object_moved", movement::object_moved),
    Route::new(OBJECT_WALKED, None, "object_walked", movement::object_walked),
    Route::new(MAP_CHANGED, None, "map_changed", movement::map_changed),
    Route::new(HEALTH, Some(SUB_CURRENT), "current_health_shield", vitals::current_health_shield),
    Route::new(HEALTH, Some(SUB_MAXIMUM), "maximum_health_shield", vitals::maximum_health_shield),
    Route::new(MANA, Some(SUB_CURRENT), "current_mana_ability", vitals::current_mana_ability),
    Route::new(MANA, Some(SUB_MAXIMUM), "maximum_mana_ability", vitals::maximum_mana_ability),
    Route::new(LOGIN_GROUP, Some(SUB_GAME_SERVER_ENTERED), "game_server_entered", login::game_server_entered),
    Route::new(LOGIN_GROUP, Some(SUB_LOGIN_RESULT), "login_result", login::login_result),
    Route::new(LOGIN_GROUP, Some(SUB_LOGOUT), "logout", login::logout),
    Route::new(LOGIN_GROUP, None, "login_group", login::login_group),
    Route::new(CHARACTER_GROUP, Some(SUB_CHARACTER_LIST), "character_list", character::character_list),
    Route::new(CHARACTER_GROUP, Some(SUB_CHARACTER_INFORMATION), "character_information", character::character_information),
    Route::new(CHARACTER_GROUP, Some(SUB_RESPAWN), "respawn", character::respawn),
    Route::new(CHARACTER_GROUP, Some(SUB_LEVEL_UP), "level_up", character::level_up),
    Route::new(CHARACTER_GROUP, Some(SUB_SKILL_LIST), "skill_list", character::skill_list),
    Route::new(CHARACTER_GROUP, None, "character_group", character::character_group),
];
