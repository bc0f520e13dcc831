// Copyright © holoclash 2024-present
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The WebSocket connection shell.
//!
//! One task per socket reads JSON frames and dispatches them to matchmaking
//! or the player's active room. Protocol errors answer with an `error`
//! message and keep the connection open.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use data::actions::game_action::GameAction;
use data::core::primitives::UserId;
use futures::{SinkExt, StreamExt};
use rand::Rng;
use rules::setup::new_match::DeckSubmission;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::matchmaking::PendingPlayer;
use crate::messages::{error_ids, ClientMessage, ServerMessage};
use crate::room::{OutboundBatch, Room};
use crate::server_state::{ServerState, Session};

/// Builds the axum router exposing the WebSocket endpoint at `/ws`.
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new().route("/ws", get(ws_handler)).with_state(state)
}

async fn ws_handler(
    State(state): State<Arc<ServerState>>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

async fn handle_socket(state: Arc<ServerState>, socket: WebSocket) {
    let user_id = UserId(Uuid::new_v4());
    info!(?user_id, "Client connected");

    let (mut sink, mut stream) = socket.split();
    let (sender, mut receiver) = mpsc::unbounded_channel::<ServerMessage>();

    // Writer task: serialize outbound messages onto the socket.
    let writer = tokio::spawn(async move {
        while let Some(message) = receiver.recv().await {
            let Ok(text) = serde_json::to_string(&message) else {
                continue;
            };
            if sink.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    state.sessions.lock().await.insert(user_id, Session { sender, room: None });

    while let Some(Ok(message)) = stream.next().await {
        let Message::Text(text) = message else {
            continue;
        };
        match serde_json::from_str::<ClientMessage>(&text) {
            Ok(parsed) => dispatch(&state, user_id, parsed).await,
            Err(error) => {
                debug!(?user_id, %error, "Invalid message");
                state
                    .send_to(
                        user_id,
                        error_message(error_ids::INVALID_MESSAGE, "Invalid JSON message"),
                    )
                    .await;
            }
        }
    }

    info!(?user_id, "Client disconnected");
    handle_disconnect(&state, user_id).await;
    writer.abort();
}

async fn dispatch(state: &Arc<ServerState>, user_id: UserId, message: ClientMessage) {
    match message {
        ClientMessage::JoinServer => broadcast_server_info(state).await,
        ClientMessage::JoinMatchmakingQueue {
            queue_name,
            custom_game,
            game_type,
            oshi_id,
            deck,
            cheer_deck,
        } => {
            join_queue(state, user_id, queue_name, custom_game, game_type, DeckSubmission {
                oshi: oshi_id,
                main_deck: deck,
                cheer_deck,
            })
            .await
        }
        ClientMessage::LeaveMatchmakingQueue => {
            state.matchmaking.lock().await.remove_player(user_id);
            broadcast_server_info(state).await;
        }
        ClientMessage::LeaveGame => leave_game(state, user_id).await,
        ClientMessage::GameAction { action } => game_action(state, user_id, action).await,
    }
}

async fn join_queue(
    state: &Arc<ServerState>,
    user_id: UserId,
    queue_name: String,
    custom_game: bool,
    game_type: String,
    submission: DeckSubmission,
) {
    let in_room = {
        let sessions = state.sessions.lock().await;
        sessions.get(&user_id).map_or(false, |session| session.room.is_some())
    };
    let mut matchmaking = state.matchmaking.lock().await;
    if in_room || matchmaking.contains(user_id) {
        state
            .send_to(user_id, error_message(error_ids::ALREADY_IN_MATCH, "Already in a match"))
            .await;
        return;
    }
    if !matchmaking.is_game_type_valid(&game_type) {
        state
            .send_to(user_id, error_message(error_ids::INVALID_GAME_TYPE, "Invalid game type"))
            .await;
        return;
    }
    if !catalog::deck_validation::validate_deck(
        &state.card_database,
        &submission.oshi,
        &submission.main_deck,
        &submission.cheer_deck,
    ) {
        state
            .send_to(user_id, error_message(error_ids::INVALID_DECK, "Invalid deck list"))
            .await;
        return;
    }

    let paired = matchmaking.add_player(
        PendingPlayer { user_id, submission },
        &queue_name,
        custom_game,
        &game_type,
    );
    drop(matchmaking);

    if let Some((first, second)) = paired {
        start_match(state, first, second).await;
    }
    broadcast_server_info(state).await;
}

async fn start_match(state: &Arc<ServerState>, first: PendingPlayer, second: PendingPlayer) {
    let seed = rand::rngs::OsRng.gen();
    let room = Room::create(
        state.card_database.definitions(),
        seed,
        Default::default(),
        (first.user_id, first.submission),
        (second.user_id, second.submission),
    );
    let mut room = match room {
        Ok(room) => room,
        Err(error) => {
            warn!(?error, "Failed to create match");
            return;
        }
    };

    let batches = room.drain_batches();
    let room = Arc::new(Mutex::new(room));
    {
        let mut sessions = state.sessions.lock().await;
        for user_id in [first.user_id, second.user_id] {
            if let Some(session) = sessions.get_mut(&user_id) {
                session.room = Some(Arc::clone(&room));
            }
        }
    }
    deliver_batches(state, batches).await;
}

async fn game_action(state: &Arc<ServerState>, user_id: UserId, action: GameAction) {
    let room = current_room(state, user_id).await;
    let Some(room) = room else {
        state
            .send_to(
                user_id,
                error_message(error_ids::NOT_IN_ROOM, "Not in a game room to send a game message"),
            )
            .await;
        return;
    };

    let batches = {
        let mut room = room.lock().await;
        if room.is_ready_for_cleanup() {
            vec![]
        } else {
            room.handle_game_action(user_id, action)
        }
    };
    deliver_batches(state, batches).await;
    cleanup_if_finished(state, &room).await;
}

async fn leave_game(state: &Arc<ServerState>, user_id: UserId) {
    let room = current_room(state, user_id).await;
    let Some(room) = room else {
        state
            .send_to(
                user_id,
                error_message(error_ids::NOT_IN_ROOM, "Not in a game room to leave"),
            )
            .await;
        return;
    };

    let batches = {
        let mut room = room.lock().await;
        room.handle_quit(user_id)
    };
    deliver_batches(state, batches).await;
    cleanup_if_finished(state, &room).await;
    broadcast_server_info(state).await;
}

/// Disconnect policy: leave queues immediately, keep the room alive for the
/// grace period, then concede on the player's behalf.
async fn handle_disconnect(state: &Arc<ServerState>, user_id: UserId) {
    state.matchmaking.lock().await.remove_player(user_id);

    let room = current_room(state, user_id).await;
    state.sessions.lock().await.remove(&user_id);

    if let Some(room) = room {
        room.lock().await.handle_disconnect(user_id);
        let state = Arc::clone(state);
        let grace = state.config.disconnect_grace;
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            let batches = room.lock().await.handle_disconnect_timeout(user_id);
            deliver_batches(&state, batches).await;
            cleanup_if_finished(&state, &room).await;
        });
    }
    broadcast_server_info(state).await;
}

async fn current_room(
    state: &Arc<ServerState>,
    user_id: UserId,
) -> Option<Arc<Mutex<Room>>> {
    let sessions = state.sessions.lock().await;
    sessions.get(&user_id).and_then(|session| session.room.clone())
}

async fn deliver_batches(state: &Arc<ServerState>, batches: Vec<OutboundBatch>) {
    for (user_id, events) in batches {
        state.send_to(user_id, ServerMessage::GameEvents { events }).await;
    }
}

/// Releases both players back to the lobby once the room is done.
async fn cleanup_if_finished(state: &Arc<ServerState>, room: &Arc<Mutex<Room>>) {
    let (finished, participants) = {
        let room = room.lock().await;
        (
            room.is_ready_for_cleanup(),
            room.players.iter().map(|player| player.user_id).collect::<Vec<_>>(),
        )
    };
    if !finished {
        return;
    }
    let mut sessions = state.sessions.lock().await;
    for user_id in participants {
        if let Some(session) = sessions.get_mut(&user_id) {
            session.room = None;
        }
    }
}

async fn broadcast_server_info(state: &Arc<ServerState>) {
    let queue_info = state.matchmaking.lock().await.queue_info();
    state.broadcast(ServerMessage::ServerInfo { queue_info }).await;
}

fn error_message(error_id: &str, text: &str) -> ServerMessage {
    ServerMessage::Error { error_id: error_id.to_string(), error_message: text.to_string() }
}
