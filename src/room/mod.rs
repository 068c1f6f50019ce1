//! Voice-call rooms
//!
//! Rooms are rosters only: create, join, leave, list. There is no signaling,
//! no peer negotiation, and no media transport behind them; call media is a
//! separate concern this service does not carry.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::error::RoomError;

/// Someone present in a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub participant_id: String,
    pub display_name: String,
    pub joined_at: DateTime<Utc>,
}

/// A call room and its roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub room_id: String,
    pub created_at: DateTime<Utc>,
    pub participants: Vec<Participant>,
}

/// In-memory registry of active rooms (room_id → room)
#[derive(Clone, Default)]
pub struct RoomRegistry {
    rooms: Arc<RwLock<HashMap<String, Room>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a room; the creator joins it immediately.
    pub async fn create(&self, display_name: &str) -> Room {
        let room_id = format!("room-{}", Uuid::new_v4());
        let room = Room {
            room_id: room_id.clone(),
            created_at: Utc::now(),
            participants: vec![Self::participant(display_name)],
        };

        self.rooms.write().await.insert(room_id.clone(), room.clone());
        info!("Created room {} for {}", room_id, display_name);

        room
    }

    /// Join an existing room.
    pub async fn join(&self, room_id: &str, display_name: &str) -> Result<Participant, RoomError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RoomError::RoomNotFound(room_id.to_string()))?;

        let participant = Self::participant(display_name);
        room.participants.push(participant.clone());

        info!(
            "{} joined room {} ({} participants)",
            display_name,
            room_id,
            room.participants.len()
        );

        Ok(participant)
    }

    /// Leave a room. An emptied room is dropped from the registry.
    pub async fn leave(&self, room_id: &str, participant_id: &str) -> Result<(), RoomError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RoomError::RoomNotFound(room_id.to_string()))?;

        let before = room.participants.len();
        room.participants
            .retain(|p| p.participant_id != participant_id);
        if room.participants.len() == before {
            return Err(RoomError::ParticipantNotFound(participant_id.to_string()));
        }

        if room.participants.is_empty() {
            rooms.remove(room_id);
            info!("Room {} is empty; removing it", room_id);
        }

        Ok(())
    }

    pub async fn get(&self, room_id: &str) -> Result<Room, RoomError> {
        let rooms = self.rooms.read().await;
        rooms
            .get(room_id)
            .cloned()
            .ok_or_else(|| RoomError::RoomNotFound(room_id.to_string()))
    }

    pub async fn list(&self) -> Vec<Room> {
        self.rooms.read().await.values().cloned().collect()
    }

    fn participant(display_name: &str) -> Participant {
        Participant {
            participant_id: format!("peer-{}", Uuid::new_v4()),
            display_name: display_name.to_string(),
            joined_at: Utc::now(),
        }
    }
}
