// Call room roster flow: create, join, list, leave.

use anyhow::Result;
use recroom::RoomRegistry;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let rooms = RoomRegistry::new();

    let room = rooms.create("ada").await;
    info!("Created {}", room.room_id);

    let grace = rooms.join(&room.room_id, "grace").await?;
    let edsger = rooms.join(&room.room_id, "edsger").await?;

    let roster = rooms.get(&room.room_id).await?;
    info!(
        "{} participants: {:?}",
        roster.participants.len(),
        roster
            .participants
            .iter()
            .map(|p| p.display_name.as_str())
            .collect::<Vec<_>>()
    );

    rooms.leave(&room.room_id, &grace.participant_id).await?;
    rooms.leave(&room.room_id, &edsger.participant_id).await?;
    rooms
        .leave(&room.room_id, &room.participants[0].participant_id)
        .await?;

    info!("Rooms remaining: {}", rooms.list().await.len());

    Ok(())
}
