// Integration tests for the call room registry.

use anyhow::Result;
use recroom::{RoomError, RoomRegistry};

#[tokio::test]
async fn create_join_and_leave_flow() -> Result<()> {
    let rooms = RoomRegistry::new();

    let room = rooms.create("ada").await;
    assert_eq!(room.participants.len(), 1);
    assert_eq!(room.participants[0].display_name, "ada");

    let grace = rooms.join(&room.room_id, "grace").await?;
    let roster = rooms.get(&room.room_id).await?;
    assert_eq!(roster.participants.len(), 2);

    rooms.leave(&room.room_id, &grace.participant_id).await?;
    let roster = rooms.get(&room.room_id).await?;
    assert_eq!(roster.participants.len(), 1);

    Ok(())
}

#[tokio::test]
async fn joining_an_unknown_room_fails() {
    let rooms = RoomRegistry::new();

    let err = rooms
        .join("room-missing", "ada")
        .await
        .expect_err("unknown room must not be joinable");
    assert!(matches!(err, RoomError::RoomNotFound(_)));
}

#[tokio::test]
async fn leaving_with_an_unknown_participant_fails() -> Result<()> {
    let rooms = RoomRegistry::new();
    let room = rooms.create("ada").await;

    let err = rooms
        .leave(&room.room_id, "peer-missing")
        .await
        .expect_err("unknown participant must not be removable");
    assert!(matches!(err, RoomError::ParticipantNotFound(_)));

    Ok(())
}

#[tokio::test]
async fn an_emptied_room_is_removed() -> Result<()> {
    let rooms = RoomRegistry::new();
    let room = rooms.create("ada").await;
    let creator = room.participants[0].clone();

    rooms.leave(&room.room_id, &creator.participant_id).await?;

    assert!(matches!(
        rooms.get(&room.room_id).await,
        Err(RoomError::RoomNotFound(_))
    ));
    assert!(rooms.list().await.is_empty());

    Ok(())
}

#[tokio::test]
async fn rooms_do_not_share_participants() -> Result<()> {
    let rooms = RoomRegistry::new();
    let first = rooms.create("ada").await;
    let second = rooms.create("grace").await;

    rooms.join(&first.room_id, "edsger").await?;

    assert_eq!(rooms.get(&first.room_id).await?.participants.len(), 2);
    assert_eq!(rooms.get(&second.room_id).await?.participants.len(), 1);

    Ok(())
}
