//! Tests for the serialized form of game state.

use strictly_dots::{Board, GameSession, Replay, parse_replay};

#[test]
fn test_violation_serializes_offending_move() {
    let replay = parse_replay("1,1,0,0,0,0,1,0,0,0").expect("Well-formed replay");
    let json = serde_json::to_value(&replay).expect("Serializable");

    let violation = &json["violations"][0];
    assert_eq!(violation["index"], 1);
    assert_eq!(violation["winner"], "First");
    assert_eq!(violation["move"]["player"], "Second");
    assert_eq!(violation["move"]["direction"], "Horizontal");
}

#[test]
fn test_replay_survives_json() {
    let replay = parse_replay("2,2,0,0,0,0,1,1,1,1,0,2,1,1").expect("Valid replay");
    let json = serde_json::to_string(&replay).expect("Serializable");
    let back: Replay = serde_json::from_str(&json).expect("Deserializable");
    assert_eq!(back, replay);
}

#[test]
fn test_session_snapshot_survives_json() {
    let session = GameSession::new(2, 2)
        .expect("Valid size")
        .play_move('h', 0, 0)
        .and_then(|s| s.play_move('v', 2, 1))
        .expect("Legal moves");
    let json = serde_json::to_string(&session).expect("Serializable");
    let back: GameSession = serde_json::from_str(&json).expect("Deserializable");
    assert_eq!(back, session);
    assert_eq!(back.play_move('h', 1, 2).ok(), session.play_move('h', 1, 2).ok());
}

#[test]
fn test_replay_without_frames_rejected() {
    let replay = parse_replay("1,1,0,0,0,0").expect("Valid replay");
    let mut json = serde_json::to_value(&replay).expect("Serializable");
    json["frames"] = serde_json::json!([]);
    let err = serde_json::from_value::<Replay>(json).unwrap_err();
    assert!(err.to_string().contains("no frames"));
}

#[test]
fn test_replay_frame_of_wrong_size_rejected() {
    let replay = parse_replay("2,2,0,0,0,0").expect("Valid replay");
    let mut json = serde_json::to_value(&replay).expect("Serializable");
    json["frames"][1] = serde_json::to_value(Board::new(1, 1).expect("Valid size")).expect("Serializable");
    let err = serde_json::from_value::<Replay>(json).unwrap_err();
    assert!(err.to_string().contains("Frame 1 is not a 2x2 board"));
}

#[test]
fn test_truncated_board_in_session_rejected() {
    let session = GameSession::new(2, 2).expect("Valid size");
    let mut json = serde_json::to_value(&session).expect("Serializable");
    json["board"]["boxes"] = serde_json::json!([null]);
    assert!(serde_json::from_value::<GameSession>(json).is_err());
}
