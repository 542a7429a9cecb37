//! WebSocket event DTOs.
//!
//! Inbound and outbound events are typed enums tagged with `"type"`, so the
//! per-connection dispatch is a single exhaustive `match` rather than ad hoc
//! listeners. Field names stay camelCase on the wire to match the existing
//! client protocol.

use serde::{Deserialize, Serialize};

/// Events sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    /// Request to enter a room, creating it if the identifier is unknown.
    #[serde(rename = "join-interview", rename_all = "camelCase")]
    JoinInterview {
        interview_id: String,
        username: Option<String>,
    },

    /// Chat message addressed to the other members of the sender's room.
    #[serde(rename = "interview-message", rename_all = "camelCase")]
    InterviewMessage {
        interview_id: String,
        user: String,
        message: String,
        timestamp: Option<String>,
    },

    /// Full replacement of the shared editor text.
    #[serde(rename = "code-change", rename_all = "camelCase")]
    CodeChange { interview_id: String, code: String },

    /// Explicit leave; the connection stays open and may join again.
    #[serde(rename = "leave-interview")]
    LeaveInterview,
}

/// Events pushed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// Sent to a joiner on entry: the current document and member list, so a
    /// late joiner observes the latest write.
    #[serde(rename = "room-state", rename_all = "camelCase")]
    RoomState {
        code: String,
        participants: Vec<ParticipantInfo>,
    },

    /// Announces a new member to the other members of the room.
    #[serde(rename = "user-joined", rename_all = "camelCase")]
    UserJoined { user_id: String, username: String },

    /// Announces a departed member to the remaining members.
    #[serde(rename = "user-left", rename_all = "camelCase")]
    UserLeft { user_id: String, username: String },

    /// Current member count, pushed to every member of the room on each
    /// membership change.
    #[serde(rename = "participants-update")]
    ParticipantsUpdate { count: usize },

    /// Chat relay. The timestamp is the client's when supplied, otherwise
    /// stamped by the server at relay time.
    #[serde(rename = "interview-message", rename_all = "camelCase")]
    InterviewMessage {
        interview_id: String,
        user: String,
        message: String,
        timestamp: String,
    },

    /// Shared editor relay; the payload fully replaces the receiver's text.
    #[serde(rename = "code-change")]
    CodeChange { code: String },
}

/// One member of a room as exposed on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInfo {
    pub user_id: String,
    pub username: String,
    pub joined_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_interview_deserializes_from_wire_format() {
        // Test: the join event parses from the client's wire shape
        // given:
        let raw = r#"{"type":"join-interview","interviewId":"interview_123","username":"alice"}"#;

        // when:
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then:
        assert_eq!(
            event,
            ClientEvent::JoinInterview {
                interview_id: "interview_123".to_string(),
                username: Some("alice".to_string()),
            }
        );
    }

    #[test]
    fn test_join_interview_username_is_optional() {
        // Test: a join without a username still parses
        // given:
        let raw = r#"{"type":"join-interview","interviewId":"interview_123"}"#;

        // when:
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then:
        assert_eq!(
            event,
            ClientEvent::JoinInterview {
                interview_id: "interview_123".to_string(),
                username: None,
            }
        );
    }

    #[test]
    fn test_interview_message_deserializes_without_timestamp() {
        // Test: the chat event parses with the timestamp omitted
        // given:
        let raw = r#"{"type":"interview-message","interviewId":"r1","user":"alice","message":"hi"}"#;

        // when:
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then:
        assert_eq!(
            event,
            ClientEvent::InterviewMessage {
                interview_id: "r1".to_string(),
                user: "alice".to_string(),
                message: "hi".to_string(),
                timestamp: None,
            }
        );
    }

    #[test]
    fn test_code_change_deserializes_from_wire_format() {
        // Test: the code-change event parses from the client's wire shape
        // given:
        let raw = r#"{"type":"code-change","interviewId":"r1","code":"x=1"}"#;

        // when:
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then:
        assert_eq!(
            event,
            ClientEvent::CodeChange {
                interview_id: "r1".to_string(),
                code: "x=1".to_string(),
            }
        );
    }

    #[test]
    fn test_leave_interview_deserializes_from_bare_tag() {
        // Test: the leave event is just its tag
        // given:
        let raw = r#"{"type":"leave-interview"}"#;

        // when:
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then:
        assert_eq!(event, ClientEvent::LeaveInterview);
    }

    #[test]
    fn test_unknown_event_type_is_rejected() {
        // Test: an unknown tag fails to parse instead of being guessed at
        // given:
        let raw = r#"{"type":"shutdown-server"}"#;

        // when:
        let result = serde_json::from_str::<ClientEvent>(raw);

        // then:
        assert!(result.is_err());
    }

    #[test]
    fn test_user_joined_serializes_to_wire_format() {
        // Test: the user-joined announcement matches the wire shape
        // given:
        let event = ServerEvent::UserJoined {
            user_id: "c0ffee".to_string(),
            username: "alice".to_string(),
        };

        // when:
        let value = serde_json::to_value(&event).unwrap();

        // then:
        assert_eq!(
            value,
            json!({"type": "user-joined", "userId": "c0ffee", "username": "alice"})
        );
    }

    #[test]
    fn test_participants_update_serializes_to_wire_format() {
        // Test: the presence event carries only the count
        // given:
        let event = ServerEvent::ParticipantsUpdate { count: 2 };

        // when:
        let value = serde_json::to_value(&event).unwrap();

        // then:
        assert_eq!(value, json!({"type": "participants-update", "count": 2}));
    }

    #[test]
    fn test_room_state_serializes_to_wire_format() {
        // Test: the joiner snapshot carries document and member list
        // given:
        let event = ServerEvent::RoomState {
            code: "x=2".to_string(),
            participants: vec![ParticipantInfo {
                user_id: "c0ffee".to_string(),
                username: "alice".to_string(),
                joined_at: "2026-01-01T00:00:00+00:00".to_string(),
            }],
        };

        // when:
        let value = serde_json::to_value(&event).unwrap();

        // then:
        assert_eq!(
            value,
            json!({
                "type": "room-state",
                "code": "x=2",
                "participants": [{
                    "userId": "c0ffee",
                    "username": "alice",
                    "joinedAt": "2026-01-01T00:00:00+00:00"
                }]
            })
        );
    }

    #[test]
    fn test_chat_relay_serializes_to_wire_format() {
        // Test: the relayed chat message keeps the inbound shape plus timestamp
        // given:
        let event = ServerEvent::InterviewMessage {
            interview_id: "r1".to_string(),
            user: "alice".to_string(),
            message: "hi".to_string(),
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
        };

        // when:
        let value = serde_json::to_value(&event).unwrap();

        // then:
        assert_eq!(
            value,
            json!({
                "type": "interview-message",
                "interviewId": "r1",
                "user": "alice",
                "message": "hi",
                "timestamp": "2026-01-01T00:00:00+00:00"
            })
        );
    }

    #[test]
    fn test_code_change_relay_serializes_to_wire_format() {
        // Test: the code relay carries only the new text
        // given:
        let event = ServerEvent::CodeChange {
            code: "x=2".to_string(),
        };

        // when:
        let value = serde_json::to_value(&event).unwrap();

        // then:
        assert_eq!(value, json!({"type": "code-change", "code": "x=2"}));
    }
}
