//! Per-connection session state machine.
//!
//! `UNAUTHENTICATED -> AUTHENTICATED -> JOINED(room) -> CLOSED`, with `leave`
//! dropping back to `AUTHENTICATED`. Transition methods return typed errors
//! so the event dispatch can match exhaustively instead of guessing.

use super::error::SessionStateError;
use super::value_object::{ConnectionId, RoomId, Username};

/// Lifecycle phase of one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Unauthenticated,
    Authenticated,
    Joined(RoomId),
    Closed,
}

/// State carried for the lifetime of one connection.
#[derive(Debug, Clone)]
pub struct Session {
    connection_id: ConnectionId,
    username: Username,
    phase: SessionPhase,
}

impl Session {
    /// A freshly accepted, not yet authenticated connection.
    pub fn new(connection_id: ConnectionId) -> Self {
        Self {
            connection_id,
            username: Username::guest(),
            phase: SessionPhase::Unauthenticated,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// The room this connection currently occupies, if any.
    pub fn room(&self) -> Option<&RoomId> {
        match &self.phase {
            SessionPhase::Joined(room_id) => Some(room_id),
            _ => None,
        }
    }

    /// Mark the connection authenticated. Only valid once, from
    /// `Unauthenticated`.
    pub fn authenticate(&mut self) -> Result<(), SessionStateError> {
        match self.phase {
            SessionPhase::Unauthenticated => {
                self.phase = SessionPhase::Authenticated;
                Ok(())
            }
            SessionPhase::Closed => Err(SessionStateError::Closed),
            _ => Err(SessionStateError::AlreadyAuthenticated),
        }
    }

    /// Enter a room. The username supplied with the join request replaces the
    /// fallback name for the rest of the session.
    pub fn join(&mut self, room_id: RoomId, username: Username) -> Result<(), SessionStateError> {
        match &self.phase {
            SessionPhase::Authenticated => {
                self.username = username;
                self.phase = SessionPhase::Joined(room_id);
                Ok(())
            }
            SessionPhase::Unauthenticated => Err(SessionStateError::NotAuthenticated),
            SessionPhase::Joined(current) => {
                Err(SessionStateError::AlreadyJoined(current.as_str().to_string()))
            }
            SessionPhase::Closed => Err(SessionStateError::Closed),
        }
    }

    /// Leave the current room, returning its identifier.
    pub fn leave(&mut self) -> Result<RoomId, SessionStateError> {
        match std::mem::replace(&mut self.phase, SessionPhase::Authenticated) {
            SessionPhase::Joined(room_id) => Ok(room_id),
            other => {
                // No room to leave: restore the phase we clobbered.
                let err = match other {
                    SessionPhase::Closed => SessionStateError::Closed,
                    _ => SessionStateError::NotJoined,
                };
                self.phase = other;
                Err(err)
            }
        }
    }

    /// Close the connection from any phase. Returns the room to clean up if
    /// the connection was joined. Idempotent.
    pub fn close(&mut self) -> Option<RoomId> {
        match std::mem::replace(&mut self.phase, SessionPhase::Closed) {
            SessionPhase::Joined(room_id) => Some(room_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    fn name(n: &str) -> Username {
        Username::new(n.to_string()).unwrap()
    }

    #[test]
    fn test_full_lifecycle() {
        // Test: the happy path walks every phase in order
        // given:
        let mut session = Session::new(ConnectionId::generate());
        assert_eq!(session.phase(), &SessionPhase::Unauthenticated);

        // when / then:
        session.authenticate().unwrap();
        assert_eq!(session.phase(), &SessionPhase::Authenticated);

        session.join(room("r1"), name("alice")).unwrap();
        assert_eq!(session.room(), Some(&room("r1")));
        assert_eq!(session.username().as_str(), "alice");

        let left = session.leave().unwrap();
        assert_eq!(left, room("r1"));
        assert_eq!(session.phase(), &SessionPhase::Authenticated);

        assert_eq!(session.close(), None);
        assert_eq!(session.phase(), &SessionPhase::Closed);
    }

    #[test]
    fn test_join_before_authenticate_is_rejected() {
        // Test: a join on an unauthenticated connection is a typed error
        // given:
        let mut session = Session::new(ConnectionId::generate());

        // when:
        let result = session.join(room("r1"), name("alice"));

        // then:
        assert_eq!(result, Err(SessionStateError::NotAuthenticated));
    }

    #[test]
    fn test_double_join_is_rejected() {
        // Test: a second join while already in a room is rejected
        // given:
        let mut session = Session::new(ConnectionId::generate());
        session.authenticate().unwrap();
        session.join(room("r1"), name("alice")).unwrap();

        // when:
        let result = session.join(room("r2"), name("alice"));

        // then:
        assert_eq!(
            result,
            Err(SessionStateError::AlreadyJoined("r1".to_string()))
        );
        assert_eq!(session.room(), Some(&room("r1")));
    }

    #[test]
    fn test_double_authenticate_is_rejected() {
        // Test: authenticating twice is rejected
        // given:
        let mut session = Session::new(ConnectionId::generate());
        session.authenticate().unwrap();

        // when:
        let result = session.authenticate();

        // then:
        assert_eq!(result, Err(SessionStateError::AlreadyAuthenticated));
    }

    #[test]
    fn test_leave_without_join_is_rejected() {
        // Test: leaving while not joined is a typed error and phase is kept
        // given:
        let mut session = Session::new(ConnectionId::generate());
        session.authenticate().unwrap();

        // when:
        let result = session.leave();

        // then:
        assert_eq!(result, Err(SessionStateError::NotJoined));
        assert_eq!(session.phase(), &SessionPhase::Authenticated);
    }

    #[test]
    fn test_close_while_joined_returns_room() {
        // Test: an abrupt close of a joined connection yields the room to clean
        // given:
        let mut session = Session::new(ConnectionId::generate());
        session.authenticate().unwrap();
        session.join(room("r1"), name("alice")).unwrap();

        // when:
        let cleanup = session.close();

        // then:
        assert_eq!(cleanup, Some(room("r1")));
    }

    #[test]
    fn test_close_is_idempotent() {
        // Test: closing twice returns nothing the second time
        // given:
        let mut session = Session::new(ConnectionId::generate());
        session.authenticate().unwrap();
        session.join(room("r1"), name("alice")).unwrap();
        session.close();

        // when:
        let second = session.close();

        // then:
        assert_eq!(second, None);
        assert_eq!(session.phase(), &SessionPhase::Closed);
    }

    #[test]
    fn test_no_event_accepted_after_close() {
        // Test: every transition on a closed session is rejected
        // given:
        let mut session = Session::new(ConnectionId::generate());
        session.close();

        // when / then:
        assert_eq!(session.authenticate(), Err(SessionStateError::Closed));
        assert_eq!(
            session.join(room("r1"), name("alice")),
            Err(SessionStateError::Closed)
        );
        assert_eq!(session.leave(), Err(SessionStateError::Closed));
    }
}
