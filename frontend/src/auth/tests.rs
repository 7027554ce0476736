use super::*;

fn session_with_role(role: Role) -> SessionState {
    SessionState {
        session: Some(Session {
            token: "t1".to_string(),
            user_id: 7,
            role,
            username: "A".to_string(),
        }),
    }
}

#[test]
fn empty_state_is_unauthenticated() {
    let state = SessionState::default();
    assert!(!state.is_authenticated());
    assert!(!state.is_instructor());
}

#[test]
fn student_session_is_authenticated_but_not_instructor() {
    let state = session_with_role(Role::Student);
    assert!(state.is_authenticated());
    assert!(!state.is_instructor());
}

#[test]
fn instructor_session_unlocks_authoring() {
    let state = session_with_role(Role::Instructor);
    assert!(state.is_authenticated());
    assert!(state.is_instructor());
}

#[test]
fn unknown_role_is_treated_as_plain_user() {
    let state = session_with_role(Role::Unknown);
    assert!(state.is_authenticated());
    assert!(!state.is_instructor());
}
