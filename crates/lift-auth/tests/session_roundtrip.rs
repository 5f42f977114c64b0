use chrono::{TimeDelta, Utc};
use lift_auth::{Session, SessionStore, SignInProof};

#[test]
fn stored_session_restores_owner_identity() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = SessionStore::file_only(dir.path().join("liftlog").join("session.json"));

    let session = Session {
        access_token: "a.b.c".into(),
        refresh_token: "r".into(),
        expires_at: Utc::now() + TimeDelta::hours(1),
        user_id: "3f1c".into(),
        email: None,
    };
    store.save(&session).unwrap();

    let identity = store.load().unwrap().identity();
    assert_eq!(identity.user_id, "3f1c");
    assert!(identity.email.is_none());
}

#[test]
fn pasted_inputs_are_classified() {
    assert!(matches!(
        SignInProof::parse("004211"),
        Ok(SignInProof::Code(code)) if code == "004211"
    ));
    assert!(matches!(
        SignInProof::parse("https://x.supabase.co/auth/v1/verify?token=abc&type=signup"),
        Ok(SignInProof::TokenHash { kind, .. }) if kind == "signup"
    ));
    assert!(SignInProof::parse("not a link").is_err());
}
