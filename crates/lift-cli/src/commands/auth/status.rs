use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    user_id: Option<String>,
    email: Option<String>,
    expires_at: Option<String>,
    session_source: Option<&'static str>,
    first_sync_done: bool,
    note: Option<String>,
}

pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let first_sync_done = ctx.store.first_sync_done();

    let status = match ctx.require_identity() {
        Ok(provider) => {
            provider.restore().await;
            match provider.current() {
                Some(session) => AuthStatusResponse {
                    authenticated: true,
                    user_id: Some(session.user_id.clone()),
                    email: session.email.clone(),
                    expires_at: Some(session.expires_at.to_rfc3339()),
                    session_source: provider.session_source(),
                    first_sync_done,
                    note: None,
                },
                None => AuthStatusResponse {
                    authenticated: false,
                    user_id: None,
                    email: None,
                    expires_at: None,
                    session_source: None,
                    first_sync_done,
                    note: Some("not signed in".into()),
                },
            }
        }
        Err(error) => AuthStatusResponse {
            authenticated: false,
            user_id: None,
            email: None,
            expires_at: None,
            session_source: None,
            first_sync_done,
            note: Some(error.to_string()),
        },
    };

    output(&status, flags.format)
}
