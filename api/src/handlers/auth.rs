use crate::AppState;
use crate::error::AppError;

/// Signs a session token for `email` and returns the `Set-Cookie` value.
#[tracing::instrument(skip_all)]
pub fn issue_session(state: &AppState, email: String) -> Result<String, AppError> {
    let token = state.sessions.issue(email)?;
    tracing::debug!("issued session token");
    Ok(state.sessions.session_cookie(&token))
}

pub fn clear_session(state: &AppState) -> String {
    state.sessions.cleared_cookie()
}
