use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use crate::state::AppState;

/// Resolves the browser's session from its cookie, starting a fresh one when
/// the cookie is missing, malformed or names an expired session.
pub async fn resolve(state: &AppState, jar: CookieJar) -> (CookieJar, Uuid) {
    let presented = jar
        .get(&state.cookie_name)
        .and_then(|c| Uuid::parse_str(c.value()).ok());

    let id = state.sessions.resume_or_create(presented).await;
    if presented == Some(id) {
        return (jar, id);
    }

    tracing::info!(session = %id, "Issuing session cookie");
    let cookie = Cookie::build((state.cookie_name.clone(), id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    (jar.add(cookie), id)
}
