//! Signed cookies: the logged-in user id and one-shot flash messages.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use quest_core::model::{User, UserId};
use tracing::{debug, warn};
use ui::Flash;

use crate::error::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session";
pub const FLASH_COOKIE: &str = "flash";

fn cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn removal(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}

#[must_use]
pub fn sign_in(jar: SignedCookieJar, user_id: UserId) -> SignedCookieJar {
    jar.add(cookie(SESSION_COOKIE, user_id.to_string()))
}

#[must_use]
pub fn sign_out(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(removal(SESSION_COOKIE))
}

/// Flash values are base64 JSON so the cookie stays header-safe for any text.
fn decode_flashes(value: &str) -> Option<Vec<Flash>> {
    let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&bytes).ok()
}

fn pending_flashes(jar: &SignedCookieJar) -> Vec<Flash> {
    jar.get(FLASH_COOKIE)
        .and_then(|c| decode_flashes(c.value()))
        .unwrap_or_default()
}

/// Queue `flash` for the next rendered page.
#[must_use]
pub fn push_flash(jar: SignedCookieJar, flash: Flash) -> SignedCookieJar {
    let mut flashes = pending_flashes(&jar);
    flashes.push(flash);
    match serde_json::to_vec(&flashes) {
        Ok(json) => jar.add(cookie(FLASH_COOKIE, URL_SAFE_NO_PAD.encode(json))),
        Err(err) => {
            warn!(%err, "dropping flash message");
            jar
        }
    }
}

/// Read and clear queued flashes.
#[must_use]
pub fn take_flashes(jar: SignedCookieJar) -> (SignedCookieJar, Vec<Flash>) {
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, Vec::new());
    }
    let flashes = pending_flashes(&jar);
    (jar.remove(removal(FLASH_COOKIE)), flashes)
}

async fn load_user(parts: &Parts, state: &AppState) -> Result<Option<User>, AppError> {
    let jar = SignedCookieJar::from_headers(&parts.headers, Key::from_ref(state));
    let Some(user_id) = jar
        .get(SESSION_COOKIE)
        .and_then(|c| c.value().parse::<UserId>().ok())
    else {
        return Ok(None);
    };

    let user = state.services.accounts().get_user(user_id).await?;
    if user.is_none() {
        debug!(%user_id, "session names an unknown user");
    }
    Ok(user)
}

/// The logged-in user, if any.
pub struct MaybeUser(pub Option<User>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        load_user(parts, state).await.map(MaybeUser)
    }
}

/// The logged-in user. Anonymous requests are redirected to the login page.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match load_user(parts, state).await {
            Ok(Some(user)) => Ok(CurrentUser(user)),
            Ok(None) => Err(Redirect::to("/").into_response()),
            Err(err) => Err(err.into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::HeaderMap;
    use axum::http::header::{COOKIE, SET_COOKIE};

    /// Replays the jar's `Set-Cookie` output as the next request's `Cookie` header.
    fn reload(jar: SignedCookieJar, key: &Key) -> SignedCookieJar {
        let response = jar.into_response();
        let header = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter(|v| !v.contains("Max-Age=0"))
            .filter_map(|v| v.split(';').next())
            .collect::<Vec<_>>()
            .join("; ");
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, header.parse().unwrap());
        SignedCookieJar::from_headers(&headers, key.clone())
    }

    fn empty_jar(key: &Key) -> SignedCookieJar {
        SignedCookieJar::new(key.clone())
    }

    #[test]
    fn flashes_accumulate_and_are_taken_once() {
        let key = Key::generate();
        let jar = push_flash(empty_jar(&key), Flash::success("Правильно! Ты молодец!"));
        let jar = push_flash(jar, Flash::danger("second; with, punctuation"));

        let (jar, flashes) = take_flashes(reload(jar, &key));
        assert_eq!(
            flashes,
            vec![
                Flash::success("Правильно! Ты молодец!"),
                Flash::danger("second; with, punctuation"),
            ]
        );
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[test]
    fn session_cookie_round_trips_user_id() {
        let key = Key::generate();
        let jar = reload(sign_in(empty_jar(&key), UserId::new(7)), &key);
        let value = jar.get(SESSION_COOKIE).unwrap();
        assert_eq!(value.value().parse::<UserId>().unwrap(), UserId::new(7));
    }

    #[test]
    fn cookie_signed_with_another_key_is_ignored() {
        let jar = sign_in(empty_jar(&Key::generate()), UserId::new(7));
        let jar = reload(jar, &Key::generate());
        assert!(jar.get(SESSION_COOKIE).is_none());
    }
}
