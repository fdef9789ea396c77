//! Cookie-backed user session.
//!
//! # Responsibility
//! - Carry the user's lists and one-shot flash messages between requests.
//! - Encode the session as JSON inside one private (encrypted) cookie.
//!
//! # Invariants
//! - A missing or unreadable cookie yields an empty session, never an error.
//! - Flash messages are cleared by the render that shows them.
//! - Lists are addressed through `ListService`, never by position.

use crate::error::{WebError, WebResult};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use log::warn;
use serde::{Deserialize, Serialize};
use todolist_core::{ListService, SessionListRepository, TodoList};

pub const SESSION_COOKIE: &str = "todolist_session";
/// Common browser limit for one cookie's name plus value.
const COOKIE_SIZE_LIMIT_BYTES: usize = 4096;
/// AES-GCM nonce plus tag added by the private jar before base64.
const PRIVATE_COOKIE_OVERHEAD_BYTES: usize = 12 + 16;
/// JSON room kept free for an error and a success flash.
const FLASH_RESERVE_BYTES: usize = 256;

/// One-shot messages shown on the next rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
}

impl Flash {
    /// Returns the pending messages and leaves none behind.
    pub fn take(&mut self) -> Flash {
        std::mem::take(self)
    }
}

/// Per-user state stored in the session cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub lists: Vec<TodoList>,
    #[serde(default)]
    pub flash: Flash,
}

impl Session {
    /// Reads the session from `jar`, falling back to an empty session.
    pub fn load(jar: &PrivateCookieJar) -> Self {
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Self::default();
        };
        match serde_json::from_str(cookie.value()) {
            Ok(session) => session,
            Err(err) => {
                warn!("event=session_decode module=web status=reset error={err}");
                Self::default()
            }
        }
    }

    /// Writes the session into `jar` and returns the updated jar.
    pub fn store(&self, jar: PrivateCookieJar) -> WebResult<PrivateCookieJar> {
        let payload = self.payload()?;
        let cookie_len = cookie_pair_len(payload.len());
        if cookie_len > COOKIE_SIZE_LIMIT_BYTES {
            warn!(
                "event=session_oversize module=web status=warn cookie_bytes={} limit={} lists={}",
                cookie_len,
                COOKIE_SIZE_LIMIT_BYTES,
                self.lists.len()
            );
        }

        let cookie = Cookie::build((SESSION_COOKIE, payload))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        Ok(jar.add(cookie))
    }

    /// Whether the stored cookie would stay within the browser cookie limit,
    /// with room left for the next flash messages.
    pub fn fits_cookie(&self) -> WebResult<bool> {
        let payload_len = self.payload()?.len() + FLASH_RESERVE_BYTES;
        Ok(cookie_pair_len(payload_len) <= COOKIE_SIZE_LIMIT_BYTES)
    }

    fn payload(&self) -> WebResult<String> {
        serde_json::to_string(self).map_err(WebError::SessionEncode)
    }

    /// List service over this session's lists.
    pub fn service(&mut self) -> ListService<SessionListRepository<'_>> {
        ListService::new(SessionListRepository::new(&mut self.lists))
    }

    /// List service plus the pending flash, borrowed separately.
    pub fn split(&mut self) -> (ListService<SessionListRepository<'_>>, &mut Flash) {
        (
            ListService::new(SessionListRepository::new(&mut self.lists)),
            &mut self.flash,
        )
    }

    pub fn flash_error(&mut self, message: impl Into<String>) {
        self.flash.error = Some(message.into());
    }

    pub fn flash_success(&mut self, message: impl Into<String>) {
        self.flash.success = Some(message.into());
    }
}

/// Length of `name=value` once the private jar has sealed and base64-encoded
/// a payload of `payload_len` bytes.
fn cookie_pair_len(payload_len: usize) -> usize {
    let sealed = payload_len + PRIVATE_COOKIE_OVERHEAD_BYTES;
    SESSION_COOKIE.len() + 1 + sealed.div_ceil(3) * 4
}
