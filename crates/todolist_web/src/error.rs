//! Internal failures of the HTTP layer.
//!
//! User-facing problems (invalid names, stale ids) never reach this type;
//! they become flash messages. `WebError` covers what the user cannot fix.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type WebResult<T> = Result<T, WebError>;

#[derive(Debug)]
pub enum WebError {
    /// The session could not be serialized into its cookie.
    SessionEncode(serde_json::Error),
}

impl Display for WebError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SessionEncode(err) => write!(f, "failed to encode session: {err}"),
        }
    }
}

impl Error for WebError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SessionEncode(err) => Some(err),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        error!("event=request_failed module=web status=error error={self}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
