//! One-shot user messages carried across a redirect
//!
//! A flash is stored url-encoded in a short-lived cookie. The page that
//! renders it clears the cookie in the same response.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use tracing::warn;

pub const FLASH_COOKIE: &str = "fyyur_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Error,
            message: message.into(),
        }
    }

    /// `Set-Cookie` value carrying this flash
    pub fn to_cookie(&self) -> Option<HeaderValue> {
        let encoded = match serde_urlencoded::to_string(self) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "Failed to encode flash message");
                return None;
            }
        };
        let cookie = format!("{FLASH_COOKIE}={encoded}; Path=/; Max-Age=60; HttpOnly; SameSite=Lax");
        HeaderValue::from_str(&cookie).ok()
    }

    /// Decode a flash from a request's `Cookie` header value
    pub fn from_cookie_header(value: &str) -> Option<Self> {
        value
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == FLASH_COOKIE)
            .and_then(|(_, encoded)| serde_urlencoded::from_str(encoded).ok())
    }
}

/// `Set-Cookie` value that expires the flash cookie
pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("fyyur_flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

/// Flash left by the previous response, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomingFlash(pub Option<Flash>);

#[async_trait]
impl<S> FromRequestParts<S> for IncomingFlash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let flash = parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(Flash::from_cookie_header);

        Ok(Self(flash))
    }
}

/// Add a `Set-Cookie` for `flash` to an already-built response
pub fn attach(mut response: Response, flash: &Flash) -> Response {
    if let Some(cookie) = flash.to_cookie() {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }
    response
}

/// 303 redirect to `location`, setting `flash` for the next page
pub fn redirect_with(location: &str, flash: Flash) -> Response {
    let response = (StatusCode::SEE_OTHER, [(header::LOCATION, location.to_string())]).into_response();
    attach(response, &flash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_cookie_decodes_back() {
        let flash = Flash::success("Venue The Musical Hop & Co was successfully listed!");
        let cookie = flash.to_cookie().unwrap();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("fyyur_flash=category=success&message="));
        assert!(cookie.contains("Max-Age=60"));

        let pair = cookie.split(';').next().unwrap();
        let header = format!("theme=dark; {pair}");
        assert_eq!(Flash::from_cookie_header(&header), Some(flash));
    }

    #[test]
    fn test_missing_or_garbled_cookie_is_ignored() {
        assert_eq!(Flash::from_cookie_header("theme=dark"), None);
        assert_eq!(Flash::from_cookie_header("fyyur_flash=category=loud"), None);
        assert_eq!(Flash::from_cookie_header(""), None);
    }

    #[test]
    fn test_redirect_sets_location_and_cookie() {
        let response = redirect_with("/venues/3", Flash::info("hello"));
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/venues/3");
        assert!(response.headers().contains_key(header::SET_COOKIE));
    }

    #[test]
    fn test_category_names() {
        assert_eq!(FlashCategory::Error.to_string(), "error");
        assert_eq!(FlashCategory::Success.as_ref(), "success");
    }
}
