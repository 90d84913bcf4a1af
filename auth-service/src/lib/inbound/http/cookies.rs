use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;
use time::Duration;

use crate::config::SessionConfig;
use crate::session::models::SessionId;

/// Reads and writes the session cookie.
///
/// The cookie is `HttpOnly; SameSite=Lax; Path=/`, with `Secure` when configured.
#[derive(Debug, Clone)]
pub struct SessionCookies {
    name: String,
    ttl_seconds: i64,
    secure: bool,
}

impl SessionCookies {
    pub fn new(name: impl Into<String>, ttl_seconds: i64, secure: bool) -> Self {
        Self {
            name: name.into(),
            ttl_seconds,
            secure,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.cookie_name.clone(), config.ttl_seconds, config.secure)
    }

    /// Session ID presented by the client, if well-formed.
    pub fn session_id(&self, jar: &CookieJar) -> Option<SessionId> {
        jar.get(&self.name)
            .and_then(|cookie| SessionId::parse(cookie.value()))
    }

    /// Hand a new session to the client.
    pub fn issue(&self, jar: CookieJar, id: &SessionId) -> CookieJar {
        jar.add(
            Cookie::build((self.name.clone(), id.to_string()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(self.secure)
                .max_age(Duration::seconds(self.ttl_seconds)),
        )
    }

    /// Tell the client to drop the session cookie it presented.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build(self.name.clone()).path("/"))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header::COOKIE;
    use axum::http::header::SET_COOKIE;
    use axum::http::HeaderMap;
    use axum::http::HeaderValue;
    use axum::response::IntoResponse;

    use super::*;

    fn jar(cookie: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        CookieJar::from_headers(&headers)
    }

    fn set_cookie_headers(jar: CookieJar) -> Vec<String> {
        jar.into_response()
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|value| value.to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_session_id_from_jar() {
        let cookies = SessionCookies::new("sid", 60, false);
        let id = SessionId::generate();

        let found = cookies.session_id(&jar(&format!("theme=dark; sid={}", id)));
        assert_eq!(found, Some(id));

        assert_eq!(cookies.session_id(&jar("theme=dark")), None);
        assert_eq!(cookies.session_id(&jar("sid=%00bad")), None);
    }

    #[test]
    fn test_issue_sets_attributes() {
        let cookies = SessionCookies::new("sid", 60, true);
        let id = SessionId::generate();

        let issued = cookies.issue(CookieJar::new(), &id);
        let cookie = issued.get("sid").expect("cookie not issued");
        assert_eq!(cookie.value(), id.to_string());
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(60)));

        let headers = set_cookie_headers(issued);
        assert_eq!(headers.len(), 1);
        assert!(headers[0].starts_with(&format!("sid={}", id)));
        assert!(headers[0].contains("HttpOnly"));
        assert!(headers[0].contains("Max-Age=60"));
    }

    #[test]
    fn test_clear_expires_presented_cookie() {
        let cookies = SessionCookies::new("sid", 60, false);
        let id = SessionId::generate();

        let cleared = cookies.clear(jar(&format!("sid={}", id)));
        assert!(cleared.get("sid").is_none());

        let headers = set_cookie_headers(cleared);
        assert_eq!(headers.len(), 1);
        assert!(headers[0].starts_with("sid=;"));
        assert!(headers[0].contains("Max-Age=0"));
        assert!(headers[0].contains("Path=/"));
    }
}
