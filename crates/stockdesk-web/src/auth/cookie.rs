use axum::http::{header, HeaderMap};

pub const SESSION_COOKIE: &str = "auth";
const SESSION_MAX_AGE_SECS: u64 = 24 * 60 * 60;
const COOKIE_ATTRIBUTES: &str = "Path=/; HttpOnly; SameSite=Lax; Secure";

/// `Set-Cookie` value that stores `token` for 24 hours.
pub fn session_cookie(token: &str) -> String {
    format!(
        "{SESSION_COOKIE}={}; {COOKIE_ATTRIBUTES}; Max-Age={SESSION_MAX_AGE_SECS}",
        urlencoding::encode(token)
    )
}

/// `Set-Cookie` value that expires the session cookie immediately.
pub fn cleared_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; {COOKIE_ATTRIBUTES}; Max-Age=0")
}

/// Reads cookie `name` from every `Cookie` header, first occurrence wins.
///
/// Values are percent-decoded; a value that does not decode is returned raw.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| {
            let value = value.trim().trim_matches('"');
            urlencoding::decode(value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookies: &[&'static str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for cookie in cookies {
            map.append(header::COOKIE, HeaderValue::from_static(cookie));
        }
        map
    }

    #[test]
    fn session_cookie_has_hardening_attributes() {
        assert_eq!(
            session_cookie("tok 1/2"),
            "auth=tok%201%2F2; Path=/; HttpOnly; SameSite=Lax; Secure; Max-Age=86400"
        );
    }

    #[test]
    fn cleared_cookie_expires_now() {
        assert_eq!(
            cleared_session_cookie(),
            "auth=; Path=/; HttpOnly; SameSite=Lax; Secure; Max-Age=0"
        );
    }

    #[test]
    fn reads_named_cookie_among_others() {
        let map = headers(&["theme=dark; auth=abc123; lang=en"]);
        assert_eq!(read_cookie(&map, "auth").as_deref(), Some("abc123"));
        assert_eq!(read_cookie(&map, "lang").as_deref(), Some("en"));
    }

    #[test]
    fn decodes_percent_encoding() {
        let map = headers(&["auth=tok%201%2F2"]);
        assert_eq!(read_cookie(&map, "auth").as_deref(), Some("tok 1/2"));
    }

    #[test]
    fn searches_multiple_cookie_headers() {
        let map = headers(&["theme=dark", "auth=second-header"]);
        assert_eq!(read_cookie(&map, "auth").as_deref(), Some("second-header"));
    }

    #[test]
    fn missing_cookie_is_none() {
        assert_eq!(read_cookie(&headers(&["authx=1; xauth=2"]), "auth"), None);
        assert_eq!(read_cookie(&HeaderMap::new(), "auth"), None);
    }

    #[test]
    fn empty_value_is_some_empty() {
        let map = headers(&["auth="]);
        assert_eq!(read_cookie(&map, "auth").as_deref(), Some(""));
    }
}
