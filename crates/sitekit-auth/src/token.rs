//! Locating the bearer token of a request.
//!
//! A token can arrive in the `Authorization` header or in the session cookie;
//! both carry the same `Bearer <jwt>` value. The header always wins.

/// The authenticated subject of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Header,
    Cookie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BearerToken<'a> {
    pub token: &'a str,
    pub source: TokenSource,
}

/// Splits `"<scheme> <param>"`; a value without a space is all scheme.
pub fn scheme_param(value: &str) -> (&str, &str) {
    let value = value.trim();
    match value.split_once(' ') {
        Some((scheme, param)) => (scheme, param.trim()),
        None => (value, ""),
    }
}

fn bearer(value: &str) -> Option<&str> {
    let (scheme, param) = scheme_param(value);
    scheme.eq_ignore_ascii_case("bearer").then_some(param)
}

/// Picks the token to authenticate with: a `Bearer` header, else a `Bearer` cookie.
pub fn select_bearer<'a>(header: Option<&'a str>, cookie: Option<&'a str>) -> Option<BearerToken<'a>> {
    if let Some(token) = header.and_then(bearer) {
        return Some(BearerToken {
            token,
            source: TokenSource::Header,
        });
    }
    cookie.and_then(bearer).map(|token| BearerToken {
        token,
        source: TokenSource::Cookie,
    })
}

/// Cookie value for a freshly issued token.
pub fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_wins_over_cookie() {
        let selected = select_bearer(Some("Bearer from-header"), Some("Bearer from-cookie")).unwrap();
        assert_eq!(selected.token, "from-header");
        assert_eq!(selected.source, TokenSource::Header);
    }

    #[test]
    fn test_cookie_used_without_header() {
        let selected = select_bearer(None, Some("Bearer from-cookie")).unwrap();
        assert_eq!(selected.token, "from-cookie");
        assert_eq!(selected.source, TokenSource::Cookie);
    }

    #[test]
    fn test_non_bearer_header_falls_back_to_cookie() {
        let selected = select_bearer(Some("Basic dXNlcjpwYXNz"), Some("Bearer from-cookie")).unwrap();
        assert_eq!(selected.source, TokenSource::Cookie);
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        assert_eq!(select_bearer(Some("bearer abc"), None).unwrap().token, "abc");
        assert_eq!(select_bearer(Some("BEARER abc"), None).unwrap().token, "abc");
    }

    #[test]
    fn test_no_token() {
        assert_eq!(select_bearer(None, None), None);
        assert_eq!(select_bearer(Some("Token abc"), Some("abc")), None);
    }

    #[test]
    fn test_bare_scheme_yields_empty_token() {
        assert_eq!(select_bearer(Some("Bearer"), None).unwrap().token, "");
    }

    #[test]
    fn test_bearer_value_round_trips() {
        let value = bearer_value("abc.def.ghi");
        assert_eq!(select_bearer(None, Some(&value)).unwrap().token, "abc.def.ghi");
    }
}
