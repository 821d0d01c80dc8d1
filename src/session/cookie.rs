// Cookie helpers
// Reads the session cookie from a `Cookie` header and builds `Set-Cookie` values

/// Find the value of cookie `name` in a `Cookie` header.
///
/// Names compare case-insensitively; the first match wins.
pub fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case(name)
            .then(|| value.trim().trim_matches('"'))
    })
}

/// Build the `Set-Cookie` header value for a new session
pub fn build_session_cookie(name: &str, id: &str) -> String {
    format!("{name}={id}; Path=/; HttpOnly; SameSite=Lax")
}
