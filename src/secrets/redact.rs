use url::Url;

const MASK: &str = "***";
const MIN_KEY_SEGMENT_LEN: usize = 20;
const SENSITIVE_QUERY_KEYS: &[&str] = &[
    "apikey",
    "api_key",
    "api-key",
    "key",
    "token",
    "access_token",
    "secret",
    "auth",
];

/// Path segment shaped like a provider project id or API key
fn looks_like_key(segment: &str) -> bool {
    segment.len() >= MIN_KEY_SEGMENT_LEN
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        && segment.chars().any(|c| c.is_ascii_digit())
        && segment.chars().any(|c| c.is_ascii_alphabetic())
}

fn is_sensitive_query_key(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    SENSITIVE_QUERY_KEYS.contains(&lower.as_str())
}

/// Whether the endpoint carries something that should live in a secret store
pub fn embeds_api_key(url: &Url) -> bool {
    if url.password().is_some() || looks_like_key(url.username()) {
        return true;
    }
    if url
        .path_segments()
        .map(|mut segments| segments.any(looks_like_key))
        .unwrap_or(false)
    {
        return true;
    }
    url.query_pairs().any(|(key, _)| is_sensitive_query_key(&key))
}

/// Render the endpoint with credentials, key-like path segments and
/// sensitive query values masked
pub fn redact_endpoint(url: &Url) -> String {
    let mut redacted = url.clone();

    if redacted.password().is_some() {
        let _ = redacted.set_password(Some(MASK));
    }
    if looks_like_key(url.username()) {
        let _ = redacted.set_username(MASK);
    }

    let segments: Option<Vec<String>> = url.path_segments().map(|segments| {
        segments
            .map(|segment| {
                if looks_like_key(segment) {
                    MASK.to_string()
                } else {
                    segment.to_string()
                }
            })
            .collect()
    });
    if let Some(segments) = segments {
        redacted.set_path(&format!("/{}", segments.join("/")));
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if is_sensitive_query_key(&key) {
                MASK.to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();
    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }

    redacted.to_string()
}
