use std::borrow::Cow;

const MAX_LOGGED_BODY_CHARS: usize = 200;
const REDACTED: &str = "[REDACTED]";

/// Markers after which the next token-like run is a credential.
const CREDENTIAL_MARKERS: [&str; 8] = [
    "eyJ",
    "Bearer ",
    "bearer ",
    "access_token=",
    "\"access_token\":\"",
    "\"access_token\": \"",
    "\"token\":\"",
    "\"password\":\"",
];

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | '/' | '=')
}

fn token_end(input: &str, from: usize) -> usize {
    input[from..]
        .char_indices()
        .find(|&(_, c)| !is_token_char(c))
        .map_or(input.len(), |(i, _)| from + i)
}

fn scrub_after_marker(scrubbed: &mut String, marker: &str) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let content_start = start + marker.len();
        let end = token_end(scrubbed, content_start);

        // A JWT prefix is part of the secret; other markers stay readable.
        let (replace_from, resume) = if marker == "eyJ" {
            (start, start + REDACTED.len())
        } else {
            (content_start, content_start + REDACTED.len())
        };

        if end == content_start && marker != "eyJ" {
            search_from = content_start;
            continue;
        }

        scrubbed.replace_range(replace_from..end, REDACTED);
        search_from = resume;
    }
}

/// Redact bearer tokens, JWTs and password fields from service text.
pub fn scrub_credentials(input: &str) -> Cow<'_, str> {
    if !CREDENTIAL_MARKERS.iter().any(|m| input.contains(m)) {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for marker in CREDENTIAL_MARKERS {
        scrub_after_marker(&mut scrubbed, marker);
    }
    Cow::Owned(scrubbed)
}

/// Scrub and truncate a response body before it reaches the logs.
pub fn sanitize_for_log(input: &str) -> String {
    let scrubbed = scrub_credentials(input);
    match scrubbed.char_indices().nth(MAX_LOGGED_BODY_CHARS) {
        Some((cut, _)) => format!("{}...", &scrubbed[..cut]),
        None => scrubbed.into_owned(),
    }
}
