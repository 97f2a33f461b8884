//! Search form helpers
//!
//! Search itself runs on an external endpoint; the header only validates
//! the input and builds the redirect URL.

use crate::error::MenuError;

/// Query parameter names checked on render, in precedence order
pub const DEFAULT_QUERY_PARAMS: [&str; 2] = ["q", "s"];

/// Pick the pre-fill value for the search input
///
/// The first name in `names` that is present with a non-blank value wins.
/// The returned value is trimmed; escaping happens when it is rendered.
pub fn extract_query<I, K, V>(params: I, names: &[&str]) -> Option<String>
where
    I: IntoIterator<Item = (K, V)> + Clone,
    K: AsRef<str>,
    V: AsRef<str>,
{
    names.iter().find_map(|wanted| {
        params.clone().into_iter().find_map(|(key, value)| {
            let value = value.as_ref().trim();
            (key.as_ref() == *wanted && !value.is_empty()).then(|| value.to_string())
        })
    })
}

/// Reject input that is empty after trimming
pub fn validate_query(input: &str) -> Result<&str, MenuError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err(MenuError::BlankQuery)
    } else {
        Ok(trimmed)
    }
}

/// Redirect target for a search submission
///
/// The pair is added to the endpoint's query string; a `#fragment` stays last.
pub fn search_url(endpoint: &str, param: &str, query: &str) -> String {
    let (base, fragment) = match endpoint.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (endpoint, None),
    };
    let separator = if base.contains('?') {
        if base.ends_with('?') || base.ends_with('&') {
            ""
        } else {
            "&"
        }
    } else {
        "?"
    };
    let mut url = format!(
        "{base}{separator}{}={}",
        percent_encode(param),
        percent_encode(query)
    );
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}

/// Percent-encode everything outside the RFC 3986 unreserved set
pub fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
