use url::Url;

use crate::compose::ComposeError;

// Check that a string is an absolute http/https URL
pub fn validate(input: &str) -> bool {
    // Step 1: parse URL; the empty string fails here too
    let Ok(url) = Url::parse(input) else {
        return false;
    };

    // Step 2: confirm the scheme is http/https
    matches!(url.scheme(), "http" | "https")
}

// Like `validate`, but tells an empty field apart from a malformed URL so the
// user gets the right message
pub fn check(input: &str) -> Result<&str, ComposeError> {
    if input.is_empty() {
        return Err(ComposeError::EmptyUrl);
    }

    if !validate(input) {
        return Err(ComposeError::InvalidUrl);
    }

    Ok(input)
}
