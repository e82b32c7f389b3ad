// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trello REST endpoint construction and log-safe rendering.

use tattle_core::SendError;
use url::Url;

use crate::TrelloCredentials;

/// Scheme and host of the public Trello REST API.
pub const TRELLO_API_BASE: &str = "https://api.trello.com";

/// Query parameters whose values are secrets.
const SECRET_PARAMS: &[&str] = &["key", "token"];

/// The card-creation endpoint as a string.
///
/// Values are interpolated verbatim, without percent-encoding; callers must
/// supply URL-safe identifiers.
pub fn card_endpoint_string(base: &str, credentials: &TrelloCredentials) -> String {
    format!(
        "{}/1/cards?idList={}&due=null&key={}&token={}",
        base.trim_end_matches('/'),
        credentials.list_id,
        credentials.key,
        credentials.token
    )
}

/// The card-creation endpoint, parsed.
pub fn card_endpoint(base: &str, credentials: &TrelloCredentials) -> Result<Url, SendError> {
    parse(&card_endpoint_string(base, credentials))
}

/// The endpoint describing the destination list, used for health checks.
pub fn list_endpoint(base: &str, credentials: &TrelloCredentials) -> Result<Url, SendError> {
    parse(&format!(
        "{}/1/lists/{}?key={}&token={}",
        base.trim_end_matches('/'),
        credentials.list_id,
        credentials.key,
        credentials.token
    ))
}

fn parse(endpoint: &str) -> Result<Url, SendError> {
    let url = Url::parse(endpoint).map_err(|e| SendError::InvalidDestinationUrl {
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(SendError::InvalidDestinationUrl {
            reason: format!("`{}` has no host", url.scheme()),
        });
    }
    // The parser repairs some malformed input (escaping spaces, splitting off
    // a fragment); the endpoint must go out exactly as built or not at all.
    if url.fragment().is_some() {
        return Err(SendError::InvalidDestinationUrl {
            reason: "endpoint contains `#`".into(),
        });
    }
    if url.as_str() != endpoint {
        return Err(SendError::InvalidDestinationUrl {
            reason: "endpoint contains characters that are not URL-safe".into(),
        });
    }
    Ok(url)
}

/// Renders `url` with secret query values replaced by `[REDACTED]`.
pub fn redact(url: &Url) -> String {
    let Some(query) = url.query() else {
        return url.to_string();
    };
    let query = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((name, _)) if SECRET_PARAMS.contains(&name) => format!("{name}=[REDACTED]"),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");

    let mut shown = url.clone();
    shown.set_query(None);
    format!("{shown}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(key: &str, token: &str, list: &str) -> TrelloCredentials {
        TrelloCredentials::new(key, token, list)
    }

    #[test]
    fn card_endpoint_matches_template() {
        let url = card_endpoint(TRELLO_API_BASE, &creds("K", "T", "L")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.trello.com/1/cards?idList=L&due=null&key=K&token=T"
        );
    }

    #[test]
    fn card_endpoint_string_is_not_percent_encoded() {
        let s = card_endpoint_string(TRELLO_API_BASE, &creds("a/b", "t", "l"));
        assert!(s.contains("key=a/b&"));
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        let url = card_endpoint("http://127.0.0.1:8080/", &creds("K", "T", "L")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/1/cards?idList=L&due=null&key=K&token=T"
        );
    }

    #[test]
    fn unparsable_base_is_invalid_destination() {
        let err = card_endpoint("::not a url", &creds("K", "T", "L")).unwrap_err();
        assert!(matches!(err, SendError::InvalidDestinationUrl { .. }));
    }

    #[test]
    fn hostless_base_is_invalid_destination() {
        let err = card_endpoint("mailto:", &creds("K", "T", "L")).unwrap_err();
        assert!(matches!(err, SendError::InvalidDestinationUrl { .. }));
    }

    #[test]
    fn list_endpoint_targets_list() {
        let url = list_endpoint(TRELLO_API_BASE, &creds("K", "T", "L")).unwrap();
        assert_eq!(url.path(), "/1/lists/L");
    }

    #[test]
    fn redact_hides_key_and_token() {
        let url = card_endpoint(TRELLO_API_BASE, &creds("secret-key", "secret-token", "L")).unwrap();
        let shown = redact(&url);
        assert!(!shown.contains("secret-key"));
        assert!(!shown.contains("secret-token"));
        assert!(shown.contains("idList=L"));
        assert!(shown.contains("due=null"));
    }

    #[test]
    fn redact_keeps_placeholder_literal() {
        let url = card_endpoint(TRELLO_API_BASE, &creds("K", "T", "L")).unwrap();
        assert_eq!(
            redact(&url),
            "https://api.trello.com/1/cards?idList=L&due=null&key=[REDACTED]&token=[REDACTED]"
        );
    }

    #[test]
    fn key_with_space_is_invalid_destination() {
        let err = card_endpoint(TRELLO_API_BASE, &creds("a b", "T", "L")).unwrap_err();
        assert!(matches!(err, SendError::InvalidDestinationUrl { .. }));
    }

    #[test]
    fn token_with_hash_is_invalid_destination() {
        let err = card_endpoint(TRELLO_API_BASE, &creds("K", "t#x", "L")).unwrap_err();
        assert!(matches!(err, SendError::InvalidDestinationUrl { .. }));
    }
}
