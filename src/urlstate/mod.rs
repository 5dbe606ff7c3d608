//! Reversible, URL-safe encoding of [`EditorState`] for shareable and
//! bookmarkable editing sessions.
//!
//! The encoded value travels in the `state` query parameter; a legacy
//! fragment encoding is still accepted on read. Decoding never throws:
//! malformed input yields `None` and the session starts from defaults.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use crate::state::EditorState;

/// Query parameter carrying the encoded state.
pub const STATE_PARAM: &str = "state";

/// Serializes `state` and remaps it to the URL-safe alphabet (`+ /`
/// replaced by `- _`, padding stripped). UI-only transient fields are
/// excluded by the state's own serialization rules.
pub fn encode(state: &EditorState) -> String {
    let json = match serde_json::to_vec(state) {
        Ok(json) => json,
        Err(err) => {
            tracing::warn!(%err, "state failed to serialize; encoding empty document");
            b"{}".to_vec()
        }
    };
    URL_SAFE_NO_PAD.encode(json)
}

/// Reverses [`encode`]; returns `None` on any failure.
pub fn decode(text: &str) -> Option<EditorState> {
    // Old links may still carry padding.
    let trimmed = text.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD.decode(trimmed).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Reads state from a location: the `state` query parameter first, then the
/// legacy fragment encoding for old links.
pub fn state_from_location(query: &str, fragment: &str) -> Option<EditorState> {
    if let Some(value) = query_param(query, STATE_PARAM) {
        if let Some(state) = decode(value) {
            return Some(state);
        }
        tracing::debug!("state query parameter did not decode; trying fragment");
    }
    let fragment = fragment.trim_start_matches('#');
    if fragment.is_empty() {
        return None;
    }
    decode(fragment)
}

/// The value the `state` parameter should be replaced with, or `None` when
/// the current query already carries exactly this encoding. Callers write
/// the replacement without appending a history entry, so skipping the
/// no-op write avoids history churn on every keystroke.
pub fn replacement_param(current_query: &str, state: &EditorState) -> Option<String> {
    let encoded = encode(state);
    match query_param(current_query, STATE_PARAM) {
        Some(existing) if existing == encoded => None,
        _ => Some(encoded),
    }
}

fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then_some(value)
        })
}
