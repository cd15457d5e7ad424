//! Postback payload encoding and list paging.
//!
//! Postbacks are encoded as `target:key1:value1:key2:value2`. Neither keys
//! nor values may contain `:`.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde_json::{json, Value};

/// Parameter carrying the index of the first element of the next page.
pub const NEXT_PARAM: &str = "next";

/// Joins a target and its parameters into a postback payload.
pub fn build_postback<I, K, V>(target: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    let mut payload = target.to_string();
    for (key, value) in params {
        payload.push_str(&format!(":{}:{}", key, value));
    }
    payload
}

/// A decoded postback payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPostback {
    pub target: String,
    pub params: BTreeMap<String, String>,
}

impl ParsedPostback {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Start index of the requested page, if the payload came from a "More" element.
    pub fn next_index(&self) -> Option<usize> {
        self.get(NEXT_PARAM)?.parse().ok()
    }
}

/// Splits a postback payload into its target and parameters.
///
/// A trailing key without a value is dropped.
pub fn parse_postback(payload: &str) -> ParsedPostback {
    let mut parts = payload.split(':');
    let target = parts.next().unwrap_or_default().to_string();

    let mut params = BTreeMap::new();
    while let (Some(key), Some(value)) = (parts.next(), parts.next()) {
        params.insert(key.to_string(), value.to_string());
    }

    ParsedPostback { target, params }
}

/// Default "More" element: a single postback button that re-enters `target`
/// with `next=<index>` appended to `params`.
pub fn next_element(index: usize, target: &str, params: &[(&str, &str)]) -> Value {
    let index = index.to_string();
    let payload = build_postback(
        target,
        params
            .iter()
            .copied()
            .filter(|(key, _)| *key != NEXT_PARAM)
            .chain(std::iter::once((NEXT_PARAM, index.as_str()))),
    );
    json!({
        "title": "More",
        "buttons": [{
            "type": "postback",
            "title": "More",
            "payload": payload,
        }],
    })
}

/// Builds one page of list elements starting at `from`.
///
/// At most `list_max` elements are produced. When items remain beyond the
/// page, the last slot is replaced by `more(index)`, where `index` is the
/// first item not shown.
pub fn build_elements<T, B, M>(
    items: &[T],
    from: usize,
    list_max: usize,
    mut build: B,
    more: M,
) -> Vec<Value>
where
    B: FnMut(&T) -> Value,
    M: FnOnce(usize) -> Value,
{
    if list_max == 0 || from >= items.len() {
        return Vec::new();
    }

    let remaining = &items[from..];
    if remaining.len() <= list_max {
        return remaining.iter().map(build).collect();
    }

    let shown = list_max - 1;
    let mut elements: Vec<Value> = remaining[..shown].iter().map(&mut build).collect();
    elements.push(more(from + shown));
    elements
}
