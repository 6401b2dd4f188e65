//! Parameter encodings.
//!
//! # Nested keys
//! Query and form encodings flatten nested values with bracket notation:
//!
//! | value                       | encoded                     |
//! |-----------------------------|-----------------------------|
//! | `{"a": "x"}`                | `a=x`                       |
//! | `{"a": [1, 2]}`             | `a[0]=1&a[1]=2`             |
//! | `{"a": {"b": true}}`        | `a[b]=true`                 |
//! | `{"a": {"b": [null]}}`      | `a[b][0]=`                  |
//!
//! Keys are emitted in sorted order. Strings are written as-is, numbers and
//! booleans as their JSON text, `null` as an empty value. Empty arrays and
//! objects produce nothing. Brackets are percent-encoded on the wire along
//! with everything else `application/x-www-form-urlencoded` escapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::form_urlencoded;

use crate::endpoint::Parameters;
use crate::error::NetResult;
use crate::http::{set_header, BuiltRequest};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Where and how parameters are serialized. Chosen by the caller per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingKind {
    /// Appended to the URL as a query string.
    UrlQuery,
    /// Sent as an `application/x-www-form-urlencoded` body.
    FormBody,
    /// Sent as a JSON object body.
    JsonBody,
}

impl EncodingKind {
    /// Apply this encoding to `request`, writing either its URL or its body.
    pub fn encode(self, request: &mut BuiltRequest, parameters: &Parameters) -> NetResult<()> {
        match self {
            EncodingKind::UrlQuery => {
                append_query(&mut request.url, &encode_query(parameters));
            }
            EncodingKind::FormBody => {
                request.body = Some(encode_query(parameters).into_bytes());
                set_header(&mut request.headers, "Content-Type", FORM_CONTENT_TYPE);
            }
            EncodingKind::JsonBody => {
                request.body = Some(serde_json::to_vec(parameters)?);
                set_header(&mut request.headers, "Content-Type", JSON_CONTENT_TYPE);
            }
        }
        Ok(())
    }
}

/// Serialize parameters as `application/x-www-form-urlencoded` text.
pub fn encode_query(parameters: &Parameters) -> String {
    let mut pairs = Vec::new();
    for (key, value) in parameters {
        flatten(key.clone(), value, &mut pairs);
    }
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (k, v) in &pairs {
        serializer.append_pair(k, v);
    }
    serializer.finish()
}

fn flatten(key: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (sub, v) in map {
                flatten(format!("{key}[{sub}]"), v, out);
            }
        }
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                flatten(format!("{key}[{i}]"), v, out);
            }
        }
        Value::String(s) => out.push((key, s.clone())),
        Value::Null => out.push((key, String::new())),
        Value::Bool(b) => out.push((key, b.to_string())),
        Value::Number(n) => out.push((key, n.to_string())),
    }
}

/// Append an encoded query to a URL string, before any fragment.
///
/// Uses `?` when the URL has no query yet and `&` otherwise. An empty query
/// leaves the URL untouched.
pub fn append_query(url: &mut String, query: &str) {
    if query.is_empty() {
        return;
    }
    let fragment = url.find('#').map(|i| url.split_off(i));
    match url.find('?') {
        None => url.push('?'),
        Some(_) if url.ends_with('?') || url.ends_with('&') => {}
        Some(_) => url.push('&'),
    }
    url.push_str(query);
    if let Some(fragment) = fragment {
        url.push_str(&fragment);
    }
}

/// Decode a query string produced by [`encode_query`].
///
/// Handles scalars and one level of nesting: `k[0]=v` builds an array and
/// `k[name]=v` builds an object. All decoded values are strings. Deeper
/// keys such as `a[b][0]` are kept verbatim as flat keys.
///
/// Empty arrays and objects are omitted by [`encode_query`], so they do not
/// survive a round trip: `{"a": [], "k": "v"}` decodes as `{"k": "v"}`.
///
/// An index only extends an array when it is the next free slot or replaces
/// an existing one. Out-of-order or sparse indices turn the value into an
/// object keyed by the decimal index, so no index can force a large
/// allocation.
pub fn parse_query(query: &str) -> Parameters {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut out = Parameters::new();
    for (raw_key, value) in form_urlencoded::parse(query.as_bytes()) {
        let value = Value::String(value.into_owned());
        match split_nested(&raw_key) {
            None => {
                out.insert(raw_key.into_owned(), value);
            }
            Some((base, sub)) => insert_nested(&mut out, base, sub, value),
        }
    }
    out
}

fn split_nested(key: &str) -> Option<(&str, &str)> {
    let open = key.find('[')?;
    let rest = key.get(open + 1..)?;
    let close = rest.find(']')?;
    if open == 0 || close + 1 != rest.len() {
        return None;
    }
    Some((&key[..open], &rest[..close]))
}

fn insert_nested(out: &mut Parameters, base: &str, sub: &str, value: Value) {
    let index = sub.parse::<usize>().ok();
    let slot = out.entry(base.to_string()).or_insert_with(|| match index {
        Some(_) => Value::Array(Vec::new()),
        None => Value::Object(Parameters::new()),
    });

    match (slot, index) {
        (Value::Array(items), Some(i)) if i <= items.len() => {
            if i == items.len() {
                items.push(value);
            } else {
                items[i] = value;
            }
        }
        (Value::Object(map), _) => {
            map.insert(sub.to_string(), value);
        }
        (slot, _) => {
            // Mixed index styles or a sparse index: fall back to an object.
            let mut map = Parameters::new();
            if let Value::Array(items) = slot.take() {
                for (i, v) in items.into_iter().enumerate() {
                    map.insert(i.to_string(), v);
                }
            }
            map.insert(sub.to_string(), value);
            *slot = Value::Object(map);
        }
    }
}
