// Copyright 2025 itscheems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Inbound signal parsing
//!
//! Signal sources speak different dialects: some send a JSON object, others
//! a loosely-delimited `key: value; key: value` text (the alert-message
//! format of common charting tools). Parsing is a two-stage pipeline —
//! JSON-object first, key:value fallback — that always yields a string-keyed
//! payload map.
//!
//! Field names also vary between sources, so each logical field has an
//! ordered synonym list resolved via first-match lookup.

use serde_json::{Map, Value};

/// Synonyms for the market identifier, in resolution order
pub const PRODUCT_KEYS: [&str; 3] = ["symbol", "product_id", "product"];

/// Synonyms for the order side
pub const SIDE_KEYS: [&str; 2] = ["action", "side"];

/// Synonyms for the order size
pub const SIZE_KEYS: [&str; 3] = ["amount", "size", "qty"];

/// Synonyms for the shared webhook token
pub const TOKEN_KEYS: [&str; 3] = ["auth", "token", "key"];

/// Order type key (no synonyms; absent means market)
pub const ORDER_TYPE_KEY: &str = "order_type";

/// Limit price key
pub const PRICE_KEY: &str = "price";

/// Parse an inbound payload.
///
/// Attempts a JSON-object parse first; if the body is not valid JSON or not
/// a JSON object, falls back to the permissive key:value parser. The
/// fallback never fails — unparseable text just produces an empty map,
/// which downstream validation rejects as missing fields.
pub fn parse_payload(raw: &str) -> Map<String, Value> {
	if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) {
		return map;
	}
	parse_kv_text(raw)
}

/// Parse `"symbol: BTC-USD; action: buy; amount: 10"` style text.
///
/// Splits on `;`, then each segment on the first `:`, trimming whitespace
/// from both sides. Segments without a `:` (including a trailing empty one
/// after a final semicolon) are silently dropped.
pub fn parse_kv_text(text: &str) -> Map<String, Value> {
	let mut data = Map::new();
	for part in text.split(';') {
		if let Some((key, value)) = part.split_once(':') {
			data.insert(
				key.trim().to_string(),
				Value::String(value.trim().to_string()),
			);
		}
	}
	data
}

/// Resolve a logical field through its synonym list, first match wins.
///
/// A JSON string counts as present only if non-empty (an empty value falls
/// through to the next synonym); a JSON number is converted to its decimal
/// text. Other value shapes are skipped.
pub fn lookup(payload: &Map<String, Value>, keys: &[&str]) -> Option<String> {
	for key in keys {
		match payload.get(*key) {
			Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
			Some(Value::Number(n)) => return Some(n.to_string()),
			_ => continue,
		}
	}
	None
}

/// Copy of the payload with all webhook-token synonyms removed.
///
/// Every payload echoed back to the caller or written to the log goes
/// through this, so the shared secret never leaves the process.
pub fn redacted(payload: &Map<String, Value>) -> Value {
	let mut copy = payload.clone();
	for key in TOKEN_KEYS {
		copy.remove(key);
	}
	Value::Object(copy)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_kv_round_trip() {
		let parsed = parse_kv_text("symbol: BTC-USD; action: buy; amount: 10");

		assert_eq!(parsed["symbol"], "BTC-USD");
		assert_eq!(parsed["action"], "buy");
		assert_eq!(parsed["amount"], "10");
		assert_eq!(parsed.len(), 3);
	}

	#[test]
	fn test_kv_tolerates_trailing_semicolon_and_whitespace() {
		let parsed = parse_kv_text("  symbol :  ETH-USD ;action:sell;  ");

		assert_eq!(parsed["symbol"], "ETH-USD");
		assert_eq!(parsed["action"], "sell");
		assert_eq!(parsed.len(), 2);
	}

	#[test]
	fn test_kv_splits_on_first_colon_only() {
		let parsed = parse_kv_text("note: a:b:c");
		assert_eq!(parsed["note"], "a:b:c");
	}

	#[test]
	fn test_kv_drops_segments_without_colon() {
		let parsed = parse_kv_text("garbage; symbol: BTC-USD");
		assert_eq!(parsed.len(), 1);
		assert_eq!(parsed["symbol"], "BTC-USD");
	}

	#[test]
	fn test_json_object_is_preferred() {
		let parsed = parse_payload(r#"{"symbol":"BTC-USD","amount":2.5}"#);
		assert_eq!(parsed["symbol"], "BTC-USD");
		assert_eq!(parsed["amount"], 2.5);
	}

	#[test]
	fn test_non_object_json_falls_back_to_kv() {
		// A bare JSON string is valid JSON but not an object
		let parsed = parse_payload(r#""symbol: BTC-USD""#);
		assert!(parsed.is_empty());

		let parsed = parse_payload("symbol: BTC-USD; action: buy");
		assert_eq!(parsed["symbol"], "BTC-USD");
	}

	#[test]
	fn test_lookup_first_match_wins() {
		let payload = parse_payload(r#"{"product_id":"ETH-USD","symbol":"BTC-USD"}"#);
		assert_eq!(
			lookup(&payload, &PRODUCT_KEYS),
			Some("BTC-USD".to_string())
		);
	}

	#[test]
	fn test_lookup_skips_empty_strings() {
		let payload = parse_payload(r#"{"symbol":"","product_id":"ETH-USD"}"#);
		assert_eq!(
			lookup(&payload, &PRODUCT_KEYS),
			Some("ETH-USD".to_string())
		);
	}

	#[test]
	fn test_lookup_converts_numbers() {
		let payload = parse_payload(r#"{"amount":2.5}"#);
		assert_eq!(lookup(&payload, &SIZE_KEYS), Some("2.5".to_string()));
	}

	#[test]
	fn test_redacted_strips_all_token_synonyms() {
		let payload =
			parse_payload(r#"{"symbol":"BTC-USD","auth":"s1","token":"s2","key":"s3"}"#);
		let echoed = redacted(&payload);

		assert_eq!(echoed["symbol"], "BTC-USD");
		assert!(echoed.get("auth").is_none());
		assert!(echoed.get("token").is_none());
		assert!(echoed.get("key").is_none());
	}
}
