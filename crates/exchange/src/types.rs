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

use serde::{Deserialize, Serialize};

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
	Buy,
	Sell,
}

impl Side {
	/// Parse a side from inbound signal text, case-insensitively.
	pub fn parse(s: &str) -> Option<Self> {
		match s.trim().to_ascii_lowercase().as_str() {
			"buy" => Some(Side::Buy),
			"sell" => Some(Side::Sell),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Side::Buy => "buy",
			Side::Sell => "sell",
		}
	}
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
	#[default]
	Market,
	Limit,
}

impl OrderType {
	/// Parse an order type from inbound signal text, case-insensitively.
	pub fn parse(s: &str) -> Option<Self> {
		match s.trim().to_ascii_lowercase().as_str() {
			"market" => Some(OrderType::Market),
			"limit" => Some(OrderType::Limit),
			_ => None,
		}
	}
}

/// Canonical, validated representation of a trade instruction.
///
/// An intent is immutable once constructed and lives only for the duration
/// of the request that produced it. There is no identity beyond the request
/// and no persistence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderIntent {
	/// Exchange market identifier (e.g., "BTC-USD"), non-empty
	pub product_id: String,
	/// Order side, normalized to lowercase on the wire
	pub side: Side,
	/// Quantity in base currency, finite and > 0
	pub size: f64,
	/// Order type, defaults to market
	pub order_type: OrderType,
	/// Limit price; present and > 0 iff `order_type` is limit
	pub price: Option<f64>,
}

/// Wire payload for `POST /orders`.
///
/// Field declaration order is the serialization order, and the serialized
/// JSON string is the exact byte sequence that gets signed and transmitted.
/// Numeric fields are string-typed because the exchange API expects decimal
/// strings, not JSON numbers.
#[derive(Debug, Clone, Serialize)]
pub struct OrderBody {
	pub product_id: String,
	pub side: Side,
	#[serde(rename = "type")]
	pub order_type: OrderType,
	pub size: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub price: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub time_in_force: Option<&'static str>,
}

impl From<&OrderIntent> for OrderBody {
	fn from(intent: &OrderIntent) -> Self {
		let (price, time_in_force) = match (intent.order_type, intent.price) {
			// Limit orders carry a price and a fixed good-till-canceled flag
			(OrderType::Limit, Some(price)) => (Some(price.to_string()), Some("GTC")),
			_ => (None, None),
		};

		Self {
			product_id: intent.product_id.clone(),
			side: intent.side,
			order_type: intent.order_type,
			size: intent.size.to_string(),
			price,
			time_in_force,
		}
	}
}

/// Result of a dispatch attempt.
///
/// Any HTTP status from the exchange is a structurally valid outcome; the
/// caller decides how to surface non-2xx statuses. `Simulated` means no
/// network I/O happened at all (test mode or incomplete credentials).
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
	/// Order was validated and echoed without touching the exchange
	Simulated,
	/// Order was submitted; `body` is the exchange's JSON response, or
	/// `{"text": <raw>}` if the response was not valid JSON
	Executed {
		status: u16,
		body: serde_json::Value,
	},
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_side_parse_case_insensitive() {
		assert_eq!(Side::parse("buy"), Some(Side::Buy));
		assert_eq!(Side::parse("SELL"), Some(Side::Sell));
		assert_eq!(Side::parse(" Buy "), Some(Side::Buy));
		assert_eq!(Side::parse("hold"), None);
	}

	#[test]
	fn test_order_type_defaults_to_market() {
		assert_eq!(OrderType::default(), OrderType::Market);
		assert_eq!(OrderType::parse("LIMIT"), Some(OrderType::Limit));
		assert_eq!(OrderType::parse("stop"), None);
	}

	#[test]
	fn test_market_body_serialization() {
		let intent = OrderIntent {
			product_id: "BTC-USD".to_string(),
			side: Side::Buy,
			size: 0.25,
			order_type: OrderType::Market,
			price: None,
		};

		let body = OrderBody::from(&intent);
		let json = serde_json::to_string(&body).unwrap();

		// No price or time_in_force keys for market orders, size as string
		assert_eq!(
			json,
			r#"{"product_id":"BTC-USD","side":"buy","type":"market","size":"0.25"}"#
		);
	}

	#[test]
	fn test_limit_body_serialization() {
		let intent = OrderIntent {
			product_id: "ETH-USD".to_string(),
			side: Side::Sell,
			size: 2.0,
			order_type: OrderType::Limit,
			price: Some(1850.5),
		};

		let body = OrderBody::from(&intent);
		let json = serde_json::to_string(&body).unwrap();

		assert_eq!(
			json,
			r#"{"product_id":"ETH-USD","side":"sell","type":"limit","size":"2","price":"1850.5","time_in_force":"GTC"}"#
		);
	}
}
