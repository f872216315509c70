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

//! Signal admission control
//!
//! Turns an authenticated payload map into a canonical [`OrderIntent`], or
//! rejects it with enough context for the caller to fix the signal. Checks
//! run in a fixed order:
//!
//! 1. presence of market identifier, side, and size (synonym-resolved)
//! 2. size parses as a finite number > 0
//! 3. size within the configured safety cap (when a cap is set)
//! 4. side and order type are recognized values
//! 5. limit orders carry a positive price
//!
//! The cap check deliberately precedes side/type validation so an oversized
//! order is refused with `403` no matter what else is wrong with it.
//!
//! No I/O happens here; the result is a classified value either way.

use serde_json::{Map, Value};
use thiserror::Error;

use relay_exchange::{OrderIntent, OrderType, Side};

use crate::signal::{self, ORDER_TYPE_KEY, PRICE_KEY, PRODUCT_KEYS, SIDE_KEYS, SIZE_KEYS};

/// Error types for admission control
#[derive(Debug, Error)]
pub enum AdmissionError {
	/// One of market identifier / side / size is absent; carries the
	/// redacted parsed payload for caller debuggability
	#[error("missing fields")]
	MissingFields { received: Value },
	#[error("invalid amount")]
	InvalidAmount(String),
	/// Requested size exceeds the configured server-side cap
	#[error("order size exceeds server safety limit")]
	SizeAboveCap { max: f64 },
	#[error("invalid side: {0}")]
	InvalidSide(String),
	#[error("invalid order type: {0}")]
	InvalidOrderType(String),
	#[error("limit order requires a price")]
	MissingPrice,
	#[error("invalid price: {0}")]
	InvalidPrice(String),
}

/// Validate an authenticated payload and build the order intent.
///
/// `max_order_size` is the server-side safety cap; zero disables it.
pub fn admit(
	payload: &Map<String, Value>,
	max_order_size: f64,
) -> Result<OrderIntent, AdmissionError> {
	let product_id = signal::lookup(payload, &PRODUCT_KEYS);
	let side_raw = signal::lookup(payload, &SIDE_KEYS);
	let amount_raw = signal::lookup(payload, &SIZE_KEYS);

	let (Some(product_id), Some(side_raw), Some(amount_raw)) = (product_id, side_raw, amount_raw)
	else {
		return Err(AdmissionError::MissingFields {
			received: signal::redacted(payload),
		});
	};

	let size = parse_positive(&amount_raw).ok_or(AdmissionError::InvalidAmount(amount_raw))?;

	if max_order_size > 0.0 && size > max_order_size {
		return Err(AdmissionError::SizeAboveCap {
			max: max_order_size,
		});
	}

	let side = Side::parse(&side_raw).ok_or(AdmissionError::InvalidSide(side_raw))?;

	let order_type = match signal::lookup(payload, &[ORDER_TYPE_KEY]) {
		Some(raw) => OrderType::parse(&raw).ok_or(AdmissionError::InvalidOrderType(raw))?,
		None => OrderType::default(),
	};

	let price = match order_type {
		OrderType::Limit => {
			let raw = signal::lookup(payload, &[PRICE_KEY]).ok_or(AdmissionError::MissingPrice)?;
			Some(parse_positive(&raw).ok_or(AdmissionError::InvalidPrice(raw))?)
		}
		OrderType::Market => None,
	};

	Ok(OrderIntent {
		product_id,
		side,
		size,
		order_type,
		price,
	})
}

/// Parse a decimal string into a finite, strictly positive number.
fn parse_positive(raw: &str) -> Option<f64> {
	raw.trim()
		.parse::<f64>()
		.ok()
		.filter(|v| v.is_finite() && *v > 0.0)
}
