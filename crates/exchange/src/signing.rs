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

//! Request signing for the Coinbase Exchange REST API.
//!
//! The exchange authenticates requests with an HMAC-SHA256 signature over
//! the canonical message
//!
//! ```text
//! timestamp + METHOD + path + body
//! ```
//!
//! where `timestamp` is Unix time in seconds as decimal text (fractional
//! seconds included), `METHOD` is uppercase, and `body` is the exact JSON
//! string transmitted on the wire. The HMAC key is the base64-decoded API
//! secret, and the digest is base64-encoded into the `CB-ACCESS-SIGN`
//! header.
//!
//! Signing must happen over the same serialization that is sent; re-deriving
//! the body for the signature would silently break every order.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Order submission path, part of the signed message
pub const ORDERS_PATH: &str = "/orders";

/// HTTP method for order submission, uppercase in the signed message
pub const ORDERS_METHOD: &str = "POST";

/// Error types for signing operations
#[derive(Debug, Error)]
pub enum SigningError {
	#[error("API secret is not valid base64: {0}")]
	InvalidSecret(#[from] base64::DecodeError),
}

/// Ephemeral signed request, attached as headers to exactly one outbound
/// call.
///
/// Each call gets a fresh timestamp/signature pair; a correctly implemented
/// exchange server rejects reuse via its timestamp window, so a
/// `SignedRequest` is never stored or reused.
#[derive(Debug)]
pub struct SignedRequest {
	/// Unix time in seconds, decimal text
	pub timestamp: String,
	pub method: &'static str,
	pub path: &'static str,
	/// The exact body string that was signed and must be transmitted
	pub body_json: String,
	/// Base64-encoded HMAC-SHA256 digest
	pub signature: String,
}

/// Compute the signature for a canonical request message.
///
/// `secret_b64` is the base64-encoded API secret as configured; it is
/// decoded to raw bytes before keying the HMAC. A decode failure is an
/// unrecoverable configuration error.
pub fn sign_message(
	secret_b64: &str,
	timestamp: &str,
	method: &str,
	path: &str,
	body_json: &str,
) -> Result<String, SigningError> {
	let key = BASE64.decode(secret_b64)?;

	let mut mac = HmacSha256::new_from_slice(&key).expect("HMAC can take key of any size");
	mac.update(timestamp.as_bytes());
	mac.update(method.as_bytes());
	mac.update(path.as_bytes());
	mac.update(body_json.as_bytes());

	Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Sign an order body for submission, stamping the current time.
pub fn sign_order(secret_b64: &str, body_json: String) -> Result<SignedRequest, SigningError> {
	let timestamp = unix_timestamp();
	let signature = sign_message(secret_b64, &timestamp, ORDERS_METHOD, ORDERS_PATH, &body_json)?;

	Ok(SignedRequest {
		timestamp,
		method: ORDERS_METHOD,
		path: ORDERS_PATH,
		body_json,
		signature,
	})
}

/// Current Unix time in seconds as decimal text.
///
/// Fractional seconds are part of the signed message, so this is the f64
/// seconds value formatted with its default representation, not an integer
/// cast.
fn unix_timestamp() -> String {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("time went backwards")
		.as_secs_f64()
		.to_string()
}
