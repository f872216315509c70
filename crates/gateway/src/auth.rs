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

//! Webhook authentication
//!
//! Signal sources authenticate with a pre-agreed shared token carried in
//! the payload itself (under `auth`, `token`, or `key`) — distinct from the
//! exchange API credentials, which never appear on the inbound side.
//!
//! The token check runs before any field validation, so an unauthenticated
//! caller learns nothing about which fields a valid signal needs. Token
//! comparison is constant-time.

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::signal::{self, TOKEN_KEYS};

/// Error types for webhook authentication
#[derive(Debug, Error)]
pub enum AuthError {
	#[error("missing webhook token")]
	MissingToken,
	#[error("invalid webhook token")]
	TokenMismatch,
}

/// Verify the shared webhook token carried in the payload.
///
/// `secret = None` disables the check — the unauthenticated mode is
/// supported for legacy signal sources but is strictly opt-in; no default
/// secret ships with the service.
pub fn verify_token(
	payload: &Map<String, Value>,
	secret: Option<&SecretString>,
) -> Result<(), AuthError> {
	let Some(secret) = secret else {
		return Ok(());
	};

	let token = signal::lookup(payload, &TOKEN_KEYS).ok_or(AuthError::MissingToken)?;

	if !constant_time_eq(token.as_bytes(), secret.expose_secret().as_bytes()) {
		return Err(AuthError::TokenMismatch);
	}

	Ok(())
}

/// Constant-time byte comparison.
///
/// The length check short-circuits, but token lengths are not secret;
/// the content comparison always touches every byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
	if a.len() != b.len() {
		return false;
	}
	a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::signal::parse_payload;

	fn secret(s: &str) -> SecretString {
		SecretString::from(s.to_string())
	}

	#[test]
	fn test_valid_token_accepted() {
		let payload = parse_payload(r#"{"auth":"hook-secret","symbol":"BTC-USD"}"#);
		assert!(verify_token(&payload, Some(&secret("hook-secret"))).is_ok());
	}

	#[test]
	fn test_token_synonyms_accepted() {
		for key in ["auth", "token", "key"] {
			let payload = parse_payload(&format!(r#"{{"{}":"hook-secret"}}"#, key));
			assert!(verify_token(&payload, Some(&secret("hook-secret"))).is_ok());
		}
	}

	#[test]
	fn test_missing_token_rejected() {
		let payload = parse_payload(r#"{"symbol":"BTC-USD"}"#);
		assert!(matches!(
			verify_token(&payload, Some(&secret("hook-secret"))),
			Err(AuthError::MissingToken)
		));
	}

	#[test]
	fn test_wrong_token_rejected() {
		let payload = parse_payload(r#"{"auth":"wrong"}"#);
		assert!(matches!(
			verify_token(&payload, Some(&secret("hook-secret"))),
			Err(AuthError::TokenMismatch)
		));
	}

	#[test]
	fn test_disabled_auth_accepts_anything() {
		let payload = parse_payload(r#"{"symbol":"BTC-USD"}"#);
		assert!(verify_token(&payload, None).is_ok());
	}

	#[test]
	fn test_constant_time_eq() {
		assert!(constant_time_eq(b"abc", b"abc"));
		assert!(!constant_time_eq(b"abc", b"abd"));
		assert!(!constant_time_eq(b"abc", b"abcd"));
		assert!(constant_time_eq(b"", b""));
	}
}
