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

//! Exchange API credential management.
//!
//! The API secret and passphrase are wrapped in [`SecretString`], which
//! prevents accidental Debug/Display printing and zeroes memory on drop.
//! A credential set only exists as a complete key/secret/passphrase triple;
//! a partial triple yields `None` and routes dispatch to simulated mode.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use secrecy::{ExposeSecret, SecretString};

use crate::signing::SigningError;

/// Complete API credential triple for authenticated exchange requests.
#[derive(Clone)]
pub struct Credentials {
	api_key: String,
	/// Base64-encoded API secret, decoded only at signing time
	api_secret: SecretString,
	passphrase: SecretString,
}

impl Credentials {
	/// Create credentials from explicit values.
	pub fn new(api_key: String, api_secret: String, passphrase: String) -> Self {
		Self {
			api_key,
			api_secret: SecretString::from(api_secret),
			passphrase: SecretString::from(passphrase),
		}
	}

	/// Assemble credentials from optional parts.
	///
	/// Returns `None` unless all three parts are present and non-empty.
	/// This is the fail-closed valve: a partially configured credential set
	/// must never produce an authenticated (or unauthenticated) real call.
	pub fn from_parts(
		api_key: Option<String>,
		api_secret: Option<String>,
		passphrase: Option<String>,
	) -> Option<Self> {
		match (api_key, api_secret, passphrase) {
			(Some(key), Some(secret), Some(passphrase))
				if !key.is_empty() && !secret.is_empty() && !passphrase.is_empty() =>
			{
				Some(Self::new(key, secret, passphrase))
			}
			_ => None,
		}
	}

	/// Check that the configured secret decodes from base64.
	///
	/// A secret that fails to decode is an unrecoverable configuration
	/// error; callers should surface it at startup rather than discover it
	/// on the first order.
	pub fn validate_secret(&self) -> Result<(), SigningError> {
		BASE64.decode(self.api_secret.expose_secret())?;
		Ok(())
	}

	/// Get the API key (public, safe to log).
	pub fn api_key(&self) -> &str {
		&self.api_key
	}

	/// Expose the base64-encoded API secret for signing.
	///
	/// Only use this for signing; never log or display the return value.
	pub fn expose_secret(&self) -> &str {
		self.api_secret.expose_secret()
	}

	/// Expose the passphrase for the `CB-ACCESS-PASSPHRASE` header.
	pub fn expose_passphrase(&self) -> &str {
		self.passphrase.expose_secret()
	}
}

impl std::fmt::Debug for Credentials {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Credentials")
			.field("api_key", &self.api_key)
			.field("api_secret", &"[REDACTED]")
			.field("passphrase", &"[REDACTED]")
			.finish()
	}
}
