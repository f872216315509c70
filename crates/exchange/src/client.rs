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

use std::time::Duration;

use reqwest::Client as ReqwestClient;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use tracing::{debug, info};

use crate::credentials::Credentials;
use crate::signing::{self, SigningError};
use crate::types::{DispatchOutcome, OrderBody, OrderIntent};

/// Production Coinbase Exchange endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.exchange.coinbase.com";

/// Default outbound request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Error types for dispatch operations
#[derive(Debug, Error)]
pub enum ClientError {
	#[error("Network error: {0}")]
	Network(String),
	#[error("Serialization error: {0}")]
	Serialization(String),
	#[error("Signing error: {0}")]
	Signing(#[from] SigningError),
}

/// Exchange client configuration, assembled by the caller.
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
	/// Exchange base URL (no trailing slash)
	pub base_url: String,
	/// Complete credential triple, or `None` to force simulated dispatch
	pub credentials: Option<Credentials>,
	/// When set, dispatch is simulated even with complete credentials
	pub test_mode: bool,
	/// Outbound request timeout
	pub timeout: Duration,
	/// Log exchange responses at info level
	pub log_responses: bool,
}

impl Default for ExchangeConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
			credentials: None,
			test_mode: false,
			timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
			log_responses: false,
		}
	}
}

/// Client for submitting signed orders to the exchange.
///
/// The client is cheap to clone and safe to share across concurrent
/// requests; the underlying connection pool is reused, and every dispatch
/// produces its own timestamp/signature pair.
#[derive(Clone)]
pub struct ExchangeClient {
	base_url: String,
	credentials: Option<Credentials>,
	test_mode: bool,
	log_responses: bool,
	client: ReqwestClient,
}

impl ExchangeClient {
	/// Create a new exchange client.
	pub fn new(config: ExchangeConfig) -> Self {
		let client = ReqwestClient::builder()
			.timeout(config.timeout)
			.build()
			.expect("Failed to create HTTP client");

		Self {
			base_url: config.base_url,
			credentials: config.credentials,
			test_mode: config.test_mode,
			log_responses: config.log_responses,
			client,
		}
	}

	/// Whether dispatch will be simulated instead of hitting the exchange.
	///
	/// True in test mode, and whenever the credential triple is incomplete.
	/// Partial credentials must never fall through to a real call.
	pub fn is_simulated(&self) -> bool {
		self.test_mode || self.credentials.is_none()
	}

	/// Build, sign, and submit one order.
	///
	/// Exactly one outbound `POST {base_url}/orders` per call, or zero in
	/// simulated mode. Non-2xx exchange statuses are returned as
	/// [`DispatchOutcome::Executed`], not errors; only transport and
	/// configuration failures produce `Err`. No retry is performed —
	/// resubmitting a possibly-placed order is a correctness hazard, so
	/// retry policy belongs to the caller.
	pub async fn place_order(&self, intent: &OrderIntent) -> Result<DispatchOutcome, ClientError> {
		if self.test_mode {
			info!(target: "exchange", "test mode active, simulating dispatch for {}", intent.product_id);
			return Ok(DispatchOutcome::Simulated);
		}
		let Some(credentials) = &self.credentials else {
			info!(target: "exchange", "credentials incomplete, simulating dispatch for {}", intent.product_id);
			return Ok(DispatchOutcome::Simulated);
		};

		let body = OrderBody::from(intent);
		let body_json = serde_json::to_string(&body)
			.map_err(|e| ClientError::Serialization(format!("Failed to serialize order: {}", e)))?;

		let signed = signing::sign_order(credentials.expose_secret(), body_json)?;
		let url = format!("{}{}", self.base_url, signed.path);

		debug!(target: "exchange", "submitting {} {} order for {}", intent.side.as_str(), body.size, intent.product_id);

		let response = self
			.client
			.post(&url)
			.header("CB-ACCESS-KEY", credentials.api_key())
			.header("CB-ACCESS-SIGN", &signed.signature)
			.header("CB-ACCESS-TIMESTAMP", &signed.timestamp)
			.header("CB-ACCESS-PASSPHRASE", credentials.expose_passphrase())
			.header(CONTENT_TYPE, "application/json")
			.body(signed.body_json)
			.send()
			.await
			.map_err(|e| ClientError::Network(format!("Request failed: {}", e)))?;

		let status = response.status().as_u16();
		let text = response
			.text()
			.await
			.map_err(|e| ClientError::Network(format!("Failed to read response: {}", e)))?;

		// The exchange answers JSON, but surface whatever came back rather
		// than failing the whole call on a malformed body
		let body = serde_json::from_str(&text)
			.unwrap_or_else(|_| serde_json::json!({ "text": text }));

		if self.log_responses {
			info!(target: "exchange", "exchange responded {}: {}", status, body);
		}

		Ok(DispatchOutcome::Executed { status, body })
	}
}
