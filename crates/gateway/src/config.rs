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

use std::{env, net::SocketAddr, time::Duration};

use anyhow::{Context, Result};
use secrecy::SecretString;

use relay_exchange::{Credentials, DEFAULT_BASE_URL, ExchangeConfig};

// Logging configuration constants
/// Default log level (can be overridden by RUST_LOG environment variable)
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log directory component name
pub const LOG_COMPONENT_NAME: &str = "relay";

/// Default console output enabled (can be overridden by LOG_TO_CONSOLE environment variable)
pub const DEFAULT_LOG_TO_CONSOLE: bool = false;

// Server configuration constants
/// Default HTTP server bind address (can be overridden by RELAY_BIND_ADDR environment variable)
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Default maximum HTTP request body size in bytes (can be overridden by RELAY_MAX_BODY_BYTES)
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

// Order safety constants
/// Default maximum order size in base currency (can be overridden by RELAY_MAX_ORDER_SIZE).
/// Zero disables the server-side cap.
pub const DEFAULT_MAX_ORDER_SIZE: f64 = 0.0;

/// Default outbound dispatch timeout in seconds (can be overridden by RELAY_DISPATCH_TIMEOUT_SECS)
pub const DEFAULT_DISPATCH_TIMEOUT_SECS: u64 = 15;

/// Relay service configuration, loaded once at startup.
///
/// The configuration is read-only for the process lifetime and passed
/// explicitly into the handlers, so tests can inject fake credentials
/// without touching process environment.
#[derive(Debug, Clone)]
pub struct RelayConfig {
	pub bind_addr: SocketAddr,
	pub workers: usize,
	pub max_body_bytes: usize,
	/// Shared webhook token; `None` disables inbound authentication
	/// (non-default, warned at startup)
	pub webhook_secret: Option<SecretString>,
	/// Server-side order size safety cap; zero disables it
	pub max_order_size: f64,
	/// Log raw inbound payloads (redacted) at info level
	pub log_payloads: bool,
	pub exchange: ExchangeConfig,
}

impl RelayConfig {
	/// Load configuration from environment variables (`.env` honored).
	///
	/// Exchange credentials are assembled only if the full
	/// key/secret/passphrase triple is present; otherwise dispatch runs in
	/// simulated mode. A secret that is not valid base64 fails here rather
	/// than on the first order.
	pub fn from_env() -> Result<Self> {
		dotenv::dotenv().ok();

		let bind_addr_str =
			env::var("RELAY_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
		let bind_addr = bind_addr_str
			.parse()
			.with_context(|| format!("Invalid bind address: {}", bind_addr_str))?;

		let workers = env::var("RELAY_WORKERS")
			.ok()
			.and_then(|w| w.parse().ok())
			.unwrap_or_else(num_cpus::get);

		let max_body_bytes = env::var("RELAY_MAX_BODY_BYTES")
			.ok()
			.and_then(|v| v.parse().ok())
			.unwrap_or(DEFAULT_MAX_BODY_BYTES);

		let webhook_secret = env::var("RELAY_WEBHOOK_SECRET")
			.ok()
			.filter(|s| !s.is_empty())
			.map(SecretString::from);

		let max_order_size = env::var("RELAY_MAX_ORDER_SIZE")
			.ok()
			.and_then(|v| v.parse().ok())
			.unwrap_or(DEFAULT_MAX_ORDER_SIZE);

		let log_payloads = bool_env("RELAY_LOG_PAYLOADS", false);
		let test_mode = bool_env("RELAY_TEST_MODE", false);

		let timeout_secs = env::var("RELAY_DISPATCH_TIMEOUT_SECS")
			.ok()
			.and_then(|v| v.parse().ok())
			.unwrap_or(DEFAULT_DISPATCH_TIMEOUT_SECS);

		let credentials = Credentials::from_parts(
			env::var("COINBASE_API_KEY").ok(),
			env::var("COINBASE_API_SECRET").ok(),
			env::var("COINBASE_API_PASSPHRASE").ok(),
		);
		if let Some(credentials) = &credentials {
			credentials
				.validate_secret()
				.context("COINBASE_API_SECRET is not valid base64")?;
		}

		let base_url =
			env::var("COINBASE_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

		Ok(Self {
			bind_addr,
			workers,
			max_body_bytes,
			webhook_secret,
			max_order_size,
			log_payloads,
			exchange: ExchangeConfig {
				base_url,
				credentials,
				test_mode,
				timeout: Duration::from_secs(timeout_secs),
				log_responses: log_payloads,
			},
		})
	}
}

/// Parse a boolean toggle from the environment.
///
/// `true`, `1`, and `yes` enable the toggle; anything else (or an unset
/// variable) falls back to the default.
fn bool_env(name: &str, default: bool) -> bool {
	env::var(name)
		.map(|v| v == "true" || v == "1" || v == "yes")
		.unwrap_or(default)
}
