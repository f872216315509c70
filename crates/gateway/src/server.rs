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

use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use tracing::{info, warn};

use relay_exchange::ExchangeClient;

use crate::config::RelayConfig;
use crate::routes;

/// Shared, read-only per-request state.
///
/// Constructed once at startup; handlers never mutate it. The exchange
/// client pools connections internally, so concurrent in-flight dispatches
/// need no further coordination.
pub struct RelayState {
	pub config: RelayConfig,
	pub exchange: ExchangeClient,
}

impl RelayState {
	pub fn new(config: RelayConfig) -> Self {
		let exchange = ExchangeClient::new(config.exchange.clone());
		Self { config, exchange }
	}
}

/// Relay HTTP server
pub struct RelayServer {
	state: web::Data<RelayState>,
}

impl RelayServer {
	/// Create a new relay server from loaded configuration.
	pub fn new(config: RelayConfig) -> Self {
		if config.webhook_secret.is_none() {
			warn!(
				target: "server",
				"RELAY_WEBHOOK_SECRET is not set; inbound authentication is DISABLED"
			);
		}

		let state = web::Data::new(RelayState::new(config));
		if state.exchange.is_simulated() {
			info!(
				target: "server",
				"dispatch is simulated (test mode or incomplete exchange credentials)"
			);
		}

		Self { state }
	}

	/// Start the HTTP server and run until shutdown.
	pub async fn serve(self) -> Result<()> {
		let bind_addr = self.state.config.bind_addr;
		let workers = self.state.config.workers;
		let max_body_bytes = self.state.config.max_body_bytes;
		let state = self.state;

		info!(target: "server", "listening on {} with {} workers", bind_addr, workers);

		HttpServer::new(move || {
			App::new()
				.app_data(state.clone())
				.app_data(web::PayloadConfig::new(max_body_bytes))
				.configure(routes::configure_routes)
		})
		.workers(workers)
		.bind(bind_addr)
		.with_context(|| format!("Failed to bind {}", bind_addr))?
		.run()
		.await
		.context("HTTP server terminated with an error")?;

		Ok(())
	}
}
