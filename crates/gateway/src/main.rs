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

//! Relay service entry point
//!
//! Wires up logging, loads the environment-sourced configuration (including
//! the exchange credential triple), and starts the webhook HTTP server.

use anyhow::{Context, Result};
use tracing::info;

use relay_gateway::{RelayConfig, RelayServer, logging::init_logging};

#[actix_rt::main]
async fn main() -> Result<()> {
	// Initialize logging first
	init_logging()?;

	let config = RelayConfig::from_env().context("Failed to load relay configuration")?;

	info!(target: "server", "Starting relay gateway on {}", config.bind_addr);
	info!(target: "server", "Exchange endpoint: {}", config.exchange.base_url);

	RelayServer::new(config)
		.serve()
		.await
		.context("Failed to run relay gateway")?;

	Ok(())
}
