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

//! Relay Gateway - trade-signal webhook service
//!
//! This service receives trade-signal notifications over HTTP from sources
//! that cannot hold exchange credentials themselves (charting and alerting
//! tools), authenticates them against a shared webhook secret, normalizes
//! them into a canonical order intent, and relays them as signed orders to
//! the Coinbase Exchange REST API via `relay-exchange`.
//!
//! Request flow:
//! - parse the inbound payload (JSON object, or `key: value; ...` text)
//! - verify the shared webhook token before anything else
//! - validate fields and apply the size safety cap
//! - sign and dispatch exactly one order, or simulate in test mode
//!
//! The service is a stateless request handler: the only shared state is the
//! read-only configuration and the pooled exchange client. A failed dispatch
//! is reported to the caller and never affects concurrent requests.

pub mod admission;
pub mod auth;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod routes;
pub mod server;
pub mod signal;

pub use config::RelayConfig;
pub use server::{RelayServer, RelayState};
