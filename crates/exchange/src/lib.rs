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

//! Relay Exchange - Coinbase Exchange order client
//!
//! This crate builds, signs, and submits order requests to the Coinbase
//! Exchange REST API. It owns the wire contract: the canonical signing
//! message (`timestamp + METHOD + path + body`), the HMAC-SHA256 digest
//! keyed with the base64-decoded API secret, and the `CB-ACCESS-*` header
//! set expected by the exchange.
//!
//! The crate is designed to be embeddable:
//! - No background threads
//! - No runtime initialization
//! - No environment or configuration loading (the caller supplies
//!   [`ExchangeConfig`])

pub mod client;
pub mod credentials;
pub mod signing;
pub mod types;

pub use client::{ClientError, DEFAULT_BASE_URL, ExchangeClient, ExchangeConfig};
pub use credentials::Credentials;
pub use signing::{ORDERS_PATH, SignedRequest, SigningError, sign_message};
pub use types::*;
