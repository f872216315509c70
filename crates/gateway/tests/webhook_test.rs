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

//! End-to-end webhook handler tests
//!
//! These tests run the full parse -> authenticate -> validate -> dispatch
//! pipeline through the HTTP layer with dispatch forced into test mode, and
//! verify the status code and JSON body contract for every outcome class.

use actix_web::{App, http::StatusCode, test, web};
use secrecy::SecretString;
use serde_json::Value;

use relay_exchange::ExchangeConfig;
use relay_gateway::{RelayConfig, RelayState, routes};

const HOOK_SECRET: &str = "hook-secret";

fn test_config(webhook_secret: Option<&str>, max_order_size: f64) -> RelayConfig {
	RelayConfig {
		bind_addr: "127.0.0.1:0".parse().unwrap(),
		workers: 1,
		max_body_bytes: 64 * 1024,
		webhook_secret: webhook_secret.map(|s| SecretString::from(s.to_string())),
		max_order_size,
		log_payloads: false,
		exchange: ExchangeConfig {
			test_mode: true,
			..ExchangeConfig::default()
		},
	}
}

macro_rules! relay_app {
	($config:expr) => {
		test::init_service(
			App::new()
				.app_data(web::Data::new(RelayState::new($config)))
				.configure(routes::configure_routes),
		)
		.await
	};
}

macro_rules! post_webhook {
	($app:expr, $body:expr) => {{
		let req = test::TestRequest::post()
			.uri("/webhook")
			.set_payload($body)
			.to_request();
		let resp = test::call_service(&$app, req).await;
		let status = resp.status();
		let json: Value = test::read_body_json(resp).await;
		(status, json)
	}};
}

#[actix_rt::test]
async fn test_valid_signal_is_simulated() {
	let app = relay_app!(test_config(Some(HOOK_SECRET), 0.0));

	let (status, body) = post_webhook!(
		app,
		r#"{"symbol":"ETH-USD","action":"SELL","amount":"2.5","auth":"hook-secret"}"#
	);

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["ok"], true);
	assert_eq!(body["simulated"], true);
	assert_eq!(body["payload"]["product"], "ETH-USD");
	// The echo is the canonical intent: side normalized to lowercase
	assert_eq!(body["payload"]["side"], "sell");
	assert_eq!(body["payload"]["size"], 2.5);
}

#[actix_rt::test]
async fn test_kv_text_signal_is_accepted() {
	let app = relay_app!(test_config(Some(HOOK_SECRET), 0.0));

	let (status, body) = post_webhook!(
		app,
		"symbol: BTC-USD; action: buy; amount: 10; auth: hook-secret"
	);

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["simulated"], true);
	assert_eq!(body["payload"]["product"], "BTC-USD");
	assert_eq!(body["payload"]["side"], "buy");
	assert_eq!(body["payload"]["size"], 10.0);
}

#[actix_rt::test]
async fn test_wrong_token_is_unauthorized() {
	let app = relay_app!(test_config(Some(HOOK_SECRET), 0.0));

	let (status, body) = post_webhook!(
		app,
		r#"{"symbol":"BTC-USD","action":"buy","amount":"1","auth":"wrong"}"#
	);

	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(body["error"], "invalid webhook token");
}

#[actix_rt::test]
async fn test_missing_token_is_unauthorized_before_validation() {
	let app = relay_app!(test_config(Some(HOOK_SECRET), 0.0));

	// The payload is also missing every order field; authentication must
	// still fail first so nothing about field validation leaks
	let (status, body) = post_webhook!(app, r#"{"note":"no fields at all"}"#);

	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(body["error"], "missing webhook token");
	assert!(body.get("received").is_none());
}

#[actix_rt::test]
async fn test_missing_fields_echo_redacted_payload() {
	let app = relay_app!(test_config(Some(HOOK_SECRET), 0.0));

	let (status, body) = post_webhook!(app, r#"{"symbol":"BTC-USD","auth":"hook-secret"}"#);

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"], "missing fields");
	assert_eq!(body["received"]["symbol"], "BTC-USD");
	// The webhook token never comes back in an echo
	assert!(body["received"].get("auth").is_none());
}

#[actix_rt::test]
async fn test_invalid_amount_is_rejected() {
	let app = relay_app!(test_config(Some(HOOK_SECRET), 0.0));

	let (status, body) = post_webhook!(
		app,
		r#"{"symbol":"BTC-USD","action":"buy","amount":"a lot","auth":"hook-secret"}"#
	);

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"], "invalid amount");
}

#[actix_rt::test]
async fn test_cap_violation_is_forbidden() {
	let app = relay_app!(test_config(Some(HOOK_SECRET), 5.0));

	let (status, body) = post_webhook!(
		app,
		r#"{"symbol":"BTC-USD","action":"buy","amount":"10","auth":"hook-secret"}"#
	);

	assert_eq!(status, StatusCode::FORBIDDEN);
	assert_eq!(body["error"], "order size exceeds server safety limit");
	assert_eq!(body["max"], 5.0);
}

#[actix_rt::test]
async fn test_limit_order_without_price_is_rejected() {
	let app = relay_app!(test_config(Some(HOOK_SECRET), 0.0));

	let (status, body) = post_webhook!(
		app,
		r#"{"symbol":"BTC-USD","action":"buy","amount":"1","order_type":"limit","auth":"hook-secret"}"#
	);

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"], "limit order requires a price");
}

#[actix_rt::test]
async fn test_disabled_auth_accepts_unauthenticated_signal() {
	let app = relay_app!(test_config(None, 0.0));

	let (status, body) = post_webhook!(app, r#"{"symbol":"BTC-USD","action":"buy","amount":"1"}"#);

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["simulated"], true);
}

#[actix_rt::test]
async fn test_liveness_probes() {
	let app = relay_app!(test_config(Some(HOOK_SECRET), 0.0));

	for uri in ["/", "/health"] {
		let req = test::TestRequest::get().uri(uri).to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::OK);
		let body: Value = test::read_body_json(resp).await;
		assert_eq!(body["status"], "ok");
	}
}
