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

use actix_web::{HttpResponse, Responder, web};
use thiserror::Error;
use tracing::{error, info};

use relay_exchange::{ClientError, DispatchOutcome};

use crate::admission::{self, AdmissionError};
use crate::auth::{self, AuthError};
use crate::server::RelayState;
use crate::signal;

/// Error types for webhook handling
#[derive(Debug, Error)]
pub enum RelayError {
	#[error("Authentication error: {0}")]
	Auth(#[from] AuthError),
	#[error("Admission error: {0}")]
	Admission(#[from] AdmissionError),
	#[error("Dispatch error: {0}")]
	Dispatch(#[from] ClientError),
}

impl actix_web::ResponseError for RelayError {
	fn error_response(&self) -> HttpResponse {
		match self {
			RelayError::Auth(err) => HttpResponse::Unauthorized().json(serde_json::json!({
				"error": err.to_string()
			})),
			RelayError::Admission(AdmissionError::SizeAboveCap { max }) => {
				HttpResponse::Forbidden().json(serde_json::json!({
					"error": "order size exceeds server safety limit",
					"max": max
				}))
			}
			RelayError::Admission(AdmissionError::MissingFields { received }) => {
				HttpResponse::BadRequest().json(serde_json::json!({
					"error": "missing fields",
					"received": received
				}))
			}
			RelayError::Admission(err) => HttpResponse::BadRequest().json(serde_json::json!({
				"error": err.to_string()
			})),
			RelayError::Dispatch(err) => {
				HttpResponse::InternalServerError().json(serde_json::json!({
					"error": err.to_string()
				}))
			}
		}
	}
}

/// Liveness probe
pub async fn health() -> impl Responder {
	HttpResponse::Ok().json(serde_json::json!({
		"status": "ok",
		"service": "relay-gateway"
	}))
}

/// Handle an inbound trade signal
///
/// The full relay pipeline: parse (JSON or key:value fallback), verify the
/// shared webhook token, validate into an order intent, then sign and
/// dispatch to the exchange. Every stage failure maps to a structured JSON
/// error via [`RelayError`]; a dispatch failure is reported to this caller
/// only and never disturbs other in-flight requests.
pub async fn webhook(
	state: web::Data<RelayState>,
	body: web::Bytes,
) -> Result<HttpResponse, RelayError> {
	let raw = String::from_utf8_lossy(&body);
	let payload = signal::parse_payload(&raw);

	// Token check comes first: an unauthenticated caller must not learn
	// which fields a valid signal needs
	auth::verify_token(&payload, state.config.webhook_secret.as_ref())?;

	if state.config.log_payloads {
		info!(target: "webhook", "inbound signal: {}", signal::redacted(&payload));
	}

	let intent = admission::admit(&payload, state.config.max_order_size)?;

	let outcome = state.exchange.place_order(&intent).await.map_err(|err| {
		error!(target: "webhook", "dispatch failed for {}: {}", intent.product_id, err);
		err
	})?;

	match outcome {
		DispatchOutcome::Simulated => Ok(HttpResponse::Ok().json(serde_json::json!({
			"ok": true,
			"simulated": true,
			"payload": {
				"product": intent.product_id,
				"side": intent.side,
				"size": intent.size
			}
		}))),
		DispatchOutcome::Executed { status, body } => {
			if (200..300).contains(&status) {
				Ok(HttpResponse::Ok().json(serde_json::json!({
					"ok": true,
					"status_code": status,
					"response": body
				})))
			} else {
				// Remote failure: surface the exchange's status and body so
				// the signal source can diagnose the rejection
				Ok(HttpResponse::InternalServerError().json(serde_json::json!({
					"ok": false,
					"error": "exchange rejected order",
					"status_code": status,
					"response": body
				})))
			}
		}
	}
}
