// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use axum::extract::MatchedPath;
use axum::response::IntoResponse;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, MakeSpan, OnResponse, TraceLayer};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Span factory for incoming requests.
///
/// The matched route template (e.g. `/transactions/{tx_hash}/status`) is
/// recorded instead of the raw URI, so that tokens and wallet addresses that
/// appear in paths or query strings do not leak into logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestSpan;

impl<B> MakeSpan<B> for MakeRequestSpan {
    fn make_span(&mut self, request: &http::Request<B>) -> tracing::Span {
        let route = request
            .extensions()
            .get::<MatchedPath>()
            .map_or("<unmatched>", MatchedPath::as_str);

        tracing::info_span!(
            "http_request",
            http.method = %request.method(),
            http.route = route,
            http.status_code = tracing::field::Empty,
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OnRequestResponse;

impl<B> OnResponse<B> for OnRequestResponse {
    fn on_response(
        self,
        response: &http::Response<B>,
        latency: std::time::Duration,
        span: &tracing::Span,
    ) {
        span.record("http.status_code", response.status().as_u16());

        DefaultOnResponse::new()
            .level(tracing::Level::INFO)
            .on_response(response, latency, span);
    }
}

pub fn http_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    MakeRequestSpan,
    DefaultOnRequest,
    OnRequestResponse,
> {
    TraceLayer::new_for_http()
        .make_span_with(MakeRequestSpan)
        .on_response(OnRequestResponse)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[allow(clippy::unused_async)]
pub async fn unknown_fallback_handler() -> impl IntoResponse {
    (
        http::StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({
            "code": "not_found",
            "message": "Not Found",
        })),
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
