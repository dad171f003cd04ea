use std::sync::Arc;

use axum::{Router, extract::MatchedPath, http::{HeaderName, Request}};
use pinlog_common::views::ApiErrorResponse;
use pinlog_db::storage::Storage;
use tower::ServiceBuilder;
use tower_http::{request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer}, trace::TraceLayer};
use tracing::info_span;
use utoipa::{ToSchema, openapi::{Content, Info, License, OpenApi, Ref, RefOr, ResponseBuilder, path::Operation}};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{context::ApiContext, handlers};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the HTTP router around an already connected store.
pub fn make(db: Arc<dyn Storage>) -> (Router, OpenApi) {
    let context = ApiContext::new(db);

    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            x_request_id.clone(),
            MakeRequestUuid,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<_>| {
                    let span = info_span!(
                        "http_request",
                        method = req.method().to_string(),
                        request_id = Option::<&str>::None,
                        path = Option::<&str>::None,
                    );

                    if let Some(request_id) = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                    {
                        span.record("request_id", request_id);
                    };

                    if let Some(path) = req.extensions().get::<MatchedPath>() {
                        span.record("path", path.as_str())
                    } else {
                        span.record("path", req.uri().path())
                    };

                    span
                }),
        )
        .layer(PropagateRequestIdLayer::new(x_request_id));

    let (r, mut a) = api_router()
        .layer(middleware)
        .with_state(context)
        .split_for_parts();

    apply_default_errors(&mut a);

    (r, a)
}

/// The OpenAPI document on its own, without a store behind it.
pub fn openapi() -> OpenApi {
    let (_, mut a) = api_router().split_for_parts();
    apply_default_errors(&mut a);
    a
}

fn api_router() -> OpenApiRouter<ApiContext> {
    let openapi = OpenApi::builder()
        .info(
            Info::builder()
                .title("Pinlog API Reference")
                .version(env!("CARGO_PKG_VERSION"))
                .license(Some(
                    License::builder()
                        .name("Apache 2.0 License")
                        .identifier(Some(env!("CARGO_PKG_LICENSE")))
                        .build()
                ))
        )
        .build();

    OpenApiRouter::with_openapi(openapi)
        .routes(routes!(handlers::devices::register_device))
        .routes(routes!(handlers::signals::submit_signal))
        .routes(routes!(handlers::health_check))
}

fn apply_default_errors(a: &mut OpenApi) {
    a.paths.paths.iter_mut().for_each(|(_path, item)| {
        apply_default_errors_to(&mut item.get);
        apply_default_errors_to(&mut item.post);
        apply_default_errors_to(&mut item.patch);
        apply_default_errors_to(&mut item.put);
        apply_default_errors_to(&mut item.delete);
        apply_default_errors_to(&mut item.trace);
        apply_default_errors_to(&mut item.head);
        apply_default_errors_to(&mut item.options);
    });
}

fn apply_default_errors_to(item: &mut Option<Operation>) {
    if let Some(item) = item {
        for (status, description) in [("400", "Bad request"), ("500", "Internal server error")] {
            item.responses
                .responses
                .entry(status.into())
                .or_insert_with(|| error_response(description));
        }
    }
}

fn error_response(description: &str) -> RefOr<utoipa::openapi::Response> {
    RefOr::T(
        ResponseBuilder::new()
            .description(description)
            .content(
                "application/json",
                Content::new(Some(Ref::from_schema_name(ApiErrorResponse::name()))),
            )
            .build(),
    )
}
