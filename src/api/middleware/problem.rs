//! Completes problem documents with the request path

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::types::{ApiError, ProblemDetails};

/// Set `instance` on problem responses that do not carry one yet
pub async fn problem_instance_middleware(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let mut response = next.run(request).await;

    let Some(problem) = response.extensions_mut().remove::<ProblemDetails>() else {
        return response;
    };

    if problem.instance.is_some() {
        return response;
    }

    let status = response.status();
    let mut completed = problem.with_instance(path).into_problem_response();
    *completed.status_mut() = status;

    for (name, value) in response.headers() {
        if name != header::CONTENT_LENGTH && name != header::CONTENT_TYPE {
            completed.headers_mut().insert(name.clone(), value.clone());
        }
    }

    completed
}

/// Fallback for unknown routes
pub async fn route_not_found(request: Request<Body>) -> Response {
    ApiError::not_found(format!("No route found for \"{} {}\"", request.method(), request.uri().path()))
        .into_response()
}

/// Fallback for known routes called with an unsupported method
pub async fn method_not_allowed(request: Request<Body>) -> Response {
    ApiError::new(
        StatusCode::METHOD_NOT_ALLOWED,
        format!(
            "No route found for \"{} {}\": Method Not Allowed",
            request.method(),
            request.uri().path()
        ),
    )
    .into_response()
}
