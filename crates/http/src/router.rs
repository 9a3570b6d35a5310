//! Router builder for the HTTP server

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use std::time::Duration;
use tower::ServiceExt;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use uuid::{Timestamp, Uuid};

use courselib_kernel::ModuleRegistry;

const API_TITLE: &str = "Course Library API";
const API_VERSION: &str = "1.0.0";

/// Builder for constructing the main HTTP router.
///
/// Layers wrap the routes added before them, so add routes first.
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Nest a module's router under its mount path
    pub fn mount_module(mut self, mount_path: &str, module_router: Router) -> Self {
        self.router = self.router.nest(mount_path, module_router);
        self
    }

    /// Add tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    /// Add CORS middleware.
    ///
    /// Only preflights (OPTIONS carrying `Access-Control-Request-Method`) are
    /// answered by the CORS layer; any other OPTIONS reaches its route.
    pub fn with_cors(mut self) -> Self {
        let without_cors = self.router.clone();
        self.router = self
            .router
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any)
                    .expose_headers(Any),
            )
            .layer(middleware::from_fn_with_state(
                without_cors,
                bypass_cors_for_plain_options,
            ));
        self
    }

    /// Add request ID middleware; ids are echoed back on the response
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));
        self
    }

    /// Add timeout middleware
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self
            .router
            .layer(TimeoutLayer::new(Duration::from_millis(timeout_ms)));
        self
    }

    /// Add OpenAPI documentation by collecting specs from all modules
    pub fn with_openapi(mut self, registry: &ModuleRegistry) -> Self {
        let openapi_spec = merged_openapi(registry);

        // Round-trip through utoipa so Swagger UI gets a typed document.
        let openapi_obj: utoipa::openapi::OpenApi = serde_json::from_value(openapi_spec.clone())
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "merged OpenAPI document rejected, serving a stub");
                utoipa::openapi::OpenApiBuilder::new()
                    .info(
                        utoipa::openapi::InfoBuilder::new()
                            .title(API_TITLE)
                            .version(API_VERSION)
                            .build(),
                    )
                    .build()
            });

        self.router = self.router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi_obj),
        );

        // Raw merged document for external consumers
        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(openapi_spec.clone()) }),
        );

        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge every module's OpenAPI fragment into one document.
///
/// Fragment paths are relative to the module mount path; `/` maps to the
/// mount path itself.
pub fn merged_openapi(registry: &ModuleRegistry) -> serde_json::Value {
    let mut openapi_spec = serde_json::json!({
        "openapi": "3.1.0",
        "info": {
            "title": API_TITLE,
            "version": API_VERSION,
            "description": "Authors and their courses"
        },
        "paths": {},
        "components": {
            "schemas": {}
        }
    });

    openapi_spec["components"]["schemas"]["ErrorResponse"] = serde_json::json!({
        "type": "object",
        "properties": {
            "error": {
                "type": "object",
                "properties": {
                    "code": { "type": "string" },
                    "message": { "type": "string" },
                    "details": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "field": { "type": ["string", "null"] },
                                "error": { "type": "string" }
                            }
                        }
                    },
                    "trace_id": { "type": "string" },
                    "timestamp": { "type": "string" }
                },
                "required": ["code", "message", "trace_id", "timestamp"]
            }
        },
        "required": ["error"]
    });

    openapi_spec["paths"]["/healthz"] = serde_json::json!({
        "get": {
            "summary": "Health check",
            "responses": {
                "200": {
                    "description": "OK",
                    "content": {
                        "text/plain": {
                            "schema": { "type": "string" }
                        }
                    }
                }
            }
        }
    });

    for module in registry.modules() {
        let Some(module_spec) = module.openapi() else {
            continue;
        };
        let mount_path = module.mount_path();

        if let Some(paths_obj) = module_spec.get("paths").and_then(|p| p.as_object()) {
            for (path, path_item) in paths_obj {
                let prefixed_path = if path == "/" {
                    mount_path.clone()
                } else {
                    format!("{}{}", mount_path, path)
                };
                openapi_spec["paths"][prefixed_path] = path_item.clone();
            }
        }

        if let Some(schemas_obj) = module_spec
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(|s| s.as_object())
        {
            for (schema_name, schema_def) in schemas_obj {
                openapi_spec["components"]["schemas"][schema_name] = schema_def.clone();
            }
        }
    }

    openapi_spec
}

/// OPTIONS that is not a CORS preflight.
fn is_plain_options(request: &Request) -> bool {
    request.method() == Method::OPTIONS
        && !request
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

async fn bypass_cors_for_plain_options(
    State(without_cors): State<Router>,
    request: Request,
    next: Next,
) -> Response {
    if !is_plain_options(&request) {
        return next.run(request).await;
    }

    match without_cors.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}

/// Time-ordered request ids
#[derive(Clone)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{body::Body, http::StatusCode};
    use courselib_kernel::Module;
    use std::sync::Arc;

    struct EchoModule;

    #[async_trait]
    impl Module for EchoModule {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn routes(&self) -> Router {
            Router::new().route("/", get(|| async { "echo" }))
        }

        fn openapi(&self) -> Option<serde_json::Value> {
            Some(serde_json::json!({
                "paths": {
                    "/": { "get": { "summary": "Echo" } },
                    "/{id}": { "get": { "summary": "Echo one" } }
                },
                "components": { "schemas": { "Echo": { "type": "string" } } }
            }))
        }
    }

    fn registry() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(EchoModule));
        registry
    }

    #[tokio::test]
    async fn test_module_mounting() {
        let router = RouterBuilder::new()
            .mount_module("/api/echo", EchoModule.routes())
            .build();

        let response = router
            .oneshot(axum::http::Request::builder().uri("/api/echo").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_middleware_chain_sets_request_id() {
        let router = RouterBuilder::new()
            .route("/health", get(|| async { "ok" }))
            .with_tracing()
            .with_cors()
            .with_request_id()
            .with_timeout(5000)
            .build();

        let response = router
            .oneshot(axum::http::Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    fn cors_router() -> Router {
        RouterBuilder::new()
            .route(
                "/things",
                get(|| async { "things" }).options(|| async {
                    ([(axum::http::header::ALLOW, "GET,OPTIONS")], "")
                }),
            )
            .route("/health", get(|| async { "ok" }))
            .with_cors()
            .build()
    }

    fn options_request(uri: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method(Method::OPTIONS)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn plain_options_reaches_its_handler() {
        let response = cors_router()
            .oneshot(options_request("/things"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ALLOW], "GET,OPTIONS");
        assert!(!response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn plain_options_without_handler_is_not_a_cors_success() {
        let response = cors_router()
            .oneshot(options_request("/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(!response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn preflight_is_answered_by_cors_layer() {
        let request = axum::http::Request::builder()
            .method(Method::OPTIONS)
            .uri("/health")
            .header(header::ORIGIN, "https://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();

        let response = cors_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(!response.headers().contains_key(header::ALLOW));
    }

    #[tokio::test]
    async fn simple_request_still_gets_cors_headers() {
        let request = axum::http::Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "https://example.com")
            .body(Body::empty())
            .unwrap();

        let response = cors_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[test]
    fn openapi_paths_are_prefixed_with_mount_path() {
        let spec = merged_openapi(&registry());
        let paths = spec["paths"].as_object().unwrap();

        assert!(paths.contains_key("/healthz"));
        assert!(paths.contains_key("/api/echo"));
        assert!(paths.contains_key("/api/echo/{id}"));
        assert!(!paths.contains_key("/api/echo/"));
        assert!(spec["components"]["schemas"]["Echo"].is_object());
        assert!(spec["components"]["schemas"]["ErrorResponse"].is_object());
    }
}
