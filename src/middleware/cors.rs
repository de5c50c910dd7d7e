//! CORS for browser clients of the MyGram API.
//!
//! - preflight answers are cacheable for a day
//! - methods and request headers follow the web client's needs (`UPDATE` included)
//! - development: any origin, no credentials
//! - production: only `CORS_ALLOWED_ORIGINS`, with credentials

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(86_400);

const ALLOWED_METHODS: [&str; 5] = ["POST", "GET", "PUT", "DELETE", "UPDATE"];

fn allowed_headers() -> [HeaderName; 6] {
    [
        header::CONTENT_TYPE,
        header::CONTENT_LENGTH,
        header::ACCEPT_ENCODING,
        HeaderName::from_static("x-csrf-token"),
        header::AUTHORIZATION,
        HeaderName::from_static("x-max"),
    ]
}

pub fn apply(router: Router, config: &Config) -> Router {
    let methods: Vec<Method> = ALLOWED_METHODS
        .iter()
        .filter_map(|m| Method::from_bytes(m.as_bytes()).ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_methods(methods)
        .allow_headers(allowed_headers())
        .max_age(PREFLIGHT_MAX_AGE);

    // wildcard origin cannot carry credentials
    let cors = if config.app_env.is_production() {
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        cors.allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _req| {
            allowed.iter().any(|v| v == origin)
        }))
        .allow_credentials(true)
    } else {
        cors.allow_origin(Any)
    };

    router.layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, Response, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    fn config(vars: &[(&'static str, &'static str)]) -> Config {
        let vars = vars.to_vec();
        Config::from_lookup(
            move |key| {
                vars.iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, v)| v.to_string())
            },
            None,
        )
        .unwrap()
    }

    async fn preflight(config: &Config, origin: &str) -> Response<Body> {
        let router = apply(Router::new().route("/photos", get(|| async { "ok" })), config);
        router
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/photos")
                    .header(header::ORIGIN, origin)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    fn listed(res: &Response<Body>, name: HeaderName) -> Vec<String> {
        res.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }

    const DEVELOPMENT: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/mygram"),
        ("JWT_SECRET", "secret"),
    ];

    #[tokio::test]
    async fn preflight_advertises_methods_headers_and_max_age() {
        let res = preflight(&config(&DEVELOPMENT), "http://localhost:3000").await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(res.headers()[header::ACCESS_CONTROL_MAX_AGE], "86400");
        assert!(res.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());

        assert_eq!(
            listed(&res, header::ACCESS_CONTROL_ALLOW_METHODS),
            ["post", "get", "put", "delete", "update"]
        );
        assert_eq!(
            listed(&res, header::ACCESS_CONTROL_ALLOW_HEADERS),
            [
                "content-type",
                "content-length",
                "accept-encoding",
                "x-csrf-token",
                "authorization",
                "x-max"
            ]
        );
    }

    #[tokio::test]
    async fn production_allows_only_listed_origins_with_credentials() {
        let mut vars = DEVELOPMENT.to_vec();
        vars.push(("APP_ENV", "production"));
        vars.push(("CORS_ALLOWED_ORIGINS", "https://mygram.example"));
        let config = config(&vars);

        let res = preflight(&config, "https://mygram.example").await;
        assert_eq!(
            res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://mygram.example"
        );
        assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");

        let res = preflight(&config, "https://elsewhere.example").await;
        assert!(res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
