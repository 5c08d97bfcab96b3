use figura_config::{AnyOrArray, CorsConfig};
use http::{HeaderName, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build a Tower CORS layer from configuration
///
/// With credentials enabled a wildcard cannot be sent literally, so each
/// wildcard list is answered with the value the request asked for.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mirror = config.credentials;

    let mut layer = CorsLayer::new()
        .allow_origin(origins(&config.origins, mirror))
        .allow_methods(methods(&config.methods, mirror))
        .allow_headers(headers(&config.headers, mirror))
        .allow_credentials(config.credentials);

    if let Some(duration) = config.max_age_duration() {
        layer = layer.max_age(duration);
    }

    layer
}

fn origins(origins: &AnyOrArray, mirror: bool) -> AllowOrigin {
    match origins {
        AnyOrArray::Any if mirror => AllowOrigin::mirror_request(),
        AnyOrArray::Any => AllowOrigin::any(),
        AnyOrArray::List(list) => AllowOrigin::list(list.iter().filter_map(|o| o.parse().ok())),
    }
}

fn methods(methods: &AnyOrArray, mirror: bool) -> AllowMethods {
    match methods {
        AnyOrArray::Any if mirror => AllowMethods::mirror_request(),
        AnyOrArray::Any => AllowMethods::any(),
        AnyOrArray::List(list) => AllowMethods::list(list.iter().filter_map(|m| m.parse::<Method>().ok())),
    }
}

fn headers(headers: &AnyOrArray, mirror: bool) -> AllowHeaders {
    match headers {
        AnyOrArray::Any if mirror => AllowHeaders::mirror_request(),
        AnyOrArray::Any => AllowHeaders::any(),
        AnyOrArray::List(list) => AllowHeaders::list(list.iter().filter_map(|h| h.parse::<HeaderName>().ok())),
    }
}
