use axum::{
    extract::{Path, Query},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri},
    routing::{any, delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

pub type Pairs = Vec<(String, String)>;

pub fn app() -> Router {
    Router::new()
        .route("/get", get(echo))
        .route("/post", post(echo))
        .route("/put", put(echo))
        .route("/delete", delete(echo))
        .route("/anything", any(echo))
        .route("/status/{code}", any(status))
        .route("/response-headers", get(response_headers))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Reflect the request back as JSON: method, target, query args, headers and
/// the raw body.
async fn echo(
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(args): Query<Pairs>,
    body: String,
) -> Json<Value> {
    log::debug!("echo {method} {uri}");
    Json(json!({
        "method": method.as_str(),
        "url": uri.to_string(),
        "args": pairs_to_object(args),
        "headers": headers_to_object(&headers),
        "data": body,
    }))
}

async fn status(Path(code): Path<u16>) -> StatusCode {
    match StatusCode::from_u16(code) {
        Ok(status) if code >= 200 => status,
        _ => StatusCode::BAD_REQUEST,
    }
}

/// Send every query pair back as a response header. Repeated keys become
/// multi-valued headers.
async fn response_headers(Query(pairs): Query<Pairs>) -> Result<(HeaderMap, Json<Value>), StatusCode> {
    let mut headers = HeaderMap::new();
    for (name, value) in &pairs {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| StatusCode::BAD_REQUEST)?;
        let value = HeaderValue::from_str(value).map_err(|_| StatusCode::BAD_REQUEST)?;
        headers.append(name, value);
    }
    Ok((headers, Json(pairs_to_object(pairs))))
}

/// Later pairs overwrite earlier ones with the same key.
pub fn pairs_to_object(pairs: Pairs) -> Value {
    let mut object = Map::new();
    for (key, value) in pairs {
        object.insert(key, Value::String(value));
    }
    Value::Object(object)
}

/// Header names are title-cased (`my-test-header` -> `My-Test-Header`);
/// repeated headers are joined with `,`.
pub fn headers_to_object(headers: &HeaderMap) -> Value {
    let mut object = Map::new();
    for name in headers.keys() {
        let joined = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        object.insert(title_case(name.as_str()), Value::String(joined));
    }
    Value::Object(object)
}

pub fn title_case(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_capitalizes_each_segment() {
        assert_eq!(title_case("my-test-header"), "My-Test-Header");
        assert_eq!(title_case("accept"), "Accept");
        assert_eq!(title_case("x--double"), "X--Double");
    }

    #[test]
    fn pairs_to_object_keeps_last_value() {
        let object = pairs_to_object(vec![
            ("a".to_string(), "1".to_string()),
            ("a".to_string(), "2".to_string()),
            ("b".to_string(), "3".to_string()),
        ]);
        assert_eq!(object, json!({"a": "2", "b": "3"}));
    }

    #[test]
    fn headers_to_object_joins_repeats() {
        let mut headers = HeaderMap::new();
        headers.append("x-tag", HeaderValue::from_static("a"));
        headers.append("x-tag", HeaderValue::from_static("b"));
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let object = headers_to_object(&headers);
        assert_eq!(object["X-Tag"], "a,b");
        assert_eq!(object["Accept"], "application/json");
    }
}
