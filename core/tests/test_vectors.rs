//! Verify request lowering against JSON test vectors.
//!
//! # Design
//! Vectors live in `test-vectors/` at the workspace root so the expected
//! exchanges can be reviewed without reading Rust. Each case describes a
//! request model and the `HttpRequest` it must produce; no network is used.

use courier_core::config::DEFAULT_USER_AGENT;
use courier_core::{Connector, ConnectorConfig, HttpMethod, HttpRequest, ParamMap, Request, RequestBuilder};
use serde_json::Value;

fn pairs(value: &Value) -> ParamMap {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (arr[0].as_str().unwrap(), arr[1].as_str().unwrap())
        })
        .collect()
}

fn expected_body(value: &Value) -> Option<Vec<u8>> {
    value.as_str().map(|s| s.as_bytes().to_vec())
}

fn assert_common(name: &str, exchange: &HttpRequest, expected: &Value) {
    assert_eq!(
        exchange.method,
        HttpMethod::from(expected["method"].as_str().unwrap()),
        "{name}: method"
    );
    assert_eq!(exchange.url, expected["url"].as_str().unwrap(), "{name}: url");
    assert_eq!(exchange.body, expected_body(&expected["body"]), "{name}: body");
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

#[test]
fn builder_test_vectors() {
    let raw = include_str!("../../test-vectors/builder.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];

        let mut builder = RequestBuilder::new(input["url"].as_str().unwrap());
        builder.method = HttpMethod::from(input["method"].as_str().unwrap());
        builder.body(input["body"].as_str().unwrap());
        for pair in input["headers"].as_array().unwrap() {
            builder.header(pair[0].as_str().unwrap(), pair[1].as_str().unwrap());
        }

        let exchange = builder.exchange();
        let expected = &case["expected_exchange"];
        assert_common(name, &exchange, expected);

        if let Some(header) = expected["header"].as_array() {
            let key = header[0].as_str().unwrap();
            let matching: Vec<_> = exchange.headers.iter().filter(|(k, _)| k == key).collect();
            assert_eq!(matching.len(), 1, "{name}: header count");
            assert_eq!(matching[0].1, header[1].as_str().unwrap(), "{name}: header value");
        }
    }
}

// ---------------------------------------------------------------------------
// Connector
// ---------------------------------------------------------------------------

#[test]
fn connector_test_vectors() {
    let raw = include_str!("../../test-vectors/connector.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let connector = Connector::with_config(ConnectorConfig::default());

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];

        let mut request = Request::from_parts(
            input["url"].as_str().unwrap(),
            input["method"].as_str().unwrap(),
            pairs(&input["headers"]),
            pairs(&input["properties"]),
        );
        if let Some(body) = input["body"].as_str() {
            request = request.with_body(body);
        }

        let exchange = connector.exchange(&request);
        let expected = &case["expected_exchange"];
        assert_common(name, &exchange, expected);

        let user_agent = match expected["user_agent"].as_str().unwrap() {
            "default" => DEFAULT_USER_AGENT,
            custom => custom,
        };
        let agents: Vec<_> = exchange.headers.iter().filter(|(k, _)| k == "User-Agent").collect();
        assert_eq!(agents.len(), 1, "{name}: one user agent");
        assert_eq!(agents[0].1, user_agent, "{name}: user agent");
    }
}
