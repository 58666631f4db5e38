use hearth::http::request::{Method, Request};
use std::collections::{BTreeMap, HashMap};

fn request(method: &str, params: &[(&str, &str)]) -> Request {
    let mut headers = HashMap::new();
    headers.insert("Host".to_string(), "example.com".to_string());
    headers.insert("Content-Type".to_string(), "application/json".to_string());

    Request {
        method: method.to_string(),
        path: "/".to_string(),
        version: "HTTP/1.1".to_string(),
        params: params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
        content_length: 0,
        chunked: false,
        headers,
        raw_headers: String::new(),
        raw: vec![],
        body: vec![],
    }
}

#[test]
fn test_method_from_str_implemented_set() {
    assert_eq!(Method::from_str("GET"), Some(Method::GET));
    assert_eq!(Method::from_str("POST"), Some(Method::POST));
    assert_eq!(Method::from_str("HEAD"), Some(Method::HEAD));
    assert_eq!(Method::from_str("TRACE"), Some(Method::TRACE));
}

#[test]
fn test_method_from_str_rejects_others() {
    for method in ["PUT", "DELETE", "OPTIONS", "PATCH", "get", ""] {
        assert_eq!(Method::from_str(method), None, "{method}");
    }
}

#[test]
fn test_method_as_str_round_trips() {
    for method in [Method::GET, Method::POST, Method::HEAD, Method::TRACE] {
        assert_eq!(Method::from_str(method.as_str()), Some(method));
    }
}

#[test]
fn test_request_header_retrieval() {
    let req = request("GET", &[]);

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_method_lookup() {
    assert_eq!(request("HEAD", &[]).method(), Some(Method::HEAD));
    assert_eq!(request("DELETE", &[]).method(), None);
}

#[test]
fn test_request_filled_params_skip_empty_values() {
    let req = request("POST", &[("a", "1"), ("b", ""), ("c", "3")]);

    let filled: Vec<_> = req.filled_params().collect();
    assert_eq!(filled, vec![("a", "1"), ("c", "3")]);
    assert!(req.has_param_values());
}

#[test]
fn test_request_all_params_empty() {
    assert!(!request("POST", &[("a", ""), ("b", "")]).has_param_values());
    assert!(!request("POST", &[]).has_param_values());
}
