//! Inbound parameter extraction.
//!
//! GET parameters come from the query string. POST parameters come from a
//! form body when the request is form-encoded, otherwise from a JSON object.
//! A body that is neither yields empty parameters rather than an error.
use actix_web::{http::Method, HttpRequest};
use log::warn;
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::models::{HttpMethod, Parameters, PayloadEncoding};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Method, parameters and body encoding of an inbound relay request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundParameters {
    pub method: HttpMethod,
    pub parameters: Parameters,
    pub encoding: PayloadEncoding,
}

pub fn extract(req: &HttpRequest, body: &[u8]) -> InboundParameters {
    if req.method() == Method::POST {
        let content_type = req
            .headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        let (parameters, encoding) = body_parameters(content_type, body);
        InboundParameters {
            method: HttpMethod::Post,
            parameters,
            encoding,
        }
    } else {
        InboundParameters {
            method: HttpMethod::Get,
            parameters: query_parameters(req.query_string()),
            encoding: PayloadEncoding::default(),
        }
    }
}

/// Decodes a query string. The first occurrence of a repeated key wins.
pub fn query_parameters(query_string: &str) -> Parameters {
    first_wins(form_urlencoded::parse(query_string.as_bytes()).into_owned())
}

pub fn body_parameters(content_type: &str, body: &[u8]) -> (Parameters, PayloadEncoding) {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if mime == FORM_CONTENT_TYPE {
        let parameters = first_wins(form_urlencoded::parse(body).into_owned());
        if !parameters.is_empty() {
            return (parameters, PayloadEncoding::Form);
        }
    }

    let fallback_encoding = if mime.ends_with("json") {
        PayloadEncoding::Json
    } else {
        PayloadEncoding::Form
    };

    if body.iter().all(u8::is_ascii_whitespace) {
        return (Parameters::new(), fallback_encoding);
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => (flatten_json_object(map), PayloadEncoding::Json),
        Ok(other) => {
            warn!(
                "Ignoring JSON body that is not an object (found {}); relaying without parameters",
                json_type_name(&other)
            );
            (Parameters::new(), PayloadEncoding::Json)
        }
        Err(e) => {
            warn!(
                "Request body is neither form data nor JSON ({}); relaying without parameters",
                e
            );
            (Parameters::new(), fallback_encoding)
        }
    }
}

/// Strings are kept verbatim, scalars use their JSON text, `null` is dropped
/// and nested values are re-serialized.
pub fn flatten_json_object(map: Map<String, Value>) -> Parameters {
    map.into_iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                nested @ (Value::Array(_) | Value::Object(_)) => nested.to_string(),
            };
            Some((key, text))
        })
        .collect()
}

fn first_wins(pairs: impl Iterator<Item = (String, String)>) -> Parameters {
    let mut parameters = Parameters::new();
    for (key, value) in pairs {
        parameters.entry(key).or_insert(value);
    }
    parameters
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
