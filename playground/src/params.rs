//! Request body for the `/exec` endpoint

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecRequest {
    /// Raw command line from the browser. Untrusted.
    ///
    /// Missing or non-string values decode to the empty string.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub cmd: String,
}

impl ExecRequest {
    /// Decode a request body, falling back to an empty command
    ///
    /// The body must be a JSON object; anything else (empty, malformed,
    /// arrays, scalars) yields the default request, which the guard rejects.
    pub fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }

        match serde_json::from_slice::<Map<String, Value>>(body) {
            Ok(object) => serde_json::from_value(Value::Object(object)).unwrap_or_default(),
            Err(e) => {
                tracing::debug!("Ignoring undecodable exec body: {}", e);
                Self::default()
            }
        }
    }
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_cmd() {
        let req = ExecRequest::from_body(br#"{"cmd": "uv --version"}"#);
        assert_eq!(req.cmd, "uv --version");
    }

    #[test]
    fn test_empty_body_is_empty_cmd() {
        assert_eq!(ExecRequest::from_body(b""), ExecRequest::default());
    }

    #[test]
    fn test_malformed_and_non_object_bodies() {
        let bodies: [&[u8]; 5] = [b"{not json", b"[\"ls /\"]", b"\"ls /\"", b"42", b"null"];
        for body in bodies {
            assert_eq!(ExecRequest::from_body(body).cmd, "", "body: {:?}", body);
        }
    }

    #[test]
    fn test_missing_or_mistyped_cmd() {
        assert_eq!(ExecRequest::from_body(b"{}").cmd, "");
        assert_eq!(ExecRequest::from_body(br#"{"cmd": 7}"#).cmd, "");
        assert_eq!(ExecRequest::from_body(br#"{"cmd": null}"#).cmd, "");
        assert_eq!(ExecRequest::from_body(br#"{"cmd": ["ls", "/"]}"#).cmd, "");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let req = ExecRequest::from_body(br#"{"cmd": "ls /", "cwd": "/etc"}"#);
        assert_eq!(req.cmd, "ls /");
    }
}
