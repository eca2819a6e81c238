pub mod chat;
pub mod error;
pub mod render;
pub mod report;
pub mod request;
pub mod upload;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use error::{ExportError, FetchError, ValidationError};
pub use request::{Generation, RequestTag};

/// Body returned by the classification endpoint.
///
/// Missing fields decode as empty strings and render as blank.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PredictResponse {
    #[serde(default)]
    pub prediction: String,
    #[serde(default)]
    pub info: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: String,
}

// Multipart field names understood by the classifier.
pub const FILE_FIELD: &str = "file";
pub const URL_FIELD: &str = "url";

/// Sorts a completed HTTP exchange into a decoded body or a [`FetchError`].
/// Any status outside 2xx is a rejection whatever the body says.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::ServerRejected { status, body: body.to_string() });
    }
    serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_status_decodes_body() {
        let body: PredictResponse =
            decode_response(200, r#"{"prediction":"Early Blight","info":"Fungal"}"#).unwrap();
        assert_eq!(body.prediction, "Early Blight");
        assert_eq!(body.info, "Fungal");

        let reply: ChatResponse = decode_response(201, r#"{"response":"hi"}"#).unwrap();
        assert_eq!(reply.response, "hi");
    }

    #[test]
    fn non_success_status_is_rejection_even_with_valid_json() {
        for status in [199, 300, 404, 500, 503] {
            let err = decode_response::<PredictResponse>(status, r#"{"prediction":"x"}"#).unwrap_err();
            assert_eq!(err, FetchError::ServerRejected { status, body: r#"{"prediction":"x"}"#.into() });
        }
    }

    #[test]
    fn undecodable_success_body_is_malformed() {
        for body in ["", "<html>oops</html>", r#"{"prediction": 3}"#, "null"] {
            let err = decode_response::<PredictResponse>(200, body).unwrap_err();
            assert!(matches!(err, FetchError::Malformed(_)), "{body:?} gave {err:?}");
        }
    }

    #[test]
    fn predict_response_tolerates_missing_fields() {
        let body: PredictResponse = serde_json::from_str(r#"{"prediction":"Late Blight"}"#).unwrap();
        assert_eq!(body.prediction, "Late Blight");
        assert_eq!(body.info, "");

        let empty: PredictResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, PredictResponse::default());
    }

    #[test]
    fn chat_request_serializes_message_field() {
        let body = serde_json::to_string(&ChatRequest { message: "hi".into() }).unwrap();
        assert_eq!(body, r#"{"message":"hi"}"#);
    }
}
