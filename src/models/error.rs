use serde::Serialize;

/// JSON body returned for failed requests.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_nested_error_object() {
        let body = ErrorBody::new("invalid", "bad record");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["error"]["code"], "invalid");
        assert_eq!(json["error"]["message"], "bad record");
    }
}
