use thiserror::Error;

/// バックエンド（推論API）呼び出しのエラー
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("No text generated from the model.")]
    EmptyResponse,
}

/// OCR処理のエラー
///
/// 呼び出し側にはこの型だけを返す。メッセージはすべて "OCR Failed: " で始まる
#[derive(Error, Debug)]
pub enum OcrError {
    #[error("OCR Failed: could not read image: {0}")]
    Encode(String),

    #[error("OCR Failed: {0}")]
    Configuration(String),

    #[error("OCR Failed: {0}")]
    BackendUnavailable(String),

    #[error("OCR Failed: No text generated from the model.")]
    EmptyResponse,
}

impl From<BackendError> for OcrError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Configuration(msg) => OcrError::Configuration(msg),
            BackendError::Unavailable(msg) => OcrError::BackendUnavailable(msg),
            BackendError::EmptyResponse => OcrError::EmptyResponse,
        }
    }
}

impl From<omni_ocr_common::Error> for OcrError {
    fn from(err: omni_ocr_common::Error) -> Self {
        match err {
            omni_ocr_common::Error::Encode(msg) => OcrError::Encode(msg),
            other => OcrError::Configuration(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Unavailable(format!("request timed out: {}", err))
        } else if err.is_connect() {
            BackendError::Unavailable(format!("connection failed: {}", err))
        } else if err.is_builder() {
            BackendError::Configuration(format!("invalid request: {}", err))
        } else {
            BackendError::Unavailable(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, OcrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_messages_prefixed() {
        let errors = vec![
            OcrError::Encode("scan.png is empty".to_string()),
            OcrError::Configuration("API key is not set".to_string()),
            OcrError::BackendUnavailable("Ollama API Error: 500 Internal Server Error".to_string()),
            OcrError::EmptyResponse,
        ];

        for err in errors {
            let display = err.to_string();
            assert!(display.starts_with("OCR Failed: "), "接頭辞なし: {}", display);
        }
    }

    #[test]
    fn test_backend_error_mapping() {
        let err: OcrError = BackendError::Unavailable("503 Service Unavailable".into()).into();
        assert!(matches!(err, OcrError::BackendUnavailable(_)));
        assert_eq!(err.to_string(), "OCR Failed: 503 Service Unavailable");

        let err: OcrError = BackendError::EmptyResponse.into();
        assert!(matches!(err, OcrError::EmptyResponse));
        assert_eq!(err.to_string(), "OCR Failed: No text generated from the model.");

        let err: OcrError = BackendError::Configuration("missing key".into()).into();
        assert!(matches!(err, OcrError::Configuration(_)));
    }

    #[test]
    fn test_common_error_mapping() {
        let err: OcrError = omni_ocr_common::Error::Encode("scan.png is empty".into()).into();
        assert!(matches!(err, OcrError::Encode(_)));
        assert_eq!(err.to_string(), "OCR Failed: could not read image: scan.png is empty");

        let err: OcrError = omni_ocr_common::Error::Config("no prompt".into()).into();
        assert!(matches!(err, OcrError::Configuration(_)));
    }
}
