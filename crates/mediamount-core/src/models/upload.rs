//! Upload request and result models exchanged with the media API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use super::Transformation;
use crate::constants::DEFAULT_RESOURCE_TYPE;

/// Delivery type of the stored asset on the media API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    #[default]
    Upload,
    Private,
    Authenticated,
}

impl Display for StorageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageType::Upload => write!(f, "upload"),
            StorageType::Private => write!(f, "private"),
            StorageType::Authenticated => write!(f, "authenticated"),
        }
    }
}

impl FromStr for StorageType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upload" => Ok(StorageType::Upload),
            "private" => Ok(StorageType::Private),
            "authenticated" => Ok(StorageType::Authenticated),
            _ => Err(anyhow::anyhow!("Invalid storage type: {}", s)),
        }
    }
}

/// Kind of resource the media API should treat the payload as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// Let the API detect the type from the content
    #[default]
    Auto,
    Image,
    Video,
    Raw,
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ResourceType::Auto => write!(f, "{}", DEFAULT_RESOURCE_TYPE),
            ResourceType::Image => write!(f, "image"),
            ResourceType::Video => write!(f, "video"),
            ResourceType::Raw => write!(f, "raw"),
        }
    }
}

/// A version generated by the API at upload time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EagerTransformation {
    pub transformation: Transformation,
    pub format: Option<String>,
}

/// Parameters of one upload call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRequest {
    pub transformation: Transformation,
    pub format: Option<String>,
    pub public_id: Option<String>,
    pub tags: Option<Vec<String>>,
    /// `None` when no version is marked eager.
    pub eager: Option<Vec<EagerTransformation>>,
    pub storage_type: StorageType,
    pub resource_type: ResourceType,
    /// Ask the client to report API failures inside the result instead of failing the call.
    pub return_error: bool,
}

/// Error payload reported by the media API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadErrorPayload {
    pub message: String,
    pub http_code: u16,
}

/// Response of an upload call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    pub version: Option<String>,
    pub pages: Option<i64>,
    pub public_id: Option<String>,
    pub format: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    /// Full response body as returned by the API.
    pub metadata: Value,
    pub error: Option<UploadErrorPayload>,
}

impl UploadResult {
    /// Interpret a successful JSON response body.
    ///
    /// `version` may be reported as a number or a string; both are kept as text.
    pub fn from_response(body: Value) -> Self {
        let version = match body.get("version") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        let pages = body.get("pages").and_then(Value::as_i64);
        let public_id = body
            .get("public_id")
            .and_then(Value::as_str)
            .map(String::from);
        let format = body.get("format").and_then(Value::as_str).map(String::from);
        let created_at = body
            .get("created_at")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));
        let error = match body.get("error") {
            None | Some(Value::Null) => None,
            Some(Value::String(message)) => Some(UploadErrorPayload {
                message: message.clone(),
                http_code: 0,
            }),
            Some(e) => Some(UploadErrorPayload {
                message: e
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                http_code: e
                    .get("http_code")
                    .and_then(Value::as_u64)
                    .and_then(|c| u16::try_from(c).ok())
                    .unwrap_or(0),
            }),
        };

        Self {
            version,
            pages,
            public_id,
            format,
            created_at,
            metadata: body,
            error,
        }
    }

    /// A result carrying only an error, as produced for `return_error` requests.
    pub fn failed(message: impl Into<String>, http_code: u16) -> Self {
        let message = message.into();
        Self {
            version: None,
            pages: None,
            public_id: None,
            format: None,
            created_at: None,
            metadata: serde_json::json!({
                "error": { "message": message.clone(), "http_code": http_code }
            }),
            error: Some(UploadErrorPayload { message, http_code }),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
