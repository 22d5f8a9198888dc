//! Upload operation of the media API client.
//!
//! Uploads are sent as a multipart form to `{prefix}/{resource_type}/upload`.
//! The payload goes in the `file` part: raw bytes for local content, plain
//! text for a URI the API fetches itself.

use async_trait::async_trait;
use mediamount_core::models::{EagerTransformation, UploadPayload, UploadRequest, UploadResult};
use mediamount_core::{MountError, MountResult, RemoteUploader};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;

use crate::ApiClient;

const DEFAULT_FILENAME: &str = "file";

/// Render eager versions as `directive/format` entries joined by `|`.
pub fn eager_field(eager: &[EagerTransformation]) -> String {
    eager
        .iter()
        .map(|e| match e.format {
            Some(ref format) => format!("{}/{}", e.transformation.to_directive(), format),
            None => e.transformation.to_directive(),
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Text fields of the upload form, in the order they are sent.
pub fn form_fields(request: &UploadRequest) -> MountResult<Vec<(&'static str, String)>> {
    let mut fields = Vec::new();

    if !request.transformation.is_empty() {
        fields.push((
            "transformation",
            serde_json::to_string(&request.transformation)?,
        ));
    }
    if let Some(ref format) = request.format {
        fields.push(("format", format.clone()));
    }
    if let Some(ref public_id) = request.public_id {
        fields.push(("public_id", public_id.clone()));
    }
    if let Some(ref tags) = request.tags {
        fields.push(("tags", tags.join(",")));
    }
    if let Some(ref eager) = request.eager {
        fields.push(("eager", eager_field(eager)));
    }
    fields.push(("type", request.storage_type.to_string()));
    fields.push(("resource_type", request.resource_type.to_string()));

    Ok(fields)
}

fn build_form(payload: UploadPayload, request: &UploadRequest) -> MountResult<Form> {
    let mut form = match payload {
        UploadPayload::File { filename, data } => Form::new().part(
            "file",
            Part::bytes(data.to_vec())
                .file_name(filename.unwrap_or_else(|| DEFAULT_FILENAME.to_string())),
        ),
        UploadPayload::Uri(uri) => Form::new().text("file", uri),
    };

    for (name, value) in form_fields(request)? {
        form = form.text(name, value);
    }

    Ok(form)
}

/// Extract the error message from an API error body.
///
/// Accepts `{"error": {"message": ...}}`, `{"error": "..."}` or plain text.
fn error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|json| {
        match json.get("error") {
            Some(Value::Object(error)) => error
                .get("message")
                .and_then(Value::as_str)
                .map(String::from),
            Some(Value::String(message)) => Some(message.clone()),
            _ => None,
        }
    });

    from_json
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        })
}

impl ApiClient {
    /// Upload a file or URI with the given parameters.
    #[tracing::instrument(skip(self, payload, request), fields(resource_type = %request.resource_type, public_id = ?request.public_id, size = payload.size_hint()))]
    pub async fn upload(
        &self,
        payload: UploadPayload,
        request: &UploadRequest,
    ) -> MountResult<UploadResult> {
        let path = format!("{}/{}/upload", self.api_prefix(), request.resource_type);
        let form = build_form(payload, request)?;

        let (status, body) = self.post_multipart(&path, form).await?;

        if !status.is_success() {
            let message = error_message(status, &body);
            tracing::warn!(status = status.as_u16(), message = %message, "Upload rejected by media API");
            if request.return_error {
                return Ok(UploadResult::failed(message, status.as_u16()));
            }
            return Err(MountError::upload(message, status.as_u16()));
        }

        let json: Value = serde_json::from_str(&body).map_err(|e| {
            MountError::Http(format!("Failed to parse response as JSON: {}", e))
        })?;
        let result = UploadResult::from_response(json);

        // Some deployments answer 200 with an error body.
        if let Some(ref error) = result.error {
            if !request.return_error {
                return Err(MountError::upload(error.message.clone(), error.http_code));
            }
        }

        tracing::info!(version = ?result.version, pages = ?result.pages, "Upload accepted by media API");
        Ok(result)
    }
}

#[async_trait]
impl RemoteUploader for ApiClient {
    async fn upload(
        &self,
        payload: UploadPayload,
        request: &UploadRequest,
    ) -> MountResult<UploadResult> {
        ApiClient::upload(self, payload, request).await
    }
}
