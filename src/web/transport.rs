//! Multipart requests over `fetch`

use crate::error::{Result, UploadError};
use crate::upload::payload::{FormValue, HttpMethod, MultipartPayload, MultipartRequest};
use crate::web::host::WebFile;
use crate::web::js_error;
use gloo_net::http::{Method, RequestBuilder};
use serde_json::Value;
use web_sys::FormData;

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn to_form_data(payload: MultipartPayload<WebFile>) -> Result<FormData> {
    let form_data = FormData::new().map_err(js_error("create form data"))?;
    for (name, value) in payload.into_parts() {
        match value {
            FormValue::Text(text) => form_data
                .append_with_str(&name, &text)
                .map_err(js_error("append form field"))?,
            FormValue::File(WebFile(file)) => form_data
                .append_with_blob_and_filename(&name, &file, &file.name())
                .map_err(js_error("append form file"))?,
        }
    }
    Ok(form_data)
}

/// Send the request and parse the response body as JSON
///
/// Non-2xx statuses and unparseable bodies count as transport failures.
pub async fn send_multipart(request: MultipartRequest<WebFile>) -> Result<Value> {
    let MultipartRequest {
        url,
        method: http_method,
        payload,
    } = request;

    let builder = RequestBuilder::new(&url).method(method(http_method));
    let request = if http_method.allows_body() {
        builder.body(to_form_data(payload)?)
    } else {
        log::warn!(
            "GET {} cannot carry a body, dropping {} form field(s)",
            url,
            payload.len()
        );
        builder.build()
    }
    .map_err(|e| UploadError::transport(e.to_string()))?;

    let response = request
        .send()
        .await
        .map_err(|e| UploadError::transport(e.to_string()))?;

    if !response.ok() {
        return Err(UploadError::transport(format!(
            "{} {} responded with status {}",
            http_method,
            url,
            response.status()
        )));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| UploadError::transport(format!("Invalid JSON response: {}", e)))
}
