//! Multipart request construction
//!
//! A `MultipartPayload` is the host-independent form of the body an
//! advanced upload sends: the form's serialized fields in document order,
//! with at most one file per field name once a dropped file is set.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue<F> {
    Text(String),
    File(F),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPayload<F> {
    parts: Vec<(String, FormValue<F>)>,
}

impl<F> Default for MultipartPayload<F> {
    fn default() -> Self {
        Self { parts: Vec::new() }
    }
}

impl<F> MultipartPayload<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push((name.into(), FormValue::Text(value.into())));
    }

    pub fn append_file(&mut self, name: impl Into<String>, file: F) {
        self.parts.push((name.into(), FormValue::File(file)));
    }

    /// Replace every entry named `name` with a single file entry
    pub fn set_file(&mut self, name: impl Into<String>, file: F) {
        let name = name.into();
        self.parts.retain(|(existing, _)| *existing != name);
        self.parts.push((name, FormValue::File(file)));
    }

    pub fn get(&self, name: &str) -> Option<&FormValue<F>> {
        self.parts
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn get_all(&self, name: &str) -> Vec<&FormValue<F>> {
        self.parts
            .iter()
            .filter(|(existing, _)| existing == name)
            .map(|(_, value)| value)
            .collect()
    }

    pub fn parts(&self) -> &[(String, FormValue<F>)] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<(String, FormValue<F>)> {
        self.parts
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &F)> {
        self.parts.iter().filter_map(|(name, value)| match value {
            FormValue::File(file) => Some((name.as_str(), file)),
            FormValue::Text(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Parse a form `method` attribute
    ///
    /// Case-insensitive. Missing or unknown values fall back to GET, as a
    /// form without a valid method does.
    pub fn parse(method: &str) -> Self {
        match method.trim().to_ascii_uppercase().as_str() {
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "PATCH" => HttpMethod::Patch,
            "DELETE" => HttpMethod::Delete,
            _ => HttpMethod::Get,
        }
    }

    /// Whether `fetch` accepts a request body for this method
    pub fn allows_body(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An advanced-mode request: the form's action and method plus the body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartRequest<F> {
    pub url: String,
    pub method: HttpMethod,
    pub payload: MultipartPayload<F>,
}

impl<F> MultipartRequest<F> {
    pub fn new(url: impl Into<String>, method: HttpMethod, payload: MultipartPayload<F>) -> Self {
        Self {
            url: url.into(),
            method,
            payload,
        }
    }
}
