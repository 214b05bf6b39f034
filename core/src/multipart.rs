//! Multipart form payloads as plain data.
//!
//! `reqwest::multipart::Form` is neither `Clone` nor comparable, so routes
//! describe uploads with [`MultipartForm`] and the request converts it into a
//! transport form only when it is invoked.

use reqwest::multipart::{Form, Part};

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// An ordered multipart form. Setting a field that already exists replaces it
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Add a file field. The MIME type is guessed from `file_name`.
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        self.set(FormPart::File {
            name: name.into(),
            file_name,
            mime,
            bytes: bytes.into(),
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn get(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|p| p.name() == name)
    }

    fn set(&mut self, part: FormPart) {
        match self.parts.iter_mut().find(|p| p.name() == part.name()) {
            Some(existing) => *existing = part,
            None => self.parts.push(part),
        }
    }

    pub(crate) fn to_form(&self) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for part in &self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
                FormPart::File {
                    name,
                    file_name,
                    mime,
                    bytes,
                } => {
                    let file_part = Part::bytes(bytes.clone())
                        .file_name(file_name.clone())
                        .mime_str(mime)
                        .map_err(|e| ApiError::InvalidMultipart(e.to_string()))?;
                    form.part(name.clone(), file_part)
                }
            };
        }
        Ok(form)
    }
}
