//! Lesson endpoints.
//!
//! Lessons are created and updated with multipart bodies (text fields plus
//! repeated `images` file parts). The gateway sends the form as built.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use super::client::{segment, ApiClient, RequestOptions};
use super::envelope;
use super::error::ApiError;
use super::types::Lesson;

/// One image file attached to a lesson form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl ImageUpload {
    /// Read an image from disk, guessing the MIME type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let mime = path
            .extension()
            .and_then(|ext| image_mime(&ext.to_string_lossy()))
            .map(str::to_string);
        Ok(Self {
            file_name,
            bytes,
            mime,
        })
    }

    fn into_part(self) -> Result<Part, ApiError> {
        let part = Part::bytes(self.bytes).file_name(self.file_name.clone());
        match self.mime {
            Some(mime) => part.mime_str(&mime).map_err(|source| ApiError::Attachment {
                file_name: self.file_name,
                source,
            }),
            None => Ok(part),
        }
    }
}

fn image_mime(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Fields for a new lesson. Text fields are always sent (empty if blank).
#[derive(Debug, Clone, Default)]
pub struct LessonForm {
    pub title: String,
    pub description: String,
    pub content: String,
    pub category: String,
    pub order: Option<u32>,
    pub images: Vec<ImageUpload>,
}

impl LessonForm {
    pub fn into_multipart(self) -> Result<Form, ApiError> {
        let mut form = Form::new()
            .text("title", self.title)
            .text("description", self.description)
            .text("content", self.content)
            .text("category", self.category);
        if let Some(order) = self.order.filter(|o| *o != 0) {
            form = form.text("order", order.to_string());
        }
        for image in self.images {
            form = form.part("images", image.into_part()?);
        }
        Ok(form)
    }
}

/// Partial update: only non-empty fields are sent.
#[derive(Debug, Clone, Default)]
pub struct LessonPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub order: Option<u32>,
    pub images: Vec<ImageUpload>,
}

impl LessonPatch {
    pub fn into_multipart(self) -> Result<Form, ApiError> {
        let mut form = Form::new();
        let fields = [
            ("title", self.title),
            ("description", self.description),
            ("content", self.content),
            ("category", self.category),
        ];
        for (name, value) in fields {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                form = form.text(name, value);
            }
        }
        if let Some(order) = self.order {
            form = form.text("order", order.to_string());
        }
        for image in self.images {
            form = form.part("images", image.into_part()?);
        }
        Ok(form)
    }
}

pub struct Lessons<'a> {
    api: &'a ApiClient,
}

impl<'a> Lessons<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// GET /lessons, optionally only those of one instructor.
    pub async fn list(&self, instructor: Option<&str>) -> Result<Vec<Lesson>, ApiError> {
        let path = match instructor {
            Some(id) => format!("/lessons?instructor={}", segment(id)),
            None => "/lessons".to_string(),
        };
        let body = self.api.request(&path, RequestOptions::get()).await?;
        envelope::unwrap(body, "lessons")
    }

    pub async fn get(&self, id: &str) -> Result<Lesson, ApiError> {
        let path = format!("/lessons/{}", segment(id));
        let body = self.api.request(&path, RequestOptions::get()).await?;
        envelope::unwrap(body, "lesson")
    }

    /// POST /lessons with a pre-built multipart body.
    pub async fn create(&self, form: Form) -> Result<Lesson, ApiError> {
        let body = self
            .api
            .request("/lessons", RequestOptions::post().multipart(form))
            .await?;
        envelope::unwrap(body, "lesson")
    }

    /// PATCH /lessons/:id with a pre-built multipart body.
    pub async fn update(&self, id: &str, form: Form) -> Result<Lesson, ApiError> {
        let path = format!("/lessons/{}", segment(id));
        let body = self
            .api
            .request(&path, RequestOptions::patch().multipart(form))
            .await?;
        envelope::unwrap(body, "lesson")
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/lessons/{}", segment(id));
        self.api.request(&path, RequestOptions::delete()).await?;
        Ok(())
    }
}
