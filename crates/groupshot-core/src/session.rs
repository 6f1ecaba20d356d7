//! Stored session records and the persistence seam.
//!
//! A session moves through its stages by patching its record: each workflow
//! step builds a [`SessionUpdate`] holding only the fields it changes and
//! hands it to a [`SessionStore`].
//!
//! ```text
//! detecting_faces -> adjusting_boxes -> selecting_base -> face_selection
//!                                                              |
//!                               completed <- merging <---------+
//! ```

use crate::error::{GroupshotError, Result};
use crate::face::{Face, FaceCollection};
use crate::selection::SelectionBinding;
use serde::{Deserialize, Serialize};

/// Workflow stage of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    DetectingFaces,
    AdjustingBoxes,
    SelectingBase,
    FaceSelection,
    Merging,
    Completed,
}

/// One uploaded photo of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedPhoto {
    pub url: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub is_base: bool,
}

impl UploadedPhoto {
    pub fn new(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            is_base: false,
        }
    }
}

/// The persisted session record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhotoSession {
    pub id: String,
    #[serde(default)]
    pub session_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default)]
    pub uploaded_photos: Vec<UploadedPhoto>,
    #[serde(default)]
    pub detected_faces: Vec<Face>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_composition: Option<SelectionBinding>,
    #[serde(default)]
    pub status: SessionStatus,
}

/// Partial update of a [`PhotoSession`]; `None` fields are left alone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_photos: Option<Vec<UploadedPhoto>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_faces: Option<Vec<Face>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_composition: Option<SelectionBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SessionStatus>,
}

impl PhotoSession {
    pub fn new(
        id: impl Into<String>,
        session_name: impl Into<String>,
        photos: Vec<UploadedPhoto>,
    ) -> Self {
        Self {
            id: id.into(),
            session_name: session_name.into(),
            uploaded_photos: photos,
            ..Self::default()
        }
    }

    /// Merge a patch into the record.
    pub fn apply(&mut self, update: SessionUpdate) {
        if let Some(photos) = update.uploaded_photos {
            self.uploaded_photos = photos;
        }
        if let Some(faces) = update.detected_faces {
            self.detected_faces = faces;
        }
        if let Some(url) = update.base_photo_url {
            self.base_photo_url = Some(url);
        }
        if let Some(binding) = update.final_composition {
            self.final_composition = Some(binding);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }

    /// Stored faces as a fresh snapshot.
    pub fn faces(&self) -> FaceCollection {
        FaceCollection::new(self.detected_faces.clone())
    }

    pub fn photo_urls(&self) -> Vec<String> {
        self.uploaded_photos.iter().map(|p| p.url.clone()).collect()
    }

    /// The photo flagged as base, if one has been chosen.
    pub fn base_photo(&self) -> Option<&UploadedPhoto> {
        self.uploaded_photos.iter().find(|p| p.is_base)
    }

    /// Store detector output and hand over to box adjustment.
    pub fn record_detections(&self, faces: &FaceCollection) -> SessionUpdate {
        SessionUpdate {
            detected_faces: Some(faces.to_vec()),
            status: Some(SessionStatus::AdjustingBoxes),
            ..SessionUpdate::default()
        }
    }

    /// Store the adjusted faces and move on to picking a base photo.
    pub fn commit_faces(&self, faces: &FaceCollection) -> SessionUpdate {
        SessionUpdate {
            detected_faces: Some(faces.to_vec()),
            status: Some(SessionStatus::SelectingBase),
            ..SessionUpdate::default()
        }
    }

    /// Flag `photo_url` as the base photo and start face selection.
    pub fn choose_base(&self, photo_url: &str) -> Result<SessionUpdate> {
        if !self.uploaded_photos.iter().any(|p| p.url == photo_url) {
            return Err(GroupshotError::UnknownPhoto(photo_url.to_string()));
        }

        let photos = self
            .uploaded_photos
            .iter()
            .map(|p| UploadedPhoto {
                is_base: p.url == photo_url,
                ..p.clone()
            })
            .collect();

        Ok(SessionUpdate {
            uploaded_photos: Some(photos),
            base_photo_url: Some(photo_url.to_string()),
            status: Some(SessionStatus::FaceSelection),
            ..SessionUpdate::default()
        })
    }

    /// Mark a merged session done once its preview has been shown.
    ///
    /// Only a `merging` session completes; any other stage yields `None`.
    pub fn complete(&self) -> Option<SessionUpdate> {
        if self.status != SessionStatus::Merging {
            log::debug!("session {} not merging ({:?}), leaving status", self.id, self.status);
            return None;
        }
        Some(SessionUpdate {
            status: Some(SessionStatus::Completed),
            ..SessionUpdate::default()
        })
    }
}

/// Persistence collaborator for session records.
pub trait SessionStore {
    /// Load a session by id.
    fn get(&self, session_id: &str) -> Result<PhotoSession>;

    /// Patch a stored session. Unknown ids fail with `SessionNotFound`.
    fn update(&mut self, session_id: &str, update: SessionUpdate) -> Result<()>;
}
