//! Per-face replacement choices across the session's photos.
//!
//! Faces on the chosen base photo are the destinations. Each destination is
//! bound to the face that should be drawn in its place, starting with
//! itself. A destination is "replaced" once its bound face has a different
//! id.

use crate::error::{GroupshotError, Result};
use crate::face::{Face, FaceCollection, FaceId};
use crate::session::{SessionStatus, SessionStore, SessionUpdate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Id prefix for fallback crops offered on photos with no matching face.
pub const CROP_PREFIX: &str = "crop-";

/// Destination face id to the face drawn in its place.
///
/// Serialized as a plain map so stored sessions read it verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionBinding(BTreeMap<FaceId, Face>);

impl SelectionBinding {
    /// Bind every face to itself.
    pub fn identity<'a>(faces: impl IntoIterator<Item = &'a Face>) -> Self {
        Self(
            faces
                .into_iter()
                .map(|f| (f.face_id.clone(), f.clone()))
                .collect(),
        )
    }

    pub fn get(&self, dest: &FaceId) -> Option<&Face> {
        self.0.get(dest)
    }

    pub fn contains(&self, dest: &FaceId) -> bool {
        self.0.contains_key(dest)
    }

    /// Overwrite the binding for an existing destination.
    ///
    /// Returns false, leaving the map untouched, when `dest` has no entry.
    pub fn bind(&mut self, dest: &FaceId, face: Face) -> bool {
        match self.0.get_mut(dest) {
            Some(slot) => {
                *slot = face;
                true
            }
            None => false,
        }
    }

    pub fn is_replaced(&self, dest: &FaceId) -> bool {
        self.0
            .get(dest)
            .is_some_and(|bound| bound.face_id != *dest)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FaceId, &Face)> {
        self.0.iter()
    }

    /// Destinations whose bound face differs from themselves.
    pub fn replaced(&self) -> impl Iterator<Item = (&FaceId, &Face)> {
        self.0.iter().filter(|(dest, bound)| bound.face_id != **dest)
    }
}

/// Drives replacement picking for one base photo.
#[derive(Debug, Clone)]
pub struct SelectionController {
    base_photo_url: String,
    base_faces: Vec<Face>,
    other_faces: Vec<Face>,
    binding: SelectionBinding,
}

impl SelectionController {
    /// Partition `faces` by `base_photo_url` and bind each base face to itself.
    pub fn new(faces: &FaceCollection, base_photo_url: impl Into<String>) -> Self {
        let base_photo_url = base_photo_url.into();
        let (base_faces, other_faces): (Vec<Face>, Vec<Face>) = faces
            .faces()
            .iter()
            .cloned()
            .partition(|f| f.photo_url == base_photo_url);
        let binding = SelectionBinding::identity(&base_faces);

        log::debug!(
            "selection on {}: {} base faces, {} others",
            base_photo_url,
            base_faces.len(),
            other_faces.len()
        );

        Self {
            base_photo_url,
            base_faces,
            other_faces,
            binding,
        }
    }

    pub fn base_photo_url(&self) -> &str {
        &self.base_photo_url
    }

    pub fn base_faces(&self) -> &[Face] {
        &self.base_faces
    }

    pub fn other_faces(&self) -> &[Face] {
        &self.other_faces
    }

    pub fn binding(&self) -> &SelectionBinding {
        &self.binding
    }

    /// Bind `candidate` in place of the base face `base_id`.
    ///
    /// Unknown ids are ignored. Returns whether the binding changed.
    pub fn select_replacement(&mut self, base_id: &FaceId, candidate: Face) -> bool {
        let candidate_id = candidate.face_id.clone();
        if self.binding.bind(base_id, candidate) {
            log::debug!("bound {} -> {}", base_id, candidate_id);
            true
        } else {
            log::debug!("ignoring replacement for unknown base face {}", base_id);
            false
        }
    }

    pub fn is_replaced(&self, face_id: &FaceId) -> bool {
        self.binding.is_replaced(face_id)
    }

    /// Face currently bound to `base_id`.
    pub fn binding_for(&self, base_id: &FaceId) -> Result<&Face> {
        self.binding
            .get(base_id)
            .ok_or_else(|| GroupshotError::BindingNotFound(base_id.to_string()))
    }

    pub fn replaced_count(&self) -> usize {
        self.binding.replaced().count()
    }

    /// Replacement candidates for `base_id`, one per other photo.
    ///
    /// For each distinct photo in `photo_urls` other than the base photo,
    /// the face on that photo overlapping the base face the most is offered.
    /// A photo with no overlapping face offers a manual crop at the base
    /// face's region instead.
    pub fn candidates_for(&self, base_id: &FaceId, photo_urls: &[String]) -> Result<Vec<Face>> {
        let base = self
            .base_faces
            .iter()
            .find(|f| f.face_id == *base_id)
            .ok_or_else(|| GroupshotError::BindingNotFound(base_id.to_string()))?;

        let mut seen: Vec<&str> = Vec::new();
        let mut candidates = Vec::new();
        for url in photo_urls {
            if *url == self.base_photo_url || seen.contains(&url.as_str()) {
                continue;
            }
            seen.push(url.as_str());

            let best = self
                .other_faces
                .iter()
                .filter(|f| f.photo_url == *url)
                .map(|f| (f, f.region.iou(&base.region)))
                .filter(|(_, iou)| *iou > 0.0)
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(f, _)| f.clone());

            let candidate = best.unwrap_or_else(|| {
                Face::manual(
                    format!("{}{}-{}", CROP_PREFIX, base.face_id, seen.len() - 1),
                    url.clone(),
                    base.region,
                )
            });
            candidates.push(candidate);
        }

        Ok(candidates)
    }

    /// Write the binding to the session and move it to `merging`.
    pub fn finalize<S: SessionStore + ?Sized>(
        &self,
        store: &mut S,
        session_id: &str,
    ) -> Result<SelectionBinding> {
        let update = SessionUpdate {
            final_composition: Some(self.binding.clone()),
            status: Some(SessionStatus::Merging),
            ..SessionUpdate::default()
        };
        store.update(session_id, update)?;

        log::info!(
            "session {} finalized with {} of {} faces replaced",
            session_id,
            self.replaced_count(),
            self.binding.len()
        );
        Ok(self.binding.clone())
    }
}
