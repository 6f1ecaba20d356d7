//! Shared fixtures for unit tests.

use crate::error::{GroupshotError, Result};
use crate::face::{Face, FaceCollection, FaceSource};
use crate::geometry::{bounding_box, PercentPoint, Region};
use crate::session::{PhotoSession, SessionStore, SessionUpdate, UploadedPhoto};
use std::collections::HashMap;

pub fn detected(id: &str, photo: &str, region: Region) -> Face {
    Face::detected(id, photo, region)
}

pub fn lasso(id: &str, photo: &str, polygon: Vec<PercentPoint>) -> Face {
    Face {
        face_id: id.into(),
        photo_url: photo.to_string(),
        region: bounding_box(&polygon),
        source: FaceSource::Lasso { polygon },
    }
}

/// Three faces on `a.jpg` and the same three, nudged, on `b.jpg`.
pub fn three_face_session() -> FaceCollection {
    let mut faces = Vec::new();
    for photo in ["a.jpg", "b.jpg"] {
        let nudge = if photo == "a.jpg" { 0.0 } else { 2.0 };
        for i in 0..3 {
            let x = 10.0 + 30.0 * i as f64 + nudge;
            faces.push(detected(
                &format!("{}-face-{}", photo, i),
                photo,
                Region::new(x, 30.0 + nudge / 2.0, 15.0, 20.0),
            ));
        }
    }
    FaceCollection::new(faces)
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: HashMap<String, PhotoSession>,
}

impl MemoryStore {
    pub fn with_session(id: &str) -> Self {
        let mut store = Self::default();
        store.sessions.insert(
            id.to_string(),
            PhotoSession::new(
                id,
                "test",
                vec![
                    UploadedPhoto::new("a.jpg", "a.jpg"),
                    UploadedPhoto::new("b.jpg", "b.jpg"),
                ],
            ),
        );
        store
    }

    pub fn session(&self, id: &str) -> Option<&PhotoSession> {
        self.sessions.get(id)
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, session_id: &str) -> Result<PhotoSession> {
        self.sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| GroupshotError::SessionNotFound(session_id.to_string()))
    }

    fn update(&mut self, session_id: &str, update: SessionUpdate) -> Result<()> {
        let session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| GroupshotError::SessionNotFound(session_id.to_string()))?;
        session.apply(update);
        Ok(())
    }
}
