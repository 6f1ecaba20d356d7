//! Faces and the versioned face collection.
//!
//! A [`FaceCollection`] is an immutable snapshot: every edit (region update,
//! deletion, insertion) returns a new snapshot with a higher version, so a
//! renderer holding the previous snapshot never sees a half-applied change.

use crate::geometry::{PercentPoint, Region};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Opaque face identifier, unique within a session.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceId(String);

impl FaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FaceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FaceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Where a face region came from.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FaceSource {
    /// Found by the external detector.
    #[default]
    Detected,
    /// Added by hand as a default box and adjusted in the editor.
    Manual,
    /// Traced with the lasso; the polygon is in the photo's percentage space.
    Lasso { polygon: Vec<PercentPoint> },
}

impl FaceSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            FaceSource::Detected => SourceKind::Detected,
            FaceSource::Manual => SourceKind::Manual,
            FaceSource::Lasso { .. } => SourceKind::Lasso,
        }
    }

    pub fn polygon(&self) -> Option<&[PercentPoint]> {
        match self {
            FaceSource::Lasso { polygon } => Some(polygon),
            _ => None,
        }
    }
}

/// Serialized tag for [`FaceSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Detected,
    Manual,
    Lasso,
}

/// A face region on a specific photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FaceRecord", into = "FaceRecord")]
pub struct Face {
    pub face_id: FaceId,
    pub photo_url: String,
    pub region: Region,
    pub source: FaceSource,
}

impl Face {
    pub fn detected(
        face_id: impl Into<FaceId>,
        photo_url: impl Into<String>,
        region: Region,
    ) -> Self {
        Self {
            face_id: face_id.into(),
            photo_url: photo_url.into(),
            region,
            source: FaceSource::Detected,
        }
    }

    pub fn manual(
        face_id: impl Into<FaceId>,
        photo_url: impl Into<String>,
        region: Region,
    ) -> Self {
        Self {
            face_id: face_id.into(),
            photo_url: photo_url.into(),
            region,
            source: FaceSource::Manual,
        }
    }

    pub fn is_lasso(&self) -> bool {
        matches!(self.source, FaceSource::Lasso { .. })
    }
}

/// Stored shape of a face, shared with the detector and session records.
///
/// `coordinates` holds the region; lasso faces carry `selection` and the
/// `isCustom` flag. Records written without `source_kind` are classified
/// from those fields and the `manual-` id prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FaceRecord {
    face_id: FaceId,
    photo_url: String,
    coordinates: Region,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_kind: Option<SourceKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selection: Option<Vec<PercentPoint>>,
    #[serde(default, rename = "isCustom", skip_serializing_if = "std::ops::Not::not")]
    is_custom: bool,
}

impl From<FaceRecord> for Face {
    fn from(record: FaceRecord) -> Self {
        let source = match record.source_kind {
            Some(SourceKind::Lasso) => FaceSource::Lasso {
                polygon: record.selection.unwrap_or_default(),
            },
            Some(SourceKind::Manual) => FaceSource::Manual,
            Some(SourceKind::Detected) => FaceSource::Detected,
            None => match record.selection {
                Some(polygon) if record.is_custom => FaceSource::Lasso { polygon },
                _ if record.face_id.as_str().starts_with(MANUAL_PREFIX) => FaceSource::Manual,
                _ => FaceSource::Detected,
            },
        };

        Face {
            face_id: record.face_id,
            photo_url: record.photo_url,
            region: record.coordinates,
            source,
        }
    }
}

impl From<Face> for FaceRecord {
    fn from(face: Face) -> Self {
        let source_kind = Some(face.source.kind());
        let (selection, is_custom) = match face.source {
            FaceSource::Lasso { polygon } => (Some(polygon), true),
            _ => (None, false),
        };

        FaceRecord {
            face_id: face.face_id,
            photo_url: face.photo_url,
            coordinates: face.region,
            source_kind,
            selection,
            is_custom,
        }
    }
}

/// Id prefix for hand-added face boxes.
pub const MANUAL_PREFIX: &str = "manual-";

/// Id prefix for lasso selections.
pub const CUSTOM_PREFIX: &str = "custom-";

/// Immutable, versioned snapshot of all faces in a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceCollection {
    version: u64,
    faces: Arc<Vec<Face>>,
}

impl FaceCollection {
    pub fn new(faces: Vec<Face>) -> Self {
        Self {
            version: 0,
            faces: Arc::new(faces),
        }
    }

    /// Monotonic snapshot version; bumped by every successful edit.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn get(&self, face_id: &FaceId) -> Option<&Face> {
        self.faces.iter().find(|f| &f.face_id == face_id)
    }

    pub fn contains(&self, face_id: &FaceId) -> bool {
        self.get(face_id).is_some()
    }

    /// Faces on one photo, in collection order.
    pub fn for_photo<'a>(&'a self, photo_url: &'a str) -> impl Iterator<Item = &'a Face> + 'a {
        self.faces.iter().filter(move |f| f.photo_url == photo_url)
    }

    pub fn to_vec(&self) -> Vec<Face> {
        self.faces.as_ref().clone()
    }

    fn next(&self, faces: Vec<Face>) -> Self {
        log::debug!("face collection v{} -> v{}", self.version, self.version + 1);
        Self {
            version: self.version + 1,
            faces: Arc::new(faces),
        }
    }

    /// Replace the region of one face. Unknown ids leave the snapshot as is.
    pub fn with_region(&self, face_id: &FaceId, region: Region) -> Self {
        if !self.contains(face_id) {
            log::debug!("ignoring region update for unknown face {}", face_id);
            return self.clone();
        }

        let faces = self
            .faces
            .iter()
            .map(|f| {
                if &f.face_id == face_id {
                    Face {
                        region,
                        ..f.clone()
                    }
                } else {
                    f.clone()
                }
            })
            .collect();
        self.next(faces)
    }

    /// Remove one face. Unknown ids leave the snapshot as is.
    pub fn without(&self, face_id: &FaceId) -> Self {
        if !self.contains(face_id) {
            return self.clone();
        }
        let faces = self
            .faces
            .iter()
            .filter(|f| &f.face_id != face_id)
            .cloned()
            .collect();
        self.next(faces)
    }

    /// Append a face, replacing any existing face with the same id.
    pub fn with_face(&self, face: Face) -> Self {
        let mut faces: Vec<Face> = self
            .faces
            .iter()
            .filter(|f| f.face_id != face.face_id)
            .cloned()
            .collect();
        faces.push(face);
        self.next(faces)
    }

    /// Build an id `{prefix}{stamp}` that is not yet taken.
    ///
    /// `stamp` is typically a millisecond timestamp; on collision it is
    /// incremented until the id is free.
    pub fn unique_id(&self, prefix: &str, stamp: u64) -> FaceId {
        let mut n = stamp;
        loop {
            let candidate = FaceId::new(format!("{prefix}{n}"));
            if !self.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

impl From<Vec<Face>> for FaceCollection {
    fn from(faces: Vec<Face>) -> Self {
        Self::new(faces)
    }
}
