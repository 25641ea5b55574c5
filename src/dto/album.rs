//! Album record shaping
//!
//! An album's `artist` field is the messiest part of the catalog data: it
//! can be a populated artist sub-document, an unresolved reference (object
//! id or plain string), explicitly null, or absent entirely. [`ArtistRef`]
//! names those cases; the DTO conversion pattern-matches them into a
//! display name plus an opaque artist id.

use bson::oid::ObjectId;
use bson::{Bson, Document};
use serde::{Deserialize, Serialize};

use crate::error::{Result, UndersoundsError};

use super::UNKNOWN_ARTIST;

/// Album record as persisted, before shaping.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumRecord {
    /// Database id; some legacy records carry `id` instead.
    #[serde(rename = "_id")]
    pub object_id: Option<ObjectId>,

    /// Legacy id field, used when `_id` is absent.
    pub id: Option<Bson>,

    pub title: Option<String>,

    /// Artist reference in whichever shape the record carries.
    pub artist: Option<Bson>,

    #[serde(rename = "coverImage")]
    pub cover_image: Option<String>,

    pub price: Option<Bson>,

    #[serde(rename = "releaseYear")]
    pub release_year: Option<Bson>,

    pub genre: Option<String>,
    pub tracks: Option<Bson>,
    pub ratings: Option<Bson>,
    pub vinyl: Option<Bson>,
    pub cd: Option<Bson>,
    pub cassettes: Option<Bson>,
    pub destacado: Option<Bson>,
    pub description: Option<String>,
    pub label: Option<String>,

    #[serde(rename = "updatedAt")]
    pub updated_at: Option<Bson>,
}

/// The artist field of a persisted album, classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtistRef {
    /// No reference at all (absent or explicit null).
    Missing,

    /// Unresolved reference: an object id or plain string identifier.
    Reference(Bson),

    /// Resolved reference: the artist sub-document was joined in.
    Populated(ArtistSummary),
}

/// The subset of a populated artist the album shape cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistSummary {
    pub name: Option<String>,
    pub band_name: Option<String>,

    /// Numeric public id, distinct from the database id.
    pub id: Option<Bson>,
}

impl ArtistRef {
    /// Classify a raw artist field by its BSON shape.
    pub fn classify(value: Option<Bson>) -> Self {
        match value {
            None | Some(Bson::Null) => ArtistRef::Missing,
            Some(Bson::Document(doc)) => ArtistRef::Populated(ArtistSummary::from_doc(&doc)),
            Some(other) => ArtistRef::Reference(other),
        }
    }
}

impl ArtistSummary {
    fn from_doc(doc: &Document) -> Self {
        Self {
            name: doc.get_str("name").ok().map(str::to_string),
            band_name: doc.get_str("bandName").ok().map(str::to_string),
            id: doc.get("id").cloned(),
        }
    }
}

/// Stable album output shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDto {
    pub id: Option<Bson>,
    pub title: Option<String>,

    /// Artist display name; falls back to the sentinel when unresolved.
    pub artist: String,

    /// Artist identifier: public id when populated, the raw reference when
    /// not, nothing when the record has no artist at all.
    pub artist_id: Option<Bson>,

    pub cover_image: Option<String>,
    pub price: Option<Bson>,
    pub release_year: Option<Bson>,
    pub genre: Option<String>,
    pub tracks: Option<Bson>,
    pub ratings: Option<Bson>,
    pub vinyl: Option<Bson>,
    pub cd: Option<Bson>,
    pub cassettes: Option<Bson>,
    pub destacado: Option<Bson>,
    pub description: Option<String>,
    pub label: Option<String>,
    pub updated_at: Option<Bson>,
}

impl AlbumDto {
    /// Shape a raw database document.
    pub fn from_document(document: Document) -> Result<Self> {
        let record: AlbumRecord = bson::from_document(document)
            .map_err(|e| UndersoundsError::Generic(format!("Malformed album record: {e}")))?;
        Ok(record.into())
    }
}

impl From<AlbumRecord> for AlbumDto {
    fn from(record: AlbumRecord) -> Self {
        let (artist, artist_id) = match ArtistRef::classify(record.artist) {
            ArtistRef::Populated(summary) => {
                let name = summary
                    .name
                    .or(summary.band_name)
                    .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
                (name, summary.id)
            }
            ArtistRef::Reference(reference) => (UNKNOWN_ARTIST.to_string(), Some(reference)),
            ArtistRef::Missing => (UNKNOWN_ARTIST.to_string(), None),
        };

        Self {
            id: record.object_id.map(Bson::ObjectId).or(record.id),
            title: record.title,
            artist,
            artist_id,
            cover_image: record.cover_image,
            price: record.price,
            release_year: record.release_year,
            genre: record.genre,
            tracks: record.tracks,
            ratings: record.ratings,
            vinyl: record.vinyl,
            cd: record.cd,
            cassettes: record.cassettes,
            destacado: record.destacado,
            description: record.description,
            label: record.label,
            updated_at: record.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_populated_artist_uses_name() {
        let dto = AlbumDto::from_document(doc! {
            "title": "Echoes",
            "artist": { "name": "The Tides", "id": 42 },
        })
        .unwrap();

        assert_eq!(dto.artist, "The Tides");
        assert_eq!(dto.artist_id, Some(Bson::Int32(42)));
    }

    #[test]
    fn test_populated_artist_falls_back_to_band_name() {
        let dto = AlbumDto::from_document(doc! {
            "title": "Echoes",
            "artist": { "bandName": "Tidal Collective" },
        })
        .unwrap();

        assert_eq!(dto.artist, "Tidal Collective");
        assert_eq!(dto.artist_id, None);
    }

    #[test]
    fn test_populated_artist_without_names_uses_sentinel() {
        let dto = AlbumDto::from_document(doc! {
            "artist": { "id": 7 },
        })
        .unwrap();

        assert_eq!(dto.artist, UNKNOWN_ARTIST);
        assert_eq!(dto.artist_id, Some(Bson::Int32(7)));
    }

    #[test]
    fn test_unresolved_reference_keeps_raw_id() {
        let oid = ObjectId::new();
        let dto = AlbumDto::from_document(doc! {
            "title": "Echoes",
            "artist": oid,
        })
        .unwrap();

        assert_eq!(dto.artist, UNKNOWN_ARTIST);
        assert_eq!(dto.artist_id, Some(Bson::ObjectId(oid)));

        let dto = AlbumDto::from_document(doc! {
            "artist": "artist-17",
        })
        .unwrap();
        assert_eq!(dto.artist_id, Some(Bson::String("artist-17".to_string())));
    }

    #[test]
    fn test_missing_or_null_artist_is_sentinel_with_no_id() {
        let dto = AlbumDto::from_document(doc! { "title": "Echoes" }).unwrap();
        assert_eq!(dto.artist, UNKNOWN_ARTIST);
        assert_eq!(dto.artist_id, None);

        let dto = AlbumDto::from_document(doc! { "artist": Bson::Null }).unwrap();
        assert_eq!(dto.artist, UNKNOWN_ARTIST);
        assert_eq!(dto.artist_id, None);
    }

    #[test]
    fn test_database_id_wins_over_legacy_id() {
        let oid = ObjectId::new();
        let dto = AlbumDto::from_document(doc! { "_id": oid, "id": 9 }).unwrap();
        assert_eq!(dto.id, Some(Bson::ObjectId(oid)));

        let dto = AlbumDto::from_document(doc! { "id": 9 }).unwrap();
        assert_eq!(dto.id, Some(Bson::Int32(9)));
    }

    #[test]
    fn test_opaque_fields_pass_through() {
        let dto = AlbumDto::from_document(doc! {
            "tracks": [{ "id": 1, "title": "Intro" }],
            "destacado": true,
        })
        .unwrap();

        assert!(matches!(dto.tracks, Some(Bson::Array(_))));
        assert_eq!(dto.destacado, Some(Bson::Boolean(true)));
    }

    #[test]
    fn test_serialized_shape_is_camel_case() {
        let dto = AlbumDto::from_document(doc! {
            "coverImage": "cover.jpg",
            "releaseYear": 2021,
        })
        .unwrap();

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["coverImage"], "cover.jpg");
        assert_eq!(value["artist"], UNKNOWN_ARTIST);
        assert!(value.get("cover_image").is_none());
    }
}
