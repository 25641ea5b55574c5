//! Artist record shaping
//!
//! An artist's `albums` list mixes populated sub-documents with plain
//! references, depending on whether the query joined them in. Populated
//! entries are reshaped to a fixed summary subset; references stay opaque.
//! A non-list value (legacy records) yields an empty list.

use bson::oid::ObjectId;
use bson::{Bson, Document};
use serde::{Deserialize, Serialize};

use crate::error::{Result, UndersoundsError};

/// Artist record as persisted, before shaping.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRecord {
    #[serde(rename = "_id")]
    pub object_id: Option<ObjectId>,

    /// Numeric public id, distinct from the database id.
    pub id: Option<Bson>,

    pub name: Option<String>,

    #[serde(rename = "profileImage")]
    pub profile_image: Option<String>,

    pub genre: Option<String>,
    pub bio: Option<String>,
    pub banner: Option<String>,
    pub seguidores: Option<Bson>,
    pub ubicacion: Option<String>,

    /// Album list in whichever shape the record carries.
    pub albums: Option<Bson>,

    pub concerts: Option<Bson>,
    pub merchandising: Option<Bson>,

    #[serde(rename = "socialLinks")]
    pub social_links: Option<Bson>,

    #[serde(rename = "createdAt")]
    pub created_at: Option<Bson>,

    #[serde(rename = "updatedAt")]
    pub updated_at: Option<Bson>,
}

/// One entry of an artist's album list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AlbumEntry {
    /// Populated sub-document, reshaped to the summary subset.
    Summary(AlbumSummary),

    /// Unpopulated entry, kept as the opaque reference it was.
    Reference(Bson),
}

impl AlbumEntry {
    /// Classify one list entry by its BSON shape.
    ///
    /// Only a sub-document carrying a database id counts as populated;
    /// everything else passes through untouched.
    pub fn classify(value: Bson) -> Self {
        match value {
            Bson::Document(doc) if doc.contains_key("_id") => {
                AlbumEntry::Summary(AlbumSummary::from_doc(&doc))
            }
            other => AlbumEntry::Reference(other),
        }
    }
}

/// Fixed summary subset of a populated album sub-document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSummary {
    pub id: Option<Bson>,
    pub title: Option<String>,
    pub artist: Option<Bson>,
    pub genre: Option<String>,
    pub tracks: Option<Bson>,
    pub ratings: Option<Bson>,
    pub vinyl: Option<Bson>,
    pub cd: Option<Bson>,
    pub cassettes: Option<Bson>,
    pub destacado: Option<Bson>,
    pub description: Option<String>,
    pub label: Option<String>,
    pub cover_image: Option<String>,
    pub release_year: Option<Bson>,
    pub price: Option<Bson>,
}

impl AlbumSummary {
    fn from_doc(doc: &Document) -> Self {
        let get_str = |key: &str| doc.get_str(key).ok().map(str::to_string);
        Self {
            id: doc.get("_id").cloned(),
            title: get_str("title"),
            artist: doc.get("artist").cloned(),
            genre: get_str("genre"),
            tracks: doc.get("tracks").cloned(),
            ratings: doc.get("ratings").cloned(),
            vinyl: doc.get("vinyl").cloned(),
            cd: doc.get("cd").cloned(),
            cassettes: doc.get("cassettes").cloned(),
            destacado: doc.get("destacado").cloned(),
            description: get_str("description"),
            label: get_str("label"),
            cover_image: get_str("coverImage"),
            release_year: doc.get("releaseYear").cloned(),
            price: doc.get("price").cloned(),
        }
    }
}

/// Stable artist output shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistDto {
    #[serde(rename = "_id")]
    pub object_id: Option<ObjectId>,

    pub id: Option<Bson>,
    pub name: Option<String>,
    pub profile_image: Option<String>,
    pub genre: Option<String>,
    pub bio: Option<String>,
    pub banner: Option<String>,
    pub seguidores: Option<Bson>,
    pub ubicacion: Option<String>,
    pub albums: Vec<AlbumEntry>,
    pub concerts: Option<Bson>,
    pub merchandising: Option<Bson>,
    pub social_links: Option<Bson>,
    pub created_at: Option<Bson>,
    pub updated_at: Option<Bson>,
}

impl ArtistDto {
    /// Shape a raw database document.
    pub fn from_document(document: Document) -> Result<Self> {
        let record: ArtistRecord = bson::from_document(document)
            .map_err(|e| UndersoundsError::Generic(format!("Malformed artist record: {e}")))?;
        Ok(record.into())
    }
}

impl From<ArtistRecord> for ArtistDto {
    fn from(record: ArtistRecord) -> Self {
        let albums = match record.albums {
            Some(Bson::Array(entries)) => {
                entries.into_iter().map(AlbumEntry::classify).collect()
            }
            _ => Vec::new(),
        };

        Self {
            object_id: record.object_id,
            id: record.id,
            name: record.name,
            profile_image: record.profile_image,
            genre: record.genre,
            bio: record.bio,
            banner: record.banner,
            seguidores: record.seguidores,
            ubicacion: record.ubicacion,
            albums,
            concerts: record.concerts,
            merchandising: record.merchandising,
            social_links: record.social_links,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_mixed_album_list_keeps_order() {
        let populated_id = ObjectId::new();
        let reference_id = ObjectId::new();

        let dto = ArtistDto::from_document(doc! {
            "name": "The Tides",
            "albums": [
                { "_id": populated_id, "title": "Echoes", "price": 12.5, "extra": "dropped" },
                reference_id,
            ],
        })
        .unwrap();

        assert_eq!(dto.albums.len(), 2);
        match &dto.albums[0] {
            AlbumEntry::Summary(summary) => {
                assert_eq!(summary.id, Some(Bson::ObjectId(populated_id)));
                assert_eq!(summary.title.as_deref(), Some("Echoes"));
                assert_eq!(summary.price, Some(Bson::Double(12.5)));
            }
            other => panic!("expected populated summary, got {other:?}"),
        }
        assert_eq!(
            dto.albums[1],
            AlbumEntry::Reference(Bson::ObjectId(reference_id))
        );
    }

    #[test]
    fn test_sub_document_without_id_stays_opaque() {
        let dto = ArtistDto::from_document(doc! {
            "albums": [ { "title": "Unsaved" } ],
        })
        .unwrap();

        assert!(matches!(dto.albums[0], AlbumEntry::Reference(_)));
    }

    #[test]
    fn test_non_array_albums_yield_empty_list() {
        let dto = ArtistDto::from_document(doc! {
            "name": "The Tides",
            "albums": "not-a-list",
        })
        .unwrap();
        assert!(dto.albums.is_empty());

        let dto = ArtistDto::from_document(doc! { "name": "The Tides" }).unwrap();
        assert!(dto.albums.is_empty());
    }

    #[test]
    fn test_summary_drops_fields_outside_subset() {
        let dto = ArtistDto::from_document(doc! {
            "albums": [ { "_id": ObjectId::new(), "title": "Echoes", "extra": 1 } ],
        })
        .unwrap();

        let value = serde_json::to_value(&dto.albums[0]).unwrap();
        assert!(value.get("extra").is_none());
        assert_eq!(value["title"], "Echoes");
    }

    #[test]
    fn test_spanish_field_names_survive_serialization() {
        let dto = ArtistDto::from_document(doc! {
            "seguidores": 1200,
            "ubicacion": "Caceres",
        })
        .unwrap();

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["seguidores"], 1200);
        assert_eq!(value["ubicacion"], "Caceres");
    }
}
