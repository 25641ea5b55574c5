//! News record shaping
//!
//! News is the simple case: a direct field mapping with the database id
//! surfaced as `id`.

use bson::oid::ObjectId;
use bson::{Bson, Document};
use serde::{Deserialize, Serialize};

use crate::error::{Result, UndersoundsError};

/// News record as persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsRecord {
    #[serde(rename = "_id")]
    pub object_id: Option<ObjectId>,

    pub titulo: Option<String>,
    pub body: Option<String>,
    pub image: Option<String>,

    #[serde(rename = "fechaPublicacion")]
    pub fecha_publicacion: Option<Bson>,

    pub autor: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: Option<Bson>,

    #[serde(rename = "updatedAt")]
    pub updated_at: Option<Bson>,
}

/// Stable news output shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDto {
    pub id: Option<ObjectId>,
    pub titulo: Option<String>,
    pub body: Option<String>,
    pub image: Option<String>,
    pub fecha_publicacion: Option<Bson>,
    pub autor: Option<String>,
    pub created_at: Option<Bson>,
    pub updated_at: Option<Bson>,
}

impl NewsDto {
    /// Shape a raw database document.
    pub fn from_document(document: Document) -> Result<Self> {
        let record: NewsRecord = bson::from_document(document)
            .map_err(|e| UndersoundsError::Generic(format!("Malformed news record: {e}")))?;
        Ok(record.into())
    }
}

impl From<NewsRecord> for NewsDto {
    fn from(record: NewsRecord) -> Self {
        Self {
            id: record.object_id,
            titulo: record.titulo,
            body: record.body,
            image: record.image,
            fecha_publicacion: record.fecha_publicacion,
            autor: record.autor,
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
    fn test_direct_field_mapping() {
        let oid = ObjectId::new();
        let dto = NewsDto::from_document(doc! {
            "_id": oid,
            "titulo": "Nueva gira",
            "body": "La banda anuncia fechas.",
            "autor": "redaccion",
        })
        .unwrap();

        assert_eq!(dto.id, Some(oid));
        assert_eq!(dto.titulo.as_deref(), Some("Nueva gira"));
        assert_eq!(dto.autor.as_deref(), Some("redaccion"));
        assert!(dto.image.is_none());
    }

    #[test]
    fn test_serialized_keys() {
        let dto = NewsDto::from_document(doc! {
            "titulo": "t",
            "fechaPublicacion": "2025-04-01",
        })
        .unwrap();

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["titulo"], "t");
        assert_eq!(value["fechaPublicacion"], "2025-04-01");
        assert!(value.get("fecha_publicacion").is_none());
    }
}
