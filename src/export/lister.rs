//! Collection discovery
//!
//! Enumerates the collections of the target database and keeps only those
//! with at least one record. Counts use the driver's estimated count, which
//! is cheap and allowed to lag behind the precise value.

use mongodb::bson::Document;
use tracing::{debug, error, info};

use crate::config::ExportConfig;
use crate::connection::ConnectionManager;
use crate::error::Result;

/// A collection that is a candidate for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDescriptor {
    /// Collection name.
    pub name: String,

    /// Approximate number of records.
    pub record_count: u64,
}

/// List the non-empty collections of the configured database.
///
/// A connection or query failure is reported and degrades to an empty list:
/// the caller treats "nothing exportable" as fatal, so nothing is lost by
/// not propagating the error itself. The client is shut down on both the
/// success and the failure path.
pub async fn list_nonempty_collections(config: &ExportConfig) -> Vec<CollectionDescriptor> {
    let mut manager = ConnectionManager::new(&config.uri);

    if let Err(e) = manager.connect().await {
        error!("Error listing collections: {e}");
        return Vec::new();
    }

    let result = list_with_counts(&manager).await;
    manager.disconnect().await;

    match result {
        Ok(descriptors) => descriptors,
        Err(e) => {
            error!("Error listing collections: {e}");
            Vec::new()
        }
    }
}

/// Enumerate collections with their estimated counts, dropping empty ones.
async fn list_with_counts(manager: &ConnectionManager) -> Result<Vec<CollectionDescriptor>> {
    let db = manager.database()?;
    info!("Listing collections in database '{}'", db.name());

    let names = db.list_collection_names().await?;
    let mut counted = Vec::with_capacity(names.len());

    for name in names {
        let count = db
            .collection::<Document>(&name)
            .estimated_document_count()
            .await?;
        debug!("Collection '{name}' holds ~{count} records");
        counted.push((name, count));
    }

    let descriptors = keep_nonempty(counted);
    info!("Found {} non-empty collections", descriptors.len());
    Ok(descriptors)
}

/// Keep only the collections with at least one record, preserving order.
fn keep_nonempty(counted: Vec<(String, u64)>) -> Vec<CollectionDescriptor> {
    counted
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(name, record_count)| CollectionDescriptor { name, record_count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_count_collections_are_excluded() {
        let counted = vec![
            ("albums".to_string(), 5),
            ("artists".to_string(), 0),
            ("news".to_string(), 3),
        ];

        let descriptors = keep_nonempty(counted);
        let names: Vec<&str> = descriptors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["albums", "news"]);
        assert_eq!(descriptors[0].record_count, 5);
    }

    #[tokio::test]
    async fn test_unreachable_database_yields_empty_list() {
        // An unparseable URI fails at connect; the lister must swallow it.
        let config = ExportConfig::with_uri("mongodb://");
        let descriptors = list_nonempty_collections(&config).await;
        assert!(descriptors.is_empty());
    }
}
