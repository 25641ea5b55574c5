//! Account persistence
//!
//! Thin data-access layer over the accounts collection. Mutating operations
//! stamp `updatedAt` and return the post-update document, matching what the
//! platform's HTTP handlers send back to clients.

use bson::oid::ObjectId;
use bson::{doc, Bson, Document};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use tracing::debug;

use crate::error::{Result, UndersoundsError};

use super::model::{Account, AccountRole};

/// Name of the accounts collection.
pub const COLLECTION_NAME: &str = "accounts";

/// Collection the artist lookup joins against.
const ARTISTS_COLLECTION: &str = "artists";

/// An account with its linked artist record joined in, when present.
#[derive(Debug, Clone)]
pub struct AccountWithArtist {
    pub account: Account,

    /// Raw artist document; absent when the account has no link or the
    /// referenced artist no longer exists.
    pub artist: Option<Document>,
}

/// Data-access object for user accounts.
pub struct AccountDao {
    collection: Collection<Account>,
}

impl AccountDao {
    /// Create a DAO over the given database.
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    /// Persist a new account, returning it with its assigned id.
    pub async fn create(&self, mut account: Account) -> Result<Account> {
        let result = self.collection.insert_one(&account).await?;
        account.id = result.inserted_id.as_object_id();
        debug!("Created account {:?}", account.id);
        Ok(account)
    }

    /// Find one account by email address.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    /// Find one account by id.
    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Account>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    /// Find one account by id with its linked artist record joined in.
    pub async fn find_by_id_with_artist(&self, id: ObjectId) -> Result<Option<AccountWithArtist>> {
        let pipeline = vec![
            doc! { "$match": { "_id": id } },
            doc! { "$lookup": {
                "from": ARTISTS_COLLECTION,
                "localField": "artistId",
                "foreignField": "_id",
                "as": "artist",
            } },
            doc! { "$unwind": {
                "path": "$artist",
                "preserveNullAndEmptyArrays": true,
            } },
        ];

        let mut cursor = self.collection.aggregate(pipeline).await?;
        let Some(mut document) = cursor.try_next().await? else {
            return Ok(None);
        };

        let artist = match document.remove("artist") {
            Some(Bson::Document(artist)) => Some(artist),
            _ => None,
        };
        let account: Account = bson::from_document(document)
            .map_err(|e| UndersoundsError::Generic(format!("Malformed account record: {e}")))?;

        Ok(Some(AccountWithArtist { account, artist }))
    }

    /// Apply field changes to an account, stamping `updatedAt`.
    ///
    /// Returns the post-update document.
    pub async fn update(&self, id: ObjectId, mut changes: Document) -> Result<Option<Account>> {
        changes.insert("updatedAt", bson::DateTime::from_chrono(Utc::now()));

        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": changes })
            .return_document(ReturnDocument::After)
            .await?)
    }

    /// Link an account to its artist record.
    pub async fn link_to_artist(
        &self,
        account_id: ObjectId,
        artist_id: ObjectId,
    ) -> Result<Option<Account>> {
        Ok(self
            .collection
            .find_one_and_update(
                doc! { "_id": account_id },
                doc! { "$set": {
                    "artistId": artist_id,
                    "updatedAt": bson::DateTime::from_chrono(Utc::now()),
                } },
            )
            .return_document(ReturnDocument::After)
            .await?)
    }

    /// Find every account with the given role.
    pub async fn find_by_role(&self, role: AccountRole) -> Result<Vec<Account>> {
        let cursor = self.collection.find(doc! { "role": role.as_str() }).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Find band accounts that have not been linked to an artist record yet.
    pub async fn find_bands_without_artist(&self) -> Result<Vec<Account>> {
        let cursor = self
            .collection
            .find(doc! {
                "role": AccountRole::Band.as_str(),
                "artistId": { "$exists": false },
            })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    /// Delete an account, returning the removed document.
    pub async fn delete(&self, id: ObjectId) -> Result<Option<Account>> {
        Ok(self
            .collection
            .find_one_and_delete(doc! { "_id": id })
            .await?)
    }
}
