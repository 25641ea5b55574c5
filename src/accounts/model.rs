//! Account model
//!
//! Mirrors the persisted account shape of the user service. The password is
//! optional so accounts created through an OAuth provider can exist without
//! one; the provider fields identify where such an account came from.

use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use bson::Bson;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of an account on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    #[default]
    Fan,
    Band,
    Label,
}

impl AccountRole {
    /// Wire spelling of the role, as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Fan => "fan",
            AccountRole::Band => "band",
            AccountRole::Label => "label",
        }
    }
}

/// Social media links attached to a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub facebook: String,

    #[serde(default)]
    pub instagram: String,

    #[serde(default)]
    pub twitter: String,
}

/// A platform user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub username: String,
    pub email: String,

    /// Absent for accounts created through an OAuth provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default)]
    pub role: AccountRole,

    #[serde(rename = "profileImage", default)]
    pub profile_image: String,

    #[serde(rename = "bannerImage", default = "default_banner_image")]
    pub banner_image: String,

    #[serde(default)]
    pub followers: i64,

    #[serde(default)]
    pub bio: String,

    #[serde(rename = "socialLinks", default)]
    pub social_links: SocialLinks,

    // Role-specific fields
    #[serde(rename = "bandName", skip_serializing_if = "Option::is_none")]
    pub band_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    #[serde(rename = "labelName", skip_serializing_if = "Option::is_none")]
    pub label_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(rename = "purchaseHistory", default)]
    pub purchase_history: Vec<Bson>,

    #[serde(rename = "createdAt", with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt", with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,

    /// Link to the artist record, once a band account has one.
    #[serde(rename = "artistId", skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<ObjectId>,

    // OAuth provenance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(rename = "providerId", skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
}

fn default_banner_image() -> String {
    "http://localhost:5000/assets/images/default.jpg".to_string()
}

impl Account {
    /// Create a fresh account with defaults and current timestamps.
    pub fn new(username: impl Into<String>, email: impl Into<String>, role: AccountRole) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            username: username.into(),
            email: email.into(),
            password: None,
            role,
            profile_image: String::new(),
            banner_image: default_banner_image(),
            followers: 0,
            bio: String::new(),
            social_links: SocialLinks::default(),
            band_name: None,
            genre: None,
            label_name: None,
            website: None,
            purchase_history: Vec::new(),
            created_at: now,
            updated_at: now,
            artist_id: None,
            provider: None,
            provider_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_role_wire_spelling() {
        assert_eq!(
            bson::to_bson(&AccountRole::Band).unwrap(),
            Bson::String("band".to_string())
        );
        assert_eq!(AccountRole::Label.as_str(), "label");
    }

    #[test]
    fn test_minimal_document_fills_defaults() {
        let account: Account = bson::from_document(doc! {
            "username": "ada",
            "email": "ada@example.com",
            "createdAt": bson::DateTime::now(),
            "updatedAt": bson::DateTime::now(),
        })
        .unwrap();

        assert_eq!(account.role, AccountRole::Fan);
        assert_eq!(account.followers, 0);
        assert_eq!(account.banner_image, default_banner_image());
        assert!(account.password.is_none());
        assert!(account.purchase_history.is_empty());
    }

    #[test]
    fn test_new_account_has_matching_timestamps() {
        let account = Account::new("ada", "ada@example.com", AccountRole::Band);
        assert_eq!(account.created_at, account.updated_at);
        assert!(account.artist_id.is_none());
    }

    #[test]
    fn test_serialization_omits_absent_optionals() {
        let account = Account::new("ada", "ada@example.com", AccountRole::Fan);
        let doc = bson::to_document(&account).unwrap();

        assert!(!doc.contains_key("password"));
        assert!(!doc.contains_key("bandName"));
        assert!(!doc.contains_key("artistId"));
        assert!(doc.contains_key("bannerImage"));
    }
}
