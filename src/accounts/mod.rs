//! User accounts
//!
//! The account model and its persistence layer for the user service. Every
//! DAO operation maps 1:1 to a single driver call; there is no batching and
//! no transaction discipline, because nothing in the platform updates
//! accounts concurrently from more than one place.

pub mod dao;
pub mod model;

pub use dao::{AccountDao, AccountWithArtist};
pub use model::{Account, AccountRole, SocialLinks};
