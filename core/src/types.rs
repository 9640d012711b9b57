//! Domain DTOs for the user feed API.
//!
//! # Design
//! The API speaks snake_case JSON, which is also Rust's field naming, so the
//! derives map keys one-to-one. Unknown keys are ignored; optional fields
//! treat a missing key and an explicit `null` the same.

use serde::{Deserialize, Serialize};

/// A profile shown on a card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub age: u32,
    pub loc: String,
    pub about_me: String,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
}

impl User {
    pub fn id(&self) -> i64 {
        self.user_id
    }
}

/// Users are identified by `user_id` alone.
impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.user_id == other.user_id
    }
}

impl Eq for User {}
