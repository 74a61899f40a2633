use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    pub id: i32,
    pub name: String,
    pub lastname: String,
    pub age: i32,
    pub email: String,
}

/// Every updatable column of a user record. Used both for inserts and for
/// replace-all updates, so an update always overwrites all four fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub lastname: String,
    pub age: i32,
    pub email: String,
}

impl NewUser {
    pub fn with_id(self, id: i32) -> UserRecord {
        UserRecord {
            id,
            name: self.name,
            lastname: self.lastname,
            age: self.age,
            email: self.email,
        }
    }
}

/// Case-sensitive substring search over `name`, one page at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub name: String,
    pub offset: i64,
    pub limit: i64,
}

impl SearchParams {
    /// `page` is 1-based. Returns `None` when the page's offset does not fit in an `i64`.
    pub fn for_page(name: impl Into<String>, page: i64, page_size: i64) -> Option<Self> {
        let offset = page.checked_sub(1)?.checked_mul(page_size)?;
        Some(Self {
            name: name.into(),
            offset,
            limit: page_size,
        })
    }

    pub fn matches(&self, record: &UserRecord) -> bool {
        record.name.contains(self.name.as_str())
    }
}
