use std::fmt;

use diesel_derive_newtype::DieselNewType;
use serde::{Deserialize, Serialize};
use svix_ksuid::KsuidLike;

#[derive(
    DieselNewType, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DbId(String);

impl Default for DbId {
    fn default() -> Self {
        DbId(svix_ksuid::Ksuid::new(None, None).to_string())
    }
}

impl DbId {
    /// Length of a base62 KSUID, and of every id column.
    pub const LENGTH: usize = 27;

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this could be a stored id at all. Anything else cannot name a row and would not
    /// fit the `CHAR(27)` columns.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == Self::LENGTH && self.0.bytes().all(|b| b.is_ascii_alphanumeric())
    }
}

impl fmt::Display for DbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DbId {
    fn from(string: String) -> Self {
        DbId(string)
    }
}

impl From<&str> for DbId {
    fn from(string: &str) -> Self {
        DbId(string.to_string())
    }
}
