//! Strongly-typed ID wrappers for every stored record
//!
//! A transaction references its wallet and category by id; distinct newtypes
//! keep those references from being swapped at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $display_prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short prefix shown in front of the id, e.g. `wal-`
            pub const fn prefix() -> &'static str {
                $display_prefix
            }

            /// Check whether `short` (with or without prefix) abbreviates this id
            pub fn matches_short(&self, short: &str) -> bool {
                let short = short.strip_prefix($display_prefix).unwrap_or(short);
                !short.is_empty() && self.0.to_string().starts_with(&short.to_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(
    /// Identifies a wallet
    WalletId,
    "wal-"
);
define_id!(
    /// Identifies a transaction category
    CategoryId,
    "cat-"
);
define_id!(
    /// Identifies a wallet transaction
    TransactionId,
    "txn-"
);
define_id!(
    /// Identifies a booking
    BookingId,
    "bkg-"
);
define_id!(ProductId, "prd-");
define_id!(TourGroupId, "tgr-");
