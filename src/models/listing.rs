//! Marketplace listing records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

/// Category of a marketplace listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Item,
    Skill,
    Service,
}

impl ListingKind {
    /// Database value for the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Item => "item",
            ListingKind::Skill => "skill",
            ListingKind::Service => "service",
        }
    }

    /// Price qualifier shown next to the amount.
    pub fn price_unit(&self) -> &'static str {
        match self {
            ListingKind::Item => "per day",
            ListingKind::Skill => "per hour",
            ListingKind::Service => "",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "item" => Ok(ListingKind::Item),
            "skill" => Ok(ListingKind::Skill),
            "service" => Ok(ListingKind::Service),
            other => Err(AppError::validation(format!(
                "Unknown listing type '{other}' (expected item, skill or service)"
            ))),
        }
    }
}

/// A row from the `rental_items` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub owner: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_path: Option<String>,
    pub contact: String,
    pub rented_by: Option<String>,
    pub borrow_date: Option<String>,
    pub return_date: Option<String>,
    pub approved: String,
    pub listing_type: String,
}

impl Listing {
    /// The listing category; unknown historical values default to `item`.
    pub fn kind(&self) -> ListingKind {
        self.listing_type.parse().unwrap_or(ListingKind::Item)
    }

    /// Whether someone has requested or booked the listing.
    pub fn has_renter(&self) -> bool {
        self.rented_by.is_some()
    }

    /// Whether a request is waiting for owner approval. Approval status is
    /// only meaningful once a renter is set.
    pub fn is_pending(&self) -> bool {
        self.has_renter() && self.approved == "pending"
    }

    /// Whether the rental has been approved.
    pub fn is_approved(&self) -> bool {
        self.has_renter() && self.approved == "approved"
    }
}

/// Input for creating a listing.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub owner: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_path: Option<String>,
    pub contact: String,
    pub kind: ListingKind,
}
