//! Marketplace repository.

use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

use crate::error::{AppError, Result};
use crate::models::{Listing, ListingKind, NewListing};

/// Repository over the users and rental_items tables.
#[derive(Clone)]
pub struct MarketRepo {
    pool: SqlitePool,
}

impl MarketRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// SHA-256 hex digest of a password.
    pub fn hash_password(password: &str) -> String {
        hex::encode(Sha256::digest(password.as_bytes()))
    }

    /// Register a new user. Returns `Ok(false)` when the username is taken.
    pub async fn register(&self, username: &str, password: &str) -> Result<bool> {
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(Self::hash_password(password))
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                log::warn!("Registration rejected: username '{username}' already exists");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check username/password credentials.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<bool> {
        let row = sqlx::query("SELECT id FROM users WHERE username = ? AND password = ?")
            .bind(username)
            .bind(Self::hash_password(password))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Create a listing; returns the new listing id.
    pub async fn add_listing(&self, listing: &NewListing) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO rental_items (owner, name, description, price, image_path, contact, listing_type)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&listing.owner)
        .bind(&listing.name)
        .bind(&listing.description)
        .bind(listing.price)
        .bind(&listing.image_path)
        .bind(&listing.contact)
        .bind(listing.kind.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// All listings, optionally filtered by category, in insertion order.
    pub async fn listings(&self, kind: Option<ListingKind>) -> Result<Vec<Listing>> {
        let listings = match kind {
            Some(kind) => {
                sqlx::query_as::<_, Listing>(
                    "SELECT * FROM rental_items WHERE listing_type = ? ORDER BY id",
                )
                .bind(kind.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Listing>("SELECT * FROM rental_items ORDER BY id")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(listings)
    }

    /// Fetch one listing by id.
    pub async fn listing(&self, id: i64) -> Result<Option<Listing>> {
        let listing = sqlx::query_as::<_, Listing>("SELECT * FROM rental_items WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(listing)
    }

    /// Request to rent/book a listing for a date range.
    ///
    /// Sets the renter and resets approval to pending. A listing has at most
    /// one active renter, so a listing that already has one is rejected.
    pub async fn request_rental(
        &self,
        id: i64,
        renter: &str,
        borrow_date: &str,
        return_date: &str,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE rental_items
            SET rented_by = ?, borrow_date = ?, return_date = ?, approved = 'pending'
            WHERE id = ? AND rented_by IS NULL
            "#,
        )
        .bind(renter)
        .bind(borrow_date)
        .bind(return_date)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return match self.listing(id).await? {
                None => Err(AppError::validation(format!("No listing with id {id}"))),
                Some(listing) => Err(AppError::validation(format!(
                    "'{}' already has an active renter",
                    listing.name
                ))),
            };
        }
        Ok(())
    }

    /// Approve a pending rental request. Only the listing owner may approve.
    pub async fn approve_rental(&self, id: i64, actor: &str) -> Result<()> {
        let listing = self
            .listing(id)
            .await?
            .ok_or_else(|| AppError::validation(format!("No listing with id {id}")))?;

        if listing.owner != actor {
            return Err(AppError::validation(format!(
                "Only the owner ({}) can approve requests for '{}'",
                listing.owner, listing.name
            )));
        }
        if !listing.is_pending() {
            return Err(AppError::validation(format!(
                "'{}' has no pending request",
                listing.name
            )));
        }

        sqlx::query("UPDATE rental_items SET approved = 'approved' WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Pending requests on listings owned by the given user.
    pub async fn pending_for_owner(&self, owner: &str) -> Result<Vec<Listing>> {
        let listings = sqlx::query_as::<_, Listing>(
            r#"
            SELECT * FROM rental_items
            WHERE owner = ? AND rented_by IS NOT NULL AND approved = 'pending'
            ORDER BY id
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(listings)
    }

    /// Total number of listings.
    pub async fn count_listings(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rental_items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}
