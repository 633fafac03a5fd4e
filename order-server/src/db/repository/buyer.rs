//! Buyer Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Buyer, BuyerCreate, BuyerUpdate};
use crate::db::models::employee::hash_password;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct BuyerRepository {
    base: BaseRepository,
}

impl BuyerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all buyers, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Buyer>> {
        let buyers: Vec<Buyer> = self
            .base
            .db()
            .query("SELECT * FROM buyer ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(buyers)
    }

    /// Find buyer by its opaque id
    pub async fn find_by_id(&self, buyer_id: &str) -> RepoResult<Option<Buyer>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM buyer WHERE buyer_id = $buyer_id LIMIT 1")
            .bind(("buyer_id", buyer_id.to_string()))
            .await?;
        let buyers: Vec<Buyer> = result.take(0)?;
        Ok(buyers.into_iter().next())
    }

    /// Find buyer by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Buyer>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM buyer WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let buyers: Vec<Buyer> = result.take(0)?;
        Ok(buyers.into_iter().next())
    }

    /// Create a new buyer
    pub async fn create(&self, data: BuyerCreate) -> RepoResult<Buyer> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                data.email
            )));
        }

        let hash_pass = hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;
        let buyer_id = shared::util::new_id();

        // hash_pass is bound explicitly: the model skips it on serialize
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE buyer SET
                    buyer_id = $buyer_id,
                    buyer_name = $buyer_name,
                    email = $email,
                    hash_pass = $hash_pass,
                    date_of_birth = $date_of_birth,
                    phone = $phone,
                    address = $address,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("buyer_id", buyer_id))
            .bind(("buyer_name", data.buyer_name))
            .bind(("email", data.email))
            .bind(("hash_pass", hash_pass))
            .bind(("date_of_birth", data.date_of_birth))
            .bind(("phone", data.phone))
            .bind(("address", data.address))
            .bind(("created_at", shared::util::now_millis()))
            .await?;

        let created: Option<Buyer> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create buyer".to_string()))
    }

    /// Update profile fields; absent fields keep their current value
    pub async fn update(&self, buyer_id: &str, data: BuyerUpdate) -> RepoResult<Buyer> {
        let current = self
            .find_by_id(buyer_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Buyer {buyer_id} not found")))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE buyer SET
                    buyer_name = $buyer_name,
                    date_of_birth = $date_of_birth,
                    phone = $phone,
                    address = $address
                WHERE buyer_id = $buyer_id
                RETURN AFTER"#,
            )
            .bind(("buyer_id", buyer_id.to_string()))
            .bind(("buyer_name", data.buyer_name.unwrap_or(current.buyer_name)))
            .bind(("date_of_birth", data.date_of_birth.or(current.date_of_birth)))
            .bind(("phone", data.phone.or(current.phone)))
            .bind(("address", data.address.or(current.address)))
            .await?;

        let updated: Option<Buyer> = result.take(0)?;
        updated.ok_or_else(|| RepoError::Database("Failed to update buyer".to_string()))
    }

    /// Delete a buyer
    pub async fn delete(&self, buyer_id: &str) -> RepoResult<()> {
        self.find_by_id(buyer_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Buyer {buyer_id} not found")))?;

        self.base
            .db()
            .query("DELETE buyer WHERE buyer_id = $buyer_id")
            .bind(("buyer_id", buyer_id.to_string()))
            .await?;
        Ok(())
    }
}
