//! Startup provisioning from a JSON seed file.
//!
//! Users and the store directory are maintained outside the message tool
//! itself; operators hand the server a seed file instead. Existing rows
//! are left alone, so re-running with the same file is harmless.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, info};

use crate::auth;
use crate::storage::{DatabaseError, StorecastDatabase};

#[derive(Debug, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub stores: Vec<SeedStore>,
}

#[derive(Debug, Deserialize)]
pub struct SeedUser {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SeedStore {
    pub name: String,
    pub code: String,
}

/// Read a seed file and apply it.
pub async fn apply_seed_file(db: &StorecastDatabase, path: &Path) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read seed file {}", path.display()))?;
    let seed: SeedFile = serde_json::from_str(&raw)
        .with_context(|| format!("parse seed file {}", path.display()))?;

    apply(db, seed).await
}

/// Provision the users and stores that do not exist yet. Passwords are
/// hashed on the way in; no plaintext ever reaches the database.
pub async fn apply(db: &StorecastDatabase, seed: SeedFile) -> anyhow::Result<()> {
    let mut created_users = 0usize;
    for user in seed.users {
        match db.get_user_by_email(&user.email).await {
            Ok(_) => debug!(email = %user.email, "seed user already exists, skipping"),
            Err(DatabaseError::NotFound(_)) => {
                let hash = auth::hash_password(&user.password)
                    .map_err(|e| anyhow::anyhow!("hash password for {}: {e}", user.email))?;
                let id = uuid::Uuid::new_v4().to_string();
                db.create_user(&id, &user.email, &hash).await?;
                created_users += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    let mut created_stores = 0usize;
    for store in seed.stores {
        if db.get_store_by_code(&store.code).await?.is_some() {
            debug!(code = %store.code, "seed store already exists, skipping");
            continue;
        }
        let id = uuid::Uuid::new_v4().to_string();
        db.create_store(&id, &store.name, &store.code).await?;
        created_stores += 1;
    }

    info!(
        users = created_users,
        stores = created_stores,
        "Seed applied"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_seed() -> SeedFile {
        serde_json::from_str(
            r#"{
                "users": [{"email": "ops@example.com", "password": "hunter2"}],
                "stores": [
                    {"name": "Downtown", "code": "DT001"},
                    {"name": "Mall", "code": "ML002"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn seed_provisions_users_and_stores() {
        let db = StorecastDatabase::open_in_memory().await.unwrap();

        apply(&db, sample_seed()).await.unwrap();

        let user = db.get_user_by_email("ops@example.com").await.unwrap();
        assert!(auth::verify_password("hunter2", &user.password_hash).unwrap());
        assert_eq!(db.list_stores().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn reapplying_the_same_seed_changes_nothing() {
        let db = StorecastDatabase::open_in_memory().await.unwrap();

        apply(&db, sample_seed()).await.unwrap();
        let first_hash = db
            .get_user_by_email("ops@example.com")
            .await
            .unwrap()
            .password_hash;

        apply(&db, sample_seed()).await.unwrap();

        // Same single user with an untouched hash, same two stores.
        let user = db.get_user_by_email("ops@example.com").await.unwrap();
        assert_eq!(user.password_hash, first_hash);
        assert_eq!(db.list_stores().await.unwrap().len(), 2);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let seed: SeedFile = serde_json::from_str("{}").unwrap();
        assert!(seed.users.is_empty());
        assert!(seed.stores.is_empty());
    }

    #[tokio::test]
    async fn seed_file_is_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(&path, r#"{"stores": [{"name": "Downtown", "code": "DT001"}]}"#).unwrap();

        let db = StorecastDatabase::open_in_memory().await.unwrap();
        apply_seed_file(&db, &path).await.unwrap();

        assert!(db.get_store_by_code("DT001").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unreadable_seed_file_is_an_error() {
        let db = StorecastDatabase::open_in_memory().await.unwrap();
        let missing = std::path::Path::new("/nonexistent/seed.json");
        assert!(apply_seed_file(&db, missing).await.is_err());
    }
}
