// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use tempfile::TempDir;
use xpense::application::{PasswordScheme, TrackerConfig, TrackerService};
use xpense::domain::{AccountId, Cents, ProductId};

/// Plaintext credentials keep tests fast; Argon2 has its own tests.
pub fn fast_config() -> TrackerConfig {
    TrackerConfig::default().with_password_scheme(PasswordScheme::Plaintext)
}

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(TrackerService, TempDir)> {
    test_service_with(fast_config()).await
}

pub async fn test_service_with(config: TrackerConfig) -> Result<(TrackerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = TrackerService::open(db_path.to_str().unwrap(), config).await?;
    Ok((service, temp_dir))
}

/// Helper to create a test service on a private in-memory database
pub async fn memory_service() -> Result<TrackerService> {
    Ok(TrackerService::in_memory(fast_config()).await?)
}

/// Test fixture: a registered account owning products
pub struct Shop {
    pub owner: AccountId,
}

impl Shop {
    /// Register `username` with password "pw".
    pub async fn open(service: &TrackerService, username: &str) -> Result<Self> {
        let owner = service.register(username, "pw").await?;
        Ok(Self { owner })
    }

    pub async fn product(
        &self,
        service: &TrackerService,
        name: &str,
        price: Cents,
    ) -> Result<ProductId> {
        Ok(service.add_product(self.owner, name, price).await?)
    }
}
