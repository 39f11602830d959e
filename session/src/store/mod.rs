pub mod file;
pub mod memory;

use async_trait::async_trait;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use crate::errors::StoreError;

/// Persistent slot for the one session token.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// The stored token, if any.
    async fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replace the stored token.
    async fn save(&self, token: &str) -> Result<(), StoreError>;

    /// Remove the stored token. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<(), StoreError>;
}
