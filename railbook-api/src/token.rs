use async_trait::async_trait;
use railbook_shared::{AuthTokens, UserProfile};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Persisted client state: the access token plus the cached user profile.
/// The presence of the token alone gates whether a "who am I" call is made.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load_tokens(&self) -> Result<Option<AuthTokens>, StorageError>;
    async fn save_tokens(&self, tokens: &AuthTokens) -> Result<(), StorageError>;
    async fn load_profile(&self) -> Result<Option<UserProfile>, StorageError>;
    async fn save_profile(&self, profile: &UserProfile) -> Result<(), StorageError>;
    async fn clear(&self) -> Result<(), StorageError>;
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct PersistedState {
    tokens: Option<AuthTokens>,
    profile: Option<UserProfile>,
}

/// File-backed store, the stand-in for browser local storage.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read(&self) -> Result<PersistedState, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PersistedState::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, state: &PersistedState) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(state)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load_tokens(&self) -> Result<Option<AuthTokens>, StorageError> {
        Ok(self.read().await?.tokens)
    }

    async fn save_tokens(&self, tokens: &AuthTokens) -> Result<(), StorageError> {
        let mut state = self.read().await?;
        state.tokens = Some(tokens.clone());
        self.write(&state).await
    }

    async fn load_profile(&self) -> Result<Option<UserProfile>, StorageError> {
        Ok(self.read().await?.profile)
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        let mut state = self.read().await?;
        state.profile = Some(profile.clone());
        self.write(&state).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    state: RwLock<PersistedState>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded with a token, as if a previous session had logged in.
    pub fn with_tokens(tokens: AuthTokens) -> Self {
        Self {
            state: RwLock::new(PersistedState {
                tokens: Some(tokens),
                profile: None,
            }),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load_tokens(&self) -> Result<Option<AuthTokens>, StorageError> {
        Ok(self.state.read().await.tokens.clone())
    }

    async fn save_tokens(&self, tokens: &AuthTokens) -> Result<(), StorageError> {
        self.state.write().await.tokens = Some(tokens.clone());
        Ok(())
    }

    async fn load_profile(&self) -> Result<Option<UserProfile>, StorageError> {
        Ok(self.state.read().await.profile.clone())
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        self.state.write().await.profile = Some(profile.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        *self.state.write().await = PersistedState::default();
        Ok(())
    }
}
