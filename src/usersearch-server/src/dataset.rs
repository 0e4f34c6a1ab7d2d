use anyhow::{Context, Result};
use std::path::Path;
use usersearch_core::User;

/// Read-only source of users the search endpoint consults
pub trait UserSource: Send + Sync {
    /// All users, in stored order
    fn users(&self) -> &[User];
}

/// In-memory dataset
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    users: Vec<User>,
}

impl Dataset {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Load a JSON array of users from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dataset {}", path.display()))?;
        let users: Vec<User> = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse dataset {}", path.display()))?;
        tracing::debug!(count = users.len(), path = %path.display(), "Dataset loaded");
        Ok(Self { users })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserSource for Dataset {
    fn users(&self) -> &[User] {
        &self.users
    }
}
