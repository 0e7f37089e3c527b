//! Account directory backing the `api/` mount

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;
use utoipa::ToSchema;

use crate::error::{AppError, Result};

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Account {
    pub id: u64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub date_joined: DateTime<Utc>,
}

/// Concurrent in-memory account directory
pub struct AccountDirectory {
    accounts: DashMap<u64, Account>,
    /// Lowercased username to id
    usernames: DashMap<String, u64>,
    next_id: AtomicU64,
    /// Serialises the uniqueness check with the insert
    create_lock: Mutex<()>,
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            usernames: DashMap::new(),
            next_id: AtomicU64::new(1),
            create_lock: Mutex::new(()),
        }
    }

    /// Register a new account. Usernames are unique ignoring case.
    pub fn create(&self, username: &str, email: Option<String>) -> Result<Account> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::Validation(
                "username: This field may not be blank.".to_string(),
            ));
        }

        let key = username.to_lowercase();
        let _guard = self.create_lock.lock();
        if self.usernames.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "An account with username '{}' already exists",
                username
            )));
        }

        let account = Account {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            username: username.to_string(),
            email: email.filter(|e| !e.trim().is_empty()),
            date_joined: Utc::now(),
        };
        self.usernames.insert(key, account.id);
        self.accounts.insert(account.id, account.clone());
        info!(id = account.id, username = %account.username, "Account created");

        Ok(account)
    }

    pub fn get(&self, id: u64) -> Result<Account> {
        self.accounts
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or_else(|| AppError::NotFound(format!("Account {} not found", id)))
    }

    /// All accounts ordered by id
    pub fn list(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.accounts.iter().map(|r| r.value().clone()).collect();
        accounts.sort_by_key(|a| a.id);
        accounts
    }

    /// Number of registered accounts
    pub fn count(&self) -> usize {
        self.accounts.len()
    }
}

impl Default for AccountDirectory {
    fn default() -> Self {
        Self::new()
    }
}
