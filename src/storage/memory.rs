//! In-process store with the same row rules as the hosted backend

use crate::data::Snapshot;
use crate::error::{Error, Result};
use crate::model::{Edge, FriendshipRow, User, UserId};
use crate::storage::{FriendshipStore, RowInsert, UserDirectory};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    rows: BTreeSet<FriendshipRow>,
}

/// Users and friendship rows held in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store from a snapshot. Rows are taken as-is, so a snapshot
    /// with one-sided rows stays one-sided.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let tables = Tables {
            users: snapshot
                .users
                .into_iter()
                .map(|user| (user.id.clone(), user))
                .collect(),
            rows: snapshot.friendships.into_iter().collect(),
        };

        log::debug!(
            "Seeded store with {} users and {} rows",
            tables.users.len(),
            tables.rows.len()
        );

        Self {
            tables: Mutex::new(tables),
        }
    }

    /// Export the current contents
    pub fn snapshot(&self) -> Result<Snapshot> {
        let tables = self.lock()?;
        Ok(Snapshot {
            users: tables.users.values().cloned().collect(),
            friendships: tables.rows.iter().cloned().collect(),
        })
    }

    /// Physical rows, in order
    pub fn rows(&self) -> Result<Vec<FriendshipRow>> {
        Ok(self.lock()?.rows.iter().cloned().collect())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| Error::TransientStoreFailure("store lock poisoned".into()))
    }

    fn authorize(caller: &UserId, row: &FriendshipRow, action: &str) -> Result<()> {
        if row.involves(caller) {
            Ok(())
        } else {
            Err(Error::NotAuthorized {
                caller: caller.clone(),
                action: format!("{} {} -> {}", action, row.user_id, row.friend_id),
            })
        }
    }
}

impl UserDirectory for MemoryStore {
    fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.lock()?.users.values().cloned().collect())
    }

    fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        Ok(self.lock()?.users.get(id).cloned())
    }
}

impl FriendshipStore for MemoryStore {
    fn list_all_edges(&self) -> Result<Vec<Edge>> {
        let tables = self.lock()?;
        let edges: BTreeSet<Edge> = tables.rows.iter().map(FriendshipRow::edge).collect();
        Ok(edges.into_iter().collect())
    }

    fn insert_row(&self, caller: &UserId, row: &FriendshipRow) -> Result<RowInsert> {
        if row.user_id == row.friend_id {
            return Err(Error::InvalidOperation(format!(
                "{} cannot befriend themselves",
                row.user_id
            )));
        }
        Self::authorize(caller, row, "insert")?;

        if self.lock()?.rows.insert(row.clone()) {
            Ok(RowInsert::Inserted)
        } else {
            Ok(RowInsert::AlreadyExists)
        }
    }

    fn delete_row(&self, caller: &UserId, row: &FriendshipRow) -> Result<bool> {
        Self::authorize(caller, row, "delete")?;
        Ok(self.lock()?.rows.remove(row))
    }
}
