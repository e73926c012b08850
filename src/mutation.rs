//! Friendship writes as mirrored row pairs

use crate::error::{Error, Result};
use crate::model::{FriendshipRow, UserId};
use crate::storage::{FriendshipStore, RowInsert};
use std::sync::Arc;

/// Whether a mutation changed any stored row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    Unchanged,
}

/// Applies add/remove friendship requests to a store.
///
/// Each friendship is two directed rows. Both are written or neither is: when
/// the second write fails, the first is undone before the error is returned.
pub struct MutationGateway<S: ?Sized> {
    store: Arc<S>,
}

impl<S: FriendshipStore + ?Sized> MutationGateway<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Befriend `a` (the acting, authenticated user) and `b`.
    /// Re-adding an existing friendship succeeds without changes.
    pub fn add_friendship(&self, a: &UserId, b: &UserId) -> Result<MutationOutcome> {
        if a == b {
            return Err(Error::InvalidOperation(format!(
                "{} cannot befriend themselves",
                a
            )));
        }

        let forward = FriendshipRow::new(a.clone(), b.clone());
        let mirror = forward.reversed();

        let forward_insert = self.store.insert_row(a, &forward)?;
        let mirror_insert = match self.store.insert_row(a, &mirror) {
            Ok(outcome) => outcome,
            Err(err) => {
                if forward_insert == RowInsert::Inserted {
                    self.undo(a, "insert", || self.store.delete_row(a, &forward).map(|_| ()));
                }
                return Err(err);
            }
        };

        let outcome = if forward_insert == RowInsert::Inserted
            || mirror_insert == RowInsert::Inserted
        {
            MutationOutcome::Applied
        } else {
            MutationOutcome::Unchanged
        };

        log::info!("Friendship {} <-> {}: {:?}", a, b, outcome);

        Ok(outcome)
    }

    /// Remove the friendship between `a` (the acting user) and `b`, whichever
    /// side created it. A missing friendship is not an error.
    pub fn remove_friendship(&self, a: &UserId, b: &UserId) -> Result<MutationOutcome> {
        let forward = FriendshipRow::new(a.clone(), b.clone());
        let mirror = forward.reversed();

        let forward_removed = self.store.delete_row(a, &forward)?;
        let mirror_removed = match self.store.delete_row(a, &mirror) {
            Ok(removed) => removed,
            Err(err) => {
                if forward_removed {
                    self.undo(a, "delete", || self.store.insert_row(a, &forward).map(|_| ()));
                }
                return Err(err);
            }
        };

        let outcome = if forward_removed || mirror_removed {
            MutationOutcome::Applied
        } else {
            MutationOutcome::Unchanged
        };

        log::info!("Unfriend {} <-> {}: {:?}", a, b, outcome);

        Ok(outcome)
    }

    fn undo(&self, caller: &UserId, action: &str, compensate: impl FnOnce() -> Result<()>) {
        if let Err(err) = compensate() {
            log::error!(
                "Could not roll back half-applied {} by {}: {}",
                action,
                caller,
                err
            );
        }
    }
}
