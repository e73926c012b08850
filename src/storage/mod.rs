//! Contracts for the user directory and friendship store

pub mod memory;

pub use memory::MemoryStore;

use crate::error::{Error, Result};
use crate::graph::FriendshipGraph;
use crate::model::{Edge, FriendshipRow, User, UserId};

/// Outcome of writing one directed friendship row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowInsert {
    Inserted,
    AlreadyExists,
}

/// Read access to user profiles
pub trait UserDirectory: Send + Sync {
    fn list_users(&self) -> Result<Vec<User>>;

    fn get_user(&self, id: &UserId) -> Result<Option<User>>;
}

/// Persistent friendship rows.
///
/// Implementations enforce their own authorization: a caller may only write
/// rows it is a party to, and self rows are refused.
pub trait FriendshipStore: Send + Sync {
    /// Every friendship as a canonical, deduplicated edge
    fn list_all_edges(&self) -> Result<Vec<Edge>>;

    fn insert_row(&self, caller: &UserId, row: &FriendshipRow) -> Result<RowInsert>;

    /// Returns whether a row was removed
    fn delete_row(&self, caller: &UserId, row: &FriendshipRow) -> Result<bool>;

    /// First- and second-degree friendships of `requester` in one call.
    /// Only the requester may read their own network.
    fn network_edges(&self, caller: &UserId, requester: &UserId) -> Result<Vec<Edge>> {
        if caller != requester {
            return Err(Error::NotAuthorized {
                caller: caller.clone(),
                action: format!("read the network of {}", requester),
            });
        }

        let edges = self.list_all_edges()?;
        Ok(FriendshipGraph::build(&edges).network_subgraph(requester))
    }
}
