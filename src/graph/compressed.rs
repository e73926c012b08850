//! Memory-efficient undirected friendship graph

use crate::model::UserId;
use std::collections::{BTreeSet, HashMap};

/// Compressed sparse representation of the undirected friendship graph.
///
/// Every friendship appears twice in `neighbors`, once in each endpoint's range.
/// Ranges are sorted and free of duplicates and self-loops.
#[derive(Debug, Clone, Default)]
pub struct FriendshipGraph {
    /// Offset array: neighbors of node i live in offsets[i]..offsets[i+1]
    pub(crate) offsets: Vec<u32>,

    /// Concatenated neighbor lists
    pub(crate) neighbors: Vec<u32>,

    /// Node index to user id
    pub(crate) user_ids: Vec<UserId>,

    /// User id to node index
    pub(crate) index: HashMap<UserId, u32>,
}

impl FriendshipGraph {
    /// Number of users known to the graph, isolated ones included
    pub fn user_count(&self) -> usize {
        self.user_ids.len()
    }

    /// Number of undirected friendships
    pub fn edge_count(&self) -> usize {
        self.neighbors.len() / 2
    }

    pub fn contains(&self, user: &UserId) -> bool {
        self.index.contains_key(user)
    }

    pub(crate) fn index_of(&self, user: &UserId) -> Option<u32> {
        self.index.get(user).copied()
    }

    pub(crate) fn user_at(&self, node: u32) -> &UserId {
        &self.user_ids[node as usize]
    }

    /// Neighbor indices of a node
    pub(crate) fn adjacent(&self, node: u32) -> &[u32] {
        let start = self.offsets[node as usize] as usize;
        let end = self.offsets[node as usize + 1] as usize;
        &self.neighbors[start..end]
    }

    /// Direct friends of a user; empty when the user is unknown or isolated
    pub fn neighbors_of(&self, user: &UserId) -> BTreeSet<UserId> {
        match self.index_of(user) {
            Some(node) => self
                .adjacent(node)
                .iter()
                .map(|&n| self.user_at(n).clone())
                .collect(),
            None => BTreeSet::new(),
        }
    }

    pub fn degree(&self, user: &UserId) -> usize {
        self.index_of(user).map_or(0, |node| self.adjacent(node).len())
    }

    /// Check whether two users are direct friends
    pub fn are_friends(&self, a: &UserId, b: &UserId) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(a), Some(b)) => self.adjacent(a).binary_search(&b).is_ok(),
            _ => false,
        }
    }
}
