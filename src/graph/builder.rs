//! Graph construction module

use crate::graph::FriendshipGraph;
use crate::model::{Edge, User, UserId};
use std::collections::HashMap;

/// Builder for incrementally constructing a FriendshipGraph
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Mapping from user ids to node indices
    id_to_index: HashMap<UserId, u32>,

    /// Node user ids, in interning order
    user_ids: Vec<UserId>,

    /// Adjacency lists for each node, possibly with duplicates until build
    adjacency_lists: Vec<Vec<u32>>,

    skipped_self_edges: usize,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            user_ids: Vec::with_capacity(capacity),
            adjacency_lists: Vec::with_capacity(capacity),
            skipped_self_edges: 0,
        }
    }

    /// Get or create the node index for a user
    pub fn get_or_create_node(&mut self, id: &UserId) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.user_ids.len() as u32;
        self.id_to_index.insert(id.clone(), idx);
        self.user_ids.push(id.clone());
        self.adjacency_lists.push(Vec::new());

        idx
    }

    /// Register every user of a roster, so isolated users are still known
    pub fn add_users<'a>(&mut self, users: impl IntoIterator<Item = &'a User>) {
        for user in users {
            self.get_or_create_node(&user.id);
        }
    }

    /// Add an undirected edge; self-edges are dropped
    pub fn add_edge(&mut self, edge: &Edge) {
        let (a, b) = edge.endpoints();
        if edge.is_self_loop() {
            log::debug!("Skipping self-friendship for {}", a);
            self.skipped_self_edges += 1;
            return;
        }

        let a_idx = self.get_or_create_node(a);
        let b_idx = self.get_or_create_node(b);

        self.adjacency_lists[a_idx as usize].push(b_idx);
        self.adjacency_lists[b_idx as usize].push(a_idx);
    }

    /// Build the compressed graph
    pub fn build(mut self) -> FriendshipGraph {
        let mut offsets = Vec::with_capacity(self.adjacency_lists.len() + 1);
        offsets.push(0);

        let mut offset = 0;
        for list in &mut self.adjacency_lists {
            // Sorted for binary search, deduped so reverse duplicates collapse
            list.sort_unstable();
            list.dedup();
            offset += list.len() as u32;
            offsets.push(offset);
        }

        let mut neighbors = Vec::with_capacity(offset as usize);
        for list in &self.adjacency_lists {
            neighbors.extend_from_slice(list);
        }

        if self.skipped_self_edges > 0 {
            log::debug!("Dropped {} self-edges", self.skipped_self_edges);
        }

        FriendshipGraph {
            offsets,
            neighbors,
            user_ids: self.user_ids,
            index: self.id_to_index,
        }
    }
}

impl FriendshipGraph {
    /// Build a graph from a flat edge list. Never fails: duplicates collapse and
    /// self-edges are ignored.
    pub fn build<'a>(edges: impl IntoIterator<Item = &'a Edge>) -> Self {
        let mut builder = GraphBuilder::default();
        for edge in edges {
            builder.add_edge(edge);
        }
        builder.build()
    }

    /// Build a graph that also knows about users without any friendships
    pub fn from_users_and_edges(users: &[User], edges: &[Edge]) -> Self {
        let mut builder = GraphBuilder::with_capacity(users.len());
        builder.add_users(users);
        for edge in edges {
            builder.add_edge(edge);
        }
        let graph = builder.build();

        log::info!(
            "Built friendship graph with {} users and {} friendships",
            graph.user_count(),
            graph.edge_count()
        );

        graph
    }
}
