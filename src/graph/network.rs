//! Neighborhood extraction around a single user

use crate::graph::FriendshipGraph;
use crate::model::{Edge, UserId};
use std::collections::BTreeSet;

impl FriendshipGraph {
    /// Every friendship incident to the requester or to one of the requester's
    /// direct friends. Enough to rank the requester without the full edge list.
    pub fn network_subgraph(&self, requester: &UserId) -> Vec<Edge> {
        let Some(root) = self.index_of(requester) else {
            return Vec::new();
        };

        let mut edges = BTreeSet::new();
        for &friend in self.adjacent(root) {
            edges.insert(Edge::new(requester.clone(), self.user_at(friend).clone()));

            for &next in self.adjacent(friend) {
                edges.insert(Edge::new(
                    self.user_at(friend).clone(),
                    self.user_at(next).clone(),
                ));
            }
        }

        log::debug!("Network of {} spans {} friendships", requester, edges.len());

        edges.into_iter().collect()
    }
}
