//! Network export for the external force-directed renderer

use anyhow::Result;
use crate::graph::FriendshipGraph;
use crate::model::{Suggestion, User, UserId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Role of a node relative to the requester
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeGroup {
    Requester,
    Friend,
    /// Any second-degree user; each one is a ranking candidate
    Suggestion,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewNode {
    pub id: UserId,
    pub name: String,
    pub group: NodeGroup,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutual_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewLink {
    pub source: UserId,
    pub target: UserId,
}

/// Nodes and links in the shape force-graph renderers consume
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkView {
    pub nodes: Vec<ViewNode>,
    pub links: Vec<ViewLink>,
}

/// Build the requester's two-hop network, tagging each node with its role
pub fn network_view(
    graph: &FriendshipGraph,
    requester: &UserId,
    suggestions: &[Suggestion],
    users: &[User],
) -> NetworkView {
    let names: HashMap<&UserId, &str> = users
        .iter()
        .map(|u| (&u.id, u.name.as_str()))
        .collect();
    let mutuals: HashMap<&UserId, u32> = suggestions
        .iter()
        .map(|s| (&s.user_id, s.mutual_count))
        .collect();
    let friends = graph.neighbors_of(requester);

    let edges = graph.network_subgraph(requester);
    let mut nodes: BTreeMap<UserId, NodeGroup> = BTreeMap::new();
    nodes.insert(requester.clone(), NodeGroup::Requester);

    let mut links = Vec::with_capacity(edges.len());
    for edge in &edges {
        let (a, b) = edge.endpoints();
        for id in [a, b] {
            nodes.entry(id.clone()).or_insert_with(|| {
                if friends.contains(id) {
                    NodeGroup::Friend
                } else {
                    NodeGroup::Suggestion
                }
            });
        }
        links.push(ViewLink {
            source: a.clone(),
            target: b.clone(),
        });
    }

    let nodes = nodes
        .into_iter()
        .map(|(id, group)| ViewNode {
            name: names.get(&id).map_or_else(|| id.to_string(), |n| n.to_string()),
            mutual_count: mutuals.get(&id).copied(),
            id,
            group,
        })
        .collect();

    NetworkView { nodes, links }
}

/// Save a network view as pretty JSON
pub fn write_network_view(view: &NetworkView, path: &Path) -> Result<()> {
    log::info!(
        "Writing network view with {} nodes and {} links to {}",
        view.nodes.len(),
        view.links.len(),
        path.display()
    );

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(view)?.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Edge;
    use crate::suggest::rank;

    #[test]
    fn nodes_are_grouped_by_role() {
        let graph = FriendshipGraph::build(&[
            Edge::new("1", "2"),
            Edge::new("2", "3"),
            Edge::new("3", "9"),
        ]);
        let suggestions = rank(&graph, &"1".into());
        let users = vec![User {
            id: "3".into(),
            name: "Carol".into(),
            email: "carol@example.com".into(),
            bio: None,
        }];

        let view = network_view(&graph, &"1".into(), &suggestions, &users);
        let groups: Vec<(&str, NodeGroup)> =
            view.nodes.iter().map(|n| (n.id.as_str(), n.group)).collect();

        assert_eq!(
            groups,
            vec![
                ("1", NodeGroup::Requester),
                ("2", NodeGroup::Friend),
                ("3", NodeGroup::Suggestion),
            ]
        );
        assert_eq!(view.nodes[2].name, "Carol");
        assert_eq!(view.nodes[2].mutual_count, Some(1));
        assert_eq!(view.nodes[1].name, "2");
        assert_eq!(view.links.len(), 2);
    }

    #[test]
    fn truncated_suggestions_still_group_second_degree_nodes() {
        let graph = FriendshipGraph::build(&[
            Edge::new("1", "2"),
            Edge::new("2", "3"),
            Edge::new("2", "4"),
        ]);
        let top = crate::suggest::top_n(&rank(&graph, &"1".into()), 1);

        let view = network_view(&graph, &"1".into(), &top, &[]);
        let fourth = view.nodes.iter().find(|n| n.id.as_str() == "4").unwrap();

        assert_eq!(fourth.group, NodeGroup::Suggestion);
        assert_eq!(fourth.mutual_count, None);
    }

    #[test]
    fn written_view_is_force_graph_json() {
        let graph = FriendshipGraph::build(&[Edge::new("1", "2")]);
        let view = network_view(&graph, &"1".into(), &[], &[]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viz").join("network.json");

        write_network_view(&view, &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["nodes"][0]["group"], "requester");
        assert_eq!(json["links"][0]["source"], "1");
        assert_eq!(json["links"][0]["target"], "2");
    }
}
