use std::sync::Arc;

use friend_suggest::data::{load_snapshot, save_snapshot, Snapshot};
use friend_suggest::mutation::{MutationGateway, MutationOutcome};
use friend_suggest::storage::{FriendshipStore, MemoryStore};
use friend_suggest::suggest::{narrate, rank, NarrationEvent};
use friend_suggest::{Edge, Error, FriendshipGraph, Suggestion, User, UserId};

fn edges(pairs: &[(&str, &str)]) -> Vec<Edge> {
    pairs.iter().map(|&(a, b)| Edge::new(a, b)).collect()
}

fn suggestion(id: &str, mutual_count: u32) -> Suggestion {
    Suggestion {
        user_id: id.into(),
        mutual_count,
    }
}

fn rebuilt(store: &MemoryStore) -> FriendshipGraph {
    FriendshipGraph::build(&store.list_all_edges().unwrap())
}

#[test]
fn one_path_through_a_friend() {
    let graph = FriendshipGraph::build(&edges(&[("1", "2"), ("2", "3"), ("1", "4")]));
    assert_eq!(rank(&graph, &"1".into()), vec![suggestion("3", 1)]);
}

#[test]
fn shared_candidate_counts_both_friends() {
    let graph = FriendshipGraph::build(&edges(&[("1", "2"), ("1", "3"), ("2", "4"), ("3", "4")]));
    assert_eq!(rank(&graph, &"1".into()), vec![suggestion("4", 2)]);
}

#[test]
fn user_without_friends_gets_no_suggestions() {
    let graph = FriendshipGraph::build(&edges(&[("2", "3"), ("3", "4")]));
    assert!(rank(&graph, &"1".into()).is_empty());
}

#[test]
fn gateway_round_trip_through_the_store() {
    let store = Arc::new(MemoryStore::new());
    let gateway = MutationGateway::new(Arc::clone(&store));
    let (a, b): (UserId, UserId) = ("a".into(), "b".into());

    gateway.add_friendship(&a, &b).unwrap();
    let once = rebuilt(&store);
    assert!(once.neighbors_of(&a).contains(&b));
    assert!(once.neighbors_of(&b).contains(&a));

    gateway.add_friendship(&a, &b).unwrap();
    let twice = rebuilt(&store);
    assert_eq!(once.neighbors_of(&a), twice.neighbors_of(&a));
    assert_eq!(twice.edge_count(), 1);

    assert_eq!(
        gateway.remove_friendship(&a, &"z".into()).unwrap(),
        MutationOutcome::Unchanged
    );
    assert_eq!(rebuilt(&store).edge_count(), 1);

    let err = gateway.add_friendship(&a, &a).unwrap_err();
    assert!(matches!(err, Error::InvalidOperation(_)));
    assert_eq!(rebuilt(&store).edge_count(), 1);
}

#[test]
fn one_sided_rows_still_read_as_friendship() {
    // Storage may hold a single orientation; reads are directionless
    let store = MemoryStore::from_snapshot(Snapshot {
        users: Vec::new(),
        friendships: vec![friend_suggest::FriendshipRow::new("2", "1")],
    });
    let graph = rebuilt(&store);

    assert!(graph.are_friends(&"1".into(), &"2".into()));
    assert!(graph.are_friends(&"2".into(), &"1".into()));
}

#[test]
fn snapshot_file_survives_a_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("friends.json");
    let users = ["1", "2", "3"]
        .iter()
        .map(|&id| User {
            id: id.into(),
            name: format!("User {}", id),
            email: format!("{}@example.com", id),
            bio: None,
        })
        .collect();
    save_snapshot(
        &Snapshot {
            users,
            friendships: Edge::new("1", "2").rows().to_vec(),
        },
        &path,
    )
    .unwrap();

    let store = Arc::new(MemoryStore::from_snapshot(load_snapshot(&path).unwrap()));
    MutationGateway::new(Arc::clone(&store))
        .add_friendship(&"2".into(), &"3".into())
        .unwrap();
    save_snapshot(&store.snapshot().unwrap(), &path).unwrap();

    let reloaded = MemoryStore::from_snapshot(load_snapshot(&path).unwrap());
    assert_eq!(
        rank(&rebuilt(&reloaded), &"1".into()),
        vec![suggestion("3", 1)]
    );
}

#[test]
fn narration_summary_matches_ranking() {
    let graph = FriendshipGraph::build(&edges(&[
        ("1", "2"),
        ("1", "3"),
        ("2", "4"),
        ("3", "4"),
        ("3", "5"),
        ("2", "6"),
    ]));
    let narration = narrate(&graph, &"1".into(), 2);

    assert_eq!(narration.suggestions, rank(&graph, &"1".into()));
    assert_eq!(
        narration.events.last(),
        Some(&NarrationEvent::Complete {
            top: vec![suggestion("4", 2), suggestion("5", 1)],
        })
    );
}
