//! Mutual-friend suggestion ranking

use crate::graph::FriendshipGraph;
use crate::model::{Suggestion, UserId};
use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Receives each step of a ranking pass. All methods default to no-ops.
pub trait RankObserver {
    /// A direct friend is about to be expanded
    fn visit_start(&mut self, _friend: &UserId) {}

    /// `from` has `count` neighbors to examine
    fn check(&mut self, _from: &UserId, _count: usize) {}

    /// A candidate's mutual counter was incremented to `running`
    fn found(&mut self, _candidate: &UserId, _running: u32) {}
}

/// Observer that ignores every step
pub struct Silent;

impl RankObserver for Silent {}

/// Rank second-degree contacts of `requester` by mutual-friend count.
///
/// Ties are broken by ascending user id. An unknown or friendless requester
/// yields an empty list.
pub fn rank(graph: &FriendshipGraph, requester: &UserId) -> Vec<Suggestion> {
    rank_traced(graph, requester, &mut Silent)
}

/// Same as [`rank`], reporting every step to `observer`
pub fn rank_traced<O: RankObserver + ?Sized>(
    graph: &FriendshipGraph,
    requester: &UserId,
    observer: &mut O,
) -> Vec<Suggestion> {
    let Some(root) = graph.index_of(requester) else {
        log::debug!("Requester {} not in graph, nothing to rank", requester);
        return Vec::new();
    };

    let direct_friends = graph.adjacent(root);
    if direct_friends.is_empty() {
        return Vec::new();
    }

    let mut mutual_counts: HashMap<u32, u32> = HashMap::new();

    for &friend in direct_friends {
        let friend_id = graph.user_at(friend);
        let candidates = graph.adjacent(friend);
        observer.visit_start(friend_id);
        observer.check(friend_id, candidates.len());

        for &candidate in candidates {
            // Neighbor lists are sorted, so membership is a binary search
            if candidate == root || direct_friends.binary_search(&candidate).is_ok() {
                continue;
            }

            let counter = mutual_counts.entry(candidate).or_insert(0);
            *counter += 1;
            observer.found(graph.user_at(candidate), *counter);
        }
    }

    let suggestions: Vec<Suggestion> = mutual_counts
        .into_iter()
        .map(|(node, mutual_count)| Suggestion {
            user_id: graph.user_at(node).clone(),
            mutual_count,
        })
        .sorted_by(by_mutual_count_then_id)
        .collect();

    log::debug!(
        "Ranked {} suggestions for {} from {} direct friends",
        suggestions.len(),
        requester,
        direct_friends.len()
    );

    suggestions
}

/// Descending mutual count, then ascending user id
pub fn by_mutual_count_then_id(a: &Suggestion, b: &Suggestion) -> Ordering {
    b.mutual_count
        .cmp(&a.mutual_count)
        .then_with(|| a.user_id.cmp(&b.user_id))
}

/// Keep at most `n` of the best suggestions
pub fn top_n(suggestions: &[Suggestion], n: usize) -> Vec<Suggestion> {
    suggestions.iter().take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Edge;
    use std::collections::BTreeSet;

    fn suggestion(id: &str, mutual_count: u32) -> Suggestion {
        Suggestion {
            user_id: id.into(),
            mutual_count,
        }
    }

    fn graph(pairs: &[(&str, &str)]) -> FriendshipGraph {
        let edges: Vec<Edge> = pairs.iter().map(|&(a, b)| Edge::new(a, b)).collect();
        FriendshipGraph::build(&edges)
    }

    #[test]
    fn single_path_candidate() {
        let g = graph(&[("1", "2"), ("2", "3"), ("1", "4")]);
        assert_eq!(rank(&g, &"1".into()), vec![suggestion("3", 1)]);
    }

    #[test]
    fn candidate_reached_through_two_friends() {
        let g = graph(&[("1", "2"), ("1", "3"), ("2", "4"), ("3", "4")]);
        assert_eq!(rank(&g, &"1".into()), vec![suggestion("4", 2)]);
    }

    #[test]
    fn friendless_requester_gets_nothing() {
        let g = graph(&[("2", "3")]);
        assert!(rank(&g, &"1".into()).is_empty());
    }

    #[test]
    fn ties_break_by_ascending_id() {
        let g = graph(&[
            ("me", "f1"),
            ("me", "f2"),
            ("f1", "zed"),
            ("f1", "amy"),
            ("f2", "bob"),
            ("f2", "amy"),
            ("f1", "kim"),
        ]);

        assert_eq!(
            rank(&g, &"me".into()),
            vec![
                suggestion("amy", 2),
                suggestion("bob", 1),
                suggestion("kim", 1),
                suggestion("zed", 1),
            ]
        );
    }

    #[test]
    fn order_does_not_depend_on_edge_order() {
        let pairs = [("1", "2"), ("1", "3"), ("2", "5"), ("3", "4"), ("2", "6")];
        let mut reversed = pairs;
        reversed.reverse();

        assert_eq!(rank(&graph(&pairs), &"1".into()), rank(&graph(&reversed), &"1".into()));
    }

    #[test]
    fn results_exclude_requester_and_direct_friends_and_count_intersections() {
        // Triangle 1-2-3 plus outer ring, so friends are also friends of friends
        let g = graph(&[
            ("1", "2"),
            ("1", "3"),
            ("2", "3"),
            ("2", "4"),
            ("3", "4"),
            ("3", "5"),
            ("4", "5"),
            ("5", "6"),
        ]);
        let requester: UserId = "1".into();
        let direct = g.neighbors_of(&requester);
        let ranked = rank(&g, &requester);

        assert!(!ranked.is_empty());
        for s in &ranked {
            assert_ne!(s.user_id, requester);
            assert!(!direct.contains(&s.user_id));
            let shared: BTreeSet<_> = g
                .neighbors_of(&s.user_id)
                .intersection(&direct)
                .cloned()
                .collect();
            assert_eq!(s.mutual_count as usize, shared.len());
        }
        for pair in ranked.windows(2) {
            assert_ne!(by_mutual_count_then_id(&pair[0], &pair[1]), Ordering::Greater);
        }
    }

    #[test]
    fn observer_sees_each_step() {
        #[derive(Default)]
        struct Counter {
            visits: usize,
            checked: usize,
            found: usize,
        }
        impl RankObserver for Counter {
            fn visit_start(&mut self, _: &UserId) {
                self.visits += 1;
            }
            fn check(&mut self, _: &UserId, count: usize) {
                self.checked += count;
            }
            fn found(&mut self, _: &UserId, _: u32) {
                self.found += 1;
            }
        }

        let g = graph(&[("1", "2"), ("1", "3"), ("2", "4"), ("3", "4")]);
        let mut counter = Counter::default();
        let traced = rank_traced(&g, &"1".into(), &mut counter);

        assert_eq!(traced, rank(&g, &"1".into()));
        assert_eq!(counter.visits, 2);
        // Each friend sees the requester and user 4
        assert_eq!(counter.checked, 4);
        assert_eq!(counter.found, 2);
    }

    #[test]
    fn top_n_truncates() {
        let all = vec![suggestion("a", 3), suggestion("b", 2), suggestion("c", 1)];
        assert_eq!(top_n(&all, 2), all[..2].to_vec());
        assert_eq!(top_n(&all, 10), all);
    }
}
