//! Recorded trace of a ranking pass, for step-by-step presentation

use crate::graph::FriendshipGraph;
use crate::model::{Suggestion, UserId};
use crate::suggest::ranker::{rank_traced, top_n, RankObserver};
use serde::{Deserialize, Serialize};

/// One observable step of the suggestion computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NarrationEvent {
    VisitStart {
        user_id: UserId,
    },
    Check {
        from: UserId,
        count: usize,
    },
    Found {
        candidate: UserId,
        running_mutual_count: u32,
    },
    Complete {
        top: Vec<Suggestion>,
    },
}

/// Ranking result together with the trace that produced it
#[derive(Debug, Clone)]
pub struct Narration {
    pub events: Vec<NarrationEvent>,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Default)]
struct Recorder {
    events: Vec<NarrationEvent>,
}

impl RankObserver for Recorder {
    fn visit_start(&mut self, friend: &UserId) {
        self.events.push(NarrationEvent::VisitStart {
            user_id: friend.clone(),
        });
    }

    fn check(&mut self, from: &UserId, count: usize) {
        self.events.push(NarrationEvent::Check {
            from: from.clone(),
            count,
        });
    }

    fn found(&mut self, candidate: &UserId, running: u32) {
        self.events.push(NarrationEvent::Found {
            candidate: candidate.clone(),
            running_mutual_count: running,
        });
    }
}

/// Rank `requester` once while recording every step. The suggestions are
/// identical to [`crate::suggest::rank`].
pub fn narrate(graph: &FriendshipGraph, requester: &UserId, top: usize) -> Narration {
    let mut recorder = Recorder::default();
    let suggestions = rank_traced(graph, requester, &mut recorder);

    let mut events = recorder.events;
    events.push(NarrationEvent::Complete {
        top: top_n(&suggestions, top),
    });

    Narration {
        events,
        suggestions,
    }
}
