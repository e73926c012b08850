//! Per-requester view that reloads after every friendship change

use crate::config::Config;
use crate::error::{Error, Result};
use crate::graph::FriendshipGraph;
use crate::model::{SuggestedUser, Suggestion, User, UserId};
use crate::mutation::{MutationGateway, MutationOutcome};
use crate::storage::{FriendshipStore, UserDirectory};
use crate::suggest::{narrate, rank, Narration};
use dashmap::DashSet;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Last consistent picture of the requester's world
#[derive(Debug, Default)]
pub struct View {
    pub users: Vec<User>,
    pub graph: FriendshipGraph,
    pub suggestions: Vec<Suggestion>,
}

/// Host-side state for one authenticated requester.
///
/// Reads that fail leave the previous view in place. Mutations on the same
/// target are serialized by an in-flight guard and followed by a full reload.
pub struct Session<S: ?Sized> {
    requester: UserId,
    store: Arc<S>,
    gateway: MutationGateway<S>,
    config: Config,
    view: RwLock<Arc<View>>,
    in_flight: DashSet<UserId>,
}

/// Releases a target when the mutation completes
struct InFlight<'a> {
    targets: &'a DashSet<UserId>,
    target: UserId,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.targets.remove(&self.target);
    }
}

impl<S> Session<S>
where
    S: UserDirectory + FriendshipStore + ?Sized,
{
    /// Create a session with an empty view; call [`Session::refresh`] to load it
    pub fn new(requester: UserId, store: Arc<S>, config: Config) -> Self {
        Self {
            requester,
            gateway: MutationGateway::new(Arc::clone(&store)),
            store,
            config,
            view: RwLock::new(Arc::new(View::default())),
            in_flight: DashSet::new(),
        }
    }

    pub fn requester(&self) -> &UserId {
        &self.requester
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current view
    pub fn view(&self) -> Arc<View> {
        Arc::clone(&self.view.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.view().suggestions.clone()
    }

    /// Suggestions joined with directory profiles; ids missing from the roster are skipped
    pub fn suggested_users(&self) -> Vec<SuggestedUser> {
        let view = self.view();
        let by_id: HashMap<&UserId, &User> = view.users.iter().map(|u| (&u.id, u)).collect();

        view.suggestions
            .iter()
            .filter_map(|s| {
                by_id.get(&s.user_id).map(|&user| SuggestedUser {
                    user: user.clone(),
                    mutual_count: s.mutual_count,
                })
            })
            .collect()
    }

    /// Reload roster and friendships, then rerank
    pub fn refresh(&self) -> Result<Arc<View>> {
        let loaded = self.load();
        let view = match loaded {
            Ok(view) => Arc::new(view),
            Err(err) => {
                log::warn!(
                    "Refresh for {} failed, keeping previous view: {}",
                    self.requester,
                    err
                );
                return Err(err);
            }
        };

        *self.view.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&view);
        Ok(view)
    }

    fn load(&self) -> Result<View> {
        let users = self.store.list_users()?;
        let edges = if self.config.use_network_query {
            self.store.network_edges(&self.requester, &self.requester)?
        } else {
            self.store.list_all_edges()?
        };

        let graph = FriendshipGraph::from_users_and_edges(&users, &edges);
        let suggestions = rank(&graph, &self.requester);

        log::info!("{} has {} suggestions", self.requester, suggestions.len());

        Ok(View {
            users,
            graph,
            suggestions,
        })
    }

    /// Befriend `target`, then reload. The target must exist in the directory.
    pub fn add_friend(&self, target: &UserId) -> Result<MutationOutcome> {
        if self.store.get_user(target)?.is_none() {
            return Err(Error::UnknownUser(target.clone()));
        }

        let _guard = self.claim(target)?;
        let outcome = self.gateway.add_friendship(&self.requester, target)?;
        self.refresh()?;
        Ok(outcome)
    }

    /// Unfriend `target`, then reload
    pub fn remove_friend(&self, target: &UserId) -> Result<MutationOutcome> {
        let _guard = self.claim(target)?;
        let outcome = self.gateway.remove_friendship(&self.requester, target)?;
        self.refresh()?;
        Ok(outcome)
    }

    /// Record the current ranking as a playable trace
    pub fn narrate(&self) -> Narration {
        narrate(&self.view().graph, &self.requester, self.config.top_n)
    }

    fn claim(&self, target: &UserId) -> Result<InFlight<'_>> {
        if !self.in_flight.insert(target.clone()) {
            return Err(Error::MutationInFlight(target.clone()));
        }
        Ok(InFlight {
            targets: &self.in_flight,
            target: target.clone(),
        })
    }
}
