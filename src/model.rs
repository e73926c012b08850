//! Users, friendship edges and suggestion records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque user identifier issued by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Directory profile for a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Undirected friendship, stored as (min, max)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Edge {
    low: UserId,
    high: UserId,
}

impl Edge {
    pub fn new(a: impl Into<UserId>, b: impl Into<UserId>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn endpoints(&self) -> (&UserId, &UserId) {
        (&self.low, &self.high)
    }

    pub fn is_self_loop(&self) -> bool {
        self.low == self.high
    }

    /// The two directed rows the backing store keeps for this edge
    pub fn rows(&self) -> [FriendshipRow; 2] {
        [
            FriendshipRow::new(self.low.clone(), self.high.clone()),
            FriendshipRow::new(self.high.clone(), self.low.clone()),
        ]
    }
}

/// One physical, directed row in the friendship table
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FriendshipRow {
    pub user_id: UserId,
    pub friend_id: UserId,
}

impl FriendshipRow {
    pub fn new(user_id: impl Into<UserId>, friend_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            friend_id: friend_id.into(),
        }
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.friend_id.clone(), self.user_id.clone())
    }

    pub fn edge(&self) -> Edge {
        Edge::new(self.user_id.clone(), self.friend_id.clone())
    }

    pub fn involves(&self, user: &UserId) -> bool {
        &self.user_id == user || &self.friend_id == user
    }
}

/// A second-degree contact and the number of friends shared with the requester
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub user_id: UserId,
    pub mutual_count: u32,
}

/// Suggestion joined with the candidate's directory profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestedUser {
    #[serde(flatten)]
    pub user: User,
    pub mutual_count: u32,
}
