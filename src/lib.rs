//! Core library for the friend suggestion engine

pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod model;
pub mod mutation;
pub mod session;
pub mod storage;
pub mod suggest;
pub mod viz;

pub use error::{Error, Result};
pub use graph::FriendshipGraph;
pub use model::{Edge, FriendshipRow, Suggestion, User, UserId};
