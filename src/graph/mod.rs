//! Friendship graph representation and queries

pub mod builder;
pub mod compressed;
pub mod network;

pub use builder::GraphBuilder;
pub use compressed::FriendshipGraph;
