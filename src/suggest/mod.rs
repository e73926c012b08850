//! Friend suggestion ranking and its presentation trace

pub mod narrator;
pub mod playback;
pub mod ranker;

pub use narrator::{narrate, Narration, NarrationEvent};
pub use playback::{PlaybackHandle, PlaybackSignal, Player};
pub use ranker::{rank, rank_traced, top_n, RankObserver};
