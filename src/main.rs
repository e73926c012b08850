use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use friend_suggest::config::Config;
use friend_suggest::data::{load_snapshot, save_snapshot};
use friend_suggest::session::Session;
use friend_suggest::storage::{MemoryStore, UserDirectory};
use friend_suggest::suggest::{top_n, PlaybackSignal, Player};
use friend_suggest::{viz, UserId};

#[derive(Parser, Debug)]
#[clap(
    name = "friend-suggest",
    about = "People-you-may-know suggestions ranked by mutual friends"
)]
struct Cli {
    /// Path to the JSON snapshot of users and friendships
    #[clap(long, default_value = "friends.json")]
    data: PathBuf,

    /// Optional JSON config file
    #[clap(long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank suggestions for a user
    Suggest {
        #[clap(long)]
        user: String,

        /// Number of suggestions to print
        #[clap(long)]
        top: Option<usize>,

        /// Load only the user's network instead of every friendship
        #[clap(long)]
        network: bool,
    },

    /// Befriend two users
    Add {
        #[clap(long)]
        user: String,

        #[clap(long)]
        friend: String,
    },

    /// Remove a friendship
    Remove {
        #[clap(long)]
        user: String,

        #[clap(long)]
        friend: String,
    },

    /// Replay the ranking step by step as JSON lines
    Narrate {
        #[clap(long)]
        user: String,

        /// Delay between steps in milliseconds
        #[clap(long)]
        step_ms: Option<u64>,
    },

    /// List every user in the snapshot
    Users,

    /// Export the user's network for a force-graph renderer
    Viz {
        #[clap(long)]
        user: String,

        #[clap(long, default_value = "network.json")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    let store = Arc::new(MemoryStore::from_snapshot(load_snapshot(&args.data)?));

    match args.command {
        Command::Suggest { user, top, network } => {
            if let Some(top) = top {
                config.top_n = top;
            }
            config.use_network_query |= network;

            let session = open_session(user, &store, config)?;
            let suggested = session.suggested_users();
            let shown: Vec<_> = suggested.into_iter().take(session.config().top_n).collect();
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }

        Command::Add { user, friend } => {
            let session = open_session(user, &store, config)?;
            let outcome = session.add_friend(&UserId::from(friend))?;
            log::info!("Add friendship: {:?}", outcome);
            save_snapshot(&store.snapshot()?, &args.data)?;
        }

        Command::Remove { user, friend } => {
            let session = open_session(user, &store, config)?;
            let outcome = session.remove_friend(&UserId::from(friend))?;
            log::info!("Remove friendship: {:?}", outcome);
            save_snapshot(&store.snapshot()?, &args.data)?;
        }

        Command::Narrate { user, step_ms } => {
            if let Some(step_ms) = step_ms {
                config.playback_step_ms = step_ms;
            }

            let session = open_session(user, &store, config)?;
            let narration = session.narrate();

            let mut player = Player::new();
            player.play(narration.events, session.config().playback_step(), |signal| {
                match signal {
                    PlaybackSignal::Event(event) => match serde_json::to_string(&event) {
                        Ok(line) => println!("{}", line),
                        Err(err) => log::error!("Could not encode event: {}", err),
                    },
                    PlaybackSignal::Finished => log::debug!("Playback finished"),
                    PlaybackSignal::Cleared => log::debug!("Playback cleared"),
                }
            });
            player.wait();

            let top = top_n(&narration.suggestions, session.config().top_n);
            log::info!("Narrated {} suggestions", top.len());
        }

        Command::Users => {
            let users = store.list_users()?;
            println!("{}", serde_json::to_string_pretty(&users)?);
        }

        Command::Viz { user, out } => {
            let session = open_session(user, &store, config)?;
            let view = session.view();
            let network = viz::network_view(
                &view.graph,
                session.requester(),
                &view.suggestions,
                &view.users,
            );
            viz::write_network_view(&network, &out)?;
        }
    }

    Ok(())
}

/// Build a session for `user` and load its first view
fn open_session(
    user: String,
    store: &Arc<MemoryStore>,
    config: Config,
) -> Result<Session<MemoryStore>> {
    let requester = UserId::from(user);
    if store.get_user(&requester)?.is_none() {
        return Err(friend_suggest::Error::UnknownUser(requester).into());
    }

    let session = Session::new(requester, Arc::clone(store), config);
    session.refresh()?;

    log::info!(
        "Loaded {} users and {} friendships",
        session.view().graph.user_count(),
        session.view().graph.edge_count()
    );

    Ok(session)
}
