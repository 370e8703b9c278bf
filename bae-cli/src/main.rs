use bae_common::{Indexes, IndexesUpdate};
use bae_indexes::config::Config;
use bae_indexes::subsonic_client::SubsonicClient;
use bae_indexes::{
    IndexesError, IndexesParser, MemoryPreferences, PreferencesStore, YamlPreferences,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

/// Fetch and print the artist index of a Subsonic server.
#[derive(Parser)]
#[command(name = "bae-indexes")]
struct Args {
    /// Server base URL, e.g. http://localhost:4533.
    /// Falls back to the bae config when omitted.
    #[arg(long, env = "BAE_SUBSONIC_URL")]
    server_url: Option<String>,

    #[arg(long, env = "BAE_SUBSONIC_USERNAME")]
    username: Option<String>,

    #[arg(long, env = "BAE_SUBSONIC_PASSWORD")]
    password: Option<String>,

    /// Where to store the server's ignored articles.
    #[arg(long, env = "BAE_PREFERENCES_PATH")]
    preferences_path: Option<PathBuf>,

    /// Only list this music folder.
    #[arg(long)]
    music_folder: Option<String>,

    /// Skip the index if nothing changed since this time (ms since epoch).
    #[arg(long)]
    if_modified_since: Option<u64>,

    /// Use the ID3-based getArtists endpoint instead of getIndexes.
    #[arg(long)]
    id3: bool,

    /// Do not write preferences to disk.
    #[arg(long)]
    dry_run: bool,
}

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Command-line values win; anything missing comes from the bae config.
fn resolve_config(args: &Args) -> Config {
    if let (Some(server_url), Some(username), Some(password)) =
        (&args.server_url, &args.username, &args.password)
    {
        let preferences_path = args.preferences_path.clone().unwrap_or_else(|| {
            bae_indexes::config::bae_dir()
                .map(|dir| dir.join("preferences.yaml"))
                .unwrap_or_else(|e| {
                    error!("{e}");
                    std::process::exit(1);
                })
        });
        return Config {
            server_url: server_url.clone(),
            username: username.clone(),
            password: password.clone(),
            preferences_path,
        };
    }

    let mut config = Config::load().unwrap_or_else(|e| {
        error!("Failed to load config: {e}");
        error!("Pass --server-url, --username and --password, or create ~/.bae/subsonic.yaml");
        std::process::exit(1);
    });
    if let Some(url) = &args.server_url {
        config.server_url = url.clone();
    }
    if let Some(username) = &args.username {
        config.username = username.clone();
    }
    if let Some(password) = &args.password {
        config.password = password.clone();
    }
    if let Some(path) = &args.preferences_path {
        config.preferences_path = path.clone();
    }
    config
}

async fn fetch<P: PreferencesStore>(
    client: &SubsonicClient,
    parser: &IndexesParser<P>,
    args: &Args,
) -> Result<IndexesUpdate, IndexesError> {
    let progress = |message: &str| info!("{message}");
    if args.id3 {
        client
            .get_artists(parser, args.music_folder.as_deref(), &progress)
            .await
    } else {
        client
            .get_indexes(
                parser,
                args.music_folder.as_deref(),
                args.if_modified_since,
                &progress,
            )
            .await
    }
}

fn print_indexes(indexes: &Indexes) {
    if !indexes.shortcuts.is_empty() {
        println!("Shortcuts");
        for shortcut in &indexes.shortcuts {
            println!(
                "  {}  [{}]",
                shortcut.name.as_deref().unwrap_or("?"),
                shortcut.id.as_deref().unwrap_or("-")
            );
        }
    }

    for label in indexes.index_labels() {
        println!("{label}");
        for artist in indexes.artists_in(label) {
            println!(
                "  {}  [{}]",
                artist.name.as_deref().unwrap_or("?"),
                artist.id.as_deref().unwrap_or("-")
            );
        }
    }

    if !indexes.entries.is_empty() {
        println!("Entries");
        for entry in &indexes.entries {
            println!(
                "  {}  [{}]",
                entry.display_title().unwrap_or("?"),
                entry.id.as_deref().unwrap_or("-")
            );
        }
    }
}

#[tokio::main]
async fn main() {
    configure_logging();
    let args = Args::parse();
    let config = resolve_config(&args);

    info!("Fetching index from {}", config.server_url);
    let client = SubsonicClient::new(config.server_url, config.username, config.password);

    let result = if args.dry_run {
        let parser = IndexesParser::new(MemoryPreferences::new());
        let result = fetch(&client, &parser, &args).await;
        if let Some(articles) = parser.preferences().ignored_articles() {
            info!("Server ignores articles: {articles} (not saved)");
        }
        result
    } else {
        let parser = IndexesParser::new(YamlPreferences::new(&config.preferences_path));
        fetch(&client, &parser, &args).await
    };

    match result {
        Ok(IndexesUpdate::Changed(indexes)) => {
            info!(
                "{} artist(s), {} shortcut(s), {} entr(ies)",
                indexes.artists.len(),
                indexes.shortcuts.len(),
                indexes.entries.len()
            );
            print_indexes(&indexes);
        }
        Ok(IndexesUpdate::Unchanged) => println!("Index unchanged"),
        Err(e) => {
            error!("Index unavailable: {e}");
            std::process::exit(1);
        }
    }
}
