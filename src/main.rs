use std::path::PathBuf;

use clap::{
    ArgGroup, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use playsplit::{
    Res,
    cli::{self, CodeSource},
    config::{self, Config},
    error,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the tracks of a playlist with their artists
    Tracks(TracksOptions),

    /// Group tracks by artist and write the grouping to a JSON file
    Export(ExportOptions),

    /// Recreate a playlist on Spotify as one playlist per artist
    Replicate(ReplicateOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TracksOptions {
    /// Spotify playlist id (defaults to PLAYLIST_ID)
    #[clap(long)]
    pub playlist_id: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportOptions {
    /// Spotify playlist id (defaults to PLAYLIST_ID)
    #[clap(long)]
    pub playlist_id: Option<String>,

    /// File to write; overwritten if it exists
    #[clap(long, short)]
    pub output: PathBuf,

    /// Field used for keys and values: name, id or uri
    #[clap(long)]
    pub attribute: Option<String>,
}

#[derive(Parser, Debug, Clone)]
#[command(group(ArgGroup::new("code_source").args(["code", "manual"])))]
pub struct ReplicateOptions {
    /// Spotify playlist id (defaults to PLAYLIST_ID)
    #[clap(long)]
    pub playlist_id: Option<String>,

    /// Account to create the playlists in (defaults to the playlist owner)
    #[clap(long)]
    pub owner_id: Option<String>,

    /// Authorization code obtained out of band
    #[clap(long)]
    pub code: Option<String>,

    /// Paste the authorization code into the terminal instead of running a callback server
    #[clap(long)]
    pub manual: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };

    if let Err(e) = run(&config, cli.command).await {
        error!("{}", e);
    }
}

async fn run(config: &Config, command: Command) -> Res<()> {
    match command {
        Command::Tracks(opt) => cli::tracks(config, opt.playlist_id).await,
        Command::Export(opt) => {
            cli::export(config, opt.playlist_id, &opt.output, opt.attribute).await
        }
        Command::Replicate(opt) => {
            let code_source = match (opt.code, opt.manual) {
                (Some(code), _) => CodeSource::Static(code),
                (None, true) => CodeSource::Console,
                (None, false) => CodeSource::Callback,
            };
            cli::replicate(config, opt.playlist_id, opt.owner_id, code_source).await
        }
        Command::Completions(_) => Ok(()),
    }
}
