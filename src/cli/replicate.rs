use crate::{
    Res,
    config::Config,
    info,
    playlist::{fetch_playlist, group_by_artist, replicate_per_artist},
    spotify::auth::{AuthClient, CallbackServer, ConsolePrompt, StaticCode},
    success,
    types::Token,
    warning,
};

use super::{warn_if_truncated, with_spinner};

/// How the authorization code for the user-consent step is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeSource {
    /// Local callback server on `SERVER_ADDRESS`.
    Callback,
    /// Paste the code (or redirect URL) into the terminal.
    Console,
    /// Code already obtained out of band.
    Static(String),
}

pub async fn replicate(
    config: &Config,
    playlist_id: Option<String>,
    owner_id: Option<String>,
    code_source: CodeSource,
) -> Res<()> {
    let playlist_id = config.resolve_playlist_id(playlist_id)?;
    let token = user_token(config, code_source).await?;
    success!("Authorization successful!");

    let playlist = with_spinner(
        "Fetching playlist...",
        fetch_playlist(config, &token.access_token, &playlist_id),
    )
    .await?;
    warn_if_truncated(&playlist);

    let grouping = group_by_artist(&playlist);
    if grouping.is_empty() {
        warning!("Playlist {} has no credited artists, nothing to do.", playlist.name);
        return Ok(());
    }

    let owner_id = owner_id.unwrap_or_else(|| playlist.owner.id.clone());
    info!(
        "Creating {} playlists for {} in account {}",
        grouping.len(),
        playlist.name,
        owner_id
    );

    let replicated =
        replicate_per_artist(config, &grouping, &owner_id, &token.access_token).await?;
    success!("Created {} playlists.", replicated.len());
    Ok(())
}

async fn user_token(config: &Config, code_source: CodeSource) -> Res<Token> {
    let mut auth = AuthClient::new(config);
    match code_source {
        CodeSource::Callback => {
            let mut server = CallbackServer::bind(&config.server_address).await?;
            auth.authorization_code(&mut server).await
        }
        CodeSource::Console => auth.authorization_code(&mut ConsolePrompt).await,
        CodeSource::Static(code) => auth.authorization_code(&mut StaticCode(code)).await,
    }
}
