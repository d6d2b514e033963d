use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};

use reqwest::Client;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    net::TcpListener,
    sync::Mutex,
};

use crate::{
    Res,
    config::{Config, Credentials},
    errors::Error,
    info,
    server::start_callback_server,
    spotify::read_json,
    types::{PendingAuthorization, Token},
    utils, warning,
};

/// The OAuth 2.0 grant a token was obtained with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// App-only access; no user context, cannot modify playlists.
    ClientCredentials,
    /// User-consented access carrying the configured scopes.
    AuthorizationCode,
}

/// Where an [`AuthClient`] stands.
///
/// `Unauthenticated → TokenRequested → Authenticated`. A failed request drops
/// back to `Unauthenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    TokenRequested(Grant),
    Authenticated(Grant),
}

/// Supplies the authorization code for the user-consent step.
///
/// Implementations send the user to `authorize_url` however they see fit and
/// return the `code` Spotify hands back on the redirect. `state` is the value
/// the redirect must echo.
pub trait AuthorizationCodeProvider {
    fn authorization_code(
        &mut self,
        authorize_url: &str,
        state: &str,
    ) -> impl Future<Output = Res<String>>;
}

/// A code obtained out of band, e.g. passed on the command line.
#[derive(Debug, Clone)]
pub struct StaticCode(pub String);

impl AuthorizationCodeProvider for StaticCode {
    async fn authorization_code(&mut self, _authorize_url: &str, _state: &str) -> Res<String> {
        Ok(self.0.clone())
    }
}

/// Prints the authorization URL and blocks on a line from stdin.
///
/// The line may be the bare code or the whole URL the browser was redirected
/// to.
#[derive(Debug, Clone, Default)]
pub struct ConsolePrompt;

impl AuthorizationCodeProvider for ConsolePrompt {
    async fn authorization_code(&mut self, authorize_url: &str, state: &str) -> Res<String> {
        open_in_browser(authorize_url);
        info!("Authorize the application, then paste the code or the URL you were redirected to:");

        let mut line = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await?;

        utils::extract_authorization_code(&line, state)
    }
}

/// Captures the redirect with a local HTTP server.
///
/// The server listens until the callback is hit or `max_wait` elapses.
pub struct CallbackServer {
    listener: Option<TcpListener>,
    max_wait: Duration,
    open_browser: bool,
}

impl CallbackServer {
    pub async fn bind(address: &str) -> Res<Self> {
        let listener = TcpListener::bind(address).await?;
        Ok(Self {
            listener: Some(listener),
            max_wait: Duration::from_secs(120),
            open_browser: true,
        })
    }

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Leaves opening the authorization URL to the caller.
    pub fn without_browser(mut self) -> Self {
        self.open_browser = false;
        self
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }
}

impl AuthorizationCodeProvider for CallbackServer {
    async fn authorization_code(&mut self, authorize_url: &str, state: &str) -> Res<String> {
        let listener = self.listener.take().ok_or_else(|| {
            Error::Authorization("callback server has already been used".to_string())
        })?;

        let shared_state = Arc::new(Mutex::new(PendingAuthorization::new(state)));
        let server_state = Arc::clone(&shared_state);
        let server =
            tokio::spawn(async move { start_callback_server(listener, server_state).await });

        if self.open_browser {
            open_in_browser(authorize_url);
        }

        let outcome = wait_for_code(shared_state, self.max_wait).await;
        server.abort();
        outcome
    }
}

fn open_in_browser(url: &str) {
    if webbrowser::open(url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        )
    } else {
        info!("Opened {} in your browser", url);
    }
}

async fn wait_for_code(
    shared_state: Arc<Mutex<PendingAuthorization>>,
    max_wait: Duration,
) -> Res<String> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(outcome) = &lock.outcome {
            return outcome.clone().map_err(Error::Authorization);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_millis(250)).await;
    }

    Err(Error::Authorization(format!(
        "no callback received within {} seconds",
        max_wait.as_secs()
    )))
}

/// Exchanges the application credentials for a bearer token.
///
/// One token is fetched per grant and kept for the lifetime of the client;
/// there is no refresh and no expiry tracking.
pub struct AuthClient {
    credentials: Credentials,
    token_url: String,
    auth_url: String,
    redirect_uri: String,
    scope: String,
    http: Client,
    state: AuthState,
    token: Option<Token>,
}

impl AuthClient {
    pub fn new(config: &Config) -> Self {
        Self {
            credentials: config.credentials.clone(),
            token_url: config.token_url.clone(),
            auth_url: config.auth_url.clone(),
            redirect_uri: config.redirect_uri.clone(),
            scope: config.scope.clone(),
            http: Client::new(),
            state: AuthState::Unauthenticated,
            token: None,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Requests an app-only token with the client-credentials grant.
    pub async fn client_credentials(&mut self) -> Res<Token> {
        if let Some(token) = self.cached(Grant::ClientCredentials) {
            return Ok(token);
        }

        let credentials = self.credentials.clone();
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];
        self.request_token(Grant::ClientCredentials, &form).await
    }

    /// Requests a user token with the authorization-code grant and PKCE.
    ///
    /// The consent step is delegated to `provider`, which receives the
    /// authorization URL and returns the code.
    pub async fn authorization_code<P: AuthorizationCodeProvider>(
        &mut self,
        provider: &mut P,
    ) -> Res<Token> {
        if let Some(token) = self.cached(Grant::AuthorizationCode) {
            return Ok(token);
        }

        let code_verifier = utils::generate_code_verifier();
        let code_challenge = utils::generate_code_challenge(&code_verifier);
        let state = utils::generate_state();
        let authorize_url = utils::build_authorize_url(
            &self.auth_url,
            &self.credentials.client_id,
            &self.redirect_uri,
            &self.scope,
            &code_challenge,
            &state,
        )?;

        self.state = AuthState::TokenRequested(Grant::AuthorizationCode);
        let code = match provider.authorization_code(&authorize_url, &state).await {
            Ok(code) => code,
            Err(e) => {
                self.state = AuthState::Unauthenticated;
                return Err(e);
            }
        };

        let credentials = self.credentials.clone();
        let redirect_uri = self.redirect_uri.clone();
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code.as_str()),
            ("redirect_uri", redirect_uri.as_str()),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("code_verifier", code_verifier.as_str()),
        ];
        self.request_token(Grant::AuthorizationCode, &form).await
    }

    fn cached(&self, grant: Grant) -> Option<Token> {
        match self.state {
            AuthState::Authenticated(current) if current == grant => self.token.clone(),
            _ => None,
        }
    }

    async fn request_token(&mut self, grant: Grant, form: &[(&str, &str)]) -> Res<Token> {
        self.state = AuthState::TokenRequested(grant);

        match self.exchange(form).await {
            Ok(token) => {
                self.state = AuthState::Authenticated(grant);
                self.token = Some(token.clone());
                Ok(token)
            }
            Err(e) => {
                self.state = AuthState::Unauthenticated;
                self.token = None;
                Err(e)
            }
        }
    }

    async fn exchange(&self, form: &[(&str, &str)]) -> Res<Token> {
        let response = self.http.post(&self.token_url).form(form).send().await?;
        let json = read_json(response).await?;

        serde_json::from_value::<Token>(json).map_err(|e| {
            Error::MalformedResponse(format!("token response lacks 'access_token': {}", e))
        })
    }
}
