use crate::client::ApiClient;
use crate::errors::SessionError;
use crate::errors::StoreError;
use crate::state::reduce;
use crate::state::AuthAction;
use crate::state::SessionState;
use crate::store::TokenStore;

/// Client session: a token store, an API client and the current state.
///
/// The state starts as `Unknown` and is never `Unknown` again once any
/// operation has completed.
pub struct Session<S>
where
    S: TokenStore,
{
    client: ApiClient,
    store: S,
    state: SessionState,
}

impl<S> Session<S>
where
    S: TokenStore,
{
    pub fn new(client: ApiClient, store: S) -> Self {
        Self {
            client,
            store,
            state: SessionState::Unknown,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Rehydrate from the stored token.
    ///
    /// Any rejection by the server, or a failure to reach it, discards the
    /// token and leaves the session `Unauthenticated`.
    ///
    /// # Errors
    /// * `Store` - The token store could not be read or cleared
    pub async fn load_user(&mut self) -> Result<&SessionState, SessionError> {
        let token = match self.store.load().await {
            Ok(token) => token,
            Err(StoreError::Corrupt(reason)) => {
                tracing::warn!(reason = %reason, "Discarding unreadable session token");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let Some(token) = token else {
            self.dispatch(AuthAction::AuthFailed).await?;
            return Ok(&self.state);
        };

        match self.client.current_user(&token).await {
            Ok(profile) => {
                tracing::debug!(user_id = %profile.id, "Session user loaded");
                self.dispatch(AuthAction::UserLoaded(profile)).await?;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored session token rejected");
                self.dispatch(AuthAction::AuthFailed).await?;
            }
        }

        Ok(&self.state)
    }

    /// Create an account, store its token and load the profile.
    ///
    /// # Errors
    /// * `Client` - The server rejected the registration; the token is cleared
    /// * `Store` - The token store could not be written
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<&SessionState, SessionError> {
        match self.client.register(name, email, password).await {
            Ok(token) => self.start(&token).await,
            Err(e) => {
                self.dispatch(AuthAction::RegisterFailed).await?;
                Err(e.into())
            }
        }
    }

    /// Log in, store the token and load the profile.
    ///
    /// # Errors
    /// * `Client` - The server rejected the credentials; the token is cleared
    /// * `Store` - The token store could not be written
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&SessionState, SessionError> {
        match self.client.login(email, password).await {
            Ok(token) => self.start(&token).await,
            Err(e) => {
                self.dispatch(AuthAction::LoginFailed).await?;
                Err(e.into())
            }
        }
    }

    /// Forget the token and become `Unauthenticated`.
    pub async fn logout(&mut self) -> Result<&SessionState, SessionError> {
        self.dispatch(AuthAction::LogOut).await?;
        Ok(&self.state)
    }

    async fn start(&mut self, token: &str) -> Result<&SessionState, SessionError> {
        self.store.save(token).await?;
        self.dispatch(AuthAction::TokenIssued).await?;
        self.load_user().await
    }

    /// Apply the action's token side effect, then its state transition.
    async fn dispatch(&mut self, action: AuthAction) -> Result<(), SessionError> {
        if action.clears_token() {
            self.store.clear().await?;
        }

        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
        Ok(())
    }
}
