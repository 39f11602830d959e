use crate::client::UserProfile;

/// Where the client stands with respect to authentication.
///
/// `Unknown` only exists before the first [`Session::load_user`] settles it.
///
/// [`Session::load_user`]: crate::Session::load_user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unknown,
    Authenticated(UserProfile),
    Unauthenticated,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            SessionState::Authenticated(profile) => Some(profile),
            _ => None,
        }
    }
}

/// Events that move the session between states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    /// A fresh token was stored after registration or login.
    TokenIssued,
    UserLoaded(UserProfile),
    RegisterFailed,
    LoginFailed,
    /// The stored token was rejected or could not be checked.
    AuthFailed,
    LogOut,
}

impl AuthAction {
    /// Whether applying this action must also discard the stored token.
    pub fn clears_token(&self) -> bool {
        matches!(
            self,
            AuthAction::RegisterFailed
                | AuthAction::LoginFailed
                | AuthAction::AuthFailed
                | AuthAction::LogOut
        )
    }
}

/// Pure transition function. Token side effects are the caller's job, see
/// [`AuthAction::clears_token`].
pub fn reduce(state: SessionState, action: AuthAction) -> SessionState {
    match action {
        // Until the profile arrives, the token alone proves nothing.
        AuthAction::TokenIssued => state,
        AuthAction::UserLoaded(profile) => SessionState::Authenticated(profile),
        AuthAction::RegisterFailed
        | AuthAction::LoginFailed
        | AuthAction::AuthFailed
        | AuthAction::LogOut => SessionState::Unauthenticated,
    }
}
