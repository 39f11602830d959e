//! Client-side session handling for the DevConnector API.
//!
//! - [`TokenStore`]: where the session token lives between runs
//! - [`ApiClient`]: typed calls to the register, login and current-user routes
//! - [`SessionState`] and [`reduce`]: the authentication state machine
//! - [`Session`]: drives the client and the store and keeps the state current
//!
//! # Examples
//!
//! ```no_run
//! use session::ApiClient;
//! use session::FileTokenStore;
//! use session::Session;
//! use session::SessionState;
//!
//! # async fn run() -> Result<(), session::SessionError> {
//! let client = ApiClient::new("http://localhost:5000");
//! let store = FileTokenStore::new("/tmp/devconnector/session.json");
//! let mut session = Session::new(client, store);
//!
//! match session.load_user().await? {
//!     SessionState::Authenticated(profile) => println!("Hello, {}", profile.name),
//!     SessionState::Unauthenticated => println!("Please log in"),
//!     SessionState::Unknown => unreachable!(),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod errors;
pub mod session;
pub mod state;
pub mod store;

pub use client::ApiClient;
pub use client::UserProfile;
pub use errors::ClientError;
pub use errors::SessionError;
pub use errors::StoreError;
pub use session::Session;
pub use state::reduce;
pub use state::AuthAction;
pub use state::SessionState;
pub use store::FileTokenStore;
pub use store::MemoryTokenStore;
pub use store::TokenStore;
