use reqwest::blocking::Client;

use crate::error::{AuthError, DispatchError};

pub mod mattermost;
pub mod rocketchat;

pub use mattermost::Mattermost;
pub use rocketchat::RocketChat;

/// One chat service's wire protocol: session login plus channel post.
///
/// Implementations own the backend-specific endpoints, request field names,
/// auth headers and credential extraction, so the notifier stays
/// backend-agnostic.
pub trait ChatBackend {
    /// Short-lived session credential returned by a successful login.
    /// Scoped to a single delivery, never cached across calls.
    type Credential;

    /// Exchanges the configured account credentials for a session
    /// credential. A single attempt, no retry.
    fn login(&self, client: &Client) -> Result<Self::Credential, AuthError>;

    /// Posts `text` to the configured destination channel.
    fn post_message(
        &self,
        client: &Client,
        credential: &Self::Credential,
        text: &str,
    ) -> Result<(), DispatchError>;
}
