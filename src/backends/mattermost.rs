use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::json;

use crate::error::{AuthError, DispatchError};

/// Bearer token returned by a successful Mattermost login.
pub struct SessionToken(String);

/// The `Mattermost` struct implements a backend for [Mattermost](https://mattermost.com)
/// servers, using the v4 REST API's `users/login` and `posts` endpoints.
///
/// The session token is read from the `Token` response header; the server
/// must return exactly one such header for the login to count as successful.
#[derive(typed_builder::TypedBuilder)]
pub struct Mattermost {
    #[builder(setter(into))]
    server_url: String,

    #[builder(setter(into))]
    login_id: String,

    #[builder(setter(into))]
    password: String,

    #[builder(setter(into))]
    channel_id: String,
}

impl super::ChatBackend for Mattermost {
    type Credential = SessionToken;

    fn login(&self, client: &Client) -> Result<SessionToken, AuthError> {
        let body = json!({"login_id": self.login_id, "password": self.password});

        let res = client
            .post(format!("{}/api/v4/users/login", self.server_url))
            .json(&body)
            .send()?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(AuthError::Status {
                status,
                body: res.text().unwrap_or_default(),
            });
        }

        let tokens: Vec<_> = res.headers().get_all("Token").iter().collect();
        if tokens.len() != 1 {
            return Err(AuthError::TokenHeader(tokens.len()));
        }
        let token = tokens[0]
            .to_str()
            .map_err(|_| AuthError::InvalidTokenHeader)?;

        log::debug!("Logged in to Mattermost as {}", self.login_id);

        Ok(SessionToken(token.to_owned()))
    }

    fn post_message(
        &self,
        client: &Client,
        token: &SessionToken,
        text: &str,
    ) -> Result<(), DispatchError> {
        let body = json!({"channel_id": self.channel_id, "message": text});

        log::debug!("Posting message to Mattermost channel {}", self.channel_id);
        let res = client
            .post(format!("{}/api/v4/posts", self.server_url))
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token.0))
            .json(&body)
            .send()?;

        let status = res.status();
        if status != StatusCode::CREATED {
            return Err(DispatchError::Status {
                status,
                body: res.text().unwrap_or_default(),
            });
        }

        Ok(())
    }
}
