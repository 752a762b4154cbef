use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::json;

use crate::error::{AuthError, DispatchError};

/// Session credential returned by a successful Rocket.Chat login.
pub struct Session {
    user_id: String,
    auth_token: String,
}

/// The `RocketChat` struct implements a backend for [Rocket.Chat](https://rocket.chat)
/// servers, using the REST API's `login` and `chat.postMessage` endpoints.
///
/// ```
/// use herald::backends::RocketChat;
///
/// let backend = RocketChat::builder()
///     .server_url("https://chat.example.com")
///     .user("alertbot")
///     .password("hunter2")
///     .channel("#alerts")
///     .build();
/// ```
#[derive(typed_builder::TypedBuilder)]
pub struct RocketChat {
    #[builder(setter(into))]
    server_url: String,

    #[builder(setter(into))]
    user: String,

    #[builder(setter(into))]
    password: String,

    #[builder(setter(into))]
    channel: String,
}

impl super::ChatBackend for RocketChat {
    type Credential = Session;

    fn login(&self, client: &Client) -> Result<Session, AuthError> {
        let body = json!({"user": self.user, "password": self.password});

        let res = client
            .post(format!("{}/api/v1/login", self.server_url))
            .json(&body)
            .send()?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(AuthError::Status {
                status,
                body: res.text().unwrap_or_default(),
            });
        }

        let res_body: serde_json::Value = serde_json::from_str(&res.text()?)?;
        let user_id = res_body["data"]["userId"]
            .as_str()
            .ok_or(AuthError::MissingCredential("data.userId"))?;
        let auth_token = res_body["data"]["authToken"]
            .as_str()
            .ok_or(AuthError::MissingCredential("data.authToken"))?;

        log::debug!("Logged in to Rocket.Chat as user {user_id}");

        Ok(Session {
            user_id: user_id.to_owned(),
            auth_token: auth_token.to_owned(),
        })
    }

    fn post_message(
        &self,
        client: &Client,
        session: &Session,
        text: &str,
    ) -> Result<(), DispatchError> {
        let body = json!({"channel": self.channel, "msg": text});

        log::debug!("Posting message to Rocket.Chat channel {}", self.channel);
        let res = client
            .post(format!("{}/api/v1/chat.postMessage", self.server_url))
            .header("X-User-Id", session.user_id.as_str())
            .header("X-Auth-Token", session.auth_token.as_str())
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
