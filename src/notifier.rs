use std::time::Duration;

use crate::alert::Alert;
use crate::backends::ChatBackend;
use crate::error::{AuthError, NotifyError};
use crate::render::render_message;

type TemplateFn = Box<dyn Fn(&str) -> anyhow::Result<String> + Send + Sync>;

/// Delivers alert batches to one chat backend.
///
/// Each [`notify`](Notifier::notify) call is self-contained: it performs a
/// fresh login, renders the batch and posts the message, in that order, with
/// no state shared across calls. The configuration is immutable after
/// construction, so a `Notifier` can be used from multiple threads at once.
pub struct Notifier<B: ChatBackend> {
    backend: B,
    timeout: Option<Duration>,
    template: Option<TemplateFn>,
}

impl<B: ChatBackend> Notifier<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            timeout: None,
            template: None,
        }
    }

    /// Deadline applied to each of the two network calls of a delivery.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout.replace(timeout);
        self
    }

    /// Installs a template expansion step applied to the rendered message
    /// text before it is posted. Expansion failures abort the delivery.
    pub fn template<F>(mut self, expand: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.template.replace(Box::new(expand));
        self
    }

    /// Delivers one alert batch.
    ///
    /// Only the first alert of the batch is rendered. That is a deliberate
    /// simplification; summarizing the whole batch into one message is the
    /// natural extension point. Empty batches are rejected up front.
    ///
    /// The returned outcome never asks the caller to retry, whichever step
    /// failed. Re-invoking delivery for the batch is entirely the caller's
    /// decision.
    pub fn notify(&self, alerts: &[Alert]) -> Outcome {
        match self.deliver(alerts) {
            Ok(()) => Outcome::success(),
            Err(e) => {
                log::error!("Failed delivering alert notification: {e:?}");
                Outcome::failure(e)
            }
        }
    }

    fn deliver(&self, alerts: &[Alert]) -> Result<(), NotifyError> {
        let alert = alerts.first().ok_or(NotifyError::EmptyBatch)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(AuthError::Transport)?;

        let credential = self.backend.login(&client)?;
        log::debug!("Obtained session credential");

        let text = render_message(alert);
        let text = match &self.template {
            Some(expand) => expand(&text).map_err(NotifyError::Template)?,
            None => text,
        };

        self.backend.post_message(&client, &credential, &text)?;
        log::debug!("Delivered alert notification");

        Ok(())
    }
}

/// Result of one delivery attempt.
///
/// `retryable` is always `false`: failures are terminal for the invocation
/// and the calling pipeline owns any re-delivery scheduling.
#[derive(Debug)]
pub struct Outcome {
    retryable: bool,
    error: Option<NotifyError>,
}

impl Outcome {
    fn success() -> Self {
        Self {
            retryable: false,
            error: None,
        }
    }

    fn failure(error: NotifyError) -> Self {
        Self {
            retryable: false,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn retryable(&self) -> bool {
        self.retryable
    }

    pub fn error(&self) -> Option<&NotifyError> {
        self.error.as_ref()
    }

    pub fn into_result(self) -> Result<(), NotifyError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
