//! User-facing failure notices
//!
//! The callback style of [`crate::InferencePipeline::classify`] only hands
//! results to the callback. Failures go to a [`Notifier`] instead, which an
//! app wires to a toast, a status bar or a log.

use log::error;

use crate::errors::ClassifyError;

/// Receives one notice per failed request
pub trait Notifier: Send + Sync {
    fn notify(&self, error: &ClassifyError);
}

/// Writes notices to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, err: &ClassifyError) {
        error!("{} ({} error while {}): {}", err.user_message(), err.kind(), err.stage(), err);
    }
}

impl<F> Notifier for F
where
    F: Fn(&ClassifyError) + Send + Sync,
{
    fn notify(&self, error: &ClassifyError) {
        self(error)
    }
}
