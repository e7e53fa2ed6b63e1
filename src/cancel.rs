//! Cancellation for in-flight calls and acquisitions.
//!
//! Any client future can be raced against an [`AbortHandle`]:
//!
//! ```no_run
//! # async fn demo(client: studyai::StudyClient) -> studyai::Result<()> {
//! use studyai::cancel::{cancellable, CancelHandle};
//! use studyai::models::EssayRequest;
//!
//! let (handle, registration) = CancelHandle::new_pair();
//! let request = EssayRequest { topic: "Tides".into(), word_count: 200 };
//! let call = cancellable("Failed to generate essay", client.text().essay(request), registration);
//! handle.cancel();
//! assert!(call.await.is_err());
//! # Ok(())
//! # }
//! ```
//!
//! Dropping the future cancels it too.

use futures::future::{AbortHandle, AbortRegistration, Abortable};
use std::future::Future;

use crate::error::{Result, StudyError};

/// Cloneable handle that aborts the future tied to its registration.
#[derive(Debug, Clone)]
pub struct CancelHandle(AbortHandle);

impl CancelHandle {
    pub fn new_pair() -> (Self, AbortRegistration) {
        let (handle, registration) = AbortHandle::new_pair();
        (Self(handle), registration)
    }

    pub fn cancel(&self) {
        self.0.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_aborted()
    }
}

/// Runs `future` until it finishes or the paired handle is cancelled.
pub async fn cancellable<T, F>(
    context: &'static str,
    future: F,
    registration: AbortRegistration,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match Abortable::new(future, registration).await {
        Ok(result) => result,
        Err(_aborted) => {
            log::debug!("{}: cancelled by caller", context);
            Err(StudyError::Cancelled { context })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cancelled_future_reports_context() {
        let (handle, registration) = CancelHandle::new_pair();
        handle.cancel();
        assert!(handle.is_cancelled());

        let result: Result<()> = cancellable(
            "Failed to chat",
            futures::future::pending::<Result<()>>(),
            registration,
        )
        .await;

        match result {
            Err(StudyError::Cancelled { context }) => assert_eq!(context, "Failed to chat"),
            other => panic!("expected cancellation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn finished_future_passes_through() {
        let (_handle, registration) = CancelHandle::new_pair();
        let result = cancellable("Failed to chat", async { Ok(7) }, registration).await;
        assert_eq!(result.unwrap(), 7);
    }
}
