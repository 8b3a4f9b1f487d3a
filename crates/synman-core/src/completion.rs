//! Completion delivery for orchestrator operations.
//!
//! Every orchestrator operation is an async fn returning [`Result`]. Callers
//! pick how the outcome reaches them:
//!
//! - **return**: await the operation and let `?` propagate the first error.
//! - **handler**: pass the operation to [`complete`] with an [`OnDone`]
//!   handler; the handler receives the outcome exactly once.
//! - **channel**: [`spawn`] the operation and collect its outcome from the
//!   returned [`CompletionHandle`], asynchronously or by blocking.
//!
//! Side effects are identical in every mode; only delivery differs.

use std::future::Future;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::error::{Error, Result};

/// Completion handler invoked once with an operation's outcome.
pub type OnDone<T> = Box<dyn FnOnce(Result<T>) + Send + 'static>;

/// Box a closure as a completion handler
pub fn on_done<T, F>(f: F) -> OnDone<T>
where
    F: FnOnce(Result<T>) + Send + 'static,
{
    Box::new(f)
}

/// Run `operation` and deliver its outcome.
///
/// With a handler the outcome goes to the handler and `Ok(None)` is returned.
/// Without one the outcome is returned as-is, so an error surfaces at the
/// call site.
pub async fn complete<T, F>(operation: F, on_done: Option<OnDone<T>>) -> Result<Option<T>>
where
    F: Future<Output = Result<T>>,
{
    let outcome = operation.await;
    match on_done {
        Some(handler) => {
            handler(outcome);
            Ok(None)
        }
        None => outcome.map(Some),
    }
}

/// Run `operation` on the runtime and hand the outcome to `on_done`.
pub fn spawn_with<T, F>(operation: F, on_done: OnDone<T>) -> JoinHandle<()>
where
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(async move {
        on_done(operation.await);
    })
}

/// Run `operation` on the runtime, delivering its outcome through a
/// single-shot channel.
pub fn spawn<T, F>(operation: F) -> CompletionHandle<T>
where
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        // Receiver may have been dropped; nobody is waiting then.
        let _ = tx.send(operation.await);
    });
    CompletionHandle { rx }
}

/// Receiving end of a spawned operation.
#[derive(Debug)]
pub struct CompletionHandle<T> {
    rx: oneshot::Receiver<Result<T>>,
}

impl<T> CompletionHandle<T> {
    /// Wait for the outcome.
    pub async fn wait(self) -> Result<T> {
        self.rx.await.map_err(|_| abandoned())?
    }

    /// Block the current thread until the outcome arrives.
    ///
    /// Must not be called from within an async context.
    pub fn blocking_wait(self) -> Result<T> {
        self.rx.blocking_recv().map_err(|_| abandoned())?
    }
}

fn abandoned() -> Error {
    Error::Other("operation ended without completing".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_complete_without_handler_returns_error() {
        let result = complete(async { Err::<(), _>(Error::NotFound("home".into())) }, None).await;
        let err = assert_err!(result);
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_complete_with_handler_delivers_once() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();

        let result = complete(
            async { Err::<u32, _>(Error::remote(500, "boom")) },
            Some(on_done(move |outcome: Result<u32>| {
                sink.lock().unwrap().push(outcome.unwrap_err().to_string());
            })),
        )
        .await;

        assert!(assert_ok!(result).is_none());
        assert_eq!(*calls.lock().unwrap(), vec!["Synthetics API error 500: boom"]);
    }

    #[tokio::test]
    async fn test_complete_without_handler_returns_value() {
        let result = complete(async { Ok::<_, Error>(7) }, None).await;
        assert_eq!(assert_ok!(result), Some(7));
    }

    #[tokio::test]
    async fn test_spawned_operation_delivers_through_channel() {
        let handle = spawn(async { Ok::<_, Error>("done".to_string()) });
        assert_eq!(handle.wait().await.unwrap(), "done");
    }

    #[tokio::test]
    async fn test_spawn_with_invokes_handler() {
        let (tx, rx) = oneshot::channel();
        let task = spawn_with(
            async { Err::<(), _>(Error::Other("nope".into())) },
            on_done(move |outcome: Result<()>| {
                let _ = tx.send(outcome.is_err());
            }),
        );
        task.await.unwrap();
        assert!(rx.await.unwrap());
    }

    #[test]
    fn test_blocking_wait_reraises_error() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let _guard = runtime.enter();

        let handle = spawn(async { Err::<(), _>(Error::NotFound("checkout".into())) });
        let err = handle.blocking_wait().unwrap_err();
        assert_eq!(err.to_string(), "Monitor not found: checkout");
    }
}
