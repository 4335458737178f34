//! The action executor contract

use async_trait::async_trait;
use testflow_model::{Action, ActionKind};

use crate::errors::ExecError;
use crate::types::ExecCtx;

/// Reserved Assert target meaning "the current page location".
pub const CURRENT_LOCATION: &str = "current location";

/// The capability a live backend must provide: perform one action against
/// the target application and report success or failure.
///
/// One handler per action kind; [`execute`](ActionExecutor::execute)
/// dispatches exhaustively so a new [`ActionKind`] variant cannot be
/// silently ignored.
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    /// Load `url` (a URL or path) in the live page context. Succeeds once
    /// the context confirms navigation completion.
    async fn navigate(&self, ctx: &ExecCtx, url: &str) -> Result<(), ExecError>;

    /// Resolve `locator` to exactly one actionable element and click it.
    async fn click(&self, ctx: &ExecCtx, locator: &str) -> Result<(), ExecError>;

    /// Resolve `locator` to an input-capable element and set its content
    /// to `text`.
    async fn type_text(&self, ctx: &ExecCtx, locator: &str, text: &str) -> Result<(), ExecError>;

    /// Resolve `locator` (or [`CURRENT_LOCATION`]) and verify the
    /// condition encoded by `condition` within the bounded wait.
    async fn assert(&self, ctx: &ExecCtx, locator: &str, condition: &str)
        -> Result<(), ExecError>;

    /// Perform one action, dispatching on its kind.
    async fn execute(&self, ctx: &ExecCtx, action: &Action) -> Result<(), ExecError> {
        match action.kind {
            ActionKind::Navigate => self.navigate(ctx, &action.target).await,
            ActionKind::Click => self.click(ctx, &action.target).await,
            ActionKind::Type => self.type_text(ctx, &action.target, &action.value).await,
            ActionKind::Assert => self.assert(ctx, &action.target, &action.value).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};
    use tokio_util::sync::CancellationToken;

    /// Records which handler the dispatcher routed to.
    #[derive(Default)]
    struct RecordingExecutor {
        navigates: AtomicUsize,
        clicks: AtomicUsize,
        types: AtomicUsize,
        asserts: AtomicUsize,
    }

    #[async_trait]
    impl ActionExecutor for RecordingExecutor {
        async fn navigate(&self, _ctx: &ExecCtx, _url: &str) -> Result<(), ExecError> {
            self.navigates.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn click(&self, _ctx: &ExecCtx, _locator: &str) -> Result<(), ExecError> {
            self.clicks.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn type_text(
            &self,
            _ctx: &ExecCtx,
            _locator: &str,
            text: &str,
        ) -> Result<(), ExecError> {
            assert_eq!(text, "bob");
            self.types.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn assert(
            &self,
            _ctx: &ExecCtx,
            _locator: &str,
            condition: &str,
        ) -> Result<(), ExecError> {
            assert_eq!(condition, "visible");
            self.asserts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn ctx() -> ExecCtx {
        ExecCtx::new(
            Instant::now() + Duration::from_secs(5),
            CancellationToken::new(),
        )
    }

    #[tokio::test]
    async fn execute_dispatches_every_kind() {
        let executor = RecordingExecutor::default();
        let ctx = ctx();

        let actions = [
            Action::new(ActionKind::Navigate, "/login"),
            Action::new(ActionKind::Click, "#submit"),
            Action::new(ActionKind::Type, "#user").with_value("bob"),
            Action::new(ActionKind::Assert, "#banner").with_value("visible"),
        ];
        for action in &actions {
            executor.execute(&ctx, action).await.unwrap();
        }

        assert_eq!(executor.navigates.load(Ordering::SeqCst), 1);
        assert_eq!(executor.clicks.load(Ordering::SeqCst), 1);
        assert_eq!(executor.types.load(Ordering::SeqCst), 1);
        assert_eq!(executor.asserts.load(Ordering::SeqCst), 1);
    }
}
