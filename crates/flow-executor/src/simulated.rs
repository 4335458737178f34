//! Deterministic simulated backend
//!
//! Stand-in for the real browser-automation backend, used by the CLI dry
//! run and as a test double. Failures are scripted per locator instead of
//! randomized so runs are reproducible. Navigate succeeds for anything
//! that parses as an absolute URL or a rooted path; the optional latency
//! models network/execution time and honors cancellation.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::debug;
use url::Url;

use crate::errors::ExecError;
use crate::executor::{ActionExecutor, CURRENT_LOCATION};
use crate::types::ExecCtx;

#[derive(Default)]
pub struct SimulatedExecutor {
    latency: Duration,
    failures: HashMap<String, ExecError>,
}

impl SimulatedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long before settling each action.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Script a failure for every action targeting `locator`.
    pub fn fail_on(mut self, locator: impl Into<String>, error: ExecError) -> Self {
        self.failures.insert(locator.into(), error);
        self
    }

    /// Wait out the simulated latency, observing cancellation and the
    /// call deadline.
    async fn settle(&self, ctx: &ExecCtx) -> Result<(), ExecError> {
        if ctx.is_cancelled() {
            return Err(ExecError::Interrupted(format!(
                "call {} cancelled",
                ctx.call_id
            )));
        }
        if self.latency > Duration::ZERO {
            if self.latency > ctx.remaining_time() {
                sleep(ctx.remaining_time()).await;
                return Err(ExecError::Timeout(
                    "simulated latency exceeded the call deadline".into(),
                ));
            }
            tokio::select! {
                _ = ctx.cancel.cancelled() => {
                    return Err(ExecError::Interrupted(format!(
                        "call {} cancelled",
                        ctx.call_id
                    )));
                }
                _ = sleep(self.latency) => {}
            }
        }
        Ok(())
    }

    fn resolve(&self, locator: &str) -> Result<(), ExecError> {
        match self.failures.get(locator) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ActionExecutor for SimulatedExecutor {
    async fn navigate(&self, ctx: &ExecCtx, url: &str) -> Result<(), ExecError> {
        self.settle(ctx).await?;
        self.resolve(url)?;
        if Url::parse(url).is_ok() || url.starts_with('/') {
            debug!(call = %ctx.call_id, url, "Simulated navigation");
            Ok(())
        } else {
            Err(ExecError::NotFound(format!(
                "navigation target '{url}' is neither a URL nor a path"
            )))
        }
    }

    async fn click(&self, ctx: &ExecCtx, locator: &str) -> Result<(), ExecError> {
        self.settle(ctx).await?;
        debug!(call = %ctx.call_id, locator, "Simulated click");
        self.resolve(locator)
    }

    async fn type_text(&self, ctx: &ExecCtx, locator: &str, text: &str) -> Result<(), ExecError> {
        self.settle(ctx).await?;
        debug!(call = %ctx.call_id, locator, chars = text.len(), "Simulated type");
        self.resolve(locator)
    }

    async fn assert(
        &self,
        ctx: &ExecCtx,
        locator: &str,
        condition: &str,
    ) -> Result<(), ExecError> {
        self.settle(ctx).await?;
        debug!(call = %ctx.call_id, locator, condition, "Simulated assert");
        if locator == CURRENT_LOCATION {
            // Asserting on the page location always resolves; only a
            // scripted failure can reject the condition.
            return self.resolve(condition);
        }
        self.resolve(locator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use testflow_model::{Action, ActionKind};
    use tokio_util::sync::CancellationToken;

    fn ctx() -> ExecCtx {
        ExecCtx::new(
            Instant::now() + Duration::from_secs(5),
            CancellationToken::new(),
        )
    }

    #[tokio::test]
    async fn navigate_accepts_urls_and_paths() {
        let sim = SimulatedExecutor::new();

        assert!(sim.navigate(&ctx(), "https://example.com").await.is_ok());
        assert!(sim.navigate(&ctx(), "/login").await.is_ok());

        let err = sim.navigate(&ctx(), "not a url").await.unwrap_err();
        assert!(matches!(err, ExecError::NotFound(_)));
    }

    #[tokio::test]
    async fn scripted_failures_apply_to_matching_locators_only() {
        let sim = SimulatedExecutor::new().fail_on(
            "#missing",
            ExecError::NotFound("#missing".into()),
        );

        assert!(sim.click(&ctx(), "#present").await.is_ok());
        assert_eq!(
            sim.click(&ctx(), "#missing").await.unwrap_err(),
            ExecError::NotFound("#missing".into())
        );
        assert_eq!(
            sim.type_text(&ctx(), "#missing", "x").await.unwrap_err(),
            ExecError::NotFound("#missing".into())
        );
    }

    #[tokio::test]
    async fn assert_on_current_location_resolves() {
        let sim = SimulatedExecutor::new();

        let action = Action::new(ActionKind::Assert, CURRENT_LOCATION).with_value("/dashboard");
        assert!(sim.execute(&ctx(), &action).await.is_ok());
    }

    #[tokio::test]
    async fn cancellation_interrupts_the_latency_wait() {
        let sim = SimulatedExecutor::new().with_latency(Duration::from_secs(10));
        let token = CancellationToken::new();
        let ctx = ExecCtx::new(Instant::now() + Duration::from_secs(30), token.clone());

        token.cancel();
        let err = sim.click(&ctx, "#button").await.unwrap_err();

        assert!(matches!(err, ExecError::Interrupted(_)));
    }

    #[tokio::test]
    async fn latency_beyond_the_deadline_times_out() {
        let sim = SimulatedExecutor::new().with_latency(Duration::from_secs(60));
        let ctx = ExecCtx::new(
            Instant::now() + Duration::from_millis(20),
            CancellationToken::new(),
        );

        let err = sim.click(&ctx, "#button").await.unwrap_err();

        assert!(matches!(err, ExecError::Timeout(_)));
    }
}
