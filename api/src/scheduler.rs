use crate::service::MemeService;
use common::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

/// Refresh immediately, then once per `period`, for as long as the process runs
pub fn spawn(service: Arc<MemeService>, period: Duration) -> JoinHandle<()> {
    info!("Scheduling refresh every {:?}", period);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            // the first tick completes at once
            ticker.tick().await;
            run_cycle(&service).await;
        }
    })
}

/// One triggered refresh; failures are logged, never propagated
pub async fn run_cycle(service: &Arc<MemeService>) -> Option<usize> {
    match service.refresh().await {
        Ok(count) => Some(count),
        Err(Error::RefreshInProgress) => {
            warn!("Previous refresh still running, skipping this trigger");
            None
        }
        Err(e) => {
            error!("Refresh failed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{coin, ListingGate, StubSource};
    use common::ChainProfile;
    use store::PageStore;

    #[tokio::test]
    async fn refreshes_on_start_and_on_every_tick() {
        let source = Arc::new(StubSource::new().with_listing(vec![coin("dogecoin", "doge", "Dogecoin", 1.0)]));
        let service = Arc::new(MemeService::new(
            source.clone(),
            ChainProfile::default(),
            Arc::new(PageStore::new()),
            1,
        ));

        let handle = spawn(service.clone(), Duration::from_millis(20));

        let mut cycles = 0;
        for _ in 0..200 {
            cycles = source.calls().iter().filter(|c| c.starts_with("markets")).count();
            if cycles >= 3 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        handle.abort();

        assert!(cycles >= 3, "only {} cycles ran", cycles);
        assert!(service.snapshot().await.is_content());
    }

    #[tokio::test]
    async fn trigger_during_running_cycle_is_skipped() {
        let gate = Arc::new(ListingGate::default());
        let source = Arc::new(StubSource::new().with_listing(Vec::new()).with_gate(gate.clone()));
        let service = Arc::new(MemeService::new(
            source.clone(),
            ChainProfile::default(),
            Arc::new(PageStore::new()),
            1,
        ));

        let running = tokio::spawn({
            let service = service.clone();
            async move { run_cycle(&service).await }
        });
        gate.entered.notified().await;

        assert_eq!(run_cycle(&service).await, None);

        gate.release.notify_one();
        assert_eq!(running.await.unwrap(), Some(0));
    }

    #[tokio::test]
    async fn failed_cycle_is_absorbed() {
        let service = Arc::new(MemeService::new(
            Arc::new(StubSource::new()),
            ChainProfile::default(),
            Arc::new(PageStore::new()),
            1,
        ));

        assert_eq!(run_cycle(&service).await, None);
        assert!(service.snapshot().await.is_error());
    }
}
