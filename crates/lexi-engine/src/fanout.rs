//! Per-tenant fan-out.
//!
//! Each tenant's unit of work runs as its own task on a [`JoinSet`] under its
//! own timeout. A tenant that fails, times out, or panics is reported in its
//! slot; siblings are unaffected. Dropping the fan-out future aborts every
//! task still in flight.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::task::JoinSet;

use lexi_core::ids::TenantId;

use crate::error::EngineError;

/// Outcome of one tenant's unit of work.
#[derive(Debug)]
pub struct TenantResult<T> {
    pub tenant: TenantId,
    pub result: Result<T, EngineError>,
}

/// Counters for one fan-out, for the cycle's summary log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tenants: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl TickReport {
    #[must_use]
    pub fn from_results<T>(results: &[TenantResult<T>]) -> Self {
        let succeeded = results.iter().filter(|r| r.result.is_ok()).count();
        Self {
            tenants: results.len(),
            succeeded,
            failed: results.len() - succeeded,
        }
    }
}

/// Run `work` for every tenant concurrently, each bounded by `limit`.
///
/// Failures are logged here under `operation`; results come back in
/// completion order.
pub async fn for_each_tenant<T, F, Fut>(
    operation: &'static str,
    tenants: Vec<TenantId>,
    limit: Duration,
    work: F,
) -> Vec<TenantResult<T>>
where
    T: Send + 'static,
    F: Fn(TenantId) -> Fut,
    Fut: Future<Output = Result<T, EngineError>> + Send + 'static,
{
    let mut set = JoinSet::new();
    let mut owners = HashMap::with_capacity(tenants.len());

    for tenant in tenants {
        let fut = work(tenant);
        let handle = set.spawn(async move {
            match tokio::time::timeout(limit, fut).await {
                Ok(result) => result,
                Err(_) => Err(EngineError::Timeout {
                    operation,
                    after: limit,
                }),
            }
        });
        owners.insert(handle.id(), tenant);
    }

    let mut results = Vec::with_capacity(owners.len());
    while let Some(joined) = set.join_next_with_id().await {
        let (id, result) = match joined {
            Ok((id, result)) => (id, result),
            Err(join_err) => {
                let reason = if join_err.is_panic() {
                    "tenant task panicked".to_string()
                } else {
                    join_err.to_string()
                };
                (join_err.id(), Err(EngineError::Panicked(reason)))
            }
        };
        let Some(tenant) = owners.remove(&id) else {
            continue;
        };
        if let Err(e) = &result {
            e.log(operation, tenant);
        }
        results.push(TenantResult { tenant, result });
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn isolates_failures_timeouts_and_panics() {
        let tenants = (1..=4).map(TenantId).collect();
        let results = for_each_tenant("test", tenants, Duration::from_millis(100), |t| async move {
            match t.get() {
                1 => Ok(t.get()),
                2 => Err(EngineError::NotFound("word")),
                3 => {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok(0)
                }
                _ => panic!("boom"),
            }
        })
        .await;

        assert_eq!(results.len(), 4);
        let by_tenant = |id: i64| {
            results
                .iter()
                .find(|r| r.tenant == TenantId(id))
                .map(|r| &r.result)
                .unwrap()
        };
        assert!(matches!(by_tenant(1), Ok(1)));
        assert!(matches!(by_tenant(2), Err(EngineError::NotFound(_))));
        assert!(matches!(by_tenant(3), Err(EngineError::Timeout { .. })));
        assert!(matches!(by_tenant(4), Err(EngineError::Panicked(_))));

        let report = TickReport::from_results(&results);
        assert_eq!(
            report,
            TickReport {
                tenants: 4,
                succeeded: 1,
                failed: 3,
            }
        );
    }

    #[tokio::test]
    async fn no_tenants_is_an_empty_report() {
        let results: Vec<TenantResult<()>> =
            for_each_tenant("test", Vec::new(), Duration::from_secs(1), |_| async { Ok(()) })
                .await;
        assert_eq!(TickReport::from_results(&results), TickReport::default());
    }
}
