//! # lexi-engine
//!
//! The quiz engine: learning-batch maintenance, periodic dispatch, inbound
//! outcome handling, and expired-callback sweeping.
//!
//! Every service holds only the handles it needs (store, clock, gateway,
//! settings) and exposes a `tick()` that runs exactly one cycle. The
//! [`Supervisor`] drives those cycles on timers in production; tests call
//! them directly with a `ManualClock`.

pub mod batch;
pub mod dispatch;
pub mod error;
pub mod fanout;
pub mod gateway;
pub mod outcome;
pub mod settings;
pub mod supervisor;
pub mod sweeper;

use std::sync::Arc;

use lexi_core::clock::Clock;
use lexi_db::LexiDb;

pub use batch::{BatchMaintainer, BatchReport};
pub use dispatch::{DispatchOutcome, DispatchScheduler, DispatchTick};
pub use error::EngineError;
pub use gateway::{DeliveryError, MessagingGateway};
pub use outcome::OutcomeHandler;
pub use settings::{EngineSettings, TenantSource};
pub use supervisor::{Periodic, Supervisor};
pub use sweeper::Sweeper;

/// Shared handles from which every service is built.
#[derive(Clone)]
pub struct Engine {
    db: Arc<LexiDb>,
    clock: Arc<dyn Clock>,
    gateway: Arc<dyn MessagingGateway>,
    settings: Arc<EngineSettings>,
}

impl Engine {
    #[must_use]
    pub fn new(
        db: Arc<LexiDb>,
        clock: Arc<dyn Clock>,
        gateway: Arc<dyn MessagingGateway>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            db,
            clock,
            gateway,
            settings: Arc::new(settings),
        }
    }

    #[must_use]
    pub const fn db(&self) -> &Arc<LexiDb> {
        &self.db
    }

    #[must_use]
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    #[must_use]
    pub fn outcomes(&self) -> OutcomeHandler {
        OutcomeHandler::new(
            Arc::clone(&self.db),
            Arc::clone(&self.clock),
            Arc::clone(&self.settings),
        )
    }

    #[must_use]
    pub fn dispatcher(&self) -> DispatchScheduler {
        DispatchScheduler::new(
            Arc::clone(&self.db),
            Arc::clone(&self.clock),
            Arc::clone(&self.gateway),
            Arc::clone(&self.settings),
        )
    }

    #[must_use]
    pub fn maintainer(&self) -> BatchMaintainer {
        BatchMaintainer::new(
            Arc::clone(&self.db),
            Arc::clone(&self.clock),
            Arc::clone(&self.settings),
        )
    }

    #[must_use]
    pub fn sweeper(&self) -> Sweeper {
        Sweeper::new(
            Arc::clone(&self.db),
            Arc::clone(&self.clock),
            Arc::clone(&self.settings),
        )
    }

    /// Spawn the sweeper, batch maintainer, and dispatch scheduler loops.
    #[must_use]
    pub fn start(&self) -> Supervisor {
        let mut supervisor = Supervisor::new();
        supervisor.spawn(Arc::new(self.sweeper()));
        supervisor.spawn(Arc::new(self.maintainer()));
        supervisor.spawn(Arc::new(self.dispatcher()));
        supervisor
    }
}
