//! Shared fixtures for engine scenario tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use lexi_config::LexiConfig;
use lexi_core::clock::ManualClock;
use lexi_core::entities::NewWord;
use lexi_core::ids::TenantId;
use lexi_core::responses::QuizPrompt;
use lexi_db::LexiDb;
use lexi_engine::{DeliveryError, Engine, EngineSettings, MessagingGateway, TenantSource};

/// How the fake gateway treats one tenant.
#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    Unreachable,
    Hang,
    Panic,
}

/// Records every delivered prompt; misbehaves for selected tenants.
#[derive(Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<QuizPrompt>>,
    behaviour: Mutex<HashMap<TenantId, Behaviour>>,
}

impl RecordingGateway {
    pub fn misbehave(&self, tenant: TenantId, behaviour: Behaviour) {
        self.behaviour.lock().unwrap().insert(tenant, behaviour);
    }

    pub fn sent(&self) -> Vec<QuizPrompt> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, tenant: TenantId) -> Vec<QuizPrompt> {
        self.sent()
            .into_iter()
            .filter(|p| p.tenant_id == tenant)
            .collect()
    }
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn send_prompt(&self, prompt: &QuizPrompt) -> Result<(), DeliveryError> {
        let behaviour = self.behaviour.lock().unwrap().get(&prompt.tenant_id).copied();
        match behaviour {
            Some(Behaviour::Unreachable) => {
                return Err(DeliveryError::RecipientUnreachable(prompt.tenant_id));
            }
            Some(Behaviour::Hang) => tokio::time::sleep(Duration::from_secs(30)).await,
            Some(Behaviour::Panic) => panic!("gateway exploded for {}", prompt.tenant_id),
            None => {}
        }
        self.sent.lock().unwrap().push(prompt.clone());
        Ok(())
    }
}

/// Noon UTC on a weekday, inside the default 09-22 window.
pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap()
}

pub struct Harness {
    pub engine: Engine,
    pub db: Arc<LexiDb>,
    pub clock: Arc<ManualClock>,
    pub gateway: Arc<RecordingGateway>,
    _dir: TempDir,
}

impl Harness {
    pub async fn new() -> Self {
        Self::with_settings(|_| {}).await
    }

    pub async fn with_settings(tweak: impl FnOnce(&mut EngineSettings)) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lexi.db");
        let db = Arc::new(LexiDb::open_local(path.to_str().unwrap()).await.unwrap());
        let clock = Arc::new(ManualClock::new(noon()));
        let gateway = Arc::new(RecordingGateway::default());

        let mut settings = EngineSettings::from_config(&LexiConfig::default()).unwrap();
        settings.tenants = TenantSource::Discover;
        settings.surprise_probability = 0.0;
        tweak(&mut settings);

        let engine = Engine::new(db.clone(), clock.clone(), gateway.clone(), settings);
        Self {
            engine,
            db,
            clock,
            gateway,
            _dir: dir,
        }
    }

    /// Add `count` words named `<prefix>0..` for `tenant`.
    pub async fn seed(&self, tenant: TenantId, prefix: &str, count: usize) -> Vec<String> {
        let words: Vec<_> = (0..count)
            .map(|i| NewWord::new(&format!("{prefix}{i}"), &format!("t{i}"), None).unwrap())
            .collect();
        self.db.import_words(tenant, &words, self.clock_now()).await.unwrap();
        words.into_iter().map(|w| w.word).collect()
    }

    pub fn clock_now(&self) -> DateTime<Utc> {
        use lexi_core::clock::Clock;
        self.clock.now()
    }

    pub async fn streak(&self, tenant: TenantId, word: &str) -> u32 {
        self.db.find_word(tenant, word).await.unwrap().unwrap().streak
    }
}
