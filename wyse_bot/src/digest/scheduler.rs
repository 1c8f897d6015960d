use std::{collections::HashMap, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use chrono_tz::Tz;
use teloxide::{Bot, types::ChatId};
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;
use wyse_core::helpers::schedule::DigestTime;

use crate::{
    dependencies::MarketServices,
    digest::{
        dto::{DigestJob, ScheduleOutcome},
        runner::run_digest,
    },
};

/// Installs and removes the recurring triggers behind digest jobs.
#[async_trait]
pub trait TriggerBackend: Send + Sync {
    async fn install(&self, job: &DigestJob) -> Result<Uuid>;
    async fn remove(&self, trigger_id: Uuid) -> Result<()>;
    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

struct ActiveDigest {
    job: DigestJob,
    trigger_id: Uuid,
}

/// Registry of digest jobs keyed by job name.
///
/// Mutations hold the registry lock for the whole remove/install sequence, so a
/// replace is never observed half done. Fires themselves are not serialised: a
/// trigger runs the digest to completion on the cron task pool, and two fires of
/// the same job can only overlap if a digest outlives its one day period.
pub struct DigestScheduler<B: TriggerBackend> {
    backend: Arc<B>,
    jobs: Arc<Mutex<HashMap<String, ActiveDigest>>>,
}

impl<B: TriggerBackend> Clone for DigestScheduler<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            jobs: self.jobs.clone(),
        }
    }
}

impl<B: TriggerBackend> DigestScheduler<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            jobs: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Installs `job`, replacing any job registered under the same name, and
    /// returns the replaced job.
    ///
    /// The new trigger goes in before the old one comes out. If either step
    /// fails the registry and the live triggers are left as they were.
    pub async fn schedule(&self, job: DigestJob) -> Result<Option<DigestJob>> {
        let mut jobs = self.jobs.lock().await;

        let trigger_id = self.backend.install(&job).await?;

        if let Some(previous) = jobs.get(&job.name) {
            if let Err(e) = self.backend.remove(previous.trigger_id).await {
                log::error!("[digest:{}] failed to remove previous trigger: {}", job.name, e);
                if let Err(undo) = self.backend.remove(trigger_id).await {
                    log::error!("[digest:{}] failed to roll back new trigger: {}", job.name, undo);
                }
                return Err(e);
            }
        }

        log::info!(
            "[digest:{}] scheduled daily at {} ({}) for chat {}",
            job.name,
            job.time,
            job.tz,
            job.chat_id.0
        );
        let replaced = jobs
            .insert(job.name.clone(), ActiveDigest { job, trigger_id })
            .map(|previous| previous.job);
        if let Some(previous) = &replaced {
            log::info!("[digest:{}] replaced previous job at {}", previous.name, previous.time);
        }
        Ok(replaced)
    }

    /// Parses `args` as `HH:MM` and schedules the chat's daily digest at that time.
    pub async fn schedule_for_chat(
        &self,
        chat_id: ChatId,
        args: &str,
        tz: Tz,
    ) -> Result<ScheduleOutcome> {
        let time = match DigestTime::from_args(args) {
            Ok(time) => time,
            Err(e) => return Ok(ScheduleOutcome::Invalid(e)),
        };

        let replaced = self.schedule(DigestJob::new(chat_id, time, tz)).await?;
        Ok(ScheduleOutcome::Scheduled {
            time,
            replaced: replaced.map(|job| job.time),
        })
    }

    /// Removes the job called `name`. Returns whether one existed.
    pub async fn cancel(&self, name: &str) -> Result<bool> {
        let mut jobs = self.jobs.lock().await;

        let Some(active) = jobs.remove(name) else {
            return Ok(false);
        };

        if let Err(e) = self.backend.remove(active.trigger_id).await {
            log::error!("[digest:{}] failed to remove trigger: {}", name, e);
            jobs.insert(name.to_string(), active);
            return Err(e);
        }

        log::info!("[digest:{}] canceled", name);
        Ok(true)
    }

    pub async fn list_for_chat(&self, chat_id: ChatId) -> Vec<DigestJob> {
        self.jobs
            .lock()
            .await
            .values()
            .filter(|active| active.job.chat_id == chat_id)
            .map(|active| active.job.clone())
            .collect()
    }

    /// Removes every job and stops the backend.
    pub async fn shutdown(&self) -> Result<()> {
        let mut jobs = self.jobs.lock().await;

        for (name, active) in jobs.drain() {
            if let Err(e) = self.backend.remove(active.trigger_id).await {
                log::warn!("[digest:{}] failed to remove trigger on shutdown: {}", name, e);
            }
        }

        self.backend.shutdown().await
    }
}

/// Daily triggers on `tokio-cron-scheduler`, each running the digest for its chat.
pub struct CronBackend {
    scheduler: JobScheduler,
    bot: Bot,
    market: MarketServices,
}

impl CronBackend {
    pub fn new(scheduler: JobScheduler, bot: Bot, market: MarketServices) -> Self {
        Self {
            scheduler,
            bot,
            market,
        }
    }
}

#[async_trait]
impl TriggerBackend for CronBackend {
    async fn install(&self, job: &DigestJob) -> Result<Uuid> {
        let bot = self.bot.clone();
        let market = self.market.clone();
        let chat_id = job.chat_id;
        let name = job.name.clone();
        let expression = job.time.cron_expression();

        let cron_job = Job::new_async_tz(expression.as_str(), job.tz, move |_uuid, _l| {
            let bot = bot.clone();
            let market = market.clone();
            let name = name.clone();
            Box::pin(async move {
                log::info!("[digest:{}] firing for chat {}", name, chat_id.0);
                run_digest(&bot, &market, chat_id).await;
                log::info!("[digest:{}] completed", name);
            })
        })?;

        let id = self.scheduler.add(cron_job).await?;
        Ok(id)
    }

    async fn remove(&self, trigger_id: Uuid) -> Result<()> {
        self.scheduler.remove(&trigger_id).await?;
        Ok(())
    }

    async fn shutdown(&self) -> Result<()> {
        let mut scheduler = self.scheduler.clone();
        scheduler.shutdown().await?;
        log::info!("Digest scheduler stopped");
        Ok(())
    }
}
