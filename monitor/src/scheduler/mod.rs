//! Cron-driven channel validation
//!
//! Uses 6-field cron expressions (sec min hour day month dow), for example
//! `validation_schedule = "0 0 0 * * *"` to re-check every channel daily at
//! midnight.

use anyhow::{anyhow, Result};
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{info, warn};

use crate::services::ChannelValidator;

pub struct ValidationScheduler {
    validator: Arc<ChannelValidator>,
    schedule: String,
    scheduler: JobScheduler,
}

impl ValidationScheduler {
    pub async fn new(validator: Arc<ChannelValidator>, schedule: String) -> Result<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| anyhow!("Failed to create JobScheduler: {}", e))?;

        Ok(Self {
            validator,
            schedule,
            scheduler,
        })
    }

    pub async fn start(&self) -> Result<()> {
        validate_6_field_cron(&self.schedule)
            .map_err(|e| anyhow!("Invalid 6-field cron schedule '{}': {}", self.schedule, e))?;

        let validator = self.validator.clone();
        let job = Job::new_async(self.schedule.as_str(), move |_uuid, _scheduler| {
            let validator = validator.clone();
            Box::pin(async move {
                let summary = validator.validate_all().await;
                if !summary.invalid.is_empty() {
                    warn!(
                        "Scheduled validation found {} unreachable channels: {:?}",
                        summary.invalid.len(),
                        summary.invalid
                    );
                }
            })
        })
        .map_err(|e| anyhow!("Failed to create validation job: {}", e))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| anyhow!("Failed to add validation job: {}", e))?;
        self.scheduler
            .start()
            .await
            .map_err(|e| anyhow!("Failed to start scheduler: {}", e))?;

        info!("✓ Channel validation scheduled: {}", self.schedule);
        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| anyhow!("Failed to stop scheduler: {}", e))
    }
}

pub fn validate_6_field_cron(schedule: &str) -> Result<()> {
    let parts: Vec<&str> = schedule.split_whitespace().collect();

    if parts.len() != 6 {
        return Err(anyhow!(
            "tokio-cron-scheduler requires exactly 6 fields: second minute hour day month dayofweek. Got {} fields: '{}'",
            parts.len(),
            schedule
        ));
    }

    validate_cron_field(parts[0], "second", 0, 59)?;
    validate_cron_field(parts[1], "minute", 0, 59)?;
    validate_cron_field(parts[2], "hour", 0, 23)?;
    validate_cron_field(parts[3], "day", 1, 31)?;
    validate_cron_field(parts[4], "month", 1, 12)?;
    validate_cron_field(parts[5], "dayofweek", 0, 7)?;

    Ok(())
}

fn validate_cron_field(field: &str, name: &str, min: u32, max: u32) -> Result<()> {
    if field == "*" || field == "?" {
        return Ok(());
    }

    if let Some(step) = field.strip_prefix("*/") {
        let step = step
            .parse::<u32>()
            .map_err(|_| anyhow!("Invalid {} step value: {}", name, step))?;
        if step == 0 {
            return Err(anyhow!("{} step value cannot be 0", name));
        }
        return Ok(());
    }

    let check = |value: &str| -> Result<()> {
        let value = value
            .parse::<u32>()
            .map_err(|_| anyhow!("Invalid {} value: {}", name, value))?;
        if value < min || value > max {
            return Err(anyhow!(
                "{} value {} is outside valid range {}-{}",
                name,
                value,
                min,
                max
            ));
        }
        Ok(())
    };

    for part in field.split(',') {
        match part.split_once('-') {
            Some((start, end)) => {
                check(start)?;
                check(end)?;
            }
            None => check(part)?,
        }
    }

    Ok(())
}
