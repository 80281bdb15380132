use std::time::Duration;

use chrono::{NaiveDate, Utc};
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use redis::Client;

use crate::error::{AppError, AppResult};

/// Daily counters expire after a week
const DAILY_KEY_TTL: i64 = 604800;

/// Upper bound on reaching Redis, so an unresponsive host cannot stall provider calls
const REDIS_CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

/// Creates a Redis client for API usage counters
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Redis-backed counter of requests made to an external API
///
/// Counting is best-effort: Redis failures are logged and never block a request.
#[derive(Clone)]
pub struct ApiUsage {
    redis_client: Client,
    provider: &'static str,
    daily_limit: u32,
}

impl ApiUsage {
    pub fn new(redis_client: Client, provider: &'static str, daily_limit: u32) -> Self {
        Self {
            redis_client,
            provider,
            daily_limit,
        }
    }

    /// Redis key holding the request count of `provider` on `date`
    pub fn daily_key(provider: &str, date: NaiveDate) -> String {
        format!("api_usage:{}:daily:{}", provider, date.format("%Y-%m-%d"))
    }

    fn today_key(&self) -> String {
        Self::daily_key(self.provider, Utc::now().date_naive())
    }

    /// Refuses the call once today's count has reached the daily limit
    pub async fn check_quota(&self) -> AppResult<()> {
        let count = match self.current_count().await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(error = %e, provider = self.provider, "Redis usage lookup failed");
                return Ok(());
            }
        };

        if count >= self.daily_limit {
            tracing::error!(
                current = count,
                quota = self.daily_limit,
                provider = self.provider,
                "Daily API quota exceeded"
            );
            return Err(AppError::ProviderQuotaExceeded);
        }

        if count as f32 / self.daily_limit as f32 > 0.8 {
            tracing::warn!(
                current = count,
                quota = self.daily_limit,
                remaining = self.daily_limit - count,
                provider = self.provider,
                "API quota at 80%"
            );
        }

        Ok(())
    }

    /// Counts one request against today's quota
    pub async fn record_request(&self) {
        if let Err(e) = self.increment().await {
            tracing::warn!(error = %e, provider = self.provider, "Redis usage increment failed");
        }
    }

    async fn connection(&self) -> redis::RedisResult<MultiplexedConnection> {
        tokio::time::timeout(
            REDIS_CONNECT_TIMEOUT,
            self.redis_client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| {
            redis::RedisError::from((redis::ErrorKind::IoError, "Redis connection timed out"))
        })?
    }

    async fn current_count(&self) -> redis::RedisResult<u32> {
        let mut conn = self.connection().await?;
        let count: Option<u32> = conn.get(self.today_key()).await?;
        Ok(count.unwrap_or(0))
    }

    async fn increment(&self) -> redis::RedisResult<()> {
        let key = self.today_key();
        let mut conn = self.connection().await?;

        let count: u32 = conn.incr(&key, 1).await?;
        let _: () = conn.expire(&key, DAILY_KEY_TTL).await?;

        tracing::debug!(
            daily_count = count,
            quota_remaining = self.daily_limit.saturating_sub(count),
            provider = self.provider,
            "API usage incremented"
        );

        Ok(())
    }
}
