//! Redis Store Module
//!
//! Key-value adapter backed by a Redis server over a multiplexed async
//! connection. Every command is bounded by the configured timeout.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, Client, RedisError};
use tokio::time::timeout;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::store::KeyValueStore;

// == Redis Store ==
/// Store adapter talking to Redis.
#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
    timeout: Duration,
}

impl RedisStore {
    // == Connect ==
    /// Opens a connection to `url` and verifies it with `PING`.
    ///
    /// # Arguments
    /// * `url` - Redis connection URL (e.g. "redis://localhost:6379")
    /// * `command_timeout` - Upper bound for connecting and for each command
    pub async fn connect(url: &str, command_timeout: Duration) -> Result<Self> {
        info!("Connecting to Redis at {}", url);

        let client = Client::open(url)
            .map_err(|e| Error::Connectivity(format!("invalid redis url {}: {}", url, e)))?;

        let conn = timeout(command_timeout, client.get_multiplexed_async_connection())
            .await
            .map_err(|_| {
                Error::Connectivity(format!(
                    "timed out after {:?} connecting to {}",
                    command_timeout, url
                ))
            })?
            .map_err(classify)?;

        let store = Self {
            conn,
            timeout: command_timeout,
        };

        let pong: String = store
            .run("PING", |mut conn| async move {
                redis::cmd("PING").query_async(&mut conn).await
            })
            .await?;
        if pong != "PONG" {
            return Err(Error::Protocol(format!("unexpected PING reply: {}", pong)));
        }

        info!("Redis connection established");
        Ok(store)
    }

    /// Runs one command on a clone of the shared connection under the timeout.
    async fn run<T, F, Fut>(&self, name: &'static str, command: F) -> Result<T>
    where
        F: FnOnce(MultiplexedConnection) -> Fut,
        Fut: Future<Output = redis::RedisResult<T>>,
    {
        match timeout(self.timeout, command(self.conn.clone())).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                warn!("Redis {} failed: {}", name, e);
                Err(classify(e))
            }
            Err(_) => {
                warn!("Redis {} timed out after {:?}", name, self.timeout);
                Err(Error::Connectivity(format!(
                    "{} timed out after {:?}",
                    name, self.timeout
                )))
            }
        }
    }
}

/// Maps a Redis error onto the store error taxonomy.
fn classify(e: RedisError) -> Error {
    if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout()
    {
        Error::Connectivity(e.to_string())
    } else {
        Error::Protocol(e.to_string())
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> Result<()> {
        match ttl_seconds {
            Some(ttl) => {
                self.run("SETEX", |mut conn| async move {
                    redis::cmd("SETEX")
                        .arg(key)
                        .arg(ttl)
                        .arg(value)
                        .query_async::<()>(&mut conn)
                        .await
                })
                .await
            }
            None => {
                self.run("SET", |mut conn| async move {
                    redis::cmd("SET")
                        .arg(key)
                        .arg(value)
                        .query_async::<()>(&mut conn)
                        .await
                })
                .await
            }
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.run("GET", |mut conn| async move {
            redis::cmd("GET")
                .arg(key)
                .query_async::<Option<String>>(&mut conn)
                .await
        })
        .await
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<bool> {
        self.run("EXPIRE", |mut conn| async move {
            redis::cmd("EXPIRE")
                .arg(key)
                .arg(ttl_seconds)
                .query_async::<bool>(&mut conn)
                .await
        })
        .await
    }
}
