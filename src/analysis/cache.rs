//! Short-lived memo of the runtime command table.
//!
//! Concurrent misses are not coalesced: two callers that both find the
//! entry stale will both query the table. The lock is never held across
//! the query.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::host::{CommandTable, HostError};

/// Memoizes [`CommandTable::registered_commands`] for a fixed TTL.
pub struct CommandCache {
    table: Arc<dyn CommandTable>,
    ttl: Duration,
    entry: Mutex<Option<(Instant, Arc<HashSet<String>>)>>,
}

impl CommandCache {
    /// Cache `table` for `ttl`. A zero TTL disables caching.
    pub fn new(table: Arc<dyn CommandTable>, ttl: Duration) -> Self {
        Self {
            table,
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// Registered commands, fresh or memoized.
    pub async fn get(&self) -> Result<Arc<HashSet<String>>, HostError> {
        {
            let entry = self.entry.lock().await;
            if let Some((fetched_at, commands)) = entry.as_ref() {
                if fetched_at.elapsed() < self.ttl {
                    return Ok(Arc::clone(commands));
                }
            }
        }

        let commands = Arc::new(self.table.registered_commands().await?);
        *self.entry.lock().await = Some((Instant::now(), Arc::clone(&commands)));
        Ok(commands)
    }

    /// Drop the memoized entry.
    pub async fn invalidate(&self) {
        *self.entry.lock().await = None;
    }
}
