use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const QUEUE_KEY: &str = "sales_tax:import_jobs";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportJobMessage {
    pub job_id: Uuid,
    pub text: String,
}

/// Single-priority durable queue backed by a Redis list: `LPUSH` to enqueue,
/// blocking `BRPOP` to dequeue. Survives a worker restart because the
/// message stays in the list until a worker actually pops it.
pub struct ImportQueue {
    conn: ConnectionManager,
}

impl ImportQueue {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    pub async fn enqueue(&self, message: &ImportJobMessage) -> Result<(), redis::RedisError> {
        let mut conn = self.conn.clone();
        let payload = serde_json::to_string(message).expect("ImportJobMessage always serializes");
        conn.lpush::<_, _, ()>(QUEUE_KEY, payload).await
    }

    /// Blocks up to `timeout_secs` for a message; returns `None` on timeout
    /// so the worker loop can check for shutdown between polls.
    pub async fn dequeue(&self, timeout_secs: f64) -> Result<Option<ImportJobMessage>, redis::RedisError> {
        let mut conn = self.conn.clone();
        let result: Option<(String, String)> = conn.brpop(QUEUE_KEY, timeout_secs).await?;
        Ok(result.and_then(|(_, payload)| serde_json::from_str(&payload).ok()))
    }
}
