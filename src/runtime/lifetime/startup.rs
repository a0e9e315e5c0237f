use crate::errors::Result;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 启动时打印当前数据规模
async fn log_record_counts(storage: &Arc<dyn Storage>) {
    match storage.dashboard_stats(0).await {
        Ok(stats) => debug!(
            "Records loaded: {} student(s), {} subject(s), {} mark(s)",
            stats.students.count, stats.subjects.count, stats.marks.count
        ),
        Err(e) => warn!("Failed to count records at startup: {}", e),
    }
}

/// 准备服务器启动的上下文
/// 包括存储初始化和数据库连通性检查
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    storage.ping().await?;

    if cfg!(debug_assertions) {
        log_record_counts(&storage).await;
    }

    Ok(StartupContext { storage })
}
