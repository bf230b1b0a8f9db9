//! 异步内容加载：在 tokio 运行时上批量拉取文件内容，通过 channel 把结果送回主循环。

use std::io;
use std::sync::mpsc::Sender;
use std::sync::Arc;

use crate::kernel::services::ports::{AsyncExecutor, BoxFuture, ContentSource};
use crate::kernel::store::ContentRequest;
use crate::models::FileId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentMessage {
    BatchLoaded {
        ticket: u64,
        contents: Vec<(FileId, String)>,
        /// `(id, error)` for fetches that failed.
        failed: Vec<(FileId, String)>,
    },
}

pub struct ContentLoader {
    runtime: tokio::runtime::Runtime,
    tx: Sender<ContentMessage>,
}

impl ContentLoader {
    pub fn new(tx: Sender<ContentMessage>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self { runtime, tx })
    }

    pub fn tokio_handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    /// 按顺序拉取 `request` 中的每个文件，完成后发送一条 `BatchLoaded`
    pub fn load_batch(&self, request: ContentRequest, source: Arc<dyn ContentSource>) {
        let tx = self.tx.clone();
        self.spawn(Box::pin(async move {
            let ContentRequest { ticket, items } = request;
            let mut contents = Vec::with_capacity(items.len());
            let mut failed = Vec::new();
            for (id, path) in items {
                match source.fetch(&path).await {
                    Ok(content) => contents.push((id, content)),
                    Err(e) => {
                        tracing::warn!(path = %path, error = %e, "content fetch failed");
                        failed.push((id, e.to_string()));
                    }
                }
            }
            let _ = tx.send(ContentMessage::BatchLoaded {
                ticket,
                contents,
                failed,
            });
        }));
    }
}

impl AsyncExecutor for ContentLoader {
    fn spawn(&self, task: BoxFuture) {
        self.runtime.spawn(task);
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/content_loader.rs"]
mod tests;
