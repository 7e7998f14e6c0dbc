use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinHandle};

pub struct TaskGroup<T> {
    semaphore: Option<Arc<Semaphore>>,
    handles: Vec<JoinHandle<T>>,
}

impl<T: Send + 'static> TaskGroup<T> {
    pub fn new(max_concurrent: Option<NonZeroUsize>) -> Self {
        Self {
            semaphore: max_concurrent.map(|n| Arc::new(Semaphore::new(n.get()))),
            handles: Vec::new(),
        }
    }

    pub fn spawn<F>(&mut self, f: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        let semaphore = self.semaphore.clone();
        let handle = tokio::spawn(async move {
            // Permit is taken inside the task so spawn never waits.
            let _permit = match semaphore {
                Some(semaphore) => semaphore.acquire_owned().await.ok(),
                None => None,
            };
            f.await
        });
        self.handles.push(handle);
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub async fn join(self) -> Vec<Result<T, JoinError>> {
        futures::future::join_all(self.handles).await
    }
}
