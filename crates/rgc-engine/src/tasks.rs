//! A [`JoinSet`] that remembers which path each task works on.

use std::collections::HashMap;
use std::future::Future;
use tokio::task::{Id, JoinError, JoinSet};

pub(crate) struct PathTasks<T> {
    set: JoinSet<T>,
    paths: HashMap<Id, String>,
}

impl<T: Send + 'static> PathTasks<T> {
    pub fn new() -> Self {
        Self {
            set: JoinSet::new(),
            paths: HashMap::new(),
        }
    }

    pub fn spawn<F>(&mut self, path: String, task: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        let handle = self.set.spawn(task);
        self.paths.insert(handle.id(), path);
    }

    /// Next finished task, or `None` once the set is empty.
    ///
    /// A task that panicked or was cancelled comes back as its path and the
    /// join error.
    pub async fn join_next(&mut self) -> Option<Result<T, (String, JoinError)>> {
        let joined = self.set.join_next_with_id().await?;
        Some(match joined {
            Ok((id, value)) => {
                self.paths.remove(&id);
                Ok(value)
            }
            Err(e) => {
                let path = self.paths.remove(&e.id()).unwrap_or_default();
                Err((path, e))
            }
        })
    }

    pub fn abort_all(&mut self) {
        self.set.abort_all();
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }
}
