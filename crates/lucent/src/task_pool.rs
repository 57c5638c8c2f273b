//! Background executor for work that must not block the UI thread.
//!
//! Widgets are only ever touched on the thread that owns the [`WidgetTree`].
//! Results of background work reach the tree through a [`TreeProxy`], so they
//! land at the next `sync` like any other deferred operation.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use async_executor::{Executor, Task};
use lucent_ui::{TreeProxy, WidgetTree};

/// A thread pool for executing async tasks.
///
/// # Example
///
/// ```
/// use lucent::TaskPool;
///
/// let pool = TaskPool::new(2);
/// let task = pool.spawn(async { 6 * 7 });
/// assert_eq!(TaskPool::block_on(task), 42);
/// ```
pub struct TaskPool {
    executor: Arc<Executor<'static>>,
    threads: Vec<thread::JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

impl TaskPool {
    /// Create a pool with `num_threads` workers. Zero is bumped to one.
    pub fn new(num_threads: usize) -> Self {
        let num_threads = if num_threads == 0 {
            tracing::warn!("TaskPool requested with 0 threads, using 1");
            1
        } else {
            num_threads
        };

        let executor = Arc::new(Executor::new());
        let shutdown = Arc::new(AtomicBool::new(false));
        let mut threads = Vec::with_capacity(num_threads);

        for i in 0..num_threads {
            let exec = executor.clone();
            let shutdown_flag = shutdown.clone();

            let spawned = thread::Builder::new()
                .name(format!("lucent-task-{}", i))
                .spawn(move || {
                    while !shutdown_flag.load(Ordering::Relaxed) {
                        if !exec.try_tick() {
                            thread::sleep(Duration::from_millis(1));
                        }
                    }
                });

            match spawned {
                Ok(handle) => threads.push(handle),
                Err(e) => tracing::error!("Failed to spawn task pool thread {}: {}", i, e),
            }
        }

        tracing::debug!("TaskPool created with {} threads", threads.len());

        Self {
            executor,
            threads,
            shutdown,
        }
    }

    /// Create a task pool using the number of available CPU cores.
    pub fn with_num_cpus() -> Self {
        Self::new(num_cpus::get())
    }

    /// Uses max(1, num_cpus - 1) to leave one core for the UI thread.
    pub fn default_threads() -> Self {
        let num_threads = (num_cpus::get().saturating_sub(1)).max(1);
        Self::new(num_threads)
    }

    pub fn spawn<T>(&self, future: impl Future<Output = T> + Send + 'static) -> Task<T>
    where
        T: Send + 'static,
    {
        self.executor.spawn(future)
    }

    /// Run `future` on the pool and hand its output to `apply` on the UI
    /// thread, at the tree's next `sync`.
    ///
    /// The returned task only tracks delivery to the proxy. Dropping it
    /// cancels the work; call [`Task::detach`] to let it run unobserved.
    pub fn spawn_for_ui<T, F, A>(&self, future: F, proxy: &TreeProxy, apply: A) -> Task<()>
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
        A: FnOnce(&mut WidgetTree, T) + Send + 'static,
    {
        let proxy = proxy.clone();
        self.executor.spawn(async move {
            let value = future.await;
            proxy.post(move |tree| apply(tree, value));
        })
    }

    /// Block the calling thread until `task` completes.
    pub fn block_on<T>(task: Task<T>) -> T {
        futures_lite::future::block_on(task)
    }

    /// Take the task's output if it has already finished, without blocking.
    pub fn poll_once<T>(task: &mut Task<T>) -> Option<T> {
        futures_lite::future::block_on(futures_lite::future::poll_once(task))
    }

    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    /// Stop the workers and join them.
    ///
    /// Tasks already running finish their current poll; queued tasks are
    /// not run.
    pub fn shutdown(mut self) {
        tracing::debug!("Shutting down TaskPool with {} threads", self.threads.len());

        self.shutdown.store(true, Ordering::Relaxed);

        let threads = std::mem::take(&mut self.threads);
        for handle in threads {
            if let Err(e) = handle.join() {
                tracing::error!("Task pool thread panicked: {:?}", e);
            }
        }

        tracing::debug!("TaskPool shutdown complete");
    }
}

impl Default for TaskPool {
    fn default() -> Self {
        Self::default_threads()
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

impl std::fmt::Debug for TaskPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskPool")
            .field("threads", &self.threads.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucent_ui::{Theme, Widget};

    #[test]
    fn test_task_pool_creation() {
        let pool = TaskPool::new(2);
        assert_eq!(pool.thread_count(), 2);
    }

    #[test]
    fn test_zero_threads_uses_one() {
        let pool = TaskPool::new(0);
        assert_eq!(pool.thread_count(), 1);
    }

    #[test]
    fn test_multiple_tasks() {
        let pool = TaskPool::new(4);

        let tasks: Vec<_> = (0..10).map(|i| pool.spawn(async move { i * 2 })).collect();
        let results: Vec<_> = tasks.into_iter().map(pollster::block_on).collect();

        assert_eq!(results, vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18]);
    }

    #[test]
    fn test_poll_once_after_completion() {
        let pool = TaskPool::new(1);
        let mut task = pool.spawn(async { "done" });
        while !task.is_finished() {
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(TaskPool::poll_once(&mut task), Some("done"));
    }

    #[test]
    fn test_spawn_for_ui_posts_to_proxy() {
        let pool = TaskPool::new(1);
        let mut tree = WidgetTree::new(Theme::dark());
        let root = tree.root();

        let task = pool.spawn_for_ui(async { "loaded" }, &tree.proxy(), move |tree, name| {
            tree.add_widget(root, Widget::panel().named(name), 0.0, 0.0, 0);
        });
        pollster::block_on(task);

        assert_eq!(tree.proxy().pending(), 1);
        assert!(tree.children(root).is_empty());
        tree.sync();
        assert!(tree.find_by_path("loaded").is_some());
    }

    #[test]
    fn test_default_threads() {
        let pool = TaskPool::default_threads();
        assert!(pool.thread_count() >= 1);
        assert!(pool.thread_count() <= num_cpus::get().max(1));
    }

    #[test]
    fn test_shutdown() {
        let pool = TaskPool::new(2);
        let _first = pool.spawn(async { 1 });
        let _second = pool.spawn(async { 2 });
        pool.shutdown();
    }
}
