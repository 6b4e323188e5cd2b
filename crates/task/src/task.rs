// This file is part of Feestimi.
//
// Feestimi is free software: you can redistribute it and/or modify it under the
// terms of the GNU Lesser General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version.
//
// Feestimi is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with Feestimi.
// If not, see https://www.gnu.org/licenses/.


//! Task trait and helper functions

use std::future::Future;

use async_trait::async_trait;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Core task trait implemented by top level Feestimi tasks.
#[async_trait]
pub trait Task: Sync + Send + 'static {
    /// Run the task until `shutdown_token` is cancelled.
    async fn run(self: Box<Self>, shutdown_token: CancellationToken) -> anyhow::Result<()>;
}

/// Run a set of tasks until `signal` resolves or any task exits, then cancel
/// the rest and wait for them to finish.
pub async fn spawn_tasks_with_shutdown<T, R, E>(
    tasks: impl IntoIterator<Item = Box<dyn Task>>,
    signal: T,
) where
    T: Future<Output = Result<R, E>> + Send + 'static,
    E: std::fmt::Debug,
{
    let shutdown_token = CancellationToken::new();
    let mut running = JoinSet::new();
    for task in tasks {
        running.spawn(task.run(shutdown_token.clone()));
    }

    tokio::select! {
        Some(res) = running.join_next() => {
            match res {
                Ok(Ok(())) => warn!("Task exited before shutdown was requested"),
                Ok(Err(err)) => error!("Task failed: {err:?}"),
                Err(err) => error!("Task panicked: {err:?}"),
            }
        }
        res = signal => {
            match res {
                Ok(_) => info!("Received signal, shutting down"),
                Err(err) => error!("Error while waiting for signal: {err:?}"),
            }
        }
    }

    shutdown_token.cancel();
    while let Some(res) = running.join_next().await {
        match res {
            Ok(Ok(())) => {}
            Ok(Err(err)) => error!("Task failed during shutdown: {err:?}"),
            Err(err) => error!("Task panicked during shutdown: {err:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
        time::Duration,
    };

    use super::*;

    struct WaitForShutdown(Arc<AtomicBool>);

    #[async_trait]
    impl Task for WaitForShutdown {
        async fn run(self: Box<Self>, shutdown_token: CancellationToken) -> anyhow::Result<()> {
            shutdown_token.cancelled().await;
            self.0.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailImmediately;

    #[async_trait]
    impl Task for FailImmediately {
        async fn run(self: Box<Self>, _shutdown_token: CancellationToken) -> anyhow::Result<()> {
            anyhow::bail!("failed to bind")
        }
    }

    #[tokio::test]
    async fn test_tasks_stop_on_signal() {
        let stopped = Arc::new(AtomicBool::new(false));
        spawn_tasks_with_shutdown(
            [Box::new(WaitForShutdown(stopped.clone())) as Box<dyn Task>],
            async { Ok::<_, std::io::Error>(()) },
        )
        .await;
        assert!(stopped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_failed_task_stops_the_rest() {
        let stopped = Arc::new(AtomicBool::new(false));
        let tasks: Vec<Box<dyn Task>> = vec![
            Box::new(WaitForShutdown(stopped.clone())),
            Box::new(FailImmediately),
        ];
        tokio::time::timeout(
            Duration::from_secs(5),
            spawn_tasks_with_shutdown(tasks, std::future::pending::<Result<(), std::io::Error>>()),
        )
        .await
        .unwrap();
        assert!(stopped.load(Ordering::SeqCst));
    }
}
