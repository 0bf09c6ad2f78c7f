//! Actor System Core
//!
//! Actor lifecycle management and message dispatch. Each spawned actor gets
//! one mailbox and one tokio task draining it, so at most one handler of a
//! given actor runs at any moment while distinct actors run concurrently on
//! the runtime's worker threads.
//!
//! # Lock Ordering
//!
//! When acquiring multiple locks, ALWAYS follow this order:
//! 1. `actors`
//! 2. `task_registry`
//!
//! Neither lock is ever held across an `.await`.

use crate::address::{ActorId, ActorRef, Message};
use crate::error::{ActorError, Result};
use crate::mailbox::{Mailbox, MailboxReceiver};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Core actor system managing actor lifecycles
pub struct ActorSystem {
    /// All actors in the system
    actors: Arc<RwLock<HashMap<ActorId, ActorHandle>>>,

    /// System-wide metrics
    metrics: Arc<SystemMetrics>,

    /// Task registry for proper cleanup on shutdown
    task_registry: Arc<Mutex<HashMap<ActorId, JoinHandle<()>>>>,

    /// System ID for debugging
    system_id: String,
}

/// Snapshot of a running actor
#[derive(Debug, Clone)]
pub struct ActorHandle {
    pub id: ActorId,
    pub name: Arc<str>,
    pub status: ActorStatus,
    pub start_time: Instant,
}

/// Actor status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorStatus {
    Starting,
    Running,
    Stopping,
    Stopped,
    Failed,
}

/// System-wide counters
#[derive(Debug, Default)]
pub struct SystemMetrics {
    pub actors_spawned: AtomicU64,
    pub actors_stopped: AtomicU64,
    pub messages_processed: AtomicU64,
    pub total_processing_time_ns: AtomicU64,

    /// Messages that arrived in a state with no handler for them
    pub unexpected_messages: AtomicU64,
    /// Handler errors other than unexpected messages
    pub handler_failures: AtomicU64,
}

impl SystemMetrics {
    pub fn record_message_handled(&self, duration: Duration) {
        self.messages_processed.fetch_add(1, Ordering::Relaxed);
        self.total_processing_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    pub fn record_unexpected_message(&self) {
        self.unexpected_messages.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_handler_failure(&self) {
        self.handler_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn avg_processing_time_ns(&self) -> f64 {
        let count = self.messages_processed.load(Ordering::Relaxed);
        if count == 0 {
            return 0.0;
        }
        let total = self.total_processing_time_ns.load(Ordering::Relaxed);
        total as f64 / count as f64
    }

    /// Get metrics snapshot
    pub fn get_stats(&self) -> SystemStats {
        SystemStats {
            actors_spawned: self.actors_spawned.load(Ordering::Relaxed),
            actors_stopped: self.actors_stopped.load(Ordering::Relaxed),
            messages_processed: self.messages_processed.load(Ordering::Relaxed),
            avg_processing_time_ns: self.avg_processing_time_ns(),
            unexpected_messages: self.unexpected_messages.load(Ordering::Relaxed),
            handler_failures: self.handler_failures.load(Ordering::Relaxed),
        }
    }
}

/// System statistics
#[derive(Debug, Clone, PartialEq)]
pub struct SystemStats {
    pub actors_spawned: u64,
    pub actors_stopped: u64,
    pub messages_processed: u64,
    pub avg_processing_time_ns: f64,
    pub unexpected_messages: u64,
    pub handler_failures: u64,
}

impl ActorSystem {
    /// Create new actor system
    pub fn new() -> Self {
        let system_id = format!("system-{}", Uuid::new_v4().simple());
        info!(system_id = %system_id, "Creating new actor system");

        Self {
            actors: Arc::new(RwLock::new(HashMap::new())),
            metrics: Arc::new(SystemMetrics::default()),
            task_registry: Arc::new(Mutex::new(HashMap::new())),
            system_id,
        }
    }

    /// Spawn a new actor
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<A>(&self, name: &str, actor: A) -> Result<ActorRef<A::Message>>
    where
        A: ActorBehavior,
    {
        let actor_id = ActorId::new();
        let name: Arc<str> = Arc::from(name);
        let start_time = Instant::now();

        debug!(
            actor_id = %actor_id,
            actor = %name,
            system_id = %self.system_id,
            actor_type = std::any::type_name::<A>(),
            "Spawning new actor in system"
        );

        let (mailbox, receiver) = Mailbox::new();

        // Register before the task can report a status change
        self.actors.write().insert(
            actor_id,
            ActorHandle {
                id: actor_id,
                name: Arc::clone(&name),
                status: ActorStatus::Starting,
                start_time,
            },
        );

        let actor_task = ActorTask {
            id: actor_id,
            name: Arc::clone(&name),
            behavior: Box::new(actor),
            receiver,
            system: self.clone(),
        };

        // Held across spawn so a task that exits immediately finds its entry
        let mut tasks = self.task_registry.lock();
        tasks.insert(actor_id, tokio::spawn(actor_task.run()));
        drop(tasks);

        self.metrics.actors_spawned.fetch_add(1, Ordering::Relaxed);

        let actor_ref = ActorRef::new(actor_id, name, mailbox);

        info!(
            actor_id = %actor_id,
            actor = %actor_ref.name(),
            system_id = %self.system_id,
            "Actor spawned successfully"
        );
        Ok(actor_ref)
    }

    /// Stop an actor with proper task cleanup
    ///
    /// The actor reports `Stopping` until its task has been joined, then its
    /// entry is removed.
    pub async fn stop_actor(&self, actor_id: &ActorId) -> Result<()> {
        debug!("Stopping actor {}", actor_id);

        if self.actors.read().get(actor_id).is_none() {
            warn!("Attempted to stop unknown actor {}", actor_id);
            return Err(ActorError::NotFound(*actor_id));
        }
        self.set_status(actor_id, ActorStatus::Stopping);

        let task_handle = self.task_registry.lock().remove(actor_id);
        if let Some(task_handle) = task_handle {
            task_handle.abort();
            if let Err(e) = task_handle.await {
                if !e.is_cancelled() {
                    warn!("Actor {} task finished with error: {}", actor_id, e);
                } else {
                    debug!("Actor {} task cancelled as expected", actor_id);
                }
            }
        } else {
            debug!("Actor {} task already finished", actor_id);
        }

        let Some(handle) = self.actors.write().remove(actor_id) else {
            // A concurrent stop_actor got there first
            return Err(ActorError::NotFound(*actor_id));
        };
        self.metrics.actors_stopped.fetch_add(1, Ordering::Relaxed);

        info!(
            actor_id = %actor_id,
            actor = %handle.name,
            uptime_ms = handle.start_time.elapsed().as_millis(),
            "Actor stopped and cleaned up"
        );
        Ok(())
    }

    /// Get actor handle by ID
    pub fn get_actor(&self, actor_id: &ActorId) -> Option<ActorHandle> {
        self.actors.read().get(actor_id).cloned()
    }

    /// Current status of an actor
    pub fn status(&self, actor_id: &ActorId) -> Option<ActorStatus> {
        self.actors.read().get(actor_id).map(|handle| handle.status)
    }

    /// List all registered actors
    ///
    /// Actors whose task has ended on its own (status `Stopped` or `Failed`)
    /// stay listed until [`ActorSystem::stop_actor`] or
    /// [`ActorSystem::shutdown`] removes them.
    pub fn list_actors(&self) -> Vec<ActorId> {
        self.actors.read().keys().copied().collect()
    }

    /// Number of actor tasks still running
    pub fn running_tasks(&self) -> usize {
        self.task_registry.lock().len()
    }

    /// Get system metrics
    pub fn metrics(&self) -> Arc<SystemMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn system_id(&self) -> &str {
        &self.system_id
    }

    /// Shutdown the entire actor system with proper cleanup
    pub async fn shutdown(&self) -> Result<()> {
        info!("Shutting down actor system {}", self.system_id);

        let actor_ids = self.list_actors();

        let stop_futures: Vec<_> = actor_ids.iter().map(|id| self.stop_actor(id)).collect();

        for (i, stop_result) in futures::future::join_all(stop_futures)
            .await
            .into_iter()
            .enumerate()
        {
            if let Err(e) = stop_result {
                warn!("Error stopping actor {}: {}", actor_ids[i], e);
            }
        }

        // Final cleanup - abort any remaining tasks
        let remaining_tasks: Vec<_> = self.task_registry.lock().drain().collect();
        if !remaining_tasks.is_empty() {
            warn!("Aborting {} remaining tasks during shutdown", remaining_tasks.len());
            for (actor_id, task_handle) in remaining_tasks {
                task_handle.abort();
                debug!("Aborted remaining task for actor {}", actor_id);
            }
        }

        info!("Actor system {} shutdown complete", self.system_id);
        Ok(())
    }

    fn set_status(&self, actor_id: &ActorId, status: ActorStatus) {
        if let Some(handle) = self.actors.write().get_mut(actor_id) {
            debug!(
                actor_id = %actor_id,
                from = ?handle.status,
                to = ?status,
                "Actor status change"
            );
            handle.status = status;
        }
    }
}

impl Default for ActorSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ActorSystem {
    fn clone(&self) -> Self {
        Self {
            actors: Arc::clone(&self.actors),
            metrics: Arc::clone(&self.metrics),
            task_registry: Arc::clone(&self.task_registry),
            system_id: self.system_id.clone(),
        }
    }
}

/// Trait for actor behavior
#[async_trait]
pub trait ActorBehavior: Send + 'static {
    type Message: Message;

    /// Handle incoming message
    async fn handle(&mut self, msg: Self::Message) -> Result<()>;

    /// Called when actor starts
    async fn on_start(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called before actor stops
    async fn on_stop(&mut self) -> Result<()> {
        Ok(())
    }

    /// Handle failure - return supervision directive
    async fn on_error(&mut self, error: &ActorError) -> SupervisorDirective {
        if error.is_recoverable() {
            SupervisorDirective::Resume
        } else {
            SupervisorDirective::Stop
        }
    }
}

/// Supervision directive for error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorDirective {
    /// Drop the failed message and keep processing
    Resume,
    /// Stop the actor
    Stop,
}

/// Actor task runner
struct ActorTask<M: Message> {
    id: ActorId,
    name: Arc<str>,
    behavior: Box<dyn ActorBehavior<Message = M>>,
    receiver: MailboxReceiver<M>,
    system: ActorSystem,
}

impl<M: Message> ActorTask<M> {
    async fn run(mut self) {
        let task_start = Instant::now();

        if let Err(e) = self.behavior.on_start().await {
            error!(
                actor_id = %self.id,
                actor = %self.name,
                error = %e,
                "Actor failed to start during initialization"
            );
            self.system.set_status(&self.id, ActorStatus::Failed);
            self.system.task_registry.lock().remove(&self.id);
            return;
        }

        self.system.set_status(&self.id, ActorStatus::Running);
        debug!(
            actor_id = %self.id,
            actor = %self.name,
            startup_duration_us = task_start.elapsed().as_micros(),
            "Actor started, entering message loop"
        );

        let metrics = self.system.metrics();
        let mut final_status = ActorStatus::Stopped;

        while let Some(msg) = self.receiver.recv().await {
            let start = Instant::now();
            let kind = msg.kind();

            let Err(e) = self.behavior.handle(msg).await else {
                metrics.record_message_handled(start.elapsed());
                continue;
            };

            if e.is_recoverable() {
                metrics.record_unexpected_message();
                warn!(
                    actor_id = %self.id,
                    actor = %self.name,
                    kind,
                    error = %e,
                    "Actor dropped message with no handler in current state"
                );
            } else {
                metrics.record_handler_failure();
                error!(
                    actor_id = %self.id,
                    actor = %self.name,
                    kind,
                    error = %e,
                    error_category = e.category(),
                    processing_duration_ns = start.elapsed().as_nanos() as u64,
                    "Actor message processing failed"
                );
            }

            match self.behavior.on_error(&e).await {
                SupervisorDirective::Resume => continue,
                SupervisorDirective::Stop => {
                    warn!(
                        actor_id = %self.id,
                        actor = %self.name,
                        error = %e,
                        "Stopping actor due to error directive"
                    );
                    final_status = ActorStatus::Failed;
                    break;
                }
            }
        }

        if let Err(e) = self.behavior.on_stop().await {
            error!(
                actor_id = %self.id,
                actor = %self.name,
                error = %e,
                "Actor failed to stop cleanly"
            );
        }

        self.system.set_status(&self.id, final_status);
        self.system.task_registry.lock().remove(&self.id);
        info!(
            actor_id = %self.id,
            actor = %self.name,
            total_runtime_ms = task_start.elapsed().as_millis(),
            "Actor task execution completed"
        );
    }
}
