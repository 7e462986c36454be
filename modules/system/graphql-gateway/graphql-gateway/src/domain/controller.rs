//! Gateway controller: reacts to lifecycle events and owns all gateway state.
//!
//! State transitions run one at a time under the reactor lock. The installed
//! composite lives outside that lock so queries never wait on a rebuild.

use std::collections::BTreeSet;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use graphql_gateway_sdk::{
    GatewayError, GatewayState, GraphqlRequest, LifecycleEvent, RegistrationOutcome, RemoteLink,
    ServiceAnnouncement, ServiceIdentity,
};
use serde_json::Value;
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::builder::RemoteFragmentBuilder;
use super::composer::SchemaComposer;
use super::composite::CompositeSchema;
use super::dependencies::DependencyTracker;
use super::ports::{QueryExecutor, SchemaStitcher};
use super::proxy::RemoteProxy;
use super::registry::{RegisteredService, ServiceRegistry};
use super::waiter::{ConvergenceStatus, ConvergenceWaiter};
use crate::config::{ConfigError, GraphqlGatewayConfig};
use crate::infra::{MergingStitcher, SnapshotWriter};

/// Called once for every remote proxy that was built successfully.
pub type DiscoveryHook = Arc<dyn Fn(&ServiceIdentity, &RemoteProxy) + Send + Sync>;

/// Registration status of one live service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    pub identity: ServiceIdentity,
    /// `true` once the remote proxy is built.
    pub eligible: bool,
}

struct GatewayInner {
    registry: ServiceRegistry,
    dependencies: DependencyTracker,
    state: GatewayState,
}

pub struct GatewayController {
    config: GraphqlGatewayConfig,
    inner: Mutex<GatewayInner>,
    composite: ArcSwapOption<CompositeSchema>,
    builder: RemoteFragmentBuilder,
    composer: SchemaComposer,
    executor: Arc<dyn QueryExecutor>,
    snapshot: Option<SnapshotWriter>,
    discovery_hook: Option<DiscoveryHook>,
    cancel: parking_lot::Mutex<CancellationToken>,
}

impl GatewayController {
    /// Create an idle controller using the default stitcher.
    ///
    /// # Errors
    /// Returns a `ConfigError` if the configuration does not validate.
    pub fn new(
        config: GraphqlGatewayConfig,
        link: Arc<dyn RemoteLink>,
        executor: Arc<dyn QueryExecutor>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let snapshot = config
            .snapshot
            .enabled
            .then(|| SnapshotWriter::new(config.snapshot.path.clone()));

        Ok(Self {
            config,
            inner: Mutex::new(GatewayInner {
                registry: ServiceRegistry::new(),
                dependencies: DependencyTracker::new(),
                state: GatewayState::Idle,
            }),
            composite: ArcSwapOption::empty(),
            builder: RemoteFragmentBuilder::new(link),
            composer: SchemaComposer::new(Arc::new(MergingStitcher)),
            executor,
            snapshot,
            discovery_hook: None,
            cancel: parking_lot::Mutex::new(CancellationToken::new()),
        })
    }

    #[must_use]
    pub fn with_stitcher(mut self, stitcher: Arc<dyn SchemaStitcher>) -> Self {
        self.composer = SchemaComposer::new(stitcher);
        self
    }

    #[must_use]
    pub fn with_discovery_hook(mut self, hook: DiscoveryHook) -> Self {
        self.discovery_hook = Some(hook);
        self
    }

    #[must_use]
    pub fn config(&self) -> &GraphqlGatewayConfig {
        &self.config
    }

    /// Apply one lifecycle event.
    ///
    /// # Errors
    /// Returns the failure local to the event's identity (invalid fragment or
    /// build failure). The controller state stays consistent either way.
    pub async fn handle_event(&self, event: LifecycleEvent) -> Result<(), GatewayError> {
        match event {
            LifecycleEvent::Connected(announcement) => self.on_connected(announcement).await,
            LifecycleEvent::Disconnected { identity } => {
                self.on_disconnected(&identity).await;
                Ok(())
            }
        }
    }

    async fn on_connected(&self, announcement: ServiceAnnouncement) -> Result<(), GatewayError> {
        let identity = announcement.identity.clone();
        if self.config.is_blacklisted(identity.as_str()) {
            warn!(identity = %identity, "Ignoring blacklisted service");
            return Ok(());
        }

        let capability = announcement.capability.clone();
        {
            let mut guard = self.inner.lock().await;
            let inner = &mut *guard;

            let outcome = inner.registry.register_or_update(announcement).map_err(|e| {
                warn!(identity = %identity, error = %e, "Rejected service announcement");
                GatewayError::from(e)
            })?;
            if outcome == RegistrationOutcome::Unchanged {
                let built = inner
                    .registry
                    .get(identity.as_str())
                    .is_some_and(RegisteredService::is_eligible);
                if built {
                    return Ok(());
                }
                info!(identity = %identity, "Retrying remote build for unchanged announcement");
            } else {
                info!(identity = %identity, "Service registered");
            }
            if inner.state == GatewayState::Idle {
                inner.state = GatewayState::Partial;
            }
            inner.dependencies.update(&inner.registry);
        }

        // The reactor lock is released while the remote schema is introspected.
        let built = self.builder.build(&identity).await.map(Arc::new);

        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        let current = inner
            .registry
            .get(identity.as_str())
            .is_some_and(|service| service.capability() == &capability);
        if !current {
            debug!(identity = %identity, "Discarding remote build for a superseded announcement");
            return built.map(|_| ()).map_err(GatewayError::from);
        }

        let result = match built {
            Ok(proxy) => {
                inner.registry.attach_proxy(identity.as_str(), Arc::clone(&proxy));
                info!(identity = %identity, "Remote schema built");
                if let Some(hook) = &self.discovery_hook {
                    hook(&identity, proxy.as_ref());
                }
                Ok(())
            }
            Err(e) => Err(GatewayError::from(e)),
        };

        self.refresh(inner).await;
        result
    }

    async fn on_disconnected(&self, identity: &ServiceIdentity) {
        if self.config.is_blacklisted(identity.as_str()) {
            debug!(identity = %identity, "Ignoring blacklisted service");
            return;
        }

        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        if inner.registry.remove(identity.as_str()).is_none() {
            debug!(identity = %identity, "Disconnect for unknown service");
            return;
        }
        info!(identity = %identity, "Service disconnected");
        self.refresh(inner).await;
    }

    /// Recompute dependencies and run the rebuild policy.
    ///
    /// With outstanding types the previous composite stays installed and the
    /// state drops to `Partial`.
    async fn refresh(&self, inner: &mut GatewayInner) {
        inner.dependencies.update(&inner.registry);

        let outstanding = inner.dependencies.outstanding();
        if !outstanding.is_empty() {
            warn!(
                missing = ?outstanding,
                "Unsatisfied dependencies, keeping the previous composite schema"
            );
            inner.state = GatewayState::Partial;
            return;
        }
        if inner.registry.eligible().next().is_none() {
            debug!("No composition-eligible services");
            inner.state = GatewayState::Partial;
            return;
        }

        match self.composer.compose(&inner.registry) {
            Ok(schema) => {
                self.install(schema).await;
                inner.state = GatewayState::Ready;
            }
            Err(e) => {
                error!(error = %e, "Schema composition failed, keeping the previous composite schema");
                inner.state = GatewayState::Partial;
            }
        }
    }

    async fn install(&self, schema: CompositeSchema) -> Arc<CompositeSchema> {
        let schema = Arc::new(schema);
        self.composite.store(Some(Arc::clone(&schema)));
        info!(
            services = ?schema.services().map(ServiceIdentity::as_str).collect::<Vec<_>>(),
            query_fields = ?schema.query_field_names(),
            "Composite schema installed"
        );

        if let Some(writer) = &self.snapshot
            && let Err(e) = writer.write(schema.printed()).await
        {
            warn!(path = %writer.path().display(), error = %format!("{e:#}"), "Failed to write schema snapshot");
        }
        schema
    }

    /// Wait for convergence, then compose once and install the result.
    ///
    /// Converged means at least one service is built, no required type is
    /// outstanding and every configured required service is built.
    ///
    /// # Errors
    /// `Timeout` when the deadline passes, `Stopped` if [`Self::stop`] runs
    /// meanwhile, `Composition` if the final composition fails.
    pub async fn start(&self) -> Result<Arc<CompositeSchema>, GatewayError> {
        let cancel = {
            let mut current = self.cancel.lock();
            if current.is_cancelled() {
                *current = CancellationToken::new();
            }
            current.clone()
        };

        info!(
            wait_timeout = ?self.config.wait_timeout,
            required_services = ?self.config.required_services,
            "Starting GraphQL gateway"
        );
        let waiter = ConvergenceWaiter::new(self.config.poll_interval, self.config.wait_timeout);
        waiter.wait(&cancel, || self.convergence_status()).await?;
        self.compose_converged(&cancel).await
    }

    /// Final composition of `start`; a `stop` that got in first wins.
    async fn compose_converged(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Arc<CompositeSchema>, GatewayError> {
        let mut guard = self.inner.lock().await;
        if cancel.is_cancelled() {
            return Err(GatewayError::Stopped);
        }
        let inner = &mut *guard;
        inner.dependencies.update(&inner.registry);
        let schema = self.composer.compose(&inner.registry).map_err(|e| {
            error!(error = %e, "Schema composition failed during start");
            GatewayError::from(e)
        })?;
        let schema = self.install(schema).await;
        inner.state = GatewayState::Ready;
        info!("GraphQL gateway ready");
        Ok(schema)
    }

    async fn convergence_status(&self) -> ConvergenceStatus {
        let inner = self.inner.lock().await;
        let missing_services = self
            .config
            .required_services
            .iter()
            .filter(|name| {
                !inner
                    .registry
                    .get(name)
                    .is_some_and(RegisteredService::is_eligible)
            })
            .cloned()
            .collect();
        ConvergenceStatus {
            eligible: inner.registry.eligible().count(),
            outstanding: inner.dependencies.outstanding(),
            missing_services,
        }
    }

    /// Clear all state and cancel any in-flight `start`.
    pub async fn stop(&self) {
        self.cancel.lock().cancel();

        let mut inner = self.inner.lock().await;
        inner.registry.clear();
        inner.dependencies.clear();
        inner.state = GatewayState::Idle;
        self.composite.store(None);
        info!("GraphQL gateway stopped");
    }

    /// Consume lifecycle events until the channel closes or `cancel` fires.
    ///
    /// Per-event failures are logged and never end the loop.
    pub async fn run(&self, mut events: mpsc::Receiver<LifecycleEvent>, cancel: CancellationToken) {
        info!("Lifecycle event loop started");
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                event = events.recv() => {
                    let Some(event) = event else { break };
                    let identity = event.identity().clone();
                    if let Err(e) = self.handle_event(event).await {
                        warn!(identity = %identity, error = %e, "Lifecycle event failed");
                    }
                }
            }
        }
        info!("Lifecycle event loop stopped");
    }

    /// Execute a request against the installed composite.
    ///
    /// # Errors
    /// `NotReady` if no composition has succeeded yet, otherwise whatever the
    /// executor reports.
    pub async fn graphql(&self, request: GraphqlRequest) -> Result<Value, GatewayError> {
        let Some(schema) = self.composite.load_full() else {
            return Err(GatewayError::not_ready());
        };
        self.executor.execute(schema, request).await
    }

    pub async fn state(&self) -> GatewayState {
        self.inner.lock().await.state
    }

    /// Required type names no built service announces yet.
    pub async fn outstanding(&self) -> BTreeSet<String> {
        self.inner.lock().await.dependencies.outstanding()
    }

    /// Type names announced by built services.
    pub async fn discovered(&self) -> BTreeSet<String> {
        self.inner.lock().await.dependencies.discovered().clone()
    }

    pub async fn services(&self) -> Vec<ServiceStatus> {
        self.inner
            .lock()
            .await
            .registry
            .iter()
            .map(|service| ServiceStatus {
                identity: service.identity().clone(),
                eligible: service.is_eligible(),
            })
            .collect()
    }

    #[must_use]
    pub fn composite(&self) -> Option<Arc<CompositeSchema>> {
        self.composite.load_full()
    }
}
