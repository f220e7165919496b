pub mod builders;

use marquee::player::PlaybackSession;
use marquee::{
    InputBus, PlaybackConfig, PlaybackStatus, SessionDeps, SessionHandle, SessionRegistry,
    SessionSnapshot,
};
use std::sync::Arc;

use builders::DescriptorBuilder;
use mocks::{MockResolver, MockSurface, MockWindow};

/// One open session over mock collaborators, with its event loop running.
pub struct SessionFixture {
    pub handle: SessionHandle,
    pub surface: Arc<MockSurface>,
    pub window: Arc<MockWindow>,
    pub bus: Arc<InputBus>,
    pub registry: Arc<SessionRegistry>,
}

impl SessionFixture {
    pub async fn open() -> Self {
        Self::build(
            Arc::new(SessionRegistry::new()),
            Arc::new(InputBus::new()),
            MockResolver::new(),
            Arc::new(MockSurface::new()),
        )
        .await
    }

    /// Open on a shared registry and bus, for cross-session scenarios.
    pub async fn open_on(registry: Arc<SessionRegistry>, bus: Arc<InputBus>) -> Self {
        Self::build(registry, bus, MockResolver::new(), Arc::new(MockSurface::new())).await
    }

    /// Open with a failing resolver, yielding a degraded session.
    pub async fn open_degraded() -> Self {
        Self::build(
            Arc::new(SessionRegistry::new()),
            Arc::new(InputBus::new()),
            MockResolver::failing(),
            Arc::new(MockSurface::new()),
        )
        .await
    }

    /// Open with a pre-configured surface (error injection, play delay).
    pub async fn open_with_surface(surface: Arc<MockSurface>) -> Self {
        Self::build(
            Arc::new(SessionRegistry::new()),
            Arc::new(InputBus::new()),
            MockResolver::new(),
            surface,
        )
        .await
    }

    async fn build(
        registry: Arc<SessionRegistry>,
        bus: Arc<InputBus>,
        resolver: MockResolver,
        surface: Arc<MockSurface>,
    ) -> Self {
        let window = Arc::new(MockWindow::new());
        let deps = SessionDeps {
            resolver: Arc::new(resolver),
            surface: surface.clone(),
            window: window.clone(),
            bus: bus.clone(),
            registry: registry.clone(),
            config: PlaybackConfig::default(),
        };
        let descriptor = DescriptorBuilder::movie("Test Feature").build();
        let (handle, session) = PlaybackSession::open(descriptor, deps).await;
        tokio::spawn(session.run());

        Self {
            handle,
            surface,
            window,
            bus,
            registry,
        }
    }

    /// Current state without waiting.
    pub fn snapshot_now(&self) -> SessionSnapshot {
        self.handle.state().borrow().clone()
    }

    /// Block until the session publishes a state matching the predicate.
    pub async fn wait_state(&self, predicate: impl FnMut(&SessionSnapshot) -> bool) {
        let mut rx = self.handle.state();
        rx.wait_for(predicate)
            .await
            .expect("session state channel closed before the condition held");
    }

    pub async fn wait_status(&self, status: PlaybackStatus) {
        self.wait_state(|s| s.status == status).await;
    }
}
