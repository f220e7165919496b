#[cfg(test)]
mod tests {
    use crate::common::SessionFixture;
    use marquee::{InputBus, PlaybackStatus, SessionRegistry};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_starting_a_session_pauses_its_sibling_first() {
        let registry = Arc::new(SessionRegistry::new());
        let bus = Arc::new(InputBus::new());

        let a = SessionFixture::open_on(registry.clone(), bus.clone()).await;
        let b = SessionFixture::open_on(registry.clone(), bus.clone()).await;

        a.handle.toggle_play().await.unwrap();
        a.wait_status(PlaybackStatus::Playing).await;

        b.handle.toggle_play().await.unwrap();
        b.wait_status(PlaybackStatus::Playing).await;

        // By the time B plays, A has already been paused.
        assert_eq!(a.snapshot_now().status, PlaybackStatus::Paused);
        assert!(!a.surface.is_playing());
        assert!(b.surface.is_playing());
    }

    #[tokio::test]
    async fn test_at_most_one_session_plays_across_the_process() {
        let registry = Arc::new(SessionRegistry::new());
        let bus = Arc::new(InputBus::new());

        let sessions = vec![
            SessionFixture::open_on(registry.clone(), bus.clone()).await,
            SessionFixture::open_on(registry.clone(), bus.clone()).await,
            SessionFixture::open_on(registry.clone(), bus.clone()).await,
        ];

        for session in &sessions {
            session.handle.toggle_play().await.unwrap();
            session.wait_status(PlaybackStatus::Playing).await;

            let playing = sessions
                .iter()
                .filter(|s| s.snapshot_now().status == PlaybackStatus::Playing)
                .count();
            assert_eq!(playing, 1);
        }
    }

    #[tokio::test]
    async fn test_sessions_register_on_open_and_unregister_on_close() {
        let registry = Arc::new(SessionRegistry::new());
        let bus = Arc::new(InputBus::new());
        assert!(registry.is_empty());

        let a = SessionFixture::open_on(registry.clone(), bus.clone()).await;
        assert_eq!(registry.len(), 1);

        let b = SessionFixture::open_on(registry.clone(), bus.clone()).await;
        assert_eq!(registry.len(), 2);

        a.handle.close().await.unwrap();
        assert_eq!(registry.len(), 1);

        b.handle.close().await.unwrap();
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_playing_after_a_sibling_closed_still_works() {
        let registry = Arc::new(SessionRegistry::new());
        let bus = Arc::new(InputBus::new());

        let a = SessionFixture::open_on(registry.clone(), bus.clone()).await;
        let b = SessionFixture::open_on(registry.clone(), bus.clone()).await;

        a.handle.toggle_play().await.unwrap();
        a.wait_status(PlaybackStatus::Playing).await;
        a.handle.close().await.unwrap();

        b.handle.toggle_play().await.unwrap();
        b.wait_status(PlaybackStatus::Playing).await;
        assert!(b.surface.is_playing());
    }

    #[tokio::test]
    async fn test_toggling_the_playing_session_does_not_disturb_siblings() {
        let registry = Arc::new(SessionRegistry::new());
        let bus = Arc::new(InputBus::new());

        let a = SessionFixture::open_on(registry.clone(), bus.clone()).await;
        let b = SessionFixture::open_on(registry.clone(), bus.clone()).await;

        a.handle.toggle_play().await.unwrap();
        a.wait_status(PlaybackStatus::Playing).await;

        // Pausing A is local; B stays idle, untouched.
        a.handle.toggle_play().await.unwrap();
        a.wait_status(PlaybackStatus::Paused).await;
        assert_eq!(b.snapshot_now().status, PlaybackStatus::Idle);
        assert_eq!(b.surface.call_count("pause"), 0);
    }
}
