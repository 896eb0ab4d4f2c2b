#![forbid(unsafe_code)]

pub use crate::traits::{
    media::MediaElementMock,
    session::{AdaptiveSessionFactoryMock, AdaptiveSessionMock},
};

#[cfg(test)]
mod tests {
    use unimock::{MockFn, Unimock, matching};

    use crate::engine::{EngineConfig, PlaybackEngine};
    use crate::signals::MediaSignal;
    use crate::types::PlaybackState;

    use super::*;

    async fn settle() {
        for _ in 0..32 {
            tokio::task::yield_now().await;
        }
    }

    // Strict call-count verification for a native-file bind: exactly one
    // set_source + load, one play request, and teardown clears the source.
    // Unimock panics on any call not set up here.
    #[tokio::test]
    async fn native_bind_drives_element_exactly_once() {
        let media = Unimock::new((
            MediaElementMock::supports_native_manifests
                .each_call(matching!())
                .returns(false),
            MediaElementMock::set_source
                .next_call(matching!("https://cdn/clip.mp4"))
                .returns(()),
            MediaElementMock::load.next_call(matching!()).returns(()),
            MediaElementMock::request_play
                .next_call(matching!())
                .returns(()),
            MediaElementMock::clear_source
                .next_call(matching!())
                .returns(()),
        ));

        {
            let engine = PlaybackEngine::new(Box::new(media), None, EngineConfig::default());
            engine
                .bind(skene_source::resolve("https://cdn/clip.mp4"))
                .unwrap();
            engine.media_signal(MediaSignal::CanPlay).unwrap();
            engine.play().unwrap();
            settle().await;
            assert_eq!(engine.state(), PlaybackState::Ready);

            engine.unbind().unwrap();
            settle().await;
        }
        settle().await;
    }

    #[tokio::test]
    async fn unsupported_source_never_touches_the_element() {
        // clear_source is the only allowed call: teardown on drop detaches
        // the (never loaded) source.
        let media = Unimock::new((
            MediaElementMock::supports_native_manifests
                .each_call(matching!())
                .returns(false),
            MediaElementMock::clear_source
                .next_call(matching!())
                .returns(()),
        ));

        let engine = PlaybackEngine::new(Box::new(media), None, EngineConfig::default());
        engine
            .bind(skene_source::resolve("rtsp://camera.local/feed"))
            .unwrap();
        settle().await;
        assert!(engine.state().is_error());
        drop(engine);
        settle().await;
    }
}
