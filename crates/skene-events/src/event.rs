#![forbid(unsafe_code)]

use skene_playback::PlaybackEvent;

use crate::OverlayEvent;

/// Unified event for the full playback surface.
///
/// Hierarchical: each subsystem has its own variant with a sub-enum.
#[derive(Clone, Debug)]
pub enum Event {
    /// Stream playback event.
    Playback(PlaybackEvent),
    /// Overlay lifecycle or editing event.
    Overlay(OverlayEvent),
}

impl From<PlaybackEvent> for Event {
    fn from(e: PlaybackEvent) -> Self {
        Self::Playback(e)
    }
}

impl From<OverlayEvent> for Event {
    fn from(e: OverlayEvent) -> Self {
        Self::Overlay(e)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use skene_overlay::OverlayId;
    use skene_playback::PlaybackState;

    use super::*;

    fn overlay_is_deleted_a(event: &OverlayEvent) -> bool {
        matches!(event, OverlayEvent::Deleted { id } if id.0 == "a")
    }

    fn overlay_is_selection_cleared(event: &OverlayEvent) -> bool {
        matches!(event, OverlayEvent::SelectionChanged { id: None })
    }

    #[rstest]
    #[case(OverlayEvent::Deleted { id: OverlayId::from("a") }, overlay_is_deleted_a)]
    #[case(
        OverlayEvent::SelectionChanged { id: None },
        overlay_is_selection_cleared
    )]
    fn overlay_event_into_event(
        #[case] overlay_event: OverlayEvent,
        #[case] check: fn(&OverlayEvent) -> bool,
    ) {
        let event: Event = overlay_event.into();
        assert!(matches!(event, Event::Overlay(inner) if check(&inner)));
    }

    #[test]
    fn playback_event_into_event() {
        let event: Event = PlaybackEvent::StateChanged {
            state: PlaybackState::Ready,
        }
        .into();
        assert!(matches!(
            event,
            Event::Playback(PlaybackEvent::StateChanged {
                state: PlaybackState::Ready
            })
        ));
    }
}
