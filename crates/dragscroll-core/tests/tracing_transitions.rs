#![cfg(feature = "tracing")]

//! Gesture transitions are visible to a tracing subscriber.

use std::sync::{Arc, Mutex};

use dragscroll_core::memory::{MemoryHost, SharedSelection};
use dragscroll_core::{DragScroll, DragScrollConfig, PointerDown, PointerId, PointerMove};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Clone, Default)]
struct MessageCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for MessageCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        struct V {
            message: Option<String>,
        }
        impl tracing::field::Visit for V {
            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = Some(format!("{value:?}"));
                }
            }
        }
        let mut v = V { message: None };
        event.record(&mut v);
        if let Some(message) = v.message {
            self.messages
                .lock()
                .expect("capture lock")
                .push(message);
        }
    }
}

#[test]
fn drag_lifecycle_emits_transition_events() {
    let capture = MessageCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());

    tracing::subscriber::with_default(subscriber, || {
        let host = MemoryHost::new(500.0, SharedSelection::default());
        let mut ds = DragScroll::new(host, DragScrollConfig::default()).expect("valid config");
        ds.pointer_down(&PointerDown::mouse(1, 0.0));
        ds.pointer_move(&PointerMove::new(1, 30.0));
        ds.pointer_up(PointerId(1));
        ds.click();
    });

    let messages = capture.messages.lock().expect("capture lock").clone();
    for expected in [
        "drag-scroll armed",
        "drag-scroll drag started",
        "drag-scroll gesture settled",
        "drag-scroll vetoed trailing click",
    ] {
        assert!(
            messages.iter().any(|m| m == expected),
            "missing {expected:?} in {messages:?}"
        );
    }
}
