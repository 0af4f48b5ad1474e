#![no_main]

use arbitrary::Arbitrary;
use dragscroll_core::memory::{MemoryHost, SharedSelection};
use dragscroll_core::{
    ClickDisposition, DragScroll, DragScrollConfig, GesturePhase, PointerButton, PointerDown,
    PointerId, PointerKind, PointerMove,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Down { id: u8, kind: u8, button: i8, y: i16 },
    Move { id: u8, y: i16 },
    Up(u8),
    Leave(u8),
    Cancel(u8),
    LostCapture(u8),
    Blur,
    Click,
    Detach,
}

fn kind(raw: u8) -> PointerKind {
    match raw % 4 {
        0 => PointerKind::Mouse,
        1 => PointerKind::Pen,
        2 => PointerKind::Touch,
        _ => PointerKind::Unknown,
    }
}

fn id(raw: u8) -> PointerId {
    PointerId(i32::from(raw % 4))
}

fuzz_target!(|input: (bool, Vec<Op>)| {
    let (seeded, ops) = input;
    let initial = seeded.then_some("text");
    let selection = SharedSelection::new(initial);
    let host = MemoryHost::new(4_000.0, selection.clone()).with_scroll_offset(2_000.0);
    let Ok(mut ds) = DragScroll::new(host, DragScrollConfig::default().with_active_marker("drag"))
    else {
        return;
    };

    for op in &ops {
        let veto_pending = ds.click_veto_pending();
        match *op {
            Op::Down { id: raw, kind: k, button, y } => {
                ds.pointer_down(
                    &PointerDown::mouse(id(raw), f64::from(y))
                        .with_kind(kind(k))
                        .with_button(PointerButton::from_dom(i16::from(button))),
                );
            }
            Op::Move { id: raw, y } => {
                ds.pointer_move(&PointerMove::new(id(raw), f64::from(y)));
            }
            Op::Up(raw) => {
                ds.pointer_up(id(raw));
            }
            Op::Leave(raw) => {
                ds.pointer_leave(id(raw));
            }
            Op::Cancel(raw) => {
                ds.pointer_cancel(id(raw));
            }
            Op::LostCapture(raw) => {
                ds.lost_pointer_capture(id(raw));
            }
            Op::Blur => {
                ds.blur();
            }
            Op::Click => {
                let cancelled = ds.click() == ClickDisposition::Cancel;
                assert_eq!(cancelled, veto_pending);
                assert!(!ds.click_veto_pending());
            }
            Op::Detach => {
                ds.detach();
            }
        }

        assert_eq!(
            ds.active_pointer_id().is_some(),
            ds.phase() != GesturePhase::Idle
        );
        assert_eq!(ds.host().has_marker("drag"), ds.is_dragging());
        if ds.phase() == GesturePhase::Idle {
            assert_eq!(selection.get().as_deref(), initial);
        }
    }
});
