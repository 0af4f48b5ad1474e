#![forbid(unsafe_code)]

use criterion::{Criterion, criterion_group, criterion_main};
use dragscroll_core::memory::{MemoryHost, SharedSelection};
use dragscroll_core::{DragScroll, DragScrollConfig, PointerDown, PointerId, PointerMove};
use std::hint::black_box;

fn controller() -> DragScroll<MemoryHost> {
    let host = MemoryHost::new(50_000.0, SharedSelection::new(Some("text")))
        .with_scroll_offset(25_000.0);
    DragScroll::new(host, DragScrollConfig::default().with_active_marker("dragging"))
        .expect("default config should be valid")
}

fn bench_drag_scroll_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_scroll/lifecycle");

    group.bench_function("down_move_32_up_click", |b| {
        b.iter(|| {
            let mut ds = controller();
            let down = ds.pointer_down(&PointerDown::mouse(11, 400.0));
            black_box(down.outcome);
            for step in 0..32 {
                let dispatch = ds.pointer_move(&PointerMove::new(11, 400.0 - f64::from(step) * 3.0));
                black_box(dispatch.consume_default);
            }
            let up = ds.pointer_up(PointerId(11));
            black_box(up.click_veto_armed);
            black_box(ds.click());
        });
    });

    group.bench_function("down_move_120_cancel", |b| {
        b.iter(|| {
            let mut ds = controller();
            ds.pointer_down(&PointerDown::mouse(23, 0.0));
            for step in 0..120 {
                let y = f64::from(step % 40) * 1.5;
                let dispatch = ds.pointer_move(&PointerMove::new(23, y));
                black_box(dispatch.outcome);
            }
            black_box(ds.pointer_cancel(PointerId(23)).to);
        });
    });

    group.bench_function("plain_click", |b| {
        b.iter(|| {
            let mut ds = controller();
            ds.pointer_down(&PointerDown::mouse(5, 10.0));
            ds.pointer_move(&PointerMove::new(5, 11.0));
            black_box(ds.pointer_up(PointerId(5)).outcome);
            black_box(ds.click());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_drag_scroll_lifecycle);
criterion_main!(benches);
