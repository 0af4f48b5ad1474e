#![forbid(unsafe_code)]

//! Drag-to-scroll gesture controller.
//!
//! [`DragScroll`] turns vertical pointer drags over a scroll container into
//! scroll-offset changes while leaving plain clicks alone.
//!
//! # State Machine
//!
//! ```text
//! Idle --down--> Armed --move |dy| > threshold--> Dragging
//!   ^              |                                 |
//!   +---- up/leave/cancel (click proceeds) ----------+
//!   +---- up/leave/cancel (end-drag cleanup) --------+
//! ```
//!
//! # Invariants
//!
//! 1. An active pointer id exists iff the phase is `Armed` or `Dragging`;
//!    events from any other pointer are ignored.
//! 2. The document selection mode is saved once on `Armed -> Dragging` and
//!    restored exactly once before returning to `Idle`, on every exit path
//!    including blur and detach.
//! 3. The container's scroll offset is written only while `Dragging`.
//! 4. Only a pointer-up that ends a drag which moved the container arms the
//!    click veto; leave, cancel and lost capture never do.
//!
//! # Failure Modes
//!
//! No operation fails. Foreign or stale events come back as
//! [`GestureOutcome::Ignored`] and leave the state untouched; a host that
//! refuses pointer capture simply drags from move events alone.

use crate::click_veto::{ClickDisposition, ClickVetoSlot};
use crate::config::{ConfigError, DragScrollConfig, IgnoreZone};
use crate::host::DragScrollHost;
use crate::pointer::{GestureEnd, PointerDown, PointerId, PointerKind, PointerMove};
use crate::selection::SelectionGuard;

/// Coarse gesture phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Armed,
    Dragging,
}

/// Input signal that produced a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerLeave,
    PointerCancel,
    LostPointerCapture,
    Blur,
    Detach,
}

impl From<GestureEnd> for LifecyclePhase {
    fn from(end: GestureEnd) -> Self {
        match end {
            GestureEnd::Up => Self::PointerUp,
            GestureEnd::Leave => Self::PointerLeave,
            GestureEnd::Cancel => Self::PointerCancel,
            GestureEnd::LostCapture => Self::LostPointerCapture,
        }
    }
}

/// Why an incoming signal left the machine unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoredReason {
    TouchPointer,
    ButtonNotAllowed,
    InIgnoreZone,
    ActivePointerInProgress,
    NoActivePointer,
    PointerMismatch,
    ThresholdNotReached,
}

/// Effect of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Pointer-down recorded; the gesture may still turn out to be a click.
    Armed,
    /// Threshold crossed; the container now scrolls with the pointer.
    DragStarted { offset: f64 },
    /// Container scrolled to `offset`.
    Scrolled { offset: f64 },
    /// Gesture ended before any drag; the click proceeds normally.
    Released,
    /// Drag finished and every touched resource was restored.
    DragEnded,
    Ignored(IgnoredReason),
}

/// Deterministic record of one controller step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureDispatch {
    pub phase: LifecyclePhase,
    pub pointer_id: Option<PointerId>,
    pub from: GesturePhase,
    pub to: GesturePhase,
    pub outcome: GestureOutcome,
    /// The host should cancel the event's default action.
    pub consume_default: bool,
    /// A one-shot veto for the next click was installed by this step.
    pub click_veto_armed: bool,
}

impl GestureDispatch {
    fn ignored(
        phase: LifecyclePhase,
        pointer_id: Option<PointerId>,
        current: GesturePhase,
        reason: IgnoredReason,
    ) -> Self {
        Self {
            phase,
            pointer_id,
            from: current,
            to: current,
            outcome: GestureOutcome::Ignored(reason),
            consume_default: false,
            click_veto_armed: false,
        }
    }

    /// Whether the signal was dropped without effect.
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.outcome, GestureOutcome::Ignored(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Anchor {
    pointer_id: PointerId,
    start_y: f64,
    start_offset: f64,
}

#[derive(Debug)]
enum Gesture {
    Idle,
    Armed(Anchor),
    Dragging {
        anchor: Anchor,
        selection: SelectionGuard,
        captured: bool,
    },
}

impl Gesture {
    const fn phase(&self) -> GesturePhase {
        match self {
            Self::Idle => GesturePhase::Idle,
            Self::Armed(_) => GesturePhase::Armed,
            Self::Dragging { .. } => GesturePhase::Dragging,
        }
    }

    const fn anchor(&self) -> Option<Anchor> {
        match self {
            Self::Idle => None,
            Self::Armed(anchor) | Self::Dragging { anchor, .. } => Some(*anchor),
        }
    }
}

/// Drag-to-scroll controller bound to one scroll container.
///
/// Feed it the container's pointer events; apply
/// [`GestureDispatch::consume_default`] to the native event and route clicks
/// through [`click`](DragScroll::click). Dropping the controller runs the
/// same teardown as [`detach`](DragScroll::detach).
pub struct DragScroll<H: DragScrollHost> {
    host: H,
    config: DragScrollConfig,
    ignore: Option<IgnoreZone<H::Target>>,
    gesture: Gesture,
    suppress_next_click: bool,
    click_veto: ClickVetoSlot,
}

impl<H: DragScrollHost> std::fmt::Debug for DragScroll<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragScroll")
            .field("phase", &self.phase())
            .field("active_pointer_id", &self.active_pointer_id())
            .field("suppress_next_click", &self.suppress_next_click)
            .field("click_veto_pending", &self.click_veto.is_armed())
            .finish()
    }
}

impl<H: DragScrollHost> DragScroll<H> {
    /// Bind a controller to `host` after validating `config`.
    pub fn new(host: H, config: DragScrollConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            host,
            config,
            ignore: None,
            gesture: Gesture::Idle,
            suppress_next_click: false,
            click_veto: ClickVetoSlot::default(),
        })
    }

    /// Exclude a sub-region of the container from starting drags.
    #[must_use]
    pub fn with_ignore_zone(mut self, zone: IgnoreZone<H::Target>) -> Self {
        self.ignore = Some(zone);
        self
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    /// Pointer currently owning the gesture.
    #[must_use]
    pub fn active_pointer_id(&self) -> Option<PointerId> {
        self.gesture.anchor().map(|anchor| anchor.pointer_id)
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    /// Whether the current or last drag moved the container.
    #[must_use]
    pub fn suppress_next_click(&self) -> bool {
        self.suppress_next_click
    }

    /// Whether the next click will be cancelled.
    #[must_use]
    pub fn click_veto_pending(&self) -> bool {
        self.click_veto.is_armed()
    }

    /// Selection mode saved by the drag in progress, if any.
    #[must_use]
    pub fn saved_selection_mode(&self) -> Option<&str> {
        match &self.gesture {
            Gesture::Dragging { selection, .. } => selection.saved(),
            _ => None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &DragScrollConfig {
        &self.config
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Handle pointer-down on the container.
    pub fn pointer_down(&mut self, event: &PointerDown<H::Target>) -> GestureDispatch {
        let current = self.phase();
        let ignored = |reason| {
            GestureDispatch::ignored(
                LifecyclePhase::PointerDown,
                Some(event.pointer_id),
                current,
                reason,
            )
        };

        if self.gesture.anchor().is_some() {
            return ignored(IgnoredReason::ActivePointerInProgress);
        }
        if !event.kind.arms_drag(event.button) {
            return ignored(if matches!(event.kind, PointerKind::Touch) {
                IgnoredReason::TouchPointer
            } else {
                IgnoredReason::ButtonNotAllowed
            });
        }
        if let Some(target) = &event.target
            && self.in_ignore_zone(target)
        {
            return ignored(IgnoredReason::InIgnoreZone);
        }

        let anchor = Anchor {
            pointer_id: event.pointer_id,
            start_y: event.y,
            start_offset: self.host.scroll_offset(),
        };
        self.gesture = Gesture::Armed(anchor);
        self.suppress_next_click = false;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            pointer_id = anchor.pointer_id.get(),
            start_y = anchor.start_y,
            start_offset = anchor.start_offset,
            "drag-scroll armed"
        );

        GestureDispatch {
            phase: LifecyclePhase::PointerDown,
            pointer_id: Some(event.pointer_id),
            from: GesturePhase::Idle,
            to: GesturePhase::Armed,
            outcome: GestureOutcome::Armed,
            consume_default: false,
            click_veto_armed: false,
        }
    }

    /// Handle pointer-move; scrolls the container once a drag is underway.
    pub fn pointer_move(&mut self, event: &PointerMove) -> GestureDispatch {
        let current = self.phase();
        let Some(anchor) = self.gesture.anchor() else {
            return GestureDispatch::ignored(
                LifecyclePhase::PointerMove,
                Some(event.pointer_id),
                current,
                IgnoredReason::NoActivePointer,
            );
        };
        if anchor.pointer_id != event.pointer_id {
            return GestureDispatch::ignored(
                LifecyclePhase::PointerMove,
                Some(event.pointer_id),
                current,
                IgnoredReason::PointerMismatch,
            );
        }

        let dy = event.y - anchor.start_y;
        let started = match self.gesture {
            Gesture::Armed(_) if dy.abs() > self.config.drag_threshold => {
                self.begin_drag(anchor);
                true
            }
            Gesture::Armed(_) => {
                return GestureDispatch::ignored(
                    LifecyclePhase::PointerMove,
                    Some(event.pointer_id),
                    current,
                    IgnoredReason::ThresholdNotReached,
                );
            }
            _ => false,
        };

        self.host.set_scroll_offset(anchor.start_offset - dy);
        self.suppress_next_click = true;
        let offset = self.host.scroll_offset();

        GestureDispatch {
            phase: LifecyclePhase::PointerMove,
            pointer_id: Some(event.pointer_id),
            from: current,
            to: GesturePhase::Dragging,
            outcome: if started {
                GestureOutcome::DragStarted { offset }
            } else {
                GestureOutcome::Scrolled { offset }
            },
            consume_default: true,
            click_veto_armed: false,
        }
    }

    /// Handle pointer-up; a drag that moved the container vetoes the next click.
    pub fn pointer_up(&mut self, pointer_id: PointerId) -> GestureDispatch {
        self.finish(pointer_id, GestureEnd::Up)
    }

    pub fn pointer_leave(&mut self, pointer_id: PointerId) -> GestureDispatch {
        self.finish(pointer_id, GestureEnd::Leave)
    }

    pub fn pointer_cancel(&mut self, pointer_id: PointerId) -> GestureDispatch {
        self.finish(pointer_id, GestureEnd::Cancel)
    }

    /// Handle a platform-side loss of capture; capture is not released again.
    pub fn lost_pointer_capture(&mut self, pointer_id: PointerId) -> GestureDispatch {
        self.finish(pointer_id, GestureEnd::LostCapture)
    }

    /// Dispatch any end-of-gesture signal.
    pub fn end(&mut self, pointer_id: PointerId, end: GestureEnd) -> GestureDispatch {
        self.finish(pointer_id, end)
    }

    /// Window blur or visibility loss: cancel whatever gesture is active.
    pub fn blur(&mut self) -> GestureDispatch {
        self.force_idle(LifecyclePhase::Blur)
    }

    /// Teardown: restore everything a drag in progress touched and return to
    /// idle. Safe to call repeatedly; a pending click veto is discarded.
    pub fn detach(&mut self) -> GestureDispatch {
        let dispatch = self.force_idle(LifecyclePhase::Detach);
        let _ = self.click_veto.intercept();
        dispatch
    }

    /// Route one click on the container through the pending veto, if any.
    pub fn click(&mut self) -> ClickDisposition {
        let disposition = self.click_veto.intercept();
        #[cfg(feature = "tracing")]
        if disposition == ClickDisposition::Cancel {
            tracing::trace!("drag-scroll vetoed trailing click");
        }
        disposition
    }

    fn in_ignore_zone(&self, target: &H::Target) -> bool {
        match &self.ignore {
            None => false,
            Some(IgnoreZone::Selector(selector)) => self.host.target_matches(target, selector),
            Some(IgnoreZone::Predicate(predicate)) => predicate(target),
        }
    }

    fn finish(&mut self, pointer_id: PointerId, end: GestureEnd) -> GestureDispatch {
        let phase = LifecyclePhase::from(end);
        let current = self.phase();
        let Some(anchor) = self.gesture.anchor() else {
            return GestureDispatch::ignored(
                phase,
                Some(pointer_id),
                current,
                IgnoredReason::NoActivePointer,
            );
        };
        if anchor.pointer_id != pointer_id {
            return GestureDispatch::ignored(
                phase,
                Some(pointer_id),
                current,
                IgnoredReason::PointerMismatch,
            );
        }
        self.settle(phase, end != GestureEnd::LostCapture, end.may_click())
    }

    fn force_idle(&mut self, phase: LifecyclePhase) -> GestureDispatch {
        self.settle(phase, true, false)
    }

    /// Return to idle, running end-drag when dragging.
    fn settle(
        &mut self,
        phase: LifecyclePhase,
        release_capture: bool,
        may_click: bool,
    ) -> GestureDispatch {
        let from = self.phase();
        let pointer_id = self.active_pointer_id();
        let outcome = match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => {
                return GestureDispatch::ignored(
                    phase,
                    None,
                    from,
                    IgnoredReason::NoActivePointer,
                );
            }
            Gesture::Armed(_) => GestureOutcome::Released,
            Gesture::Dragging {
                anchor,
                selection,
                captured,
            } => {
                self.end_drag(anchor, selection, captured && release_capture);
                GestureOutcome::DragEnded
            }
        };

        let click_veto_armed =
            may_click && from == GesturePhase::Dragging && self.suppress_next_click;
        if click_veto_armed {
            self.click_veto.arm();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            pointer_id = pointer_id.map(PointerId::get),
            from = ?from,
            signal = ?phase,
            click_veto_armed,
            "drag-scroll gesture settled"
        );

        GestureDispatch {
            phase,
            pointer_id,
            from,
            to: GesturePhase::Idle,
            outcome,
            consume_default: false,
            click_veto_armed,
        }
    }

    fn begin_drag(&mut self, anchor: Anchor) {
        let selection =
            SelectionGuard::acquire(&mut self.host, &self.config.disabled_selection_mode);
        if let Some(marker) = &self.config.active_marker {
            self.host.add_marker(marker);
        }
        let captured = self.host.request_capture(anchor.pointer_id);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            pointer_id = anchor.pointer_id.get(),
            captured,
            saved_selection = selection.saved(),
            "drag-scroll drag started"
        );
        self.gesture = Gesture::Dragging {
            anchor,
            selection,
            captured,
        };
    }

    fn end_drag(&mut self, anchor: Anchor, selection: SelectionGuard, release_capture: bool) {
        if release_capture {
            let _released = self.host.release_capture(anchor.pointer_id);
            #[cfg(feature = "tracing")]
            tracing::trace!(
                pointer_id = anchor.pointer_id.get(),
                released = _released,
                "drag-scroll capture release"
            );
        }
        if let Some(marker) = &self.config.active_marker {
            self.host.remove_marker(marker);
        }
        selection.release(&mut self.host);
    }
}

impl<H: DragScrollHost> Drop for DragScroll<H> {
    fn drop(&mut self) {
        if !matches!(self.gesture, Gesture::Idle) {
            let _ = self.detach();
        }
    }
}
