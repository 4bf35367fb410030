//! The Cameraman: sole owner of the camera and orbit controller, flying the
//! camera to framed views of scene nodes.
//!
//! A transition is requested with [`Cameraman::look_at`] and advanced by the
//! host calling [`Cameraman::tick`] once per frame. While it runs the orbit
//! controller is disabled; each step moves the camera, re-aims it, keeps the
//! controller target in sync, and requests a redraw. When it ends the
//! controller is re-enabled and the [`TransitionHandle`] resolves.

mod input;

use std::collections::VecDeque;
use std::fmt;

use web_time::Instant;

use crate::animation::{
    self, CameraPath, Completer, ConflictPolicy, LookAtRequest,
    TransitionHandle, TransitionId, TransitionOutcome, TransitionPhase,
    TransitionReport, TransitionState,
};
use crate::camera::{Camera, OrbitControls};
use crate::error::CameramanError;
use crate::options::Options;
use crate::scene::{NodeId, SceneGraph};
use crate::view::bounding_volume;

/// Boxed host redraw request. The host is expected to coalesce calls made
/// within one frame.
pub type RedrawCallback = Box<dyn FnMut()>;

struct ActiveTransition {
    state: TransitionState,
    completer: Completer,
}

struct PendingTransition {
    request: LookAtRequest,
    completer: Completer,
}

/// Camera transition animator.
pub struct Cameraman {
    camera: Camera,
    controls: OrbitControls,
    redraw: RedrawCallback,
    policy: ConflictPolicy,
    phase: TransitionPhase,
    active: Option<ActiveTransition>,
    queue: VecDeque<PendingTransition>,
    next_id: TransitionId,
}

impl fmt::Debug for Cameraman {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cameraman")
            .field("camera", &self.camera)
            .field("controls", &self.controls)
            .field("policy", &self.policy)
            .field("phase", &self.phase)
            .field("active", &self.active.as_ref().map(|a| a.completer.id()))
            .field("queued", &self.queue.len())
            .finish_non_exhaustive()
    }
}

impl Cameraman {
    /// Take ownership of a camera and its orbit controller.
    pub fn new(
        camera: Camera,
        controls: OrbitControls,
        redraw: impl FnMut() + 'static,
    ) -> Self {
        Self {
            camera,
            controls,
            redraw: Box::new(redraw),
            policy: ConflictPolicy::default(),
            phase: TransitionPhase::Idle,
            active: None,
            queue: VecDeque::new(),
            next_id: 0,
        }
    }

    /// Camera, controller and conflict policy configured from `options`.
    pub fn from_options(
        options: &Options,
        aspect: f32,
        redraw: impl FnMut() + 'static,
    ) -> Self {
        Self::new(
            Camera::from_options(&options.camera, aspect),
            OrbitControls::from_options(&options.camera),
            redraw,
        )
        .with_conflict_policy(options.transition.conflict)
    }

    /// Set how overlapping requests are handled.
    #[must_use]
    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    // -- Accessors --

    /// The owned camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The owned orbit controller.
    #[must_use]
    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    /// Current conflict policy.
    #[must_use]
    pub fn conflict_policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// Change the conflict policy. Already queued requests stay queued.
    pub fn set_conflict_policy(&mut self, policy: ConflictPolicy) {
        self.policy = policy;
    }

    /// Lifecycle state of the transition slot.
    #[must_use]
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.active.is_some()
    }

    /// Number of requests waiting behind the active transition.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    // -- Transitions --

    /// Request a flight to a framed view of `request.target`.
    ///
    /// A zero-duration request is applied immediately as a single step and
    /// its handle is already resolved on return. Otherwise the flight
    /// advances on [`tick`](Self::tick). Under [`ConflictPolicy::Queue`] the
    /// request waits behind the active transition and every earlier queued
    /// request, in order.
    ///
    /// Fails fast (leaving the camera and controller untouched) when the
    /// target is not attached to a scene, or when a transition is running
    /// under [`ConflictPolicy::Reject`].
    pub fn look_at(
        &mut self,
        graph: &mut SceneGraph,
        request: LookAtRequest,
        now: Instant,
    ) -> Result<TransitionHandle, CameramanError> {
        let busy = self.active.is_some();
        match self.policy {
            ConflictPolicy::Reject if busy => {
                return Err(CameramanError::TransitionInProgress);
            }
            // Requests still waiting keep their place even when the slot
            // has just been freed.
            ConflictPolicy::Queue if busy || !self.queue.is_empty() => {
                let (handle, completer) = self.channel();
                log::debug!(
                    "Queued camera transition {} behind {} pending",
                    completer.id(),
                    self.queue.len() + usize::from(busy)
                );
                self.queue.push_back(PendingTransition {
                    request,
                    completer,
                });
                return Ok(handle);
            }
            _ => {}
        }

        let state = self.plan(graph, &request, now)?;
        if self.active.is_some() {
            self.finish(TransitionPhase::Cancelled);
        }
        let (handle, completer) = self.channel();
        self.start(state, completer, now);
        Ok(handle)
    }

    /// Frame `target` immediately from the front, aiming at its center.
    pub fn frame(
        &mut self,
        graph: &mut SceneGraph,
        target: NodeId,
        now: Instant,
    ) -> Result<TransitionHandle, CameramanError> {
        self.look_at(graph, LookAtRequest::new(target), now)
    }

    /// Advance the active transition (starting the next queued one if the
    /// slot is free). Call once per frame.
    pub fn tick(
        &mut self,
        graph: &mut SceneGraph,
        now: Instant,
    ) -> TransitionPhase {
        if self
            .active
            .as_ref()
            .is_some_and(|a| a.completer.is_cancelled())
        {
            self.finish(TransitionPhase::Cancelled);
        }
        if self.active.is_none() {
            self.start_next_queued(graph, now);
        }
        if self.active.is_some() {
            self.step(now);
        }
        self.phase
    }

    /// Cancel the active transition, leaving the camera at its last sampled
    /// pose. Returns whether anything was cancelled. Queued requests are
    /// unaffected.
    pub fn cancel(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        self.finish(TransitionPhase::Cancelled);
        true
    }

    /// Cancel the active transition and every queued request.
    pub fn cancel_all(&mut self) {
        let _ = self.cancel();
        let report = self.idle_report();
        for pending in self.queue.drain(..) {
            pending
                .completer
                .resolve(TransitionOutcome::Cancelled(report));
        }
    }

    fn channel(&mut self) -> (TransitionHandle, Completer) {
        let id = self.next_id;
        self.next_id += 1;
        animation::channel(id)
    }

    /// Solve anchors and build the flight from the current pose.
    fn plan(
        &self,
        graph: &mut SceneGraph,
        request: &LookAtRequest,
        now: Instant,
    ) -> Result<TransitionState, CameramanError> {
        let volume = bounding_volume(graph, request.target)?;
        let look_at_end = volume.anchor(request.look_at);
        let view_from = volume.anchor(request.view_from);
        let factor =
            request.resolved_distance_factor(self.camera.fovy_radians());
        let position_end = look_at_end + (view_from - look_at_end) * factor;

        let mut start_pose = self.camera.pose();
        start_pose.target = self.controls.target;
        let path = CameraPath::new(
            request.path,
            start_pose.position,
            position_end,
            &volume.aabb,
            self.camera.up,
        );
        Ok(TransitionState::new(
            now,
            request.duration,
            request.easing,
            path,
            start_pose,
            look_at_end,
        ))
    }

    fn start(
        &mut self,
        state: TransitionState,
        completer: Completer,
        now: Instant,
    ) {
        log::debug!(
            "Camera transition {} started: {:?} over {:?}",
            completer.id(),
            state.path(),
            state.duration()
        );
        self.controls.enabled = false;
        self.phase = TransitionPhase::Running;
        let snap = state.duration().is_zero();
        self.active = Some(ActiveTransition { state, completer });
        if snap {
            self.step(now);
        }
    }

    fn start_next_queued(&mut self, graph: &mut SceneGraph, now: Instant) {
        while let Some(pending) = self.queue.pop_front() {
            if pending.completer.is_cancelled() {
                let report = self.idle_report();
                pending
                    .completer
                    .resolve(TransitionOutcome::Cancelled(report));
                continue;
            }
            match self.plan(graph, &pending.request, now) {
                Ok(state) => {
                    self.start(state, pending.completer, now);
                    return;
                }
                Err(e) => {
                    log::warn!(
                        "Queued camera transition {} failed to start: {e}",
                        pending.completer.id()
                    );
                    pending.completer.resolve(TransitionOutcome::Failed(e));
                }
            }
        }
    }

    /// Apply one animation step; finishes the transition on the last one.
    fn step(&mut self, now: Instant) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let frame = active.state.advance(now);

        self.camera.eye = frame.position;
        self.camera.look_at(frame.look_at);
        self.camera.update_projection_matrix();
        self.controls.target = frame.look_at;
        (self.redraw)();

        if frame.is_final() {
            self.finish(TransitionPhase::Completed);
        }
    }

    /// Tear down the active transition and resolve its handle.
    fn finish(&mut self, phase: TransitionPhase) {
        let Some(active) = self.active.take() else {
            return;
        };
        self.controls.enabled = true;
        (self.redraw)();
        self.phase = phase;

        let report = active.state.report(self.camera.pose());
        let id = active.completer.id();
        let outcome = if phase == TransitionPhase::Completed {
            log::debug!(
                "Camera transition {id} completed in {} steps",
                report.steps
            );
            TransitionOutcome::Completed(report)
        } else {
            log::debug!(
                "Camera transition {id} cancelled after {} steps",
                report.steps
            );
            TransitionOutcome::Cancelled(report)
        };
        active.completer.resolve(outcome);
    }

    /// Zero-step report at the current pose, for requests that never ran.
    fn idle_report(&self) -> TransitionReport {
        let pose = self.camera.pose();
        TransitionReport {
            from: pose,
            to: pose,
            steps: 0,
        }
    }
}
