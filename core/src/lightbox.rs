use tracing::debug;

use crate::geometry::{fit_centered, OriginRect, Size};
use crate::schedule::{Scheduler, TaskOwner, Ticket, TicketSeq, Wake};
use crate::timings::Timings;

/// Scale the un-anchored lightbox starts from and shrinks back to.
pub const UNANCHORED_SCALE: f64 = 0.9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightboxPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameFit {
    Cover,
    Contain,
}

/// One set of inline styles for the lightbox media element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightboxFrame {
    /// Fixed-position box centred on a client-space point.
    Anchored {
        center_x: f64,
        center_y: f64,
        width: f64,
        height: f64,
        opacity: f64,
        fit: FrameFit,
        transition_ms: u32,
    },
    /// Box centred in the viewport and scaled about its centre.
    Centered {
        width: f64,
        height: f64,
        opacity: f64,
        scale: f64,
        transition_ms: u32,
    },
}

pub trait LightboxSurface {
    fn show_overlay(&mut self);
    fn hide_overlay(&mut self);
    fn set_closing(&mut self, closing: bool);
    /// Shows the element for `kind` with `src` and hides the other one.
    fn show_media(&mut self, kind: MediaKind, src: &str);
    fn hide_media(&mut self);
    fn clear_source(&mut self);
    fn intrinsic_size(&self, kind: MediaKind) -> Option<Size>;
    fn viewport(&self) -> Size;
    fn apply_frame(&mut self, kind: MediaKind, frame: &LightboxFrame);
    fn clear_frame(&mut self);
    fn play_video(&mut self);
    fn pause_video(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    FirstFrame,
    SecondFrame,
    StartPlayback,
    FinishClose,
}

pub struct LightboxController {
    timings: Timings,
    tickets: TicketSeq,
    phase: LightboxPhase,
    kind: MediaKind,
    origin: Option<OriginRect>,
    target: Size,
    awaiting_size: bool,
    pending: Option<(Ticket, Step)>,
}

impl LightboxController {
    pub fn new(timings: Timings) -> Self {
        Self {
            timings,
            tickets: TicketSeq::new(TaskOwner::Lightbox),
            phase: LightboxPhase::Closed,
            kind: MediaKind::Image,
            origin: None,
            target: Size::new(0.0, 0.0),
            awaiting_size: false,
            pending: None,
        }
    }

    pub fn phase(&self) -> LightboxPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.phase != LightboxPhase::Closed
    }

    pub fn origin(&self) -> Option<OriginRect> {
        self.origin
    }

    pub fn has_pending_step(&self) -> bool {
        self.pending.is_some()
    }

    pub fn open(
        &mut self,
        kind: MediaKind,
        src: &str,
        origin: Option<OriginRect>,
        surface: &mut dyn LightboxSurface,
        scheduler: &mut dyn Scheduler,
    ) {
        if self.phase != LightboxPhase::Closed {
            self.teardown(surface, scheduler);
        }
        debug!(?kind, src, anchored = origin.is_some(), "lightbox open");
        self.phase = LightboxPhase::Opening;
        self.kind = kind;
        self.origin = origin;
        surface.set_closing(false);
        surface.show_media(kind, src);
        surface.show_overlay();
        match surface.intrinsic_size(kind) {
            Some(size) => self.begin_frames(size, surface, scheduler),
            None => self.awaiting_size = true,
        }
    }

    /// Media reported its dimensions (or failed to load).
    pub fn on_media_ready(&mut self, surface: &mut dyn LightboxSurface, scheduler: &mut dyn Scheduler) {
        if !self.awaiting_size || self.phase != LightboxPhase::Opening {
            return;
        }
        let size = surface
            .intrinsic_size(self.kind)
            .unwrap_or(Size::new(0.0, 0.0));
        self.begin_frames(size, surface, scheduler);
    }

    fn begin_frames(&mut self, intrinsic: Size, surface: &mut dyn LightboxSurface, scheduler: &mut dyn Scheduler) {
        self.awaiting_size = false;
        self.target = fit_centered(surface.viewport(), intrinsic);
        let start = match self.origin {
            Some(origin) => LightboxFrame::Anchored {
                center_x: origin.center_x,
                center_y: origin.center_y,
                width: origin.width,
                height: origin.height,
                opacity: 1.0,
                fit: FrameFit::Cover,
                transition_ms: 0,
            },
            None => LightboxFrame::Centered {
                width: self.target.width,
                height: self.target.height,
                opacity: 0.0,
                scale: UNANCHORED_SCALE,
                transition_ms: 0,
            },
        };
        surface.apply_frame(self.kind, &start);
        self.schedule(Step::FirstFrame, Wake::NextFrame, scheduler);
    }

    pub fn close(&mut self, surface: &mut dyn LightboxSurface, scheduler: &mut dyn Scheduler) -> bool {
        if matches!(self.phase, LightboxPhase::Closed | LightboxPhase::Closing) {
            return false;
        }
        debug!("lightbox close");
        self.phase = LightboxPhase::Closing;
        self.awaiting_size = false;
        surface.set_closing(true);
        if self.kind == MediaKind::Video {
            surface.pause_video();
        }
        self.cancel_pending(scheduler);
        let duration = self.timings.lightbox_close_ms;
        let frame = match self.origin {
            Some(origin) => LightboxFrame::Anchored {
                center_x: origin.center_x,
                center_y: origin.center_y,
                width: origin.width,
                height: origin.height,
                opacity: 0.0,
                fit: FrameFit::Cover,
                transition_ms: duration,
            },
            None => LightboxFrame::Centered {
                width: self.target.width,
                height: self.target.height,
                opacity: 0.0,
                scale: UNANCHORED_SCALE,
                transition_ms: duration,
            },
        };
        surface.apply_frame(self.kind, &frame);
        self.schedule(Step::FinishClose, Wake::AfterMs(duration), scheduler);
        true
    }

    pub fn wake(&mut self, ticket: Ticket, surface: &mut dyn LightboxSurface, scheduler: &mut dyn Scheduler) {
        let step = match self.pending {
            Some((pending, step)) if pending == ticket => step,
            _ => return,
        };
        self.pending = None;
        match step {
            Step::FirstFrame => self.schedule(Step::SecondFrame, Wake::NextFrame, scheduler),
            Step::SecondFrame => self.settle(surface, scheduler),
            Step::StartPlayback => {
                if self.phase == LightboxPhase::Open && self.kind == MediaKind::Video {
                    surface.play_video();
                }
            }
            Step::FinishClose => self.finish_close(surface),
        }
    }

    fn settle(&mut self, surface: &mut dyn LightboxSurface, scheduler: &mut dyn Scheduler) {
        let viewport = surface.viewport();
        let (frame, duration) = match self.origin {
            Some(_) => {
                let duration = self.timings.lightbox_open_ms;
                let frame = LightboxFrame::Anchored {
                    center_x: viewport.width / 2.0,
                    center_y: viewport.height / 2.0,
                    width: self.target.width,
                    height: self.target.height,
                    opacity: 1.0,
                    fit: FrameFit::Contain,
                    transition_ms: duration,
                };
                (frame, duration)
            }
            None => {
                let duration = self.timings.lightbox_close_ms;
                let frame = LightboxFrame::Centered {
                    width: self.target.width,
                    height: self.target.height,
                    opacity: 1.0,
                    scale: 1.0,
                    transition_ms: duration,
                };
                (frame, duration)
            }
        };
        surface.apply_frame(self.kind, &frame);
        self.phase = LightboxPhase::Open;
        if self.kind == MediaKind::Video {
            self.schedule(Step::StartPlayback, Wake::AfterMs(duration), scheduler);
        }
    }

    fn finish_close(&mut self, surface: &mut dyn LightboxSurface) {
        surface.clear_source();
        surface.hide_media();
        surface.hide_overlay();
        surface.set_closing(false);
        surface.clear_frame();
        self.origin = None;
        self.phase = LightboxPhase::Closed;
    }

    /// Drops an open or closing cycle without animating.
    pub fn teardown(&mut self, surface: &mut dyn LightboxSurface, scheduler: &mut dyn Scheduler) {
        if self.phase == LightboxPhase::Closed {
            return;
        }
        self.cancel_pending(scheduler);
        self.awaiting_size = false;
        if self.kind == MediaKind::Video {
            surface.pause_video();
        }
        self.finish_close(surface);
    }

    fn schedule(&mut self, step: Step, wake: Wake, scheduler: &mut dyn Scheduler) {
        self.cancel_pending(scheduler);
        let ticket = self.tickets.issue();
        self.pending = Some((ticket, step));
        scheduler.schedule(ticket, wake);
    }

    fn cancel_pending(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some((ticket, _)) = self.pending.take() {
            scheduler.cancel(ticket);
        }
    }
}
