mod support;

use support::{FakeLightbox, ManualScheduler};
use vitrine_core::lightbox::FrameFit;
use vitrine_core::{
    LightboxController, LightboxFrame, LightboxPhase, MediaKind, OriginRect, Size, Timings,
};

fn origin() -> Option<OriginRect> {
    Some(OriginRect {
        center_x: 160.0,
        center_y: 240.0,
        width: 120.0,
        height: 80.0,
    })
}

struct Rig {
    lightbox: LightboxController,
    surface: FakeLightbox,
    scheduler: ManualScheduler,
}

impl Rig {
    fn new() -> Self {
        Self {
            lightbox: LightboxController::new(Timings::default()),
            surface: FakeLightbox::default(),
            scheduler: ManualScheduler::default(),
        }
    }

    fn open(&mut self, kind: MediaKind, src: &str, origin: Option<OriginRect>) {
        self.lightbox
            .open(kind, src, origin, &mut self.surface, &mut self.scheduler);
    }

    fn close(&mut self) -> bool {
        self.lightbox.close(&mut self.surface, &mut self.scheduler)
    }

    fn frame(&mut self) {
        for ticket in self.scheduler.take_frames() {
            self.lightbox
                .wake(ticket, &mut self.surface, &mut self.scheduler);
        }
    }

    fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now() + ms;
        while let Some(ticket) = self.scheduler.take_timer_until(until) {
            self.lightbox
                .wake(ticket, &mut self.surface, &mut self.scheduler);
        }
        self.scheduler.set_now(until);
    }
}

#[test]
fn anchored_open_starts_at_origin_then_settles_centered() {
    let mut rig = Rig::new();
    rig.open(MediaKind::Image, "x.webp", origin());
    assert!(rig.surface.overlay_visible);
    assert_eq!(rig.lightbox.phase(), LightboxPhase::Opening);
    assert_eq!(
        rig.surface.last_frame(),
        Some(LightboxFrame::Anchored {
            center_x: 160.0,
            center_y: 240.0,
            width: 120.0,
            height: 80.0,
            opacity: 1.0,
            fit: FrameFit::Cover,
            transition_ms: 0,
        })
    );

    rig.frame();
    assert_eq!(rig.surface.frames.len(), 1, "first frame only paints the start");
    rig.frame();
    let Some(LightboxFrame::Anchored {
        center_x,
        center_y,
        width,
        height,
        fit,
        transition_ms,
        ..
    }) = rig.surface.last_frame()
    else {
        panic!("anchored frame expected");
    };
    assert_eq!((center_x, center_y), (500.0, 400.0));
    assert_eq!(width, 900.0);
    assert!((height - 506.25).abs() < 1e-9);
    assert_eq!(fit, FrameFit::Contain);
    assert_eq!(transition_ms, 500);
    assert_eq!(rig.lightbox.phase(), LightboxPhase::Open);
    assert!(rig.scheduler.is_idle());
}

#[test]
fn video_plays_after_open_transition() {
    let mut rig = Rig::new();
    rig.open(MediaKind::Video, "v.webm", origin());
    rig.frame();
    rig.frame();
    rig.advance(499);
    assert!(!rig.surface.video_playing);
    rig.advance(1);
    assert!(rig.surface.video_playing);
}

#[test]
fn close_before_final_frame_cleans_up_after_close_duration() {
    let mut rig = Rig::new();
    rig.open(MediaKind::Image, "x.webp", origin());
    rig.frame();
    assert!(rig.close());
    assert!(rig.surface.closing);

    rig.frame();
    assert!(
        rig.surface
            .frames
            .iter()
            .all(|(_, frame)| !matches!(frame, LightboxFrame::Anchored { fit: FrameFit::Contain, .. })),
        "cancelled open never settles"
    );
    rig.advance(399);
    assert!(rig.surface.overlay_visible);
    rig.advance(1);
    assert!(!rig.surface.overlay_visible);
    assert!(!rig.surface.closing);
    assert!(!rig.surface.frame_applied);
    assert!(rig.surface.shown.is_none());
    assert!(rig.lightbox.origin().is_none());
    assert_eq!(rig.lightbox.phase(), LightboxPhase::Closed);
    assert!(rig.scheduler.is_idle());
}

#[test]
fn close_pauses_video_before_animating() {
    let mut rig = Rig::new();
    rig.open(MediaKind::Video, "v.webm", origin());
    rig.frame();
    rig.frame();
    rig.advance(500);
    rig.surface.ops.clear();
    rig.close();
    assert_eq!(rig.surface.ops, vec!["pause_video", "apply_frame"]);
    assert!(matches!(
        rig.surface.last_frame(),
        Some(LightboxFrame::Anchored {
            opacity,
            fit: FrameFit::Cover,
            transition_ms: 400,
            ..
        }) if opacity == 0.0
    ));
}

#[test]
fn unanchored_open_scales_in_and_out() {
    let mut rig = Rig::new();
    rig.open(MediaKind::Image, "x.webp", None);
    assert!(matches!(
        rig.surface.last_frame(),
        Some(LightboxFrame::Centered { scale, opacity, transition_ms: 0, .. })
            if scale < 1.0 && opacity == 0.0
    ));
    rig.frame();
    rig.frame();
    assert!(matches!(
        rig.surface.last_frame(),
        Some(LightboxFrame::Centered { scale, opacity, transition_ms: 400, .. })
            if scale == 1.0 && opacity == 1.0
    ));
    rig.close();
    assert!(matches!(
        rig.surface.last_frame(),
        Some(LightboxFrame::Centered { opacity, .. }) if opacity == 0.0
    ));
    rig.advance(400);
    assert!(!rig.surface.overlay_visible);
}

#[test]
fn open_waits_for_intrinsic_size() {
    let mut rig = Rig::new();
    rig.surface.size = None;
    rig.open(MediaKind::Image, "x.webp", origin());
    assert!(rig.surface.frames.is_empty());
    assert!(rig.scheduler.is_idle());

    rig.surface.size = Some(Size::new(600.0, 1200.0));
    rig.lightbox
        .on_media_ready(&mut rig.surface, &mut rig.scheduler);
    assert_eq!(rig.surface.frames.len(), 1);
    rig.frame();
    rig.frame();
    assert!(matches!(
        rig.surface.last_frame(),
        Some(LightboxFrame::Anchored { width, height, .. }) if width == 360.0 && height == 720.0
    ));

    rig.lightbox
        .on_media_ready(&mut rig.surface, &mut rig.scheduler);
    assert_eq!(rig.surface.frames.len(), 2, "late readiness is ignored");
}

#[test]
fn reopening_tears_down_the_previous_cycle() {
    let mut rig = Rig::new();
    rig.open(MediaKind::Video, "v.webm", origin());
    rig.frame();
    rig.frame();
    rig.close();
    rig.open(MediaKind::Image, "y.webp", None);

    assert!(rig.surface.overlay_visible);
    assert_eq!(rig.surface.shown, Some((MediaKind::Image, "y.webp".to_string())));
    assert_eq!(rig.lightbox.phase(), LightboxPhase::Opening);
    assert!(rig.lightbox.origin().is_none());
    rig.advance(1_000);
    assert!(rig.surface.overlay_visible, "old close cleanup was cancelled");
    assert!(!rig.surface.video_playing);
}

#[test]
fn close_is_ignored_when_closed_or_closing() {
    let mut rig = Rig::new();
    assert!(!rig.close());
    rig.open(MediaKind::Image, "x.webp", origin());
    assert!(rig.close());
    assert!(!rig.close());
    assert_eq!(rig.scheduler.pending_for(vitrine_core::TaskOwner::Lightbox), 1);
}
