#![allow(dead_code)]

use std::collections::BTreeMap;

use vitrine_core::content::{InitiativeBody, MediaSections};
use vitrine_core::{
    AssetBase, ContextSummary, HeroSurface, Host, InlineSurface, InteractionMachine,
    LightboxFrame, LightboxSurface, MediaKind, MediaState, ModalContent, ProjectIndex,
    ProjectStore, Scheduler, ShellId, ShellVisuals, Size, StageSurface, TaskOwner, Ticket,
    Timings, Wake,
};

pub const FEED: &str = r#"[
    { "id": "project-01", "title": "Alpha", "category": "AR", "year": 2023,
      "heroMedia": { "type": "video", "src": "a.webm" },
      "projectSlug": "alpha",
      "initiatives": [
        { "title": "Intro", "assetPrefix": "intro", "hasVideo": true, "images": 2 },
        { "title": "Outro", "assetPrefix": "outro", "hasVideo": true, "images": 0 }
      ] },
    { "id": "project-02", "title": "Beta", "category": "Brand", "year": "2022",
      "heroMedia": { "type": "video", "src": "b.webm" },
      "projectSlug": "beta",
      "initiatives": [{ "title": "Main", "assetPrefix": "main", "hasVideo": true, "images": 1 }] },
    { "id": "project-03", "title": "Gamma", "category": "Print", "year": "2021",
      "heroMedia": { "type": "image", "src": "c.jpg" } }
]"#;

pub fn store() -> ProjectStore {
    ProjectStore::from_json(FEED).expect("fixture feed parses")
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Due {
    Frame,
    At(u64),
}

/// Scheduler driven by the test: frames and timers only fire when the
/// harness asks for them.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: u64,
    pending: Vec<(Ticket, Due)>,
    pub cancelled: Vec<Ticket>,
}

impl ManualScheduler {
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_for(&self, owner: TaskOwner) -> usize {
        self.pending
            .iter()
            .filter(|(ticket, _)| ticket.owner() == owner)
            .count()
    }

    pub fn take_frames(&mut self) -> Vec<Ticket> {
        let mut frames = Vec::new();
        self.pending.retain(|(ticket, due)| {
            if *due == Due::Frame {
                frames.push(*ticket);
                false
            } else {
                true
            }
        });
        frames
    }

    /// Earliest timer due at or before `until`, advancing the clock to it.
    pub fn take_timer_until(&mut self, until: u64) -> Option<Ticket> {
        let (position, at) = self
            .pending
            .iter()
            .enumerate()
            .filter_map(|(position, (_, due))| match due {
                Due::At(at) if *at <= until => Some((position, *at)),
                _ => None,
            })
            .min_by_key(|(_, at)| *at)?;
        self.now = at;
        Some(self.pending.remove(position).0)
    }

    pub fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, ticket: Ticket, wake: Wake) {
        let due = match wake {
            Wake::NextFrame => Due::Frame,
            Wake::AfterMs(ms) => Due::At(self.now + u64::from(ms)),
        };
        self.pending.push((ticket, due));
    }

    fn cancel(&mut self, ticket: Ticket) {
        self.pending.retain(|(pending, _)| *pending != ticket);
        self.cancelled.push(ticket);
    }
}

#[derive(Debug)]
pub struct FakeHero {
    pub opacity: f64,
    pub displayed: bool,
    pub src: Option<String>,
    pub generation: u64,
    pub loads: Vec<String>,
    pub plays: Vec<u64>,
    pub paused: bool,
    pub current_time: f64,
    pub current_data: bool,
    pub fade_in: bool,
    pub resume_armed: bool,
}

impl Default for FakeHero {
    fn default() -> Self {
        Self {
            opacity: 0.0,
            displayed: false,
            src: None,
            generation: 0,
            loads: Vec::new(),
            plays: Vec::new(),
            paused: true,
            current_time: 0.0,
            current_data: false,
            fade_in: false,
            resume_armed: false,
        }
    }
}

impl HeroSurface for FakeHero {
    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    fn set_displayed(&mut self, displayed: bool) {
        self.displayed = displayed;
    }

    fn load_source(&mut self, src: &str, generation: u64) {
        self.src = Some(src.to_string());
        self.generation = generation;
        self.loads.push(src.to_string());
        self.paused = true;
        self.current_time = 0.0;
    }

    fn has_current_data(&self) -> bool {
        self.current_data
    }

    fn play(&mut self, generation: u64) {
        self.plays.push(generation);
        self.paused = false;
    }

    fn rewind(&mut self) {
        self.current_time = 0.0;
    }

    fn pause_and_rewind(&mut self) {
        self.paused = true;
        self.current_time = 0.0;
    }

    fn set_fade_in(&mut self, active: bool) {
        self.fade_in = active;
    }

    fn arm_gesture_resume(&mut self) {
        self.resume_armed = true;
    }

    fn disarm_gesture_resume(&mut self) {
        self.resume_armed = false;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakeVideo {
    pub src: String,
    pub paused: bool,
    pub muted: bool,
    pub current_time: f64,
    pub duration: f64,
    pub visuals: Option<ShellVisuals>,
}

impl FakeVideo {
    pub fn new(src: &str) -> Self {
        Self {
            src: src.to_string(),
            paused: true,
            muted: true,
            current_time: 0.0,
            duration: 20.0,
            visuals: None,
        }
    }

    fn state(&self) -> MediaState {
        MediaState {
            paused: self.paused,
            muted: self.muted,
            current_time: self.current_time,
            duration: self.duration,
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeInline {
    pub videos: BTreeMap<ShellId, FakeVideo>,
    pub plays: Vec<(ShellId, u64)>,
}

impl FakeInline {
    pub fn add(&mut self, shell: ShellId, src: &str) {
        self.videos.insert(shell, FakeVideo::new(src));
    }

    pub fn video(&self, shell: ShellId) -> &FakeVideo {
        self.videos.get(&shell).expect("known shell")
    }

    /// Shells whose rendered visuals say "playing".
    pub fn visually_playing(&self) -> Vec<ShellId> {
        self.videos
            .iter()
            .filter(|(_, video)| video.visuals.as_ref().map(|v| v.playing).unwrap_or(false))
            .map(|(shell, _)| *shell)
            .collect()
    }

    pub fn set_time(&mut self, shell: ShellId, seconds: f64) {
        if let Some(video) = self.videos.get_mut(&shell) {
            video.current_time = seconds;
        }
    }

    /// Starts playback behind the controller's back, as native controls would.
    pub fn force_play(&mut self, shell: ShellId) {
        if let Some(video) = self.videos.get_mut(&shell) {
            video.paused = false;
        }
    }

    pub fn last_attempt(&self, shell: ShellId) -> u64 {
        self.plays
            .iter()
            .rev()
            .find(|(played, _)| *played == shell)
            .map(|(_, attempt)| *attempt)
            .expect("shell was played")
    }
}

impl InlineSurface for FakeInline {
    fn play(&mut self, shell: ShellId, attempt: u64) {
        self.plays.push((shell, attempt));
        if let Some(video) = self.videos.get_mut(&shell) {
            video.paused = false;
        }
    }

    fn pause(&mut self, shell: ShellId) {
        if let Some(video) = self.videos.get_mut(&shell) {
            video.paused = true;
        }
    }

    fn pause_and_rewind(&mut self, shell: ShellId) {
        if let Some(video) = self.videos.get_mut(&shell) {
            video.paused = true;
            video.current_time = 0.0;
        }
    }

    fn set_current_time(&mut self, shell: ShellId, seconds: f64) {
        if let Some(video) = self.videos.get_mut(&shell) {
            video.current_time = seconds;
        }
    }

    fn set_muted(&mut self, shell: ShellId, muted: bool) {
        if let Some(video) = self.videos.get_mut(&shell) {
            video.muted = muted;
        }
    }

    fn media_state(&self, shell: ShellId) -> Option<MediaState> {
        self.videos.get(&shell).map(FakeVideo::state)
    }

    fn source(&self, shell: ShellId) -> Option<String> {
        self.videos.get(&shell).map(|video| video.src.clone())
    }

    fn render_shell(&mut self, shell: ShellId, visuals: &ShellVisuals) {
        if let Some(video) = self.videos.get_mut(&shell) {
            video.visuals = Some(visuals.clone());
        }
    }
}

#[derive(Debug)]
pub struct FakeLightbox {
    pub overlay_visible: bool,
    pub closing: bool,
    pub shown: Option<(MediaKind, String)>,
    pub size: Option<Size>,
    pub viewport: Size,
    pub frames: Vec<(MediaKind, LightboxFrame)>,
    pub frame_applied: bool,
    pub video_playing: bool,
    pub ops: Vec<&'static str>,
}

impl Default for FakeLightbox {
    fn default() -> Self {
        Self {
            overlay_visible: false,
            closing: false,
            shown: None,
            size: Some(Size::new(1600.0, 900.0)),
            viewport: Size::new(1000.0, 800.0),
            frames: Vec::new(),
            frame_applied: false,
            video_playing: false,
            ops: Vec::new(),
        }
    }
}

impl FakeLightbox {
    pub fn last_frame(&self) -> Option<LightboxFrame> {
        self.frames.last().map(|(_, frame)| *frame)
    }
}

impl LightboxSurface for FakeLightbox {
    fn show_overlay(&mut self) {
        self.overlay_visible = true;
        self.ops.push("show_overlay");
    }

    fn hide_overlay(&mut self) {
        self.overlay_visible = false;
        self.ops.push("hide_overlay");
    }

    fn set_closing(&mut self, closing: bool) {
        self.closing = closing;
    }

    fn show_media(&mut self, kind: MediaKind, src: &str) {
        self.shown = Some((kind, src.to_string()));
        self.ops.push("show_media");
    }

    fn hide_media(&mut self) {
        self.ops.push("hide_media");
    }

    fn clear_source(&mut self) {
        self.shown = None;
        self.ops.push("clear_source");
    }

    fn intrinsic_size(&self, _kind: MediaKind) -> Option<Size> {
        self.size
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn apply_frame(&mut self, kind: MediaKind, frame: &LightboxFrame) {
        self.frames.push((kind, *frame));
        self.frame_applied = true;
        self.ops.push("apply_frame");
    }

    fn clear_frame(&mut self) {
        self.frame_applied = false;
        self.ops.push("clear_frame");
    }

    fn play_video(&mut self) {
        self.video_playing = true;
        self.ops.push("play_video");
    }

    fn pause_video(&mut self) {
        self.video_playing = false;
        self.ops.push("pause_video");
    }
}

#[derive(Debug)]
pub struct FakeStage {
    pub navigation: Option<Vec<String>>,
    pub feed_error: Option<(String, String)>,
    pub context: Option<ContextSummary>,
    pub guidance_visible: bool,
    pub title_visible: bool,
    pub title_text: String,
    pub selected: Option<ProjectIndex>,
    pub backdrop_visible: bool,
    pub backdrop_fades: bool,
    pub fade_running: bool,
    pub idle_renders: usize,
    pub compact: bool,
    pub mounted: Option<ModalContent>,
    pub mounted_videos: Vec<(ShellId, String)>,
    pub mounts: usize,
    pub unmounts: usize,
    pub revealed: bool,
    pub animates_close: bool,
    pub close_running: bool,
    pub scroll_locked: bool,
    pub receded: bool,
    pub next_shell: u32,
}

impl Default for FakeStage {
    fn default() -> Self {
        Self {
            navigation: None,
            feed_error: None,
            context: None,
            guidance_visible: false,
            title_visible: false,
            title_text: String::new(),
            selected: None,
            backdrop_visible: false,
            backdrop_fades: true,
            fade_running: false,
            idle_renders: 0,
            compact: false,
            mounted: None,
            mounted_videos: Vec::new(),
            mounts: 0,
            unmounts: 0,
            revealed: false,
            animates_close: true,
            close_running: false,
            scroll_locked: false,
            receded: false,
            next_shell: 1,
        }
    }
}

pub fn video_sources(content: &ModalContent) -> Vec<String> {
    match &content.sections {
        MediaSections::Cases(cases) => cases
            .iter()
            .flat_map(|case| case.initiatives.iter())
            .flat_map(|block| match &block.body {
                InitiativeBody::Card(card) => {
                    card.video.iter().map(|v| v.src.clone()).collect::<Vec<_>>()
                }
                InitiativeBody::Media { videos, .. } => {
                    videos.iter().map(|v| v.src.clone()).collect::<Vec<_>>()
                }
            })
            .collect(),
        MediaSections::Initiatives(cards) => cards
            .iter()
            .filter_map(|card| card.video.as_ref().map(|v| v.src.clone()))
            .collect(),
        MediaSections::Empty => Vec::new(),
    }
}

impl StageSurface for FakeStage {
    fn render_navigation(&mut self, store: &ProjectStore, _assets: &AssetBase) {
        self.navigation = Some(store.iter().map(|(_, p)| p.id.clone()).collect());
    }

    fn show_feed_error(&mut self, title: &str, message: &str) {
        self.feed_error = Some((title.to_string(), message.to_string()));
        self.title_text = title.to_string();
    }

    fn show_context(&mut self, summary: &ContextSummary) {
        self.context = Some(summary.clone());
    }

    fn hide_context(&mut self) {
        self.context = None;
    }

    fn set_guidance_visible(&mut self, visible: bool) {
        self.guidance_visible = visible;
    }

    fn set_title_visible(&mut self, visible: bool) {
        self.title_visible = visible;
    }

    fn set_title_text(&mut self, text: &str) {
        self.title_text = text.to_string();
    }

    fn mark_selected(&mut self, project: Option<ProjectIndex>) {
        self.selected = project;
    }

    fn show_backdrop(&mut self) {
        self.backdrop_visible = true;
        self.fade_running = false;
    }

    fn begin_backdrop_fade(&mut self) -> bool {
        self.fade_running = self.backdrop_fades;
        self.backdrop_fades
    }

    fn render_idle(&mut self) {
        self.backdrop_visible = false;
        self.fade_running = false;
        self.idle_renders += 1;
    }

    fn is_compact(&self) -> bool {
        self.compact
    }

    fn mount_modal(&mut self, content: &ModalContent) -> Vec<ShellId> {
        self.mounts += 1;
        self.revealed = false;
        self.mounted = Some(content.clone());
        self.mounted_videos = video_sources(content)
            .into_iter()
            .map(|src| {
                let shell = ShellId(self.next_shell);
                self.next_shell += 1;
                (shell, src)
            })
            .collect();
        self.mounted_videos.iter().map(|(shell, _)| *shell).collect()
    }

    fn reveal_modal(&mut self) {
        self.revealed = true;
    }

    fn begin_modal_close(&mut self) -> bool {
        self.close_running = self.animates_close;
        self.animates_close
    }

    fn unmount_modal(&mut self) {
        if self.mounted.take().is_some() {
            self.unmounts += 1;
        }
        self.mounted_videos.clear();
        self.revealed = false;
        self.close_running = false;
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn set_background_receded(&mut self, receded: bool) {
        self.receded = receded;
    }
}

/// A machine wired to recording fakes and a manual clock.
pub struct Harness {
    pub machine: InteractionMachine,
    pub stage: FakeStage,
    pub hero: FakeHero,
    pub inline: FakeInline,
    pub lightbox: FakeLightbox,
    pub scheduler: ManualScheduler,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_stage(FakeStage::default())
    }

    pub fn with_stage(mut stage: FakeStage) -> Self {
        let machine = vitrine_core::boot(
            Ok(store()),
            &mut stage,
            AssetBase::new("/assets"),
            Timings::default(),
        )
        .expect("fixture feed boots");
        Self {
            machine,
            stage,
            hero: FakeHero::default(),
            inline: FakeInline::default(),
            lightbox: FakeLightbox::default(),
            scheduler: ManualScheduler::default(),
        }
    }

    pub fn with<R>(&mut self, action: impl FnOnce(&mut InteractionMachine, &mut Host<'_>) -> R) -> R {
        let result = {
            let mut host = Host {
                stage: &mut self.stage,
                hero: &mut self.hero,
                inline: &mut self.inline,
                lightbox: &mut self.lightbox,
                scheduler: &mut self.scheduler,
            };
            action(&mut self.machine, &mut host)
        };
        self.sync_shells();
        result
    }

    /// Gives freshly mounted shells a backing video in the inline fake.
    fn sync_shells(&mut self) {
        for (shell, src) in &self.stage.mounted_videos {
            self.inline
                .videos
                .entry(*shell)
                .or_insert_with(|| FakeVideo::new(src));
        }
    }

    pub fn next_frame(&mut self) {
        for ticket in self.scheduler.take_frames() {
            self.with(|machine, host| machine.wake(ticket, host));
        }
    }

    /// Moves the clock forward, firing timers in due order.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now() + ms;
        while let Some(ticket) = self.scheduler.take_timer_until(until) {
            self.with(|machine, host| machine.wake(ticket, host));
        }
        self.scheduler.set_now(until);
    }

    /// Fires frames and timers until nothing is pending.
    pub fn settle(&mut self) {
        for _ in 0..64 {
            if self.scheduler.is_idle() {
                return;
            }
            self.next_frame();
            self.advance(1_000);
        }
        panic!("scheduler never settled");
    }

    pub fn hover(&mut self, index: usize) -> vitrine_core::Transition {
        self.with(|machine, host| machine.enter_hover(ProjectIndex(index), host))
    }

    pub fn leave(&mut self) -> vitrine_core::Transition {
        self.with(|machine, host| machine.leave_hover(host))
    }

    pub fn open_modal(&mut self, index: usize) -> vitrine_core::Transition {
        self.with(|machine, host| machine.enter_modal(ProjectIndex(index), host))
    }

    pub fn close_modal(&mut self) -> vitrine_core::Transition {
        self.with(|machine, host| machine.exit_modal(host))
    }

    pub fn assert_invariants(&self) {
        let modal = self.machine.phase() == vitrine_core::UiPhase::Modal;
        assert_eq!(self.machine.selected().is_some(), modal, "selected iff modal");
        if self.machine.hovered().is_some() {
            assert_eq!(self.machine.phase(), vitrine_core::UiPhase::Hover);
        }
        assert!(self.inline.visually_playing().len() <= 1, "at most one inline video playing");
    }
}
