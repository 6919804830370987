//! Playback ownership for the hero background video and the inline video
//! shells inside the project modal.
//!
//! The controller never holds media elements. It drives them through
//! [`HeroSurface`] and [`InlineSurface`], and the host reports readiness,
//! play-promise results and media events back with the generation or
//! attempt number the controller handed out. Anything carrying an older
//! number is dropped.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::error::PlaybackError;
use crate::project::HeroMedia;
use crate::schedule::{cancel_slot, Scheduler, TaskOwner, Ticket, TicketSeq, Wake};
use crate::timings::Timings;

pub trait HeroSurface {
    fn set_opacity(&mut self, opacity: f64);
    fn set_displayed(&mut self, displayed: bool);
    /// Loads `src` muted, looped and inline. Readiness and `ended` events
    /// must be reported with `generation`.
    fn load_source(&mut self, src: &str, generation: u64);
    fn has_current_data(&self) -> bool;
    /// Starts playback; the outcome is reported through
    /// [`MediaController::on_hero_play_result`].
    fn play(&mut self, generation: u64);
    fn rewind(&mut self);
    fn pause_and_rewind(&mut self);
    fn set_fade_in(&mut self, active: bool);
    /// Installs a one-shot pointer/touch/click listener that calls
    /// [`MediaController::on_hero_gesture`].
    fn arm_gesture_resume(&mut self);
    fn disarm_gesture_resume(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeroSwap {
    Started,
    Skipped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShellId(pub u32);

/// Live state read back from an inline video element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MediaState {
    pub paused: bool,
    pub muted: bool,
    pub current_time: f64,
    pub duration: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShellVisuals {
    pub playing: bool,
    pub show_play_overlay: bool,
    pub show_controls: bool,
    pub play_label: &'static str,
    pub mute_label: &'static str,
    /// Playback position in percent, 0 when the duration is unknown.
    pub seek_percent: f64,
}

impl ShellVisuals {
    pub fn from_state(state: MediaState) -> Self {
        let playing = !state.paused;
        let seek_percent = if state.duration.is_finite() && state.duration > 0.0 {
            (state.current_time / state.duration * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            playing,
            show_play_overlay: !playing,
            show_controls: playing || state.current_time > 0.0,
            play_label: if playing { "Pause" } else { "Play" },
            mute_label: if state.muted { "Unmute" } else { "Mute" },
            seek_percent,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaEvent {
    Play,
    Pause,
    Ended,
    TimeUpdate,
    LoadedMetadata,
    VolumeChange,
}

pub trait InlineSurface {
    fn play(&mut self, shell: ShellId, attempt: u64);
    fn pause(&mut self, shell: ShellId);
    fn pause_and_rewind(&mut self, shell: ShellId);
    fn set_current_time(&mut self, shell: ShellId, seconds: f64);
    fn set_muted(&mut self, shell: ShellId, muted: bool);
    fn media_state(&self, shell: ShellId) -> Option<MediaState>;
    fn source(&self, shell: ShellId) -> Option<String>;
    fn render_shell(&mut self, shell: ShellId, visuals: &ShellVisuals);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InlineClick {
    OpenLightbox { src: String },
    Toggled,
    Ignored,
}

pub struct MediaController {
    timings: Timings,
    tickets: TicketSeq,
    showing: Option<String>,
    generation: u64,
    play_attempted: bool,
    resume_armed: bool,
    /// Delayed source load for the latest swap.
    pending: Option<(Ticket, String)>,
    fade: Option<Ticket>,
    shells: BTreeSet<ShellId>,
    playing: Option<ShellId>,
    attempts: HashMap<ShellId, u64>,
    next_attempt: u64,
}

impl MediaController {
    pub fn new(timings: Timings) -> Self {
        Self {
            timings,
            tickets: TicketSeq::new(TaskOwner::Hero),
            showing: None,
            generation: 0,
            play_attempted: false,
            resume_armed: false,
            pending: None,
            fade: None,
            shells: BTreeSet::new(),
            playing: None,
            attempts: HashMap::new(),
            next_attempt: 1,
        }
    }

    /// Source the hero is showing or about to show.
    pub fn hero_source(&self) -> Option<&str> {
        self.showing.as_deref()
    }

    pub fn hero_generation(&self) -> u64 {
        self.generation
    }

    pub fn swap_hero(
        &mut self,
        media: Option<&HeroMedia>,
        hero: &mut dyn HeroSurface,
        scheduler: &mut dyn Scheduler,
    ) -> HeroSwap {
        let Some(src) = media.and_then(HeroMedia::video_src) else {
            return HeroSwap::Skipped;
        };
        if self.showing.as_deref() == Some(src) {
            return HeroSwap::Skipped;
        }
        self.cancel_hero_steps(scheduler);
        self.generation = self.generation.wrapping_add(1);
        self.play_attempted = false;
        self.showing = Some(src.to_string());
        hero.set_opacity(0.0);
        let ticket = self.tickets.issue();
        self.pending = Some((ticket, src.to_string()));
        scheduler.schedule(ticket, Wake::AfterMs(self.timings.hero_swap_delay_ms));
        debug!(src, "hero swap scheduled");
        HeroSwap::Started
    }

    pub fn wake_hero(
        &mut self,
        ticket: Ticket,
        hero: &mut dyn HeroSurface,
        scheduler: &mut dyn Scheduler,
    ) {
        if self.fade == Some(ticket) {
            self.fade = None;
            hero.set_fade_in(false);
            return;
        }
        match self.pending.take() {
            Some((pending, src)) if pending == ticket => self.load_hero(&src, hero, scheduler),
            other => self.pending = other,
        }
    }

    fn load_hero(&mut self, src: &str, hero: &mut dyn HeroSurface, scheduler: &mut dyn Scheduler) {
        self.disarm_resume(hero);
        hero.load_source(src, self.generation);
        hero.set_displayed(true);
        if hero.has_current_data() {
            self.attempt_hero_play(hero);
        }
        hero.set_fade_in(true);
        hero.set_opacity(1.0);
        cancel_slot(&mut self.fade, scheduler);
        let ticket = self.tickets.issue();
        self.fade = Some(ticket);
        scheduler.schedule(ticket, Wake::AfterMs(self.timings.hero_fade_in_ms));
    }

    fn attempt_hero_play(&mut self, hero: &mut dyn HeroSurface) {
        if self.play_attempted {
            return;
        }
        self.play_attempted = true;
        hero.play(self.generation);
    }

    /// First readiness signal (`loadeddata`/`canplay`) for a load.
    pub fn on_hero_ready(&mut self, generation: u64, hero: &mut dyn HeroSurface) {
        if generation != self.generation || self.showing.is_none() {
            return;
        }
        self.attempt_hero_play(hero);
    }

    pub fn on_hero_play_result(
        &mut self,
        generation: u64,
        result: Result<(), PlaybackError>,
        hero: &mut dyn HeroSurface,
    ) {
        if generation != self.generation || self.showing.is_none() {
            return;
        }
        match result {
            Ok(()) => {}
            Err(PlaybackError::Blocked) => {
                debug!("hero autoplay blocked; waiting for a gesture");
                if !self.resume_armed {
                    self.resume_armed = true;
                    hero.arm_gesture_resume();
                }
            }
            Err(PlaybackError::Aborted) => debug!("hero playback interrupted"),
            Err(err) => warn!(%err, "hero playback failed"),
        }
    }

    pub fn on_hero_gesture(&mut self, hero: &mut dyn HeroSurface) {
        if !self.resume_armed {
            return;
        }
        self.disarm_resume(hero);
        if self.showing.is_some() {
            hero.play(self.generation);
        }
    }

    /// Loop fallback for engines that fire `ended` despite `loop`.
    pub fn on_hero_ended(&mut self, generation: u64, hero: &mut dyn HeroSurface) {
        if generation != self.generation || self.showing.is_none() {
            return;
        }
        hero.rewind();
        hero.play(generation);
    }

    pub fn stop_hero(&mut self, hero: &mut dyn HeroSurface, scheduler: &mut dyn Scheduler) {
        self.cancel_hero_steps(scheduler);
        cancel_slot(&mut self.fade, scheduler);
        self.disarm_resume(hero);
        self.generation = self.generation.wrapping_add(1);
        self.showing = None;
        self.play_attempted = false;
        hero.pause_and_rewind();
        hero.set_fade_in(false);
        hero.set_displayed(false);
        hero.set_opacity(0.0);
    }

    pub fn hero_has_pending_steps(&self) -> bool {
        self.pending.is_some() || self.fade.is_some()
    }

    fn cancel_hero_steps(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some((ticket, _)) = self.pending.take() {
            scheduler.cancel(ticket);
        }
    }

    fn disarm_resume(&mut self, hero: &mut dyn HeroSurface) {
        if self.resume_armed {
            self.resume_armed = false;
            hero.disarm_gesture_resume();
        }
    }

    pub fn register_inline(&mut self, shell: ShellId, inline: &mut dyn InlineSurface) {
        if self.shells.insert(shell) {
            render(shell, inline);
        }
    }

    pub fn release_inline(&mut self, shell: ShellId) {
        self.shells.remove(&shell);
        self.attempts.remove(&shell);
        if self.playing == Some(shell) {
            self.playing = None;
        }
    }

    pub fn release_all_inline(&mut self) {
        self.shells.clear();
        self.attempts.clear();
        self.playing = None;
    }

    pub fn registered_inline(&self) -> impl Iterator<Item = ShellId> + '_ {
        self.shells.iter().copied()
    }

    pub fn playing_inline(&self) -> Option<ShellId> {
        self.playing
    }

    pub fn start_inline(&mut self, shell: ShellId, inline: &mut dyn InlineSurface) {
        if !self.shells.contains(&shell) {
            return;
        }
        for other in self.shells.iter().copied().filter(|other| *other != shell) {
            inline.pause_and_rewind(other);
            render(other, inline);
            self.attempts.remove(&other);
        }
        let attempt = self.next_attempt;
        self.next_attempt = self.next_attempt.wrapping_add(1);
        self.attempts.insert(shell, attempt);
        self.playing = Some(shell);
        inline.play(shell, attempt);
        render(shell, inline);
    }

    pub fn stop_all_inline(&mut self, inline: &mut dyn InlineSurface) {
        self.attempts.clear();
        self.playing = None;
        for shell in self.shells.iter().copied() {
            inline.pause_and_rewind(shell);
            render(shell, inline);
        }
    }

    pub fn toggle_play(&mut self, shell: ShellId, inline: &mut dyn InlineSurface) {
        if !self.shells.contains(&shell) {
            return;
        }
        if is_playing(shell, inline) {
            self.attempts.remove(&shell);
            if self.playing == Some(shell) {
                self.playing = None;
            }
            inline.pause(shell);
            render(shell, inline);
        } else {
            self.start_inline(shell, inline);
        }
    }

    /// Paused shells open in the lightbox; playing shells pause.
    pub fn click_inline(&mut self, shell: ShellId, inline: &mut dyn InlineSurface) -> InlineClick {
        if !self.shells.contains(&shell) {
            return InlineClick::Ignored;
        }
        if is_playing(shell, inline) {
            self.toggle_play(shell, inline);
            return InlineClick::Toggled;
        }
        match inline.source(shell) {
            Some(src) if !src.is_empty() => InlineClick::OpenLightbox { src },
            _ => InlineClick::Ignored,
        }
    }

    pub fn seek(&mut self, shell: ShellId, percent: f64, inline: &mut dyn InlineSurface) {
        if !self.shells.contains(&shell) {
            return;
        }
        let Some(state) = inline.media_state(shell) else {
            return;
        };
        if !state.duration.is_finite() || state.duration <= 0.0 || !percent.is_finite() {
            return;
        }
        let percent = percent.clamp(0.0, 100.0);
        inline.set_current_time(shell, state.duration * percent / 100.0);
        render(shell, inline);
    }

    pub fn toggle_mute(&mut self, shell: ShellId, inline: &mut dyn InlineSurface) {
        if !self.shells.contains(&shell) {
            return;
        }
        let Some(state) = inline.media_state(shell) else {
            return;
        };
        inline.set_muted(shell, !state.muted);
        render(shell, inline);
    }

    pub fn on_inline_media_event(
        &mut self,
        shell: ShellId,
        event: MediaEvent,
        inline: &mut dyn InlineSurface,
    ) {
        if !self.shells.contains(&shell) {
            return;
        }
        match event {
            MediaEvent::Play if self.playing != Some(shell) => {
                // Playback started outside start_inline; keep it exclusive.
                for other in self.shells.iter().copied().filter(|other| *other != shell) {
                    inline.pause_and_rewind(other);
                    render(other, inline);
                    self.attempts.remove(&other);
                }
                self.playing = Some(shell);
            }
            MediaEvent::Ended => {
                if self.playing == Some(shell) {
                    self.playing = None;
                }
                self.attempts.remove(&shell);
                inline.pause_and_rewind(shell);
            }
            MediaEvent::Pause if self.playing == Some(shell) => {
                self.playing = None;
            }
            _ => {}
        }
        render(shell, inline);
    }

    pub fn on_inline_play_result(
        &mut self,
        shell: ShellId,
        attempt: u64,
        result: Result<(), PlaybackError>,
        inline: &mut dyn InlineSurface,
    ) {
        if self.attempts.get(&shell) != Some(&attempt) {
            return;
        }
        self.attempts.remove(&shell);
        let Err(err) = result else {
            return;
        };
        match err {
            PlaybackError::Aborted => debug!(shell = shell.0, "inline playback interrupted"),
            err => warn!(shell = shell.0, %err, "inline playback rejected"),
        }
        if self.playing == Some(shell) {
            self.playing = None;
        }
        inline.pause(shell);
        render(shell, inline);
    }
}

fn is_playing(shell: ShellId, inline: &dyn InlineSurface) -> bool {
    inline
        .media_state(shell)
        .map(|state| !state.paused)
        .unwrap_or(false)
}

fn render(shell: ShellId, inline: &mut dyn InlineSurface) {
    if let Some(state) = inline.media_state(shell) {
        inline.render_shell(shell, &ShellVisuals::from_state(state));
    }
}
