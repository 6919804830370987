//! The page-level state machine.
//!
//! [`InteractionMachine`] is the only owner of the `initial | hover | modal`
//! state. Every input the page receives goes through one of its methods,
//! which update the state and then drive the stage, the media controller
//! and the lightbox through the surfaces in [`Host`]. Deferred steps come
//! back through [`InteractionMachine::wake`].

use tracing::debug;

use crate::assets::AssetBase;
use crate::content::{build_modal_content, ContextSummary, ModalContent};
use crate::error::PlaybackError;
use crate::geometry::{OriginRect, Rect};
use crate::layout::GridMode;
use crate::lightbox::{LightboxController, LightboxSurface, MediaKind};
use crate::media::{
    HeroSurface, InlineClick, InlineSurface, MediaController, MediaEvent, ShellId,
};
use crate::project::{ProjectIndex, ProjectStore};
use crate::schedule::{cancel_slot, Scheduler, TaskOwner, Ticket, TicketSeq, Wake};
use crate::timings::Timings;

pub const IDLE_TITLE: &str = "PORTFOLIO";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiPhase {
    Initial,
    Hover,
    Modal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored,
}

impl Transition {
    pub fn applied(self) -> bool {
        self == Transition::Applied
    }
}

/// Page chrome outside the media elements: navigation, context panel,
/// title, guidance text, backdrop and the modal container.
pub trait StageSurface {
    fn render_navigation(&mut self, store: &ProjectStore, assets: &AssetBase);
    fn show_feed_error(&mut self, title: &str, message: &str);
    fn show_context(&mut self, summary: &ContextSummary);
    fn hide_context(&mut self);
    fn set_guidance_visible(&mut self, visible: bool);
    fn set_title_visible(&mut self, visible: bool);
    fn set_title_text(&mut self, text: &str);
    /// Marks one navigation item selected and clears every other one.
    fn mark_selected(&mut self, project: Option<ProjectIndex>);
    fn show_backdrop(&mut self);
    /// Starts the backdrop fade-out. Returns `false` when no fade runs, in
    /// which case no completion will be reported.
    fn begin_backdrop_fade(&mut self) -> bool;
    /// Idle presentation once the backdrop is gone.
    fn render_idle(&mut self);
    fn is_compact(&self) -> bool;
    /// Builds the modal DOM and returns one id per inline video shell.
    fn mount_modal(&mut self, content: &ModalContent) -> Vec<ShellId>;
    fn reveal_modal(&mut self);
    /// Starts the close animation. Returns `false` when nothing animates.
    fn begin_modal_close(&mut self) -> bool;
    fn unmount_modal(&mut self);
    fn set_scroll_locked(&mut self, locked: bool);
    fn set_background_receded(&mut self, receded: bool);
}

/// Borrowed view of everything the machine drives for one call.
pub struct Host<'a> {
    pub stage: &'a mut dyn StageSurface,
    pub hero: &'a mut dyn HeroSurface,
    pub inline: &'a mut dyn InlineSurface,
    pub lightbox: &'a mut dyn LightboxSurface,
    pub scheduler: &'a mut dyn Scheduler,
}

#[derive(Debug)]
struct UiState {
    phase: UiPhase,
    hovered: Option<ProjectIndex>,
    selected: Option<ProjectIndex>,
    /// Hover-leave finalisation still owed to the stage.
    leave_pending: bool,
    leave_timer: Option<Ticket>,
    closing: bool,
    close_fallback: Option<Ticket>,
    reveal: Option<Ticket>,
}

impl UiState {
    fn new() -> Self {
        Self {
            phase: UiPhase::Initial,
            hovered: None,
            selected: None,
            leave_pending: false,
            leave_timer: None,
            closing: false,
            close_fallback: None,
            reveal: None,
        }
    }

    fn cancel_leave(&mut self, scheduler: &mut dyn Scheduler) {
        self.leave_pending = false;
        cancel_slot(&mut self.leave_timer, scheduler);
    }
}

pub struct InteractionMachine {
    store: ProjectStore,
    assets: AssetBase,
    timings: Timings,
    state: UiState,
    hover_tickets: TicketSeq,
    modal_tickets: TicketSeq,
    media: MediaController,
    lightbox: LightboxController,
}

impl InteractionMachine {
    pub fn new(store: ProjectStore, assets: AssetBase, timings: Timings) -> Self {
        Self {
            store,
            assets,
            timings,
            state: UiState::new(),
            hover_tickets: TicketSeq::new(TaskOwner::Hover),
            modal_tickets: TicketSeq::new(TaskOwner::Modal),
            media: MediaController::new(timings),
            lightbox: LightboxController::new(timings),
        }
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn assets(&self) -> &AssetBase {
        &self.assets
    }

    pub fn phase(&self) -> UiPhase {
        self.state.phase
    }

    pub fn hovered(&self) -> Option<ProjectIndex> {
        self.state.hovered
    }

    pub fn selected(&self) -> Option<ProjectIndex> {
        self.state.selected
    }

    pub fn is_closing(&self) -> bool {
        self.state.closing
    }

    pub fn media(&self) -> &MediaController {
        &self.media
    }

    pub fn lightbox(&self) -> &LightboxController {
        &self.lightbox
    }

    /// Pushes the `initial` presentation to a freshly rendered stage.
    pub fn render_initial(&self, stage: &mut dyn StageSurface) {
        stage.set_title_text(IDLE_TITLE);
        stage.set_title_visible(true);
        stage.set_guidance_visible(true);
        stage.hide_context();
        stage.mark_selected(None);
    }

    pub fn enter_hover(&mut self, project: ProjectIndex, host: &mut Host<'_>) -> Transition {
        if self.state.phase == UiPhase::Modal {
            return Transition::Ignored;
        }
        let Some(record) = self.store.get(project) else {
            return Transition::Ignored;
        };
        self.state.cancel_leave(host.scheduler);
        self.state.phase = UiPhase::Hover;
        self.state.hovered = Some(project);
        debug!(project = %record.id, "hover");

        self.media
            .swap_hero(record.hero_media.as_ref(), host.hero, host.scheduler);
        host.stage.show_backdrop();
        host.stage.set_guidance_visible(false);
        host.stage.set_title_visible(false);
        host.stage.show_context(&ContextSummary::from_project(record));
        Transition::Applied
    }

    pub fn leave_hover(&mut self, host: &mut Host<'_>) -> Transition {
        if self.state.phase != UiPhase::Hover || self.state.selected.is_some() {
            return Transition::Ignored;
        }
        self.state.cancel_leave(host.scheduler);
        self.state.phase = UiPhase::Initial;
        self.state.hovered = None;
        debug!("hover left");

        self.media.stop_hero(host.hero, host.scheduler);
        host.stage.set_title_text(IDLE_TITLE);
        host.stage.set_title_visible(true);
        host.stage.set_guidance_visible(true);
        host.stage.hide_context();
        host.stage.mark_selected(None);

        self.state.leave_pending = true;
        let fading = self.timings.hover_fade_fallback_ms > 0 && host.stage.begin_backdrop_fade();
        if fading {
            let ticket = self.hover_tickets.issue();
            self.state.leave_timer = Some(ticket);
            host.scheduler.schedule(
                ticket,
                Wake::AfterMs(self.timings.hover_fade_fallback_ms),
            );
        } else {
            self.finish_leave(host);
        }
        Transition::Applied
    }

    /// The stage finished the backdrop fade started by `leave_hover`.
    pub fn on_backdrop_faded(&mut self, host: &mut Host<'_>) {
        self.finish_leave(host);
    }

    fn finish_leave(&mut self, host: &mut Host<'_>) {
        if !self.state.leave_pending {
            return;
        }
        self.state.leave_pending = false;
        cancel_slot(&mut self.state.leave_timer, host.scheduler);
        if self.state.phase == UiPhase::Initial && self.state.hovered.is_none() {
            host.stage.render_idle();
        }
    }

    pub fn enter_modal(&mut self, project: ProjectIndex, host: &mut Host<'_>) -> Transition {
        if self.store.get(project).is_none() {
            return Transition::Ignored;
        }
        self.state.cancel_leave(host.scheduler);
        if self.state.closing {
            self.finish_close(host);
        }
        if self.state.phase == UiPhase::Modal {
            self.teardown_modal(host);
        }
        let Some(record) = self.store.get(project) else {
            return Transition::Ignored;
        };
        debug!(project = %record.id, "modal open");

        self.state.phase = UiPhase::Modal;
        self.state.selected = Some(project);
        self.state.hovered = None;
        host.stage.mark_selected(Some(project));

        let mode = if host.stage.is_compact() {
            GridMode::Compact
        } else {
            GridMode::Wide
        };
        let content = build_modal_content(record, &self.assets, mode);
        for shell in host.stage.mount_modal(&content) {
            self.media.register_inline(shell, host.inline);
        }
        host.stage.set_scroll_locked(true);
        host.stage.set_background_receded(true);
        host.stage.set_guidance_visible(false);

        let ticket = self.modal_tickets.issue();
        self.state.reveal = Some(ticket);
        host.scheduler.schedule(ticket, Wake::NextFrame);
        Transition::Applied
    }

    /// Drops the mounted modal content without touching the UI state.
    fn teardown_modal(&mut self, host: &mut Host<'_>) {
        cancel_slot(&mut self.state.reveal, host.scheduler);
        self.lightbox.teardown(host.lightbox, host.scheduler);
        self.media.stop_all_inline(host.inline);
        self.media.release_all_inline();
        host.stage.unmount_modal();
    }

    pub fn exit_modal(&mut self, host: &mut Host<'_>) -> Transition {
        if self.state.phase != UiPhase::Modal || self.state.closing {
            return Transition::Ignored;
        }
        debug!("modal close");
        if self.lightbox.is_visible() {
            self.lightbox.close(host.lightbox, host.scheduler);
        }
        self.media.stop_all_inline(host.inline);
        cancel_slot(&mut self.state.reveal, host.scheduler);
        self.state.closing = true;
        if host.stage.begin_modal_close() {
            let ticket = self.modal_tickets.issue();
            self.state.close_fallback = Some(ticket);
            host.scheduler.schedule(
                ticket,
                Wake::AfterMs(self.timings.modal_close_fallback_ms),
            );
        } else {
            self.finish_close(host);
        }
        Transition::Applied
    }

    /// The modal container's close transition ended.
    pub fn on_modal_transition_end(&mut self, host: &mut Host<'_>) {
        if self.state.closing {
            self.finish_close(host);
        }
    }

    fn finish_close(&mut self, host: &mut Host<'_>) {
        if !self.state.closing {
            return;
        }
        self.state.closing = false;
        cancel_slot(&mut self.state.close_fallback, host.scheduler);
        self.lightbox.teardown(host.lightbox, host.scheduler);
        host.stage.unmount_modal();
        self.media.release_all_inline();
        host.stage.set_scroll_locked(false);
        host.stage.set_background_receded(false);
        self.state.selected = None;
        self.state.hovered = None;
        self.state.phase = UiPhase::Initial;
        self.show_idle(host);
    }

    fn show_idle(&mut self, host: &mut Host<'_>) {
        self.state.cancel_leave(host.scheduler);
        self.media.stop_hero(host.hero, host.scheduler);
        self.render_initial(host.stage);
        host.stage.render_idle();
    }

    pub fn on_escape(&mut self, host: &mut Host<'_>) -> Transition {
        if self.lightbox.is_visible() {
            if self.lightbox.close(host.lightbox, host.scheduler) {
                Transition::Applied
            } else {
                Transition::Ignored
            }
        } else {
            self.exit_modal(host)
        }
    }

    /// Title click: back to `initial` from anywhere, without animating.
    pub fn reset_to_initial(&mut self, host: &mut Host<'_>) -> Transition {
        debug!(phase = ?self.state.phase, "reset to initial");
        if self.state.phase == UiPhase::Modal {
            if !self.state.closing {
                self.media.stop_all_inline(host.inline);
                cancel_slot(&mut self.state.reveal, host.scheduler);
                self.state.closing = true;
            }
            self.finish_close(host);
            return Transition::Applied;
        }
        self.state.phase = UiPhase::Initial;
        self.state.hovered = None;
        self.show_idle(host);
        Transition::Applied
    }

    /// Touch on the stage background, outside any navigation item.
    pub fn on_backdrop_touch(&mut self, host: &mut Host<'_>) -> Transition {
        if self.state.phase != UiPhase::Hover || self.media.hero_source().is_none() {
            return Transition::Ignored;
        }
        self.reset_to_initial(host)
    }

    pub fn open_image(&mut self, src: &str, origin: Option<Rect>, host: &mut Host<'_>) -> Transition {
        if !self.modal_interactive() || src.is_empty() {
            return Transition::Ignored;
        }
        self.lightbox.open(
            MediaKind::Image,
            src,
            origin.map(OriginRect::from),
            host.lightbox,
            host.scheduler,
        );
        Transition::Applied
    }

    pub fn click_inline(&mut self, shell: ShellId, origin: Option<Rect>, host: &mut Host<'_>) -> Transition {
        if !self.modal_interactive() {
            return Transition::Ignored;
        }
        match self.media.click_inline(shell, host.inline) {
            InlineClick::OpenLightbox { src } => {
                self.lightbox.open(
                    MediaKind::Video,
                    &src,
                    origin.map(OriginRect::from),
                    host.lightbox,
                    host.scheduler,
                );
                Transition::Applied
            }
            InlineClick::Toggled => Transition::Applied,
            InlineClick::Ignored => Transition::Ignored,
        }
    }

    pub fn toggle_inline(&mut self, shell: ShellId, host: &mut Host<'_>) {
        if self.modal_interactive() {
            self.media.toggle_play(shell, host.inline);
        }
    }

    pub fn seek_inline(&mut self, shell: ShellId, percent: f64, host: &mut Host<'_>) {
        self.media.seek(shell, percent, host.inline);
    }

    pub fn toggle_inline_mute(&mut self, shell: ShellId, host: &mut Host<'_>) {
        self.media.toggle_mute(shell, host.inline);
    }

    pub fn on_inline_media_event(&mut self, shell: ShellId, event: MediaEvent, host: &mut Host<'_>) {
        self.media.on_inline_media_event(shell, event, host.inline);
    }

    pub fn on_inline_play_result(
        &mut self,
        shell: ShellId,
        attempt: u64,
        result: Result<(), PlaybackError>,
        host: &mut Host<'_>,
    ) {
        self.media
            .on_inline_play_result(shell, attempt, result, host.inline);
    }

    pub fn close_lightbox(&mut self, host: &mut Host<'_>) -> Transition {
        if self.lightbox.close(host.lightbox, host.scheduler) {
            Transition::Applied
        } else {
            Transition::Ignored
        }
    }

    pub fn on_lightbox_media_ready(&mut self, host: &mut Host<'_>) {
        self.lightbox.on_media_ready(host.lightbox, host.scheduler);
    }

    pub fn on_hero_ready(&mut self, generation: u64, host: &mut Host<'_>) {
        self.media.on_hero_ready(generation, host.hero);
    }

    pub fn on_hero_play_result(
        &mut self,
        generation: u64,
        result: Result<(), PlaybackError>,
        host: &mut Host<'_>,
    ) {
        self.media.on_hero_play_result(generation, result, host.hero);
    }

    pub fn on_hero_gesture(&mut self, host: &mut Host<'_>) {
        self.media.on_hero_gesture(host.hero);
    }

    pub fn on_hero_ended(&mut self, generation: u64, host: &mut Host<'_>) {
        self.media.on_hero_ended(generation, host.hero);
    }

    /// Routes a due [`Ticket`] back to the step that scheduled it.
    pub fn wake(&mut self, ticket: Ticket, host: &mut Host<'_>) {
        match ticket.owner() {
            TaskOwner::Hero => self.media.wake_hero(ticket, host.hero, host.scheduler),
            TaskOwner::Lightbox => self.lightbox.wake(ticket, host.lightbox, host.scheduler),
            TaskOwner::Hover => {
                if self.state.leave_timer == Some(ticket) {
                    self.state.leave_timer = None;
                    self.finish_leave(host);
                }
            }
            TaskOwner::Modal => {
                if self.state.reveal == Some(ticket) {
                    self.state.reveal = None;
                    host.stage.reveal_modal();
                } else if self.state.close_fallback == Some(ticket) {
                    self.state.close_fallback = None;
                    self.finish_close(host);
                }
            }
        }
    }

    fn modal_interactive(&self) -> bool {
        self.state.phase == UiPhase::Modal && !self.state.closing
    }
}
