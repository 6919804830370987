//! The running page. One [`App`] lives in a thread-local slot; DOM
//! callbacks, timers and play-promise continuations all reach it through
//! [`dispatch`], which queues work issued while the app is already borrowed
//! and runs it once the current action returns.

use std::cell::RefCell;
use std::collections::VecDeque;

use vitrine_core::{Host, InteractionMachine, Ticket};

use crate::hero_view::HeroView;
use crate::lightbox_view::LightboxView;
use crate::page::StageView;
use crate::scheduler::BrowserScheduler;
use crate::video_shell::InlineView;

pub(crate) struct App {
    pub(crate) machine: InteractionMachine,
    pub(crate) stage: StageView,
    pub(crate) hero: HeroView,
    pub(crate) inline: InlineView,
    pub(crate) lightbox: LightboxView,
    pub(crate) scheduler: BrowserScheduler,
}

impl App {
    pub(crate) fn drive<R>(
        &mut self,
        action: impl FnOnce(&mut InteractionMachine, &mut Host<'_>) -> R,
    ) -> R {
        let mut host = Host {
            stage: &mut self.stage,
            hero: &mut self.hero,
            inline: &mut self.inline,
            lightbox: &mut self.lightbox,
            scheduler: &mut self.scheduler,
        };
        action(&mut self.machine, &mut host)
    }
}

type Action = Box<dyn FnOnce(&mut App)>;

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
    static QUEUE: RefCell<VecDeque<Action>> = RefCell::new(VecDeque::new());
}

pub(crate) fn install(app: App) {
    APP.with(|slot| {
        *slot.borrow_mut() = Some(app);
    });
    drain();
}

pub(crate) fn dispatch(action: impl FnOnce(&mut App) + 'static) {
    QUEUE.with(|queue| queue.borrow_mut().push_back(Box::new(action)));
    drain();
}

/// Shorthand for actions that only need the machine and its host.
pub(crate) fn drive(action: impl FnOnce(&mut InteractionMachine, &mut Host<'_>) + 'static) {
    dispatch(move |app| app.drive(action));
}

pub(crate) fn wake(ticket: Ticket) {
    dispatch(move |app| {
        app.scheduler.fired(ticket);
        app.drive(|machine, host| machine.wake(ticket, host));
    });
}

fn drain() {
    APP.with(|slot| {
        // Already borrowed: the action holding it drains the queue on return.
        let Ok(mut slot) = slot.try_borrow_mut() else {
            return;
        };
        let Some(app) = slot.as_mut() else {
            return;
        };
        while let Some(action) = QUEUE.with(|queue| queue.borrow_mut().pop_front()) {
            action(app);
        }
    });
}
