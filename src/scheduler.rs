use std::collections::HashMap;

use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;

use vitrine_core::{Scheduler, Ticket, Wake};

use crate::runtime;

enum Handle {
    Frame(AnimationFrame),
    Timer(Timeout),
}

impl Handle {
    fn cancel(self) {
        match self {
            Handle::Frame(frame) => drop(frame),
            Handle::Timer(timer) => {
                let _ = timer.cancel();
            }
        }
    }
}

/// Backs the core's tickets with animation frames and timeouts. Dropping a
/// handle cancels it, so a cancelled ticket never calls back.
#[derive(Default)]
pub(crate) struct BrowserScheduler {
    pending: HashMap<Ticket, Handle>,
}

impl BrowserScheduler {
    /// Forgets the handle of a ticket whose callback is running.
    pub(crate) fn fired(&mut self, ticket: Ticket) {
        self.pending.remove(&ticket);
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&mut self, ticket: Ticket, wake: Wake) {
        let handle = match wake {
            Wake::NextFrame => Handle::Frame(request_animation_frame(move |_| runtime::wake(ticket))),
            Wake::AfterMs(delay) => Handle::Timer(Timeout::new(delay, move || runtime::wake(ticket))),
        };
        if let Some(previous) = self.pending.insert(ticket, handle) {
            previous.cancel();
        }
    }

    fn cancel(&mut self, ticket: Ticket) {
        if let Some(handle) = self.pending.remove(&ticket) {
            handle.cancel();
        }
    }
}
