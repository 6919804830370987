//! Deferred work is never run directly by the controllers. Each step gets a
//! [`Ticket`] and is handed to a [`Scheduler`]; the host calls back into the
//! owning controller with the same ticket when the step is due. A controller
//! only acts on the ticket it is currently waiting for, so anything it has
//! cancelled or superseded is dropped on arrival.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskOwner {
    Hero,
    Lightbox,
    Modal,
    Hover,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket {
    owner: TaskOwner,
    seq: u64,
}

impl Ticket {
    pub fn owner(&self) -> TaskOwner {
        self.owner
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wake {
    NextFrame,
    AfterMs(u32),
}

pub trait Scheduler {
    fn schedule(&mut self, ticket: Ticket, wake: Wake);
    fn cancel(&mut self, ticket: Ticket);
}

#[derive(Debug)]
pub(crate) struct TicketSeq {
    owner: TaskOwner,
    next: u64,
}

impl TicketSeq {
    pub(crate) fn new(owner: TaskOwner) -> Self {
        Self { owner, next: 1 }
    }

    pub(crate) fn issue(&mut self) -> Ticket {
        let seq = self.next;
        self.next = self.next.wrapping_add(1);
        Ticket {
            owner: self.owner,
            seq,
        }
    }
}

/// Cancels the ticket held in `slot`, if any, and clears the slot.
pub(crate) fn cancel_slot(slot: &mut Option<Ticket>, scheduler: &mut dyn Scheduler) {
    if let Some(ticket) = slot.take() {
        scheduler.cancel(ticket);
    }
}
