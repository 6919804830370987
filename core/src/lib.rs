pub mod accent;
pub mod assets;
pub mod boot;
pub mod content;
pub mod error;
pub mod geometry;
pub mod interaction;
mod legacy;
pub mod layout;
pub mod lightbox;
pub mod media;
pub mod project;
pub mod schedule;
pub mod timings;

pub use accent::{color_from_hue, AccentCycle};
pub use assets::{fallback_thumbnail, poster_for, AssetBase, DEFAULT_ASSET_BASE};
pub use boot::{boot, FEED_ERROR_MESSAGE, FEED_ERROR_TITLE};
pub use content::{build_modal_content, ContextSummary, ModalContent};
pub use error::{FeedError, PlaybackError};
pub use geometry::{fit_centered, OriginRect, Rect, Size};
pub use interaction::{Host, InteractionMachine, StageSurface, Transition, UiPhase, IDLE_TITLE};
pub use layout::{image_grid_layout, GridMode, COMPACT_BREAKPOINT_PX};
pub use lightbox::{LightboxController, LightboxFrame, LightboxPhase, LightboxSurface, MediaKind};
pub use media::{
    HeroSurface, HeroSwap, InlineSurface, MediaController, MediaEvent, MediaState, ShellId,
    ShellVisuals,
};
pub use project::{Project, ProjectIndex, ProjectStore};
pub use schedule::{Scheduler, TaskOwner, Ticket, Wake};
pub use timings::Timings;
