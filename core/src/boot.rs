use tracing::{info, warn};

use crate::assets::AssetBase;
use crate::error::FeedError;
use crate::interaction::{InteractionMachine, StageSurface};
use crate::project::ProjectStore;
use crate::timings::Timings;

pub const FEED_ERROR_TITLE: &str = "ERROR";
pub const FEED_ERROR_MESSAGE: &str = "プロジェクトデータの読み込みに失敗しました。";

/// Turns the one feed load into either a running machine over a rendered
/// navigation, or the whole-page error presentation.
pub fn boot(
    feed: Result<ProjectStore, FeedError>,
    stage: &mut dyn StageSurface,
    assets: AssetBase,
    timings: Timings,
) -> Option<InteractionMachine> {
    match feed {
        Ok(store) => {
            info!(projects = store.len(), "project feed loaded");
            stage.render_navigation(&store, &assets);
            let machine = InteractionMachine::new(store, assets, timings);
            machine.render_initial(stage);
            Some(machine)
        }
        Err(err) => {
            warn!(%err, "project feed failed to load");
            stage.show_feed_error(FEED_ERROR_TITLE, FEED_ERROR_MESSAGE);
            None
        }
    }
}
