pub(crate) fn start() {
    #[cfg(target_arch = "wasm32")]
    {
        use vitrine_core::{AssetBase, Timings};

        use crate::hero_view::HeroView;
        use crate::lightbox_view::LightboxView;
        use crate::page::StageView;
        use crate::runtime::{self, App};
        use crate::scheduler::BrowserScheduler;
        use crate::video_shell::{InlineView, Shells};
        use crate::{accent, app_config, dom, feed};

        tracing_wasm::set_as_global_default();
        let document = dom::document();
        accent::start(&document);

        let config = app_config::config();
        tracing::info!(feed = %config.feed_url, assets = %config.asset_base, "starting");
        wasm_bindgen_futures::spawn_local(async move {
            let feed = feed::fetch_projects(&config.feed_url).await;
            let shells = Shells::default();
            let mut stage = StageView::new(&document, shells.clone());
            let Some(machine) = vitrine_core::boot(
                feed,
                &mut stage,
                AssetBase::new(&config.asset_base),
                Timings::default(),
            ) else {
                gloo::console::error!("project feed unavailable; navigation disabled");
                return;
            };
            runtime::install(App {
                machine,
                stage,
                hero: HeroView::new(&document),
                inline: InlineView::new(shells),
                lightbox: LightboxView::new(&document),
                scheduler: BrowserScheduler::default(),
            });
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("vitrine only runs in the browser; build it for wasm32");
    }
}
