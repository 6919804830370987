use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent};

use vitrine_core::{
    AssetBase, ContextSummary, GridMode, ModalContent, ProjectIndex, ProjectStore, ShellId,
    StageSurface,
};

use crate::dom;
use crate::modal_view::ModalView;
use crate::navigation::{self, Navigation};
use crate::runtime;
use crate::video_shell::Shells;

const HIDDEN_CLASS: &str = "is-hidden";
const VISIBLE_CLASS: &str = "is-visible";
const FADING_CLASS: &str = "is-fading";

/// Everything on the page outside the hero video and the lightbox.
pub(crate) struct StageView {
    document: Document,
    app: Element,
    title: Element,
    guidance: Element,
    context: Element,
    context_category: Element,
    context_role: Element,
    context_tools: HtmlElement,
    nav_list: Element,
    navigation: Navigation,
    backdrop: Element,
    modal: ModalView,
    _listeners: Vec<EventListener>,
}

impl StageView {
    pub(crate) fn new(document: &Document, shells: Shells) -> Self {
        let app: Element = dom::required(document, "app");
        let title: Element = dom::required(document, "title");
        let backdrop: Element = dom::required(document, "backdrop");
        let mut listeners = Vec::new();

        listeners.push(EventListener::new(&title, "click", |_| {
            runtime::drive(|machine, host| {
                machine.reset_to_initial(host);
            });
        }));
        listeners.push(EventListener::new(document, "keydown", |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if event.key() == "Escape" {
                runtime::drive(|machine, host| {
                    machine.on_escape(host);
                });
            }
        }));
        listeners.push(EventListener::new_with_options(
            &app,
            "touchstart",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: true,
            },
            |event| {
                let on_item = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .and_then(|target| target.closest(&format!(".{}", navigation::ITEM_CLASS)).ok())
                    .flatten()
                    .is_some();
                if !on_item {
                    runtime::drive(|machine, host| {
                        machine.on_backdrop_touch(host);
                    });
                }
            },
        ));
        let faded = backdrop.clone();
        listeners.push(EventListener::new(&backdrop, "transitionend", move |event| {
            if dom::targets(event, &faded) {
                runtime::drive(|machine, host| machine.on_backdrop_faded(host));
            }
        }));

        Self {
            document: document.clone(),
            app,
            title,
            guidance: dom::required(document, "guidance"),
            context: dom::required(document, "context"),
            context_category: dom::required(document, "context-category"),
            context_role: dom::required(document, "context-role"),
            context_tools: dom::required(document, "context-tools"),
            nav_list: dom::required(document, "nav"),
            navigation: Navigation::default(),
            backdrop,
            modal: ModalView::new(document, shells),
            _listeners: listeners,
        }
    }
}

impl StageSurface for StageView {
    fn render_navigation(&mut self, store: &ProjectStore, assets: &AssetBase) {
        self.navigation.clear();
        self.navigation = Navigation::render(&self.document, &self.nav_list, store, assets);
    }

    fn show_feed_error(&mut self, title: &str, message: &str) {
        dom::set_text(&self.title, title);
        dom::set_class(&self.title, HIDDEN_CLASS, false);
        dom::set_class(&self.guidance, HIDDEN_CLASS, true);
        dom::set_text(&self.context_category, message);
        dom::set_text(&self.context_role, "");
        dom::set_displayed(&self.context_tools, false);
        dom::set_class(&self.context, "is-error", true);
        dom::set_class(&self.context, VISIBLE_CLASS, true);
    }

    fn show_context(&mut self, summary: &ContextSummary) {
        dom::set_text(&self.context_category, &summary.category_year);
        dom::set_text(&self.context_role, &summary.role_scope);
        match &summary.tools {
            Some(tools) => {
                dom::set_text(&self.context_tools, tools);
                dom::set_displayed(&self.context_tools, true);
            }
            None => dom::set_displayed(&self.context_tools, false),
        }
        dom::set_class(&self.context, VISIBLE_CLASS, true);
    }

    fn hide_context(&mut self) {
        dom::set_class(&self.context, VISIBLE_CLASS, false);
    }

    fn set_guidance_visible(&mut self, visible: bool) {
        dom::set_class(&self.guidance, HIDDEN_CLASS, !visible);
    }

    fn set_title_visible(&mut self, visible: bool) {
        dom::set_class(&self.title, HIDDEN_CLASS, !visible);
    }

    fn set_title_text(&mut self, text: &str) {
        dom::set_text(&self.title, text);
    }

    fn mark_selected(&mut self, project: Option<ProjectIndex>) {
        self.navigation.mark_selected(project);
    }

    fn show_backdrop(&mut self) {
        dom::set_class(&self.backdrop, FADING_CLASS, false);
        dom::set_class(&self.backdrop, VISIBLE_CLASS, true);
    }

    fn begin_backdrop_fade(&mut self) -> bool {
        dom::set_class(&self.backdrop, VISIBLE_CLASS, false);
        dom::set_class(&self.backdrop, FADING_CLASS, true);
        dom::has_transition(&self.backdrop)
    }

    fn render_idle(&mut self) {
        dom::set_class(&self.backdrop, FADING_CLASS, false);
        dom::set_class(&self.backdrop, VISIBLE_CLASS, false);
    }

    fn is_compact(&self) -> bool {
        GridMode::for_viewport_width(dom::viewport().width) == GridMode::Compact
    }

    fn mount_modal(&mut self, content: &ModalContent) -> Vec<ShellId> {
        self.modal.mount(content)
    }

    fn reveal_modal(&mut self) {
        self.modal.reveal();
    }

    fn begin_modal_close(&mut self) -> bool {
        self.modal.begin_close()
    }

    fn unmount_modal(&mut self) {
        self.modal.unmount();
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        if let Some(body) = self.document.body() {
            dom::set_class(&body, "scroll-locked", locked);
        }
    }

    fn set_background_receded(&mut self, receded: bool) {
        dom::set_class(&self.app, "is-receded", receded);
    }
}
