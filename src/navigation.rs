use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use tracing::warn;
use web_sys::{Document, Element, HtmlImageElement};

use vitrine_core::{fallback_thumbnail, AssetBase, Project, ProjectIndex, ProjectStore};

use crate::dom;
use crate::runtime;

pub(crate) const ITEM_CLASS: &str = "nav-item";
const SELECTED_CLASS: &str = "is-selected";

/// One rendered entry per project, in feed order.
#[derive(Default)]
pub(crate) struct Navigation {
    items: Vec<Element>,
    listeners: Vec<EventListener>,
}

impl Navigation {
    pub(crate) fn render(
        document: &Document,
        list: &Element,
        store: &ProjectStore,
        assets: &AssetBase,
    ) -> Self {
        list.set_inner_html("");
        let mut navigation = Navigation::default();
        for (index, project) in store.iter() {
            let item = navigation.render_item(document, index, project, assets);
            let _ = list.append_child(&item);
            navigation.items.push(item);
        }
        navigation
    }

    fn render_item(
        &mut self,
        document: &Document,
        index: ProjectIndex,
        project: &Project,
        assets: &AssetBase,
    ) -> Element {
        let item = dom::create(document, "li", ITEM_CLASS);
        let _ = item.set_attribute("data-index", &index.0.to_string());
        let button = dom::create(document, "button", "nav-button");
        let _ = button.set_attribute("type", "button");

        let thumb: HtmlImageElement = dom::create_as(document, "img", "nav-thumb");
        let src = project
            .thumbnail
            .clone()
            .filter(|src| !src.trim().is_empty())
            .unwrap_or_else(|| assets.placeholder_thumbnail());
        thumb.set_src(&src);
        thumb.set_alt(&project.title);
        let title = dom::create(document, "span", "nav-title");
        dom::set_text(&title, &project.title);
        let _ = button.append_child(&thumb);
        let _ = button.append_child(&title);
        let _ = item.append_child(&button);

        let mut replaced = false;
        let fallback = fallback_thumbnail(&project.title);
        let broken = thumb.clone();
        self.listeners
            .push(EventListener::new(&thumb, "error", move |_| {
                if std::mem::replace(&mut replaced, true) {
                    return;
                }
                warn!(src = %broken.src(), "thumbnail failed to load");
                broken.set_src(&fallback);
            }));

        self.listeners
            .push(EventListener::new(&item, "mouseenter", move |_| {
                runtime::drive(move |machine, host| {
                    machine.enter_hover(index, host);
                });
            }));
        self.listeners
            .push(EventListener::new(&item, "mouseleave", |_| {
                runtime::drive(|machine, host| {
                    machine.leave_hover(host);
                });
            }));
        self.listeners.push(EventListener::new_with_options(
            &item,
            "touchstart",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: true,
            },
            move |_| {
                runtime::drive(move |machine, host| {
                    machine.enter_hover(index, host);
                });
            },
        ));
        self.listeners
            .push(EventListener::new(&item, "click", move |event| {
                event.prevent_default();
                runtime::drive(move |machine, host| {
                    machine.enter_modal(index, host);
                });
            }));
        item
    }

    pub(crate) fn mark_selected(&self, selected: Option<ProjectIndex>) {
        for (position, item) in self.items.iter().enumerate() {
            dom::set_class(item, SELECTED_CLASS, selected == Some(ProjectIndex(position)));
        }
    }

    pub(crate) fn clear(&mut self) {
        self.listeners.clear();
        for item in self.items.drain(..) {
            item.remove();
        }
    }
}
