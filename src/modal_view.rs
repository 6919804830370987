use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, KeyboardEvent};

use tracing::warn;
use vitrine_core::content::{
    CaseBlock, ImageGrid, InitiativeBlock, InitiativeBody, InitiativeCard, MediaSections,
    ModalHeader, VideoTile,
};
use vitrine_core::{ModalContent, ShellId};

use crate::dom;
use crate::runtime;
use crate::video_shell::{Shells, VideoShell};

const OPEN_CLASS: &str = "is-open";
const CLOSING_CLASS: &str = "is-closing";
/// Only the end of the slide-out completes a close.
const CLOSE_TRANSITION_PROPERTY: &str = "transform";

/// The project modal: a fixed container whose body is rebuilt from a
/// [`ModalContent`] tree on every mount.
pub(crate) struct ModalView {
    document: Document,
    root: HtmlElement,
    body: Element,
    shells: Shells,
    next_shell: u32,
    content_listeners: Vec<EventListener>,
    _listeners: Vec<EventListener>,
}

impl ModalView {
    pub(crate) fn new(document: &Document, shells: Shells) -> Self {
        let root: HtmlElement = dom::required(document, "modal");
        let body: Element = dom::required(document, "modal-body");
        let mut listeners = Vec::new();

        if let Some(close) = root.query_selector(".modal-close").ok().flatten() {
            listeners.push(EventListener::new(&close, "click", |_| {
                runtime::drive(|machine, host| {
                    machine.exit_modal(host);
                });
            }));
        }
        let scrim = root.clone();
        listeners.push(EventListener::new(&root, "click", move |event| {
            if dom::targets(event, &scrim) {
                runtime::drive(|machine, host| {
                    machine.exit_modal(host);
                });
            }
        }));
        let animated = root.clone();
        listeners.push(EventListener::new(&root, "transitionend", move |event| {
            if dom::transition_ended(event, &animated, CLOSE_TRANSITION_PROPERTY) {
                runtime::drive(|machine, host| machine.on_modal_transition_end(host));
            }
        }));

        dom::set_displayed(&root, false);
        Self {
            document: document.clone(),
            root,
            body,
            shells,
            next_shell: 1,
            content_listeners: Vec::new(),
            _listeners: listeners,
        }
    }

    pub(crate) fn mount(&mut self, content: &ModalContent) -> Vec<ShellId> {
        self.clear();
        let mut ids = Vec::new();
        let body = self.body.clone();
        self.render_header(&body, &content.header);
        if !content.description.is_empty() {
            let description = dom::create(&self.document, "div", "modal-description");
            for line in &content.description {
                let paragraph = dom::create(&self.document, "p", "");
                dom::set_text(&paragraph, line);
                let _ = description.append_child(&paragraph);
            }
            let _ = body.append_child(&description);
        }
        match &content.sections {
            MediaSections::Cases(cases) => {
                for case in cases {
                    self.render_case(&body, case, &mut ids);
                }
            }
            MediaSections::Initiatives(cards) => {
                let list = dom::create(&self.document, "div", "initiatives");
                for card in cards {
                    self.render_card(&list, card, &mut ids);
                }
                let _ = body.append_child(&list);
            }
            MediaSections::Empty => {}
        }
        let _ = self.root.set_attribute("data-project", &content.project_id);
        dom::set_class(&self.root, CLOSING_CLASS, false);
        dom::set_displayed(&self.root, true);
        ids
    }

    pub(crate) fn reveal(&self) {
        dom::set_class(&self.root, OPEN_CLASS, true);
    }

    /// Starts the close transition; `false` when the stylesheet gives the
    /// container nothing to animate.
    pub(crate) fn begin_close(&self) -> bool {
        dom::set_class(&self.root, OPEN_CLASS, false);
        dom::set_class(&self.root, CLOSING_CLASS, true);
        dom::has_transition(&self.root)
    }

    pub(crate) fn unmount(&mut self) {
        self.clear();
        dom::set_class(&self.root, OPEN_CLASS, false);
        dom::set_class(&self.root, CLOSING_CLASS, false);
        let _ = self.root.remove_attribute("data-project");
        dom::set_displayed(&self.root, false);
    }

    fn clear(&mut self) {
        self.content_listeners.clear();
        self.shells.borrow_mut().clear();
        self.body.set_inner_html("");
    }

    fn render_header(&mut self, parent: &Element, header: &ModalHeader) {
        let root = dom::create(&self.document, "header", "modal-header");
        let title = dom::create(&self.document, "h2", "modal-title");
        dom::set_text(&title, &header.title);
        let _ = root.append_child(&title);
        if let Some(tagline) = &header.tagline {
            let line = dom::create(&self.document, "p", "modal-tagline");
            dom::set_text(&line, tagline);
            let _ = root.append_child(&line);
        }
        if !header.meta.is_empty() {
            let list = dom::create(&self.document, "dl", "modal-meta");
            for item in &header.meta {
                let term = dom::create(&self.document, "dt", "");
                let icon: HtmlImageElement = dom::create_as(&self.document, "img", "modal-meta-icon");
                icon.set_src(&item.icon_url);
                icon.set_alt("");
                let label = dom::create(&self.document, "span", "");
                dom::set_text(&label, item.kind.label());
                let _ = term.append_child(&icon);
                let _ = term.append_child(&label);
                let value = dom::create(&self.document, "dd", "");
                dom::set_text(&value, &item.value);
                let _ = list.append_child(&term);
                let _ = list.append_child(&value);
            }
            let _ = root.append_child(&list);
        }
        let _ = parent.append_child(&root);
    }

    fn render_case(&mut self, parent: &Element, case: &CaseBlock, ids: &mut Vec<ShellId>) {
        let section = dom::create(&self.document, "section", "case");
        if !case.title.is_empty() {
            let heading = dom::create(&self.document, "h3", "case-title");
            dom::set_text(&heading, &case.title);
            let _ = section.append_child(&heading);
        }
        for block in &case.initiatives {
            self.render_block(&section, block, ids);
        }
        let _ = parent.append_child(&section);
    }

    fn render_block(&mut self, parent: &Element, block: &InitiativeBlock, ids: &mut Vec<ShellId>) {
        match &block.body {
            InitiativeBody::Card(card) => self.render_card(parent, card, ids),
            InitiativeBody::Media {
                videos,
                images,
                groups,
            } => {
                let root = dom::create(&self.document, "div", "initiative");
                self.render_heading(&root, block.heading.as_deref());
                if !videos.is_empty() {
                    let grid = dom::create(&self.document, "div", "video-grid");
                    for tile in videos {
                        self.render_video(&grid, tile, ids);
                    }
                    let _ = root.append_child(&grid);
                }
                if let Some(images) = images {
                    self.render_grid(&root, images);
                }
                for group in groups {
                    self.render_grid(&root, group);
                }
                let _ = parent.append_child(&root);
            }
        }
    }

    fn render_card(&mut self, parent: &Element, card: &InitiativeCard, ids: &mut Vec<ShellId>) {
        let root = dom::create(&self.document, "div", "initiative initiative-card");
        self.render_heading(&root, card.heading.as_deref());
        if let Some(tile) = &card.video {
            self.render_video(&root, tile, ids);
        }
        if let Some(images) = &card.images {
            self.render_grid(&root, images);
        }
        let _ = parent.append_child(&root);
    }

    fn render_heading(&self, parent: &Element, heading: Option<&str>) {
        if let Some(text) = heading {
            let heading = dom::create(&self.document, "h4", "initiative-title");
            dom::set_text(&heading, text);
            let _ = parent.append_child(&heading);
        }
    }

    fn render_video(&mut self, parent: &Element, tile: &VideoTile, ids: &mut Vec<ShellId>) {
        let id = ShellId(self.next_shell);
        self.next_shell = self.next_shell.wrapping_add(1);
        let shell = VideoShell::build(&self.document, id, tile);
        let _ = parent.append_child(shell.root());
        self.shells.borrow_mut().insert(id, shell);
        ids.push(id);
    }

    fn render_grid(&mut self, parent: &Element, grid: &ImageGrid) {
        let root: HtmlElement = dom::create_as(&self.document, "div", "image-grid");
        dom::set_class(&root, "is-horizontal", grid.horizontal);
        dom::set_class(&root, "is-spaced", grid.spaced);
        if !grid.horizontal {
            dom::set_style(
                &root,
                "grid-template-columns",
                &format!("repeat({}, minmax(0, 1fr))", grid.columns),
            );
        }
        for tile in &grid.tiles {
            let cell: HtmlElement = dom::create_as(&self.document, "div", "image-cell");
            if let Some(span) = tile.span {
                dom::set_style(&cell, "grid-column", &format!("span {span}"));
            }
            let image: HtmlImageElement = dom::create_as(&self.document, "img", "image-tile");
            image.set_src(&tile.src);
            image.set_alt(&tile.label);
            let _ = image.set_attribute("loading", "lazy");
            image.set_tab_index(0);
            let _ = cell.append_child(&image);
            let _ = root.append_child(&cell);
            self.listen_tile(&cell, &image, &tile.src);
        }
        let _ = parent.append_child(&root);
    }

    fn listen_tile(&mut self, cell: &HtmlElement, image: &HtmlImageElement, src: &str) {
        let broken = cell.clone();
        let failed_src = src.to_string();
        self.content_listeners
            .push(EventListener::new(image, "error", move |_| {
                warn!(src = %failed_src, "gallery image failed to load");
                dom::set_displayed(&broken, false);
            }));

        let target = image.clone();
        let clicked_src = src.to_string();
        self.content_listeners
            .push(EventListener::new(image, "click", move |_| {
                open_tile(&target, &clicked_src);
            }));

        let target = image.clone();
        let keyed_src = src.to_string();
        self.content_listeners
            .push(EventListener::new(image, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if matches!(event.key().as_str(), "Enter" | " ") {
                    event.prevent_default();
                    open_tile(&target, &keyed_src);
                }
            }));
    }
}

fn open_tile(image: &HtmlImageElement, src: &str) {
    let origin = Some(dom::client_rect(image));
    let src = src.to_string();
    runtime::drive(move |machine, host| {
        machine.open_image(&src, origin, host);
    });
}
