//! Pure projection of a [`Project`] into the content shown in the context
//! panel and the project modal. The browser side turns these trees into
//! DOM; nothing here touches playback or timing.

use crate::assets::{poster_for, AssetBase};
use crate::layout::{image_grid_layout, GridMode};
use crate::legacy;
use crate::project::{CaseStudy, ImageRef, ImageSet, Initiative, Project};

const SUPPRESSED_HEADING: &str = "Main";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextSummary {
    pub category_year: String,
    pub role_scope: String,
    pub tools: Option<String>,
}

impl ContextSummary {
    pub fn from_project(project: &Project) -> Self {
        let year = project
            .year_label
            .as_deref()
            .or_else(|| legacy::year_label(&project.id))
            .unwrap_or(project.year.as_str());
        let role_scope = project
            .role_label
            .clone()
            .or_else(|| legacy::role_label(&project.id).map(str::to_string))
            .unwrap_or_else(|| join_role_scope(project));
        Self {
            category_year: format!("{} ({year})", project.category),
            role_scope,
            tools: joined_tools(project),
        }
    }
}

fn join_role_scope(project: &Project) -> String {
    let role = project.role.as_deref().filter(|value| !value.is_empty());
    let scope = project.scope.as_deref().filter(|value| !value.is_empty());
    match (role, scope) {
        (Some(role), Some(scope)) => format!("{role} / {scope}"),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => String::new(),
    }
}

fn joined_tools(project: &Project) -> Option<String> {
    if project.tools.is_empty() {
        None
    } else {
        Some(project.tools.join(" / "))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetaKind {
    Domain,
    Year,
    Focus,
    Toolkits,
}

impl MetaKind {
    pub fn label(self) -> &'static str {
        match self {
            MetaKind::Domain => "Domain",
            MetaKind::Year => "Year",
            MetaKind::Focus => "Focus",
            MetaKind::Toolkits => "Toolkits",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            MetaKind::Domain => "domain",
            MetaKind::Year => "year",
            MetaKind::Focus => "focus",
            MetaKind::Toolkits => "toolkits",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetaItem {
    pub kind: MetaKind,
    pub icon_url: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalHeader {
    pub title: String,
    pub tagline: Option<String>,
    pub meta: Vec<MetaItem>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoTile {
    pub src: String,
    pub poster: String,
}

impl VideoTile {
    fn new(src: String) -> Self {
        let poster = poster_for(&src);
        Self { src, poster }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageTile {
    pub src: String,
    pub span: Option<u32>,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageGrid {
    pub columns: u32,
    pub tiles: Vec<ImageTile>,
    /// Image groups lay every tile out in one row.
    pub horizontal: bool,
    /// Adds the group gap below this grid.
    pub spaced: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitiativeCard {
    pub heading: Option<String>,
    pub video: Option<VideoTile>,
    pub images: Option<ImageGrid>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitiativeBody {
    Card(InitiativeCard),
    Media {
        videos: Vec<VideoTile>,
        images: Option<ImageGrid>,
        groups: Vec<ImageGrid>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitiativeBlock {
    pub heading: Option<String>,
    pub body: InitiativeBody,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseBlock {
    pub title: String,
    pub initiatives: Vec<InitiativeBlock>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaSections {
    Cases(Vec<CaseBlock>),
    Initiatives(Vec<InitiativeCard>),
    Empty,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalContent {
    pub project_id: String,
    pub header: ModalHeader,
    pub description: Vec<String>,
    pub sections: MediaSections,
}

impl ModalContent {
    /// Number of inline video shells the content will produce.
    pub fn video_count(&self) -> usize {
        match &self.sections {
            MediaSections::Cases(cases) => cases
                .iter()
                .flat_map(|case| case.initiatives.iter())
                .map(|block| match &block.body {
                    InitiativeBody::Card(card) => usize::from(card.video.is_some()),
                    InitiativeBody::Media { videos, .. } => videos.len(),
                })
                .sum(),
            MediaSections::Initiatives(cards) => {
                cards.iter().filter(|card| card.video.is_some()).count()
            }
            MediaSections::Empty => 0,
        }
    }
}

pub fn build_modal_content(project: &Project, assets: &AssetBase, mode: GridMode) -> ModalContent {
    ModalContent {
        project_id: project.id.clone(),
        header: build_header(project, assets),
        description: project
            .description
            .as_deref()
            .map(|text| text.lines().map(str::to_string).collect())
            .unwrap_or_default(),
        sections: build_sections(project, assets, mode),
    }
}

fn build_header(project: &Project, assets: &AssetBase) -> ModalHeader {
    let meta_item = |kind: MetaKind, value: String| MetaItem {
        kind,
        icon_url: assets.icon_url(kind.icon()),
        value,
    };
    let mut meta = vec![
        meta_item(MetaKind::Domain, project.category.clone()),
        meta_item(MetaKind::Year, project.year.clone()),
    ];
    let focus = join_role_scope(project);
    if !focus.is_empty() {
        meta.push(meta_item(MetaKind::Focus, focus));
    }
    if let Some(tools) = joined_tools(project) {
        meta.push(meta_item(MetaKind::Toolkits, tools));
    }
    ModalHeader {
        title: project.title.clone(),
        tagline: project.tagline.clone().filter(|text| !text.is_empty()),
        meta,
    }
}

fn build_sections(project: &Project, assets: &AssetBase, mode: GridMode) -> MediaSections {
    match project.case_study() {
        CaseStudy::Cases(cases) => {
            let slug = project
                .project_slug
                .as_deref()
                .unwrap_or(legacy::DEFAULT_CASE_SLUG);
            MediaSections::Cases(
                cases
                    .iter()
                    .map(|case| CaseBlock {
                        title: case.title.clone(),
                        initiatives: case
                            .initiatives
                            .iter()
                            .map(|initiative| {
                                build_case_initiative(initiative, &case.title, slug, assets, mode)
                            })
                            .collect(),
                    })
                    .collect(),
            )
        }
        CaseStudy::Initiatives(initiatives) => match project.project_slug.as_deref() {
            Some(slug) => MediaSections::Initiatives(
                initiatives
                    .iter()
                    .map(|initiative| build_card(initiative, slug, assets, mode, true))
                    .collect(),
            ),
            None => MediaSections::Empty,
        },
        CaseStudy::None => MediaSections::Empty,
    }
}

fn section_heading(title: &str) -> Option<String> {
    if title.is_empty() || title == SUPPRESSED_HEADING {
        None
    } else {
        Some(title.to_string())
    }
}

fn build_card(
    initiative: &Initiative,
    slug: &str,
    assets: &AssetBase,
    mode: GridMode,
    show_title: bool,
) -> InitiativeCard {
    let prefix = initiative.asset_prefix.as_deref().unwrap_or_default();
    let video = initiative
        .has_video
        .then(|| VideoTile::new(assets.video_url(slug, prefix, None, 1)));
    let count = initiative.images.len();
    let images = (count > 0).then(|| {
        let layout = image_grid_layout(count, mode);
        ImageGrid {
            columns: layout.columns,
            tiles: (1..=count)
                .map(|number| ImageTile {
                    src: assets.image_url(slug, prefix, None, number),
                    span: layout.span_for(number - 1),
                    label: format!("Open image {number} of {}", initiative.title),
                })
                .collect(),
            horizontal: false,
            spaced: false,
        }
    });
    InitiativeCard {
        heading: if show_title {
            Some(initiative.title.clone()).filter(|title| !title.is_empty())
        } else {
            None
        },
        video,
        images,
    }
}

fn build_case_initiative(
    initiative: &Initiative,
    case_title: &str,
    slug: &str,
    assets: &AssetBase,
    mode: GridMode,
) -> InitiativeBlock {
    let heading = section_heading(&initiative.title);
    if initiative.asset_prefix.is_some() {
        return InitiativeBlock {
            heading,
            body: InitiativeBody::Card(build_card(initiative, slug, assets, mode, false)),
        };
    }

    let names: Option<(String, Option<String>)> = match initiative.initiative_slug.as_deref() {
        Some(name) => Some((name.to_string(), initiative.case_slug.clone())),
        None => legacy::slug_hint(slug, case_title, &initiative.title)
            .map(|(name, case)| (name.to_string(), case.map(str::to_string))),
    };
    let names = names.as_ref().map(|(name, case)| (name.as_str(), case.as_deref()));

    let videos = initiative
        .videos
        .iter()
        .enumerate()
        .map(|(index, video)| match names {
            Some((name, case)) => VideoTile::new(assets.video_url(slug, name, case, index + 1)),
            None => VideoTile::new(video.src.clone()),
        })
        .collect();

    let images = match &initiative.images {
        ImageSet::List(list) if !list.is_empty() => {
            Some(build_image_grid(list, slug, names, assets, Some(mode)))
        }
        _ => None,
    };

    let last = initiative.image_groups.len().saturating_sub(1);
    let groups = initiative
        .image_groups
        .iter()
        .enumerate()
        .filter(|(_, group)| !group.images.is_empty())
        .map(|(index, group)| {
            let mut grid = build_image_grid(&group.images, slug, names, assets, None);
            grid.spaced = index < last;
            grid
        })
        .collect();

    InitiativeBlock {
        heading,
        body: InitiativeBody::Media {
            videos,
            images,
            groups,
        },
    }
}

/// `mode` of `None` lays the grid out horizontally, one column per image.
fn build_image_grid(
    images: &[ImageRef],
    slug: &str,
    names: Option<(&str, Option<&str>)>,
    assets: &AssetBase,
    mode: Option<GridMode>,
) -> ImageGrid {
    let layout = mode.map(|mode| image_grid_layout(images.len(), mode));
    let tiles = images
        .iter()
        .enumerate()
        .map(|(index, image)| {
            let src = match (image.src(), names) {
                (Some(src), _) => src.to_string(),
                (None, Some((name, case))) => assets.image_url(slug, name, case, index + 1),
                (None, None) => String::new(),
            };
            ImageTile {
                src,
                span: layout.and_then(|layout| layout.span_for(index)),
                label: format!("Image {}", index + 1),
            }
        })
        .filter(|tile| !tile.src.is_empty())
        .collect();
    ImageGrid {
        columns: layout.map(|layout| layout.columns).unwrap_or(images.len() as u32),
        tiles,
        horizontal: layout.is_none(),
        spaced: false,
    }
}
