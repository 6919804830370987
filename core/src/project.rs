use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FeedError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "display_string")]
    pub year: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub hero_media: Option<HeroMedia>,
    #[serde(default)]
    pub project_slug: Option<String>,
    #[serde(default)]
    pub cases: Vec<Case>,
    #[serde(default)]
    pub initiatives: Vec<Initiative>,
    /// Replaces the role/scope line shown in the context panel.
    #[serde(default)]
    pub role_label: Option<String>,
    /// Replaces the year inside `Category (Year)`.
    #[serde(default)]
    pub year_label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroMedia {
    #[serde(rename = "type")]
    pub kind: String,
    pub src: String,
}

impl HeroMedia {
    /// Only video hero media is shown; anything else is ignored.
    pub fn video_src(&self) -> Option<&str> {
        if self.kind == "video" && !self.src.trim().is_empty() {
            Some(self.src.as_str())
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Case {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub initiatives: Vec<Initiative>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Initiative {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub asset_prefix: Option<String>,
    #[serde(default)]
    pub has_video: bool,
    #[serde(default)]
    pub images: ImageSet,
    #[serde(default)]
    pub videos: Vec<VideoRef>,
    #[serde(default)]
    pub image_groups: Vec<ImageGroup>,
    #[serde(default)]
    pub initiative_slug: Option<String>,
    #[serde(default)]
    pub case_slug: Option<String>,
}

/// Initiatives either count their numbered images or list them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageSet {
    Count(u32),
    List(Vec<ImageRef>),
}

impl Default for ImageSet {
    fn default() -> Self {
        ImageSet::Count(0)
    }
}

impl ImageSet {
    pub fn len(&self) -> usize {
        match self {
            ImageSet::Count(count) => *count as usize,
            ImageSet::List(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    Url(String),
    Entry {
        #[serde(default)]
        src: Option<String>,
    },
}

impl ImageRef {
    pub fn src(&self) -> Option<&str> {
        match self {
            ImageRef::Url(url) => Some(url.as_str()),
            ImageRef::Entry { src } => src.as_deref(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRef {
    #[serde(default)]
    pub src: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageGroup {
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// Which case-study shape a project carries. `cases` wins over
/// `initiatives` when both are present.
#[derive(Clone, Copy, Debug)]
pub enum CaseStudy<'a> {
    Cases(&'a [Case]),
    Initiatives(&'a [Initiative]),
    None,
}

impl Project {
    pub fn case_study(&self) -> CaseStudy<'_> {
        if !self.cases.is_empty() {
            CaseStudy::Cases(&self.cases)
        } else if !self.initiatives.is_empty() {
            CaseStudy::Initiatives(&self.initiatives)
        } else {
            CaseStudy::None
        }
    }

    pub fn hero_video_src(&self) -> Option<&str> {
        self.hero_media.as_ref().and_then(HeroMedia::video_src)
    }
}

fn display_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
        Null(()),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Int(value) => value.to_string(),
        Raw::Float(value) => value.to_string(),
        Raw::Null(()) => String::new(),
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProjectIndex(pub usize);

/// Ordered, read-only project list loaded once per session.
#[derive(Clone, Debug, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
    by_id: HashMap<String, usize>,
}

impl ProjectStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_projects(projects: Vec<Project>) -> Self {
        let mut by_id = HashMap::with_capacity(projects.len());
        for (index, project) in projects.iter().enumerate() {
            by_id.entry(project.id.clone()).or_insert(index);
        }
        Self { projects, by_id }
    }

    pub fn from_json(text: &str) -> Result<Self, FeedError> {
        let projects: Vec<Project> = serde_json::from_str(text)?;
        Ok(Self::from_projects(projects))
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, index: ProjectIndex) -> Option<&Project> {
        self.projects.get(index.0)
    }

    pub fn index_of(&self, id: &str) -> Option<ProjectIndex> {
        self.by_id.get(id).copied().map(ProjectIndex)
    }

    pub fn by_id(&self, id: &str) -> Option<&Project> {
        self.index_of(id).and_then(|index| self.get(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProjectIndex, &Project)> {
        self.projects
            .iter()
            .enumerate()
            .map(|(index, project)| (ProjectIndex(index), project))
    }
}
