//! Display and asset-name hints for feeds that predate the `roleLabel`,
//! `yearLabel`, `initiativeSlug` and `caseSlug` fields. Values carried on
//! the project record always win over these tables.

/// Slug assumed for `cases` projects that do not declare one.
pub const DEFAULT_CASE_SLUG: &str = "deteqle";

const ROLE_LABELS: &[(&str, &str)] = &[
    ("project-01", "Founding / Service Design / UIUX Design / Business Dev"),
    ("project-02", "Creative Direction / Intro Video / Logo Design / Graphic Design"),
    ("project-03", "Creative Direction / Product Video / UIUX Design"),
    ("project-04", "Marketing Strategy / Product Video"),
    ("project-05", "Business Dev / Product Video / Graphic Design"),
    ("project-06", "Art Direction / Production Design / Costume Supervisor / Set Decorator"),
    ("project-07", "Creative Direction / Fitness Video"),
    ("project-08", "Co-Founding"),
    ("project-09", "Graphic Design / Videography / Photography"),
];

const YEAR_LABELS: &[(&str, &str)] = &[("project-08", "Opening Soon")];

struct SlugHint {
    project_slug: &'static str,
    case_title: &'static str,
    initiative_title: &'static str,
    initiative: &'static str,
    case: Option<&'static str>,
}

const SLUG_HINTS: &[SlugHint] = &[
    SlugHint {
        project_slug: "deteqle",
        case_title: "ARマーダーミステリー（仮称）",
        initiative_title: "Main",
        initiative: "murder",
        case: None,
    },
    SlugHint {
        project_slug: "deteqle",
        case_title: "ARマーダーミステリー（仮称）",
        initiative_title: "Process",
        initiative: "murder",
        case: Some("process"),
    },
    SlugHint {
        project_slug: "deteqle",
        case_title: "ARコンテンツ",
        initiative_title: "ダダコネおじさん",
        initiative: "content",
        case: Some("dadakone"),
    },
    SlugHint {
        project_slug: "deteqle",
        case_title: "ARコンテンツ",
        initiative_title: "ゾンビに襲われた",
        initiative: "content",
        case: Some("zombie"),
    },
    SlugHint {
        project_slug: "deteqle",
        case_title: "Cafe Mai:lish",
        initiative_title: "Main",
        initiative: "mailish",
        case: None,
    },
    SlugHint {
        project_slug: "deteqle",
        case_title: "Design System",
        initiative_title: "Main",
        initiative: "designsystem",
        case: None,
    },
    SlugHint {
        project_slug: "sepila",
        case_title: "Lecture Video",
        initiative_title: "Main",
        initiative: "lecture",
        case: None,
    },
    SlugHint {
        project_slug: "sepila",
        case_title: "Color",
        initiative_title: "Main",
        initiative: "color",
        case: None,
    },
    SlugHint {
        project_slug: "sepila",
        case_title: "Process",
        initiative_title: "Main",
        initiative: "process",
        case: None,
    },
];

pub(crate) fn role_label(project_id: &str) -> Option<&'static str> {
    ROLE_LABELS
        .iter()
        .find(|(id, _)| *id == project_id)
        .map(|(_, label)| *label)
}

pub(crate) fn year_label(project_id: &str) -> Option<&'static str> {
    YEAR_LABELS
        .iter()
        .find(|(id, _)| *id == project_id)
        .map(|(_, label)| *label)
}

/// Initiative and case asset names inferred from section titles.
pub(crate) fn slug_hint(
    project_slug: &str,
    case_title: &str,
    initiative_title: &str,
) -> Option<(&'static str, Option<&'static str>)> {
    SLUG_HINTS
        .iter()
        .find(|hint| {
            hint.project_slug == project_slug
                && hint.case_title == case_title
                && hint.initiative_title == initiative_title
        })
        .map(|hint| (hint.initiative, hint.case))
}
