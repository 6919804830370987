pub const DEFAULT_ASSET_BASE: &str = "/assets";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AssetKind {
    Picture,
    Movie,
}

impl AssetKind {
    fn marker(self) -> &'static str {
        match self {
            AssetKind::Picture => "p",
            AssetKind::Movie => "m",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            AssetKind::Picture => "webp",
            AssetKind::Movie => "webm",
        }
    }
}

/// Root that every derived asset URL hangs off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetBase {
    root: String,
}

impl Default for AssetBase {
    fn default() -> Self {
        Self::new(DEFAULT_ASSET_BASE)
    }
}

impl AssetBase {
    pub fn new(root: &str) -> Self {
        let trimmed = root.trim().trim_end_matches('/');
        Self {
            root: trimmed.to_string(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// `{root}/{slug}/{initiative}[_{case}]_p_{number}.webp`
    pub fn image_url(&self, slug: &str, initiative: &str, case: Option<&str>, number: usize) -> String {
        self.numbered(AssetKind::Picture, slug, initiative, case, number)
    }

    /// `{root}/{slug}/{initiative}[_{case}]_m_{number}.webm`
    pub fn video_url(&self, slug: &str, initiative: &str, case: Option<&str>, number: usize) -> String {
        self.numbered(AssetKind::Movie, slug, initiative, case, number)
    }

    pub fn icon_url(&self, name: &str) -> String {
        format!("{}/icons/{name}.svg", self.root)
    }

    pub fn placeholder_thumbnail(&self) -> String {
        format!("{}/top/placeholder-image.jpg", self.root)
    }

    fn numbered(
        &self,
        kind: AssetKind,
        slug: &str,
        initiative: &str,
        case: Option<&str>,
        number: usize,
    ) -> String {
        let marker = kind.marker();
        let extension = kind.extension();
        let stem = match case {
            Some(case) if !case.is_empty() => format!("{initiative}_{case}"),
            _ => initiative.to_string(),
        };
        format!("{}/{slug}/{stem}_{marker}_{number}.{extension}", self.root)
    }
}

/// Poster frames share the video's name with a `.webp` extension.
pub fn poster_for(video_url: &str) -> String {
    match video_url.strip_suffix(".webm") {
        Some(stem) => format!("{stem}.webp"),
        None => video_url.to_string(),
    }
}

/// Inline SVG stand-in for a thumbnail that failed to load.
pub fn fallback_thumbnail(title: &str) -> String {
    let initials: String = title.chars().take(2).collect();
    let mut escaped = String::with_capacity(initials.len());
    for ch in initials.chars() {
        match ch {
            '<' => escaped.push_str("%3C"),
            '>' => escaped.push_str("%3E"),
            '&' => escaped.push_str("%26"),
            '#' => escaped.push_str("%23"),
            '"' => escaped.push_str("%22"),
            _ => escaped.push(ch),
        }
    }
    format!(
        "data:image/svg+xml,%3Csvg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\" height=\"100\"%3E\
%3Crect fill=\"%23333\" width=\"100\" height=\"100\"/%3E\
%3Ctext x=\"50\" y=\"50\" text-anchor=\"middle\" dy=\".3em\" fill=\"%23999\" font-size=\"12\"%3E{escaped}%3C/text%3E%3C/svg%3E"
    )
}
