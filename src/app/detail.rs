// src/app/detail.rs
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::catalog::Catalog;
use super::data::CatalogEntry;
use super::utils::shown;

pub const NO_DESCRIPTION: &str = "No description available.";
pub const NO_REQUIREMENTS: &str = "No PC requirements available.";
pub const NO_SCREENSHOTS: &str = "No screenshots available.";

const REQUIREMENT_KEYS: [&str; 9] = [
    "OS",
    "Processor",
    "Memory",
    "Graphics",
    "DirectX",
    "Storage",
    "Hard Drive",
    "Sound",
    "Additional Notes",
];

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag regex"));
static NEWLINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[\r\n]+\s*").expect("newline regex"));
static SPACES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\S\n]{2,}").expect("space regex"));
static MINIMUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^minimum:\s*").expect("minimum regex"));
static OS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(OS:|OS \*:) [^\n]+").expect("os regex"));
static KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(OS \*:|OS:|Processor:|Memory:|Graphics:|DirectX:|Storage:|Hard Drive:|Sound:|Additional Notes:)")
        .expect("key regex")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetailError {
    #[error("No game ID provided.")]
    MissingId,
    #[error("Invalid game ID `{0}`.")]
    InvalidId(String),
    #[error("Game not found.")]
    NotFound(usize),
}

/// Resolve the `id` query value against the catalog.
///
/// Leading whitespace is ignored and parsing stops at the first non-digit,
/// so `"12abc"` means 12.
pub fn lookup_entry<'a>(catalog: &'a Catalog, id_param: Option<&str>) -> Result<&'a CatalogEntry, DetailError> {
    let raw = id_param.ok_or(DetailError::MissingId)?;
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    let id: usize = digits
        .parse()
        .map_err(|_| DetailError::InvalidId(raw.to_string()))?;
    catalog.get(id).ok_or(DetailError::NotFound(id))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequirementLine {
    pub key: &'static str,
    pub value: String,
}

/// Everything the detail view draws, with omission rules already applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailView {
    pub id: usize,
    pub title: String,
    pub header_image: Option<String>,
    /// Only set when it differs from the header image.
    pub side_thumbnail: Option<String>,
    pub info: Vec<(&'static str, String)>,
    pub genres: Vec<String>,
    pub platforms: Vec<String>,
    pub description: String,
    pub torrent: Vec<(&'static str, String)>,
    pub magnet: Option<String>,
    pub requirements: Option<Vec<RequirementLine>>,
    pub screenshots: Vec<String>,
}

impl DetailView {
    pub fn from_entry(e: &CatalogEntry) -> Self {
        let header_image = non_blank(e.background_image.as_deref())
            .or_else(|| non_blank(e.thumbnail.as_deref()))
            .map(str::to_string);
        let side_thumbnail = non_blank(e.thumbnail.as_deref())
            .filter(|t| header_image.as_deref() != Some(*t))
            .map(str::to_string);

        let mut info = Vec::new();
        push_shown(&mut info, "Release", e.release_date.as_deref());
        push_shown(&mut info, "Version", e.version.as_deref());
        push_shown(&mut info, "Size", e.size.as_deref());
        push_shown(&mut info, "Languages", e.languages_info.as_deref());
        if e.is_native_linux_torrent {
            info.push(("Native Linux", "Yes".to_string()));
        }
        if e.is_wine_bottled_torrent {
            info.push(("Wine/Proton", "Yes".to_string()));
        }
        if let Some(score) = e.metacritic {
            info.push(("Metacritic", score.to_string()));
        }
        push_shown(&mut info, "Release Group", e.release_group.as_deref());

        let mut torrent = Vec::new();
        push_shown(&mut torrent, "Original Name", e.original_torrent_name.as_deref());
        push_shown(&mut torrent, "Cleaned Name", e.cleaned_search_name.as_deref());
        if !e.other_torrent_tags.is_empty() {
            torrent.push(("Other Tags", e.other_torrent_tags.join(", ")));
        }
        push_shown(&mut torrent, "RAWG Name", e.rawg_name.as_deref());
        push_shown(&mut torrent, "RAWG ID", e.rawg_id.as_deref());

        let requirements = e
            .pc_platform()
            .and_then(|p| p.requirements.as_ref())
            .and_then(|r| shown(r.minimum.as_deref()))
            .map(|min| clean_requirements(min, e.is_native_linux_torrent));

        Self {
            id: e.id,
            title: e.name.clone(),
            header_image,
            side_thumbnail,
            info,
            genres: e.genres.clone(),
            platforms: e.platforms.iter().map(|p| p.name.clone()).collect(),
            description: non_blank(e.description.as_deref())
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            torrent,
            magnet: non_blank(e.magnet.as_deref()).map(str::to_string),
            requirements,
            screenshots: e
                .screenshots
                .iter()
                .filter(|s| !s.trim().is_empty())
                .cloned()
                .collect(),
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

fn push_shown(out: &mut Vec<(&'static str, String)>, label: &'static str, value: Option<&str>) {
    if let Some(v) = shown(value) {
        out.push((label, v.to_string()));
    }
}

/// Turn a store-page "minimum" blob into one line per known key.
///
/// The OS line always names Linux: native builds as such, everything else as
/// a Wine/Proton bottle.
pub fn clean_requirements(raw: &str, native_linux: bool) -> Vec<RequirementLine> {
    // Tags become spaces so `<li>` boundaries still separate words.
    let text = TAG_RE.replace_all(raw, " ");
    let text = KEY_RE.replace_all(&text, "\n$1");
    let text = NEWLINES_RE.replace_all(&text, "\n");
    let text = SPACES_RE.replace_all(&text, " ");
    let text = MINIMUM_RE.replace(text.trim(), "");

    let os = if native_linux {
        "OS: Linux (Native)"
    } else {
        "OS: Linux (Wine/Proton bottled)"
    };
    let text = OS_RE.replace(&text, os);

    text.lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let key = REQUIREMENT_KEYS
                .iter()
                .copied()
                .find(|k| *k == key.trim())?;
            Some(RequirementLine {
                key,
                value: value.trim().to_string(),
            })
        })
        .collect()
}

/// Modal screenshot viewer state. Navigation wraps at both ends.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GalleryViewer {
    len: usize,
    current: Option<usize>,
}

impl GalleryViewer {
    pub const fn new(len: usize) -> Self {
        Self { len, current: None }
    }

    pub fn open(&mut self, index: usize) {
        if self.len == 0 {
            return;
        }
        self.current = Some(index.min(self.len - 1));
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn next(&mut self) {
        if let Some(i) = self.current {
            self.current = Some((i + 1) % self.len);
        }
    }

    pub fn prev(&mut self) {
        if let Some(i) = self.current {
            self.current = Some((i + self.len - 1) % self.len);
        }
    }

    pub const fn current(&self) -> Option<usize> {
        self.current
    }

    pub const fn is_open(&self) -> bool {
        self.current.is_some()
    }
}
