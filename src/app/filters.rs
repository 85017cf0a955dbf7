// src/app/filters.rs
use super::data::CatalogEntry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeBucket {
    UnderOne,
    OneToFive,
    FiveToTen,
    OverTen,
}

impl SizeBucket {
    pub const ALL: [Self; 4] = [Self::UnderOne, Self::OneToFive, Self::FiveToTen, Self::OverTen];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnderOne => "<1",
            Self::OneToFive => "1-5",
            Self::FiveToTen => "5-10",
            Self::OverTen => ">10",
        }
    }
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "<1" => Some(Self::UnderOne),
            "1-5" => Some(Self::OneToFive),
            "5-10" => Some(Self::FiveToTen),
            ">10" => Some(Self::OverTen),
            _ => None,
        }
    }
    pub const fn label(self) -> &'static str {
        match self {
            Self::UnderOne => "< 1 GB",
            Self::OneToFive => "1 - 5 GB",
            Self::FiveToTen => "5 - 10 GB",
            Self::OverTen => "> 10 GB",
        }
    }
    pub fn contains(self, gb: f64) -> bool {
        match self {
            Self::UnderOne => gb < 1.0,
            Self::OneToFive => (1.0..=5.0).contains(&gb),
            Self::FiveToTen => gb > 5.0 && gb <= 10.0,
            Self::OverTen => gb > 10.0,
        }
    }
}

/// Current filter selections, rebuilt from the top bar on every pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterCriteria {
    pub search: String,
    pub genre: Option<String>,
    pub platform: Option<String>,
    pub year: Option<i32>,
    pub min_metacritic: Option<i64>,
    pub size: Option<SizeBucket>,
}

/// Which selection a removable chip clears.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChipKind {
    Genre,
    Platform,
    Year,
    Metacritic,
    Size,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterChip {
    pub kind: ChipKind,
    pub label: String,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.genre.is_none()
            && self.platform.is_none()
            && self.year.is_none()
            && self.min_metacritic.is_none()
            && self.size.is_none()
    }

    pub fn active_chips(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        if let Some(g) = &self.genre {
            chips.push(FilterChip {
                kind: ChipKind::Genre,
                label: format!("Genre: {g}"),
            });
        }
        if let Some(p) = &self.platform {
            chips.push(FilterChip {
                kind: ChipKind::Platform,
                label: format!("Platform: {p}"),
            });
        }
        if let Some(y) = self.year {
            chips.push(FilterChip {
                kind: ChipKind::Year,
                label: format!("Year: {y}"),
            });
        }
        if let Some(m) = self.min_metacritic {
            chips.push(FilterChip {
                kind: ChipKind::Metacritic,
                label: format!("Metacritic: {m}"),
            });
        }
        if let Some(s) = self.size {
            chips.push(FilterChip {
                kind: ChipKind::Size,
                label: format!("Size: {}", s.label()),
            });
        }
        chips
    }

    pub fn clear(&mut self, kind: ChipKind) {
        match kind {
            ChipKind::Genre => self.genre = None,
            ChipKind::Platform => self.platform = None,
            ChipKind::Year => self.year = None,
            ChipKind::Metacritic => self.min_metacritic = None,
            ChipKind::Size => self.size = None,
        }
    }

    /// True when `e` passes every active predicate.
    pub fn matches(&self, e: &CatalogEntry) -> bool {
        PreparedCriteria::new(self).matches(e)
    }
}

/// Criteria with the text selections lowercased once per filter pass.
struct PreparedCriteria<'c> {
    criteria: &'c FilterCriteria,
    term: String,
    genre: Option<String>,
    platform: Option<String>,
}

impl<'c> PreparedCriteria<'c> {
    fn new(criteria: &'c FilterCriteria) -> Self {
        Self {
            criteria,
            term: criteria.search.trim().to_lowercase(),
            genre: criteria.genre.as_deref().map(str::to_lowercase),
            platform: criteria.platform.as_deref().map(str::to_lowercase),
        }
    }

    fn matches(&self, e: &CatalogEntry) -> bool {
        if !self.term.is_empty() && !matches_search(e, &self.term) {
            return false;
        }
        if let Some(g) = &self.genre {
            if !e.genres.iter().any(|eg| eg.to_lowercase() == *g) {
                return false;
            }
        }
        if let Some(p) = &self.platform {
            if !e.platforms.iter().any(|ep| ep.name.to_lowercase() == *p) {
                return false;
            }
        }
        if let Some(y) = self.criteria.year {
            if e.release_year() != Some(y) {
                return false;
            }
        }
        if let Some(min) = self.criteria.min_metacritic {
            match e.metacritic {
                Some(score) if score >= min => {}
                _ => return false,
            }
        }
        if let Some(bucket) = self.criteria.size {
            match e.size_gb() {
                Some(gb) if bucket.contains(gb) => {}
                _ => return false,
            }
        }
        true
    }
}

fn matches_search(e: &CatalogEntry, term: &str) -> bool {
    let hit = |s: &str| s.to_lowercase().contains(term);
    hit(&e.name)
        || e.genres.iter().any(|g| hit(g))
        || e.platform_type.as_deref().is_some_and(hit)
        || e.original_torrent_name.as_deref().is_some_and(hit)
        || e.cleaned_search_name.as_deref().is_some_and(hit)
}

/// Order-preserving subset of `entries` satisfying `criteria`.
pub fn filter_entries<'a>(entries: &'a [CatalogEntry], criteria: &FilterCriteria) -> Vec<&'a CatalogEntry> {
    let prepared = PreparedCriteria::new(criteria);
    entries.iter().filter(|e| prepared.matches(e)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::data::Platform;

    fn entry(name: &str) -> CatalogEntry {
        CatalogEntry {
            name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_criteria_keeps_everything_in_order() {
        let data = vec![entry("b"), entry("a"), entry("c")];
        let out = filter_entries(&data, &FilterCriteria::default());
        let names: Vec<&str> = out.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn search_covers_cleaned_name_and_torrent_name() {
        let mut ap = entry("AP");
        ap.cleaned_search_name = Some("Alpha Protocol".into());
        let mut tn = entry("Other");
        tn.original_torrent_name = Some("Some.Game-ALPHA".into());
        let data = vec![ap, tn, entry("Beta")];
        let crit = FilterCriteria {
            search: "alpha".into(),
            ..Default::default()
        };
        let out = filter_entries(&data, &crit);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name, "AP");
    }

    #[test]
    fn search_matches_genre_substring_and_platform_type() {
        let mut e = entry("X");
        e.genres = vec!["Role-Playing".into()];
        let mut f = entry("Y");
        f.platform_type = Some("Windows".into());
        let data = vec![e, f];
        let rpg = FilterCriteria { search: "PLAY".into(), ..Default::default() };
        assert_eq!(filter_entries(&data, &rpg).len(), 1);
        let win = FilterCriteria { search: "wind".into(), ..Default::default() };
        assert_eq!(filter_entries(&data, &win)[0].name, "Y");
    }

    #[test]
    fn genre_is_exact_and_case_insensitive() {
        let mut e = entry("X");
        e.genres = vec!["Action RPG".into()];
        let mut f = entry("Y");
        f.genres = vec!["action".into()];
        let data = vec![e, f];
        let crit = FilterCriteria { genre: Some("Action".into()), ..Default::default() };
        let out = filter_entries(&data, &crit);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Y");
    }

    #[test]
    fn genre_and_platform_fold_non_ascii_case() {
        let mut lower = entry("lower");
        lower.genres = vec!["Экшен".into()];
        lower.platforms = vec![Platform { name: "ПК".into(), requirements: None }];
        let mut upper = entry("upper");
        upper.genres = vec!["ЭКШЕН".into()];
        let data = vec![lower, upper, entry("none")];

        let genre = FilterCriteria { genre: Some("экшен".into()), ..Default::default() };
        let out: Vec<&str> = filter_entries(&data, &genre).iter().map(|e| e.name.as_str()).collect();
        assert_eq!(out, ["lower", "upper"]);

        let platform = FilterCriteria { platform: Some("пк".into()), ..Default::default() };
        let out = filter_entries(&data, &platform);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "lower");
        assert!(platform.matches(&data[0]));
    }

    #[test]
    fn year_and_metacritic_exclude_missing_values() {
        let mut a = entry("a");
        a.release_date = Some("2019-03-01".into());
        a.metacritic = Some(80);
        let mut b = entry("b");
        b.metacritic = None;
        b.release_date = Some("unknown".into());
        let data = vec![a, b];
        let year = FilterCriteria { year: Some(2019), ..Default::default() };
        assert_eq!(filter_entries(&data, &year).len(), 1);
        let score = FilterCriteria { min_metacritic: Some(80), ..Default::default() };
        assert_eq!(filter_entries(&data, &score).len(), 1);
        let too_high = FilterCriteria { min_metacritic: Some(81), ..Default::default() };
        assert!(filter_entries(&data, &too_high).is_empty());
    }

    #[test]
    fn size_bucket_boundaries() {
        assert!(SizeBucket::UnderOne.contains(0.99));
        assert!(SizeBucket::OneToFive.contains(1.0));
        assert!(SizeBucket::OneToFive.contains(5.0));
        assert!(!SizeBucket::FiveToTen.contains(5.0));
        assert!(SizeBucket::FiveToTen.contains(10.0));
        assert!(SizeBucket::OverTen.contains(10.01));
    }

    #[test]
    fn size_filter_uses_parsed_gigabytes() {
        let mut small = entry("small");
        small.size = Some("700 MB".into());
        let mut mid = entry("mid");
        mid.size = Some("3.2 GB".into());
        let mut unknown = entry("unknown");
        unknown.size = Some("N/A".into());
        let data = vec![small, mid, unknown];
        let crit = FilterCriteria { size: Some(SizeBucket::OneToFive), ..Default::default() };
        let out = filter_entries(&data, &crit);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "mid");
    }

    #[test]
    fn chips_follow_selections() {
        let mut crit = FilterCriteria {
            genre: Some("Indie".into()),
            year: Some(2018),
            min_metacritic: Some(75),
            ..Default::default()
        };
        let chips = crit.active_chips();
        let labels: Vec<&str> = chips.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["Genre: Indie", "Year: 2018", "Metacritic: 75"]);
        crit.clear(ChipKind::Year);
        assert_eq!(crit.year, None);
        assert_eq!(crit.active_chips().len(), 2);
        assert!(!crit.is_empty());
    }

    #[test]
    fn size_bucket_string_forms() {
        for b in SizeBucket::ALL {
            assert_eq!(SizeBucket::from_str(b.as_str()), Some(b));
        }
    }
}
