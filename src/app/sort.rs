// src/app/sort.rs
use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::data::CatalogEntry;
use super::types::SortKey;

/// Where entries without a usable release date land in a date sort.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MissingDatePolicy {
    /// Treat a missing date as the Unix epoch, in both directions.
    #[default]
    Epoch,
    /// Always after every dated entry, in both directions.
    Last,
}

impl MissingDatePolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Epoch => "epoch",
            Self::Last => "last",
        }
    }
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "epoch" => Some(Self::Epoch),
            "last" => Some(Self::Last),
            _ => None,
        }
    }
}

/// Stable sort of a filtered slice by `key`.
pub fn sort_entries<'a>(
    entries: &[&'a CatalogEntry],
    key: SortKey,
    missing_dates: MissingDatePolicy,
) -> Vec<&'a CatalogEntry> {
    let mut out = entries.to_vec();
    match key {
        SortKey::NameAsc | SortKey::NameDesc => {
            let desc = key == SortKey::NameDesc;
            let mut keyed: Vec<(String, &'a CatalogEntry)> =
                out.iter().map(|e| (collation_key(&e.name), *e)).collect();
            keyed.sort_by(|(ka, a), (kb, b)| {
                let ord = ka.cmp(kb).then_with(|| a.name.cmp(&b.name));
                if desc {
                    ord.reverse()
                } else {
                    ord
                }
            });
            out = keyed.into_iter().map(|(_, e)| e).collect();
        }
        SortKey::ReleaseDateAsc | SortKey::ReleaseDateDesc => {
            let desc = key == SortKey::ReleaseDateDesc;
            // Precompute so each entry's date is parsed once.
            let mut keyed: Vec<(Option<i64>, &'a CatalogEntry)> =
                out.iter().map(|e| (e.release_timestamp_ms(), *e)).collect();
            keyed.sort_by(|(da, _), (db, _)| cmp_dates(*da, *db, desc, missing_dates));
            out = keyed.into_iter().map(|(_, e)| e).collect();
        }
        SortKey::MetacriticAsc => out.sort_by(|a, b| nulls_last(a.metacritic, b.metacritic, false)),
        SortKey::MetacriticDesc => out.sort_by(|a, b| nulls_last(a.metacritic, b.metacritic, true)),
    }
    out
}

/// Accent- and case-insensitive key: NFKD, combining marks dropped, lowercased.
/// "Éclair" and "eclair" share a key, so accented initials sort with their base letter.
pub fn collation_key(name: &str) -> String {
    name.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn cmp_dates(a: Option<i64>, b: Option<i64>, desc: bool, policy: MissingDatePolicy) -> Ordering {
    match policy {
        MissingDatePolicy::Epoch => {
            let (a, b) = (a.unwrap_or(0), b.unwrap_or(0));
            if desc {
                b.cmp(&a)
            } else {
                a.cmp(&b)
            }
        }
        MissingDatePolicy::Last => nulls_last(a, b, desc),
    }
}

fn nulls_last<T: Ord>(a: Option<T>, b: Option<T>, desc: bool) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            if desc {
                b.cmp(&a)
            } else {
                a.cmp(&b)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, date: Option<&str>, score: Option<i64>) -> CatalogEntry {
        CatalogEntry {
            name: name.into(),
            release_date: date.map(str::to_string),
            metacritic: score,
            ..Default::default()
        }
    }

    fn names(v: &[&CatalogEntry]) -> Vec<String> {
        v.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn names_ascending_and_descending() {
        let data = [entry("Zeta", None, None), entry("alpha", None, None), entry("Mu", None, None)];
        let refs: Vec<&CatalogEntry> = data.iter().collect();
        let asc = sort_entries(&refs, SortKey::NameAsc, MissingDatePolicy::Epoch);
        assert_eq!(names(&asc), ["alpha", "Mu", "Zeta"]);
        let desc = sort_entries(&refs, SortKey::NameDesc, MissingDatePolicy::Epoch);
        assert_eq!(names(&desc), ["Zeta", "Mu", "alpha"]);
    }

    #[test]
    fn accented_names_sort_with_their_base_letter() {
        let data = [
            entry("Zeta", None, None),
            entry("Éclair", None, None),
            entry("apple", None, None),
            entry("Ölfass", None, None),
        ];
        let refs: Vec<&CatalogEntry> = data.iter().collect();
        let asc = sort_entries(&refs, SortKey::NameAsc, MissingDatePolicy::Epoch);
        assert_eq!(names(&asc), ["apple", "Éclair", "Ölfass", "Zeta"]);
        let desc = sort_entries(&refs, SortKey::NameDesc, MissingDatePolicy::Epoch);
        assert_eq!(names(&desc), ["Zeta", "Ölfass", "Éclair", "apple"]);
    }

    #[test]
    fn equal_keys_fall_back_to_raw_name() {
        let data = [entry("eclair", None, None), entry("Éclair", None, None), entry("Eclair", None, None)];
        let refs: Vec<&CatalogEntry> = data.iter().collect();
        let asc = sort_entries(&refs, SortKey::NameAsc, MissingDatePolicy::Epoch);
        assert_eq!(names(&asc), ["Eclair", "eclair", "Éclair"]);
        assert_eq!(collation_key("Ölfass"), "olfass");
    }

    #[test]
    fn metacritic_nulls_trail_both_ways() {
        let data = [entry("a", None, Some(90)), entry("b", None, None), entry("c", None, Some(70))];
        let refs: Vec<&CatalogEntry> = data.iter().collect();
        let desc = sort_entries(&refs, SortKey::MetacriticDesc, MissingDatePolicy::Epoch);
        assert_eq!(names(&desc), ["a", "c", "b"]);
        let asc = sort_entries(&refs, SortKey::MetacriticAsc, MissingDatePolicy::Epoch);
        assert_eq!(names(&asc), ["c", "a", "b"]);
    }

    #[test]
    fn epoch_policy_puts_missing_dates_at_zero() {
        let data = [
            entry("new", Some("2020-01-01"), None),
            entry("none", None, None),
            entry("old", Some("1999-06-01"), None),
        ];
        let refs: Vec<&CatalogEntry> = data.iter().collect();
        let asc = sort_entries(&refs, SortKey::ReleaseDateAsc, MissingDatePolicy::Epoch);
        assert_eq!(names(&asc), ["none", "old", "new"]);
        let desc = sort_entries(&refs, SortKey::ReleaseDateDesc, MissingDatePolicy::Epoch);
        assert_eq!(names(&desc), ["new", "old", "none"]);
    }

    #[test]
    fn last_policy_trails_in_both_directions() {
        let data = [
            entry("bad", Some("someday"), None),
            entry("new", Some("2020-01-01"), None),
            entry("old", Some("1999-06-01"), None),
        ];
        let refs: Vec<&CatalogEntry> = data.iter().collect();
        let asc = sort_entries(&refs, SortKey::ReleaseDateAsc, MissingDatePolicy::Last);
        assert_eq!(names(&asc), ["old", "new", "bad"]);
        let desc = sort_entries(&refs, SortKey::ReleaseDateDesc, MissingDatePolicy::Last);
        assert_eq!(names(&desc), ["new", "old", "bad"]);
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let data = [entry("x1", None, Some(80)), entry("x2", None, Some(80)), entry("x3", None, Some(80))];
        let refs: Vec<&CatalogEntry> = data.iter().collect();
        let out = sort_entries(&refs, SortKey::MetacriticDesc, MissingDatePolicy::Epoch);
        assert_eq!(names(&out), ["x1", "x2", "x3"]);
    }

    #[test]
    fn policy_string_forms() {
        assert_eq!(MissingDatePolicy::from_str(" Last "), Some(MissingDatePolicy::Last));
        assert_eq!(MissingDatePolicy::from_str("epoch"), Some(MissingDatePolicy::Epoch));
        assert_eq!(MissingDatePolicy::Last.as_str(), "last");
        assert_eq!(MissingDatePolicy::from_str("first"), None);
    }
}
