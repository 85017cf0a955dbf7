use serde::{Deserialize, Deserializer};

use super::utils;

pub const UNKNOWN_PLATFORM: &str = "Unknown";

/// One game record as authored in `games.json`.
///
/// `id` is not part of the file; the loader assigns the array position.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CatalogEntry {
    #[serde(skip)]
    pub id: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub platform_type: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub metacritic: Option<i64>,
    #[serde(default)]
    pub size: Option<String>,

    // ---- display-only ----
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub screenshots: Vec<String>,
    #[serde(default, alias = "magnet_link")]
    pub magnet: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub languages_info: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_native_linux_torrent: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_wine_bottled_torrent: bool,

    // ---- provenance ----
    #[serde(default)]
    pub original_torrent_name: Option<String>,
    #[serde(default)]
    pub cleaned_search_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub other_torrent_tags: Vec<String>,
    #[serde(default)]
    pub release_group: Option<String>,
    #[serde(default)]
    pub rawg_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub rawg_id: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Platform {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub requirements: Option<Requirements>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Requirements {
    #[serde(default)]
    pub minimum: Option<String>,
    #[serde(default)]
    pub recommended: Option<String>,
}

impl CatalogEntry {
    /// Fill in the loader defaults: the positional id and "Unknown" platform names.
    pub(crate) fn normalize(mut self, id: usize) -> Self {
        self.id = id;
        for p in &mut self.platforms {
            if p.name.trim().is_empty() {
                p.name = UNKNOWN_PLATFORM.to_string();
            }
        }
        self
    }

    /// Calendar year of `release_date`, if it parses.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.as_deref().and_then(utils::parse_release_year)
    }

    /// Milliseconds since the Unix epoch of `release_date`, if it parses.
    pub fn release_timestamp_ms(&self) -> Option<i64> {
        self.release_date
            .as_deref()
            .and_then(utils::parse_release_timestamp_ms)
    }

    /// Size in gigabytes, if `size` carries a recognisable `<n> MB|GB|TB`.
    pub fn size_gb(&self) -> Option<f64> {
        self.size.as_deref().and_then(utils::parse_size_to_gb)
    }

    /// The platform named "pc" (any case), if listed.
    pub fn pc_platform(&self) -> Option<&Platform> {
        self.platforms
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case("pc"))
    }

    /// Card/header image: thumbnail first, then background.
    pub fn card_image(&self) -> Option<&str> {
        non_blank(self.thumbnail.as_deref()).or_else(|| non_blank(self.background_image.as_deref()))
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

/// Accept integer, float or numeric-string scores; anything else is "no score".
fn lenient_score<'de, D>(de: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(de)?;
    Ok(match v {
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok().map(|f| f.round() as i64),
        _ => None,
    })
}

/// Accept either a string or a number and keep it as display text.
fn lenient_text<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(de)?;
    Ok(match v {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nulls_and_missing_fields_default() {
        let e: CatalogEntry = serde_json::from_str(
            r#"{ "name": "Portal", "genres": null, "platforms": null, "metacritic": null }"#,
        )
        .unwrap();
        assert_eq!(e.name, "Portal");
        assert!(e.genres.is_empty());
        assert!(e.platforms.is_empty());
        assert_eq!(e.metacritic, None);
        assert!(!e.is_native_linux_torrent);
    }

    #[test]
    fn scores_are_read_leniently() {
        let f: CatalogEntry = serde_json::from_str(r#"{ "metacritic": 87.6 }"#).unwrap();
        assert_eq!(f.metacritic, Some(88));
        let s: CatalogEntry = serde_json::from_str(r#"{ "metacritic": " 71 " }"#).unwrap();
        assert_eq!(s.metacritic, Some(71));
        let junk: CatalogEntry = serde_json::from_str(r#"{ "metacritic": "N/A" }"#).unwrap();
        assert_eq!(junk.metacritic, None);
    }

    #[test]
    fn rawg_id_number_or_string() {
        let n: CatalogEntry = serde_json::from_str(r#"{ "rawg_id": 3328 }"#).unwrap();
        assert_eq!(n.rawg_id.as_deref(), Some("3328"));
        let s: CatalogEntry = serde_json::from_str(r#"{ "rawg_id": "abc" }"#).unwrap();
        assert_eq!(s.rawg_id.as_deref(), Some("abc"));
    }

    #[test]
    fn normalize_fills_unknown_platform_names() {
        let e: CatalogEntry = serde_json::from_str(
            r#"{ "name": "X", "platforms": [ { "name": "PC" }, {}, { "name": "  " } ] }"#,
        )
        .unwrap();
        let e = e.normalize(4);
        assert_eq!(e.id, 4);
        let names: Vec<&str> = e.platforms.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["PC", "Unknown", "Unknown"]);
    }

    #[test]
    fn card_image_prefers_thumbnail() {
        let mut e = CatalogEntry {
            background_image: Some("bg.jpg".into()),
            ..Default::default()
        };
        assert_eq!(e.card_image(), Some("bg.jpg"));
        e.thumbnail = Some("thumb.jpg".into());
        assert_eq!(e.card_image(), Some("thumb.jpg"));
        e.thumbnail = Some(" ".into());
        assert_eq!(e.card_image(), Some("bg.jpg"));
    }

    #[test]
    fn pc_platform_is_case_insensitive() {
        let e: CatalogEntry = serde_json::from_str(
            r#"{ "platforms": [ { "name": "Xbox" }, { "name": "pC", "requirements": { "minimum": "OS: Win10" } } ] }"#,
        )
        .unwrap();
        let pc = e.pc_platform().unwrap();
        assert_eq!(
            pc.requirements.as_ref().and_then(|r| r.minimum.as_deref()),
            Some("OS: Win10")
        );
    }
}
