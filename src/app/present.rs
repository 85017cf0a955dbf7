// src/app/present.rs
use super::data::CatalogEntry;
use super::utils::shown;

/// What one grid or featured card shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardView {
    pub id: usize,
    pub image_url: Option<String>,
    pub title: String,
    /// (label, value) pairs, already filtered by the omission rule.
    pub lines: Vec<(&'static str, String)>,
}

impl CardView {
    pub fn from_entry(e: &CatalogEntry, hide_ratings: bool) -> Self {
        let mut lines = Vec::with_capacity(4);

        let genres = e.genres.join(", ");
        if let Some(g) = shown(Some(genres.as_str())) {
            lines.push(("Genre", g.to_string()));
        }
        if let Some(p) = shown(e.platform_type.as_deref()) {
            lines.push(("Platform", p.to_string()));
        }
        if !hide_ratings {
            if let Some(score) = e.metacritic {
                lines.push(("Metacritic", score.to_string()));
            }
        }
        if let Some(s) = shown(e.size.as_deref()) {
            lines.push(("Size", s.to_string()));
        }

        Self {
            id: e.id,
            image_url: e.card_image().map(str::to_string),
            title: e.name.clone(),
            lines,
        }
    }

    pub fn line(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_placeholder_values() {
        let e = CatalogEntry {
            id: 7,
            name: "Hades".into(),
            genres: vec!["Action".into(), "Indie".into()],
            platform_type: Some("N/A".into()),
            metacritic: None,
            size: Some("11 GB".into()),
            ..Default::default()
        };
        let card = CardView::from_entry(&e, false);
        assert_eq!(card.id, 7);
        assert_eq!(card.line("Genre"), Some("Action, Indie"));
        assert_eq!(card.line("Platform"), None);
        assert_eq!(card.line("Metacritic"), None);
        assert_eq!(card.line("Size"), Some("11 GB"));
        assert_eq!(card.image_url, None);
    }

    #[test]
    fn zero_score_is_still_shown() {
        let e = CatalogEntry {
            metacritic: Some(0),
            ..Default::default()
        };
        assert_eq!(CardView::from_entry(&e, false).line("Metacritic"), Some("0"));
    }

    #[test]
    fn hidden_ratings_drop_the_metacritic_line() {
        let e = CatalogEntry {
            metacritic: Some(91),
            ..Default::default()
        };
        assert_eq!(CardView::from_entry(&e, true).line("Metacritic"), None);
    }

    #[test]
    fn image_falls_back_to_background() {
        let e = CatalogEntry {
            background_image: Some("https://img/bg.jpg".into()),
            ..Default::default()
        };
        let card = CardView::from_entry(&e, false);
        assert_eq!(card.image_url.as_deref(), Some("https://img/bg.jpg"));
    }
}
