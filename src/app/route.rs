// src/app/route.rs

pub const CATALOG_PAGE: &str = "index.html";
pub const DETAIL_PAGE: &str = "game-detail.html";

/// Which view the window shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Catalog,
    /// `id` is the raw query value; `None` when the location carried no `id`.
    Detail { id: Option<String> },
}

impl Route {
    /// Parse a location such as `game-detail.html?id=12`, `?id=12`,
    /// `gamelist://game?id=12` or `index.html`.
    pub fn parse(location: &str) -> Self {
        let loc = location.trim();
        let (path, query) = match loc.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (loc, None),
        };
        let query = query.map(|q| q.split('#').next().unwrap_or_default());
        let id = query.and_then(|q| query_param(q, "id"));

        let path = path.trim_end_matches('/');
        let file = path.rsplit('/').next().unwrap_or(path);
        let is_catalog = file.eq_ignore_ascii_case(CATALOG_PAGE)
            || (path.is_empty() && query.is_none())
            || path.eq_ignore_ascii_case("gamelist:");

        if is_catalog && id.is_none() {
            return Self::Catalog;
        }
        if file.eq_ignore_ascii_case(DETAIL_PAGE) || file.eq_ignore_ascii_case("game") || path.is_empty() {
            return Self::Detail { id };
        }
        Self::Catalog
    }

    pub fn detail_href(id: usize) -> String {
        format!("{DETAIL_PAGE}?id={id}")
    }

    pub fn detail(id: usize) -> Self {
        Self::Detail {
            id: Some(id.to_string()),
        }
    }
}

fn query_param(query: &str, key: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        if k != key {
            return None;
        }
        let v = v.replace('+', " ");
        Some(
            urlencoding::decode(&v)
                .map(|c| c.into_owned())
                .unwrap_or(v),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: &str) -> Route {
        Route::Detail {
            id: Some(id.to_string()),
        }
    }

    #[test]
    fn detail_locations() {
        assert_eq!(Route::parse("game-detail.html?id=12"), detail("12"));
        assert_eq!(Route::parse("?id=12"), detail("12"));
        assert_eq!(Route::parse("gamelist://game?id=12"), detail("12"));
        assert_eq!(Route::parse("/site/game-detail.html?id=3#top"), detail("3"));
        assert_eq!(Route::parse("game-detail.html?x=1&id=%2012"), detail(" 12"));
    }

    #[test]
    fn detail_without_id() {
        assert_eq!(Route::parse("game-detail.html"), Route::Detail { id: None });
        assert_eq!(Route::parse("game-detail.html?foo=bar"), Route::Detail { id: None });
    }

    #[test]
    fn catalog_locations() {
        assert_eq!(Route::parse("index.html"), Route::Catalog);
        assert_eq!(Route::parse(""), Route::Catalog);
        assert_eq!(Route::parse("https://host/games/index.html"), Route::Catalog);
        assert_eq!(Route::parse("about.html"), Route::Catalog);
    }

    #[test]
    fn href_round_trips_through_parse() {
        assert_eq!(Route::detail_href(42), "game-detail.html?id=42");
        assert_eq!(Route::parse(&Route::detail_href(42)), Route::detail(42));
    }
}
