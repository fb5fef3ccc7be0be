//! Request parameter types for the storefront endpoints.

/// Filters for `GET /api/public/design-looks`. Unset and blank fields are
/// left off the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookQuery {
    pub style: Option<String>,
    pub room_type: Option<String>,
    pub designer_id: Option<String>,
}

impl LookQuery {
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("style", self.style.as_deref()),
            ("room_type", self.room_type.as_deref()),
            ("designer_id", self.designer_id.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        })
        .collect()
    }
}

/// The product listings reachable under `/api/category`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryListing {
    All,
    New,
    Bestsellers,
    Room {
        room_type: String,
        subcategory: Option<String>,
    },
}

impl CategoryListing {
    pub(crate) fn path_segments(&self) -> Vec<&str> {
        let mut segments = vec!["api", "category"];
        match self {
            CategoryListing::All => segments.push("all"),
            CategoryListing::New => segments.push("new"),
            CategoryListing::Bestsellers => segments.push("bestsellers"),
            CategoryListing::Room {
                room_type,
                subcategory,
            } => {
                segments.push(room_type.as_str());
                if let Some(sub) = subcategory.as_deref().filter(|s| !s.is_empty()) {
                    segments.push(sub);
                }
            }
        }
        segments
    }
}

/// Filters for `GET /api/products?s_c=&s_s_c=`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSearch {
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

impl ProductSearch {
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("s_c", self.category.as_deref()),
            ("s_s_c", self.subcategory.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
        .collect()
    }
}
