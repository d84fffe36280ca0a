//! Page lookup criteria.
//!
//! A [`PageQuery`] names at most one page in the session. Several criteria
//! may be filled in, but only one applies, with fixed precedence:
//!
//! 1. `tag` — exact registry tag
//! 2. `index` — position in the context's page order (0-based)
//! 3. `title` — substring of the page title
//! 4. `url` — regex matched against the page URL
//! 5. nothing set — the current page
//!
//! # Example
//!
//! ```
//! use multipage::PageQuery;
//!
//! let by_tag = PageQuery::tag("shop");
//! let by_index = PageQuery::index(2);
//! let by_url = PageQuery::url(r"example\.com/checkout");
//! ```

// ============================================================================
// Imports
// ============================================================================

use regex::Regex;

use crate::error::{Error, Result};

// ============================================================================
// PageQuery
// ============================================================================

/// Criteria for finding a page in the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    /// Registry tag, matched exactly.
    pub tag: Option<String>,
    /// Index into the context's page order.
    pub index: Option<usize>,
    /// Substring of the page title.
    pub title: Option<String>,
    /// Regex matched against the page URL.
    pub url: Option<String>,
}

impl PageQuery {
    /// Query matching the current page (no criteria).
    #[inline]
    #[must_use]
    pub fn current() -> Self {
        Self::default()
    }

    /// Query by registry tag.
    #[inline]
    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Default::default()
        }
    }

    /// Query by position in the context's page order.
    #[inline]
    #[must_use]
    pub fn index(index: usize) -> Self {
        Self {
            index: Some(index),
            ..Default::default()
        }
    }

    /// Query by title substring.
    #[inline]
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Query by URL regex.
    #[inline]
    #[must_use]
    pub fn url(pattern: impl Into<String>) -> Self {
        Self {
            url: Some(pattern.into()),
            ..Default::default()
        }
    }

    /// Short human-readable form for log lines.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.criterion() {
            Ok(Criterion::Tag(t)) => format!("tag={t}"),
            Ok(Criterion::Index(i)) => format!("index={i}"),
            Ok(Criterion::Title(t)) => format!("title~{t}"),
            Ok(Criterion::Url(r)) => format!("url~{}", r.as_str()),
            Ok(Criterion::Current) => "current".to_string(),
            Err(_) => format!("url~{} (invalid)", self.url.as_deref().unwrap_or("")),
        }
    }

    /// Resolves which single criterion applies, by precedence.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidQuery`] when the URL pattern does not compile.
    pub(crate) fn criterion(&self) -> Result<Criterion> {
        if let Some(tag) = &self.tag {
            return Ok(Criterion::Tag(tag.clone()));
        }
        if let Some(index) = self.index {
            return Ok(Criterion::Index(index));
        }
        if let Some(title) = &self.title {
            return Ok(Criterion::Title(title.clone()));
        }
        if let Some(pattern) = &self.url {
            let regex = Regex::new(pattern)
                .map_err(|e| Error::invalid_query(format!("bad url pattern '{pattern}': {e}")))?;
            return Ok(Criterion::Url(regex));
        }
        Ok(Criterion::Current)
    }
}

// ============================================================================
// Criterion
// ============================================================================

/// The single criterion selected from a [`PageQuery`].
#[derive(Debug, Clone)]
pub(crate) enum Criterion {
    Tag(String),
    Index(usize),
    Title(String),
    Url(Regex),
    Current,
}

// ============================================================================
// PageMeta
// ============================================================================

/// Snapshot of one page's metadata, in context order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageMeta {
    pub index: usize,
    pub title: String,
    pub url: String,
}

/// Matches a criterion against a metadata snapshot.
///
/// Returns the index of the first matching page. `Tag` and `Current` are
/// resolved by the session before the snapshot is consulted and never match
/// here.
pub(crate) fn match_meta(metas: &[PageMeta], criterion: &Criterion) -> Option<usize> {
    match criterion {
        Criterion::Index(i) => (*i < metas.len()).then_some(*i),
        Criterion::Title(needle) => metas
            .iter()
            .find(|m| m.title.contains(needle.as_str()))
            .map(|m| m.index),
        Criterion::Url(regex) => metas
            .iter()
            .find(|m| regex.is_match(&m.url))
            .map(|m| m.index),
        Criterion::Tag(_) | Criterion::Current => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn metas() -> Vec<PageMeta> {
        vec![
            PageMeta {
                index: 0,
                title: "Search - Home".into(),
                url: "https://search.example.com/".into(),
            },
            PageMeta {
                index: 1,
                title: "Video Player".into(),
                url: "https://video.example.com/watch?v=1".into(),
            },
            PageMeta {
                index: 2,
                title: "Shopping Cart".into(),
                url: "https://shop.example.com/cart".into(),
            },
        ]
    }

    #[test]
    fn test_precedence_tag_beats_index() {
        let query = PageQuery {
            tag: Some("a".into()),
            index: Some(0),
            ..Default::default()
        };
        assert!(matches!(query.criterion().unwrap(), Criterion::Tag(t) if t == "a"));
    }

    #[test]
    fn test_precedence_index_beats_title_and_url() {
        let query = PageQuery {
            index: Some(1),
            title: Some("Video".into()),
            url: Some("shop".into()),
            ..Default::default()
        };
        assert!(matches!(query.criterion().unwrap(), Criterion::Index(1)));
    }

    #[test]
    fn test_precedence_title_beats_url() {
        let query = PageQuery {
            title: Some("Cart".into()),
            url: Some("video".into()),
            ..Default::default()
        };
        assert!(matches!(query.criterion().unwrap(), Criterion::Title(t) if t == "Cart"));
    }

    #[test]
    fn test_empty_query_is_current() {
        assert!(matches!(
            PageQuery::current().criterion().unwrap(),
            Criterion::Current
        ));
    }

    #[test]
    fn test_invalid_url_regex_is_rejected() {
        let err = PageQuery::url("[unclosed").criterion().unwrap_err();
        assert!(matches!(err, Error::InvalidQuery { .. }));
    }

    #[test]
    fn test_match_by_index_bounds() {
        let metas = metas();
        assert_eq!(match_meta(&metas, &Criterion::Index(2)), Some(2));
        assert_eq!(match_meta(&metas, &Criterion::Index(3)), None);
    }

    #[test]
    fn test_match_by_title_substring() {
        let metas = metas();
        assert_eq!(
            match_meta(&metas, &Criterion::Title("Video".into())),
            Some(1)
        );
        assert_eq!(match_meta(&metas, &Criterion::Title("Missing".into())), None);
    }

    #[test]
    fn test_match_by_url_regex() {
        let metas = metas();
        let re = Regex::new(r"shop\.example\.com/cart").unwrap();
        assert_eq!(match_meta(&metas, &Criterion::Url(re)), Some(2));

        let re = Regex::new(r"^https://video").unwrap();
        assert_eq!(match_meta(&metas, &Criterion::Url(re)), Some(1));
    }

    #[test]
    fn test_title_match_returns_first_hit() {
        let metas = metas();
        // "example" is not in any title; "o" appears in several.
        assert_eq!(match_meta(&metas, &Criterion::Title("o".into())), Some(0));
    }

    #[test]
    fn test_describe_forms() {
        assert_eq!(PageQuery::tag("shop").describe(), "tag=shop");
        assert_eq!(PageQuery::index(3).describe(), "index=3");
        assert_eq!(PageQuery::current().describe(), "current");
    }

    proptest! {
        /// A filled tag always wins, whatever else is set.
        #[test]
        fn prop_tag_always_wins(
            tag in "[a-z]{1,8}",
            index in proptest::option::of(0usize..10),
            title in proptest::option::of("[a-z]{0,8}"),
            url in proptest::option::of("[a-z]{0,8}"),
        ) {
            let query = PageQuery { tag: Some(tag.clone()), index, title, url };
            prop_assert!(matches!(query.criterion().unwrap(), Criterion::Tag(t) if t == tag));
        }

        /// Index matches exactly the in-bounds indices.
        #[test]
        fn prop_index_in_bounds(len in 0usize..8, index in 0usize..16) {
            let metas: Vec<PageMeta> = (0..len)
                .map(|i| PageMeta { index: i, title: String::new(), url: String::new() })
                .collect();
            let hit = match_meta(&metas, &Criterion::Index(index));
            prop_assert_eq!(hit, (index < len).then_some(index));
        }
    }
}
