//! Page directory operations: open, find, switch, close, list.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use chromiumoxide::Page;
use tracing::{error, info, warn};

use crate::error::{Error, Result};
use crate::query::{Criterion, PageMeta, PageQuery, match_meta};

use super::{Launched, Session, UNNAMED_TAG};

// ============================================================================
// Types
// ============================================================================

/// One row of [`Session::list_pages`] output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageListing {
    /// Position in the context's page order.
    pub index: usize,
    /// Page title at snapshot time.
    pub title: String,
    /// Page URL at snapshot time.
    pub url: String,
    /// Registry tag, `None` for untagged pages.
    pub tag: Option<String>,
}

impl PageListing {
    /// The tag, or the `"unnamed"` sentinel.
    #[inline]
    #[must_use]
    pub fn tag_or_unnamed(&self) -> &str {
        self.tag.as_deref().unwrap_or(UNNAMED_TAG)
    }
}

impl fmt::Display for PageListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} ({})",
            self.index,
            self.tag_or_unnamed(),
            self.title,
            self.url
        )
    }
}

/// Identity snapshot of a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    /// Page title.
    pub title: String,
    /// Page URL.
    pub url: String,
    /// Process-local page identity (CDP target id).
    pub target_id: String,
}

// ============================================================================
// Snapshot Helpers
// ============================================================================

/// Metadata snapshot of `pages`, in context order.
async fn snapshot(pages: &[Page]) -> Result<Vec<PageMeta>> {
    let mut metas = Vec::with_capacity(pages.len());
    for (index, page) in pages.iter().enumerate() {
        let title = page.get_title().await?.unwrap_or_default();
        let url = page.url().await?.unwrap_or_default();
        metas.push(PageMeta { index, title, url });
    }
    Ok(metas)
}

impl Launched {
    /// Page registered under `tag`, if it is still alive in the context.
    async fn page_by_tag(&self, tag: &str) -> Result<Option<Page>> {
        let Some(id) = self.tags.get(tag) else {
            return Ok(None);
        };
        let pages = self.context_pages().await?;
        Ok(pages.into_iter().find(|p| p.target_id() == id))
    }
}

// ============================================================================
// Session - Page Directory
// ============================================================================

impl Session {
    /// Opens a new page in the context and registers it under `tag`.
    ///
    /// Get-or-create semantics: when `tag` is already registered the existing
    /// handle is returned unchanged (with a warning) and no page is created.
    /// The current-page pointer does not move either way.
    pub async fn open_new_page(&mut self, tag: &str) -> Result<Page> {
        let launched = self.ensure_started().await?;

        if launched.tags.contains(tag) {
            warn!(tag, "Page tag already exists; returning existing page");
            if let Some(page) = launched.page_by_tag(tag).await? {
                return Ok(page);
            }
            // Registered id with no live page: the page was closed around the
            // manager. Drop the dangling entry and fall through to create.
            warn!(tag, "Tag pointed at a closed page; reopening");
            launched.tags.remove(tag);
        }

        let page = launched.driver.browser.new_page("about:blank").await?;
        launched.tags.insert(tag, page.target_id().clone());

        info!(tag, "New page created");
        Ok(page)
    }

    /// Finds a page by [`PageQuery`] criteria.
    ///
    /// Precedence: tag > index > title substring > url regex > no criteria →
    /// current page. Returns `Ok(None)` when nothing matches.
    ///
    /// # Errors
    ///
    /// Propagates CDP failures and [`Error::InvalidQuery`] for a malformed
    /// URL pattern; a plain miss is not an error.
    pub async fn find_page(&mut self, query: &PageQuery) -> Result<Option<Page>> {
        let criterion = query.criterion()?;
        let launched = self.ensure_started().await?;

        let found = match &criterion {
            Criterion::Tag(tag) => launched.page_by_tag(tag).await?,
            Criterion::Current => {
                info!("No criteria given; returning current page");
                launched.current.clone()
            }
            Criterion::Index(_) | Criterion::Title(_) | Criterion::Url(_) => {
                let pages = launched.context_pages().await?;
                let metas = snapshot(&pages).await?;
                match_meta(&metas, &criterion).and_then(|i| pages.get(i).cloned())
            }
        };

        Ok(found)
    }

    /// Switches the current page.
    ///
    /// Resolves via [`find_page`](Session::find_page); on a hit the page is
    /// brought to the foreground and becomes the current page. A miss is
    /// logged and returned as `Ok(None)`, never a hard error.
    pub async fn switch_page(&mut self, query: &PageQuery) -> Result<Option<Page>> {
        match self.find_page(query).await? {
            Some(page) => {
                page.bring_to_front().await?;
                if let Some(launched) = self.state_mut() {
                    launched.current = Some(page.clone());
                }
                info!(query = %query.describe(), "Switched current page");
                Ok(Some(page))
            }
            None => {
                error!(query = %query.describe(), "Page not found; current page unchanged");
                Ok(None)
            }
        }
    }

    /// Closes the page matched by `query`.
    ///
    /// With more than one page open, the matching registry entry is pruned
    /// (reverse tag lookup), the page closes and the current-page pointer
    /// moves to the context's first remaining page. Closing the last page
    /// clears the whole registry and leaves the current pointer empty.
    ///
    /// Returns `Ok(false)` when no page matched. (The source this behavior
    /// comes from reported success unconditionally; that was a defect and is
    /// corrected here.)
    pub async fn close_page(&mut self, query: &PageQuery) -> Result<bool> {
        let Some(page) = self.find_page(query).await? else {
            warn!(query = %query.describe(), "No page matched; nothing closed");
            return Ok(false);
        };

        let Some(launched) = self.state_mut() else {
            return Ok(false);
        };
        let id = page.target_id().clone();
        let pages = launched.context_pages().await?;

        if pages.len() > 1 {
            let tag = launched.tags.remove_by_id(&id);
            page.close().await?;
            launched.current = pages.into_iter().find(|p| *p.target_id() != id);
            info!(
                query = %query.describe(),
                tag = tag.as_deref().unwrap_or(UNNAMED_TAG),
                "Page closed; current moved to first remaining page"
            );
        } else {
            warn!(query = %query.describe(), "Closing the last open page");
            page.close().await?;
            launched.tags.clear();
            launched.current = None;
        }

        Ok(true)
    }

    /// Lists every open page in context order.
    ///
    /// Each entry carries the page's index, title, URL and its registry tag,
    /// found by reverse lookup (O(n) per page, fine at these counts).
    pub async fn list_pages(&mut self) -> Result<Vec<PageListing>> {
        let launched = self.ensure_started().await?;
        let pages = launched.context_pages().await?;
        let metas = snapshot(&pages).await?;

        let listings = metas
            .into_iter()
            .map(|meta| {
                let tag = pages
                    .get(meta.index)
                    .and_then(|p| launched.tags.tag_for(p.target_id()))
                    .map(str::to_owned);
                PageListing {
                    index: meta.index,
                    title: meta.title,
                    url: meta.url,
                    tag,
                }
            })
            .collect();

        Ok(listings)
    }

    /// Title, URL and identity of `page`.
    pub async fn page_info(&self, page: &Page) -> Result<PageInfo> {
        Ok(PageInfo {
            title: page.get_title().await?.unwrap_or_default(),
            url: page.url().await?.unwrap_or_default(),
            target_id: page.target_id().inner().clone(),
        })
    }

    /// Title, URL and identity of the current page.
    pub async fn current_page_info(&mut self) -> Result<PageInfo> {
        self.ensure_started().await?;
        let page = self.current_page().ok_or(Error::NoCurrentPage)?;
        self.page_info(&page).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_display_uses_unnamed_sentinel() {
        let listing = PageListing {
            index: 1,
            title: "Checkout".into(),
            url: "https://shop.example.com/checkout".into(),
            tag: None,
        };
        assert_eq!(listing.tag_or_unnamed(), UNNAMED_TAG);
        assert_eq!(
            listing.to_string(),
            "[1] unnamed: Checkout (https://shop.example.com/checkout)"
        );
    }

    #[test]
    fn test_listing_display_with_tag() {
        let listing = PageListing {
            index: 0,
            title: "Home".into(),
            url: "https://example.com/".into(),
            tag: Some("default".into()),
        };
        assert_eq!(listing.to_string(), "[0] default: Home (https://example.com/)");
    }
}
