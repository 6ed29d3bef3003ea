/// The page catalog: an ordered, immutable list of page locators
///
/// The catalog is built once at startup and never mutated. Everything the
/// rest of the application needs — spread count, cover positions, which
/// pages belong to a given spread — is derived from it on demand.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Opaque reference to one page's image resource.
///
/// Usually a path relative to the book's asset directory, but the catalog
/// and prefetch layers never look inside it. Duplicate locators are legal
/// (e.g. identical filler pages); the prefetch cache keys on the locator
/// value, so duplicates share one underlying fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageLocator(String);

impl PageLocator {
    pub fn new(raw: impl Into<String>) -> Self {
        PageLocator(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors from catalog construction and spread lookup
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A book needs at least a front and a back cover
    #[error("catalog needs at least 2 pages (front and back cover), got {0}")]
    InvalidCatalog(usize),

    /// Spread index outside [0, spread_count()]. Navigation guards make
    /// this unreachable in practice, but lookups check it anyway.
    #[error("spread index {index} out of range (max {max})")]
    OutOfRange { index: usize, max: usize },
}

/// The two page slots of one spread.
///
/// `None` means the slot is structurally empty (the blank panel next to a
/// cover), not that the page failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spread {
    pub left: Option<PageLocator>,
    pub right: Option<PageLocator>,
}

/// Ordered sequence of page locators making up one book.
///
/// Index 0 is the front cover, index `len - 1` the back cover. Interior
/// pages pair up into spreads: left page at an odd index, right page at
/// the following even index.
#[derive(Debug, Clone)]
pub struct Catalog {
    pages: Vec<PageLocator>,
}

impl Catalog {
    /// Build a catalog from an ordered list of locators.
    ///
    /// Fails if the list has fewer than 2 entries — a book with no covers
    /// cannot be rendered, so this is surfaced to the caller rather than
    /// papered over.
    pub fn new(pages: Vec<PageLocator>) -> Result<Self, CatalogError> {
        if pages.len() < 2 {
            return Err(CatalogError::InvalidCatalog(pages.len()));
        }
        Ok(Catalog { pages })
    }

    /// Total number of pages, covers included
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Index of the front cover (always 0)
    pub fn cover_index(&self) -> usize {
        0
    }

    /// Index of the back cover (always the last page)
    pub fn back_cover_index(&self) -> usize {
        self.pages.len() - 1
    }

    /// The locator at a page index, if in range
    pub fn locator(&self, index: usize) -> Option<&PageLocator> {
        self.pages.get(index)
    }

    /// Highest spread index: `ceil((len - 1) / 2)`.
    ///
    /// Spread 0 shows only the front cover and spread `spread_count()`
    /// only the back cover; everything in between is a full two-page
    /// spread.
    pub fn spread_count(&self) -> usize {
        (self.pages.len() - 1).div_ceil(2)
    }

    /// Number of interior (two-page) spreads: `ceil((len - 2) / 2)`.
    /// This is the denominator of the position label.
    pub fn interior_spread_count(&self) -> usize {
        (self.pages.len() - 2).div_ceil(2)
    }

    /// The pages shown at a given spread index.
    pub fn pages_for_spread(&self, spread: usize) -> Result<Spread, CatalogError> {
        let max = self.spread_count();

        if spread > max {
            return Err(CatalogError::OutOfRange { index: spread, max });
        }

        if spread == 0 {
            // Front cover: blank left panel, cover on the right
            return Ok(Spread {
                left: None,
                right: Some(self.pages[0].clone()),
            });
        }

        if spread == max {
            // Back cover: mirrored
            return Ok(Spread {
                left: Some(self.pages[self.back_cover_index()].clone()),
                right: None,
            });
        }

        // Interior spread: left page at 2s-1, right page at 2s.
        // Both indices stay within [1, len-2] for every interior spread.
        let left_index = (spread * 2) - 1;
        Ok(Spread {
            left: Some(self.pages[left_index].clone()),
            right: Some(self.pages[left_index + 1].clone()),
        })
    }

    /// Human-readable position for the controls bar.
    ///
    /// `"cover"` and `"back cover"` at the boundaries, else
    /// `"{spread}/{interior_spread_count}"`.
    pub fn position_label(&self, spread: usize) -> String {
        if spread == 0 {
            "cover".to_string()
        } else if spread == self.spread_count() {
            "back cover".to_string()
        } else {
            format!("{}/{}", spread, self.interior_spread_count())
        }
    }
}

/// Errors from loading a book manifest file
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse manifest: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk description of a book: an ordered list of page image paths.
///
/// Lets the catalog be swapped without recompiling — pass a manifest path
/// as the first command-line argument.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BookManifest {
    /// Page image paths in reading order, covers included
    pub pages: Vec<String>,
}

impl BookManifest {
    /// Parse a manifest from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Load a manifest from a file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// Convert the manifest's page paths into catalog locators
    pub fn into_locators(self) -> Vec<PageLocator> {
        self.pages.into_iter().map(PageLocator::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_of(n: usize) -> Catalog {
        let pages = (0..n)
            .map(|i| PageLocator::new(format!("page-{i:02}.png")))
            .collect();
        Catalog::new(pages).unwrap()
    }

    #[test]
    fn test_rejects_short_catalogs() {
        assert!(matches!(
            Catalog::new(vec![]),
            Err(CatalogError::InvalidCatalog(0))
        ));
        assert!(matches!(
            Catalog::new(vec![PageLocator::new("only.png")]),
            Err(CatalogError::InvalidCatalog(1))
        ));
        assert!(Catalog::new(vec![
            PageLocator::new("front.png"),
            PageLocator::new("back.png"),
        ])
        .is_ok());
    }

    #[test]
    fn test_spread_count_formula() {
        // spread_count == ceil((N - 1) / 2) for all N >= 2
        for n in 2..=20 {
            let catalog = catalog_of(n);
            assert_eq!(catalog.spread_count(), (n - 1).div_ceil(2), "N = {n}");
        }
    }

    #[test]
    fn test_cover_spread() {
        let catalog = catalog_of(14);
        let spread = catalog.pages_for_spread(0).unwrap();
        assert_eq!(spread.left, None);
        assert_eq!(spread.right, Some(PageLocator::new("page-00.png")));
    }

    #[test]
    fn test_back_cover_spread() {
        let catalog = catalog_of(14);
        let spread = catalog.pages_for_spread(catalog.spread_count()).unwrap();
        assert_eq!(spread.left, Some(PageLocator::new("page-13.png")));
        assert_eq!(spread.right, None);
    }

    #[test]
    fn test_interior_spreads_pair_odd_then_even() {
        let catalog = catalog_of(14);
        for s in 1..catalog.spread_count() {
            let spread = catalog.pages_for_spread(s).unwrap();
            assert_eq!(spread.left.as_ref(), catalog.locator(2 * s - 1));
            assert_eq!(spread.right.as_ref(), catalog.locator(2 * s));
        }
    }

    #[test]
    fn test_two_page_book_has_no_interior() {
        // Smallest legal book: just the two covers
        let catalog = catalog_of(2);
        assert_eq!(catalog.spread_count(), 1);
        assert_eq!(catalog.interior_spread_count(), 0);

        let front = catalog.pages_for_spread(0).unwrap();
        assert_eq!(front.right, Some(PageLocator::new("page-00.png")));
        let back = catalog.pages_for_spread(1).unwrap();
        assert_eq!(back.left, Some(PageLocator::new("page-01.png")));
    }

    #[test]
    fn test_out_of_range_spread() {
        let catalog = catalog_of(14);
        let result = catalog.pages_for_spread(catalog.spread_count() + 1);
        assert!(matches!(
            result,
            Err(CatalogError::OutOfRange { index: 8, max: 7 })
        ));
    }

    #[test]
    fn test_fourteen_page_scenario() {
        // The reference book: 14 pages -> 7 spreads, label denominator 6
        let catalog = catalog_of(14);
        assert_eq!(catalog.cover_index(), 0);
        assert_eq!(catalog.back_cover_index(), 13);
        assert_eq!(catalog.spread_count(), 7);
        assert_eq!(catalog.interior_spread_count(), 6);
        assert_eq!(catalog.position_label(0), "cover");
        assert_eq!(catalog.position_label(7), "back cover");
        assert_eq!(catalog.position_label(3), "3/6");
    }

    #[test]
    fn test_position_label_agrees_with_spread_lookup() {
        // "back cover" is exactly the last spread; an index past it is
        // out of range for both accessors, not a second back cover
        let catalog = catalog_of(14);
        assert_eq!(catalog.position_label(7), "back cover");
        assert!(catalog.pages_for_spread(7).is_ok());

        assert_eq!(catalog.position_label(8), "8/6");
        assert!(catalog.pages_for_spread(8).is_err());
    }

    #[test]
    fn test_duplicate_locators_are_legal() {
        let filler = PageLocator::new("filler.png");
        let pages = vec![
            PageLocator::new("front.png"),
            filler.clone(),
            filler.clone(),
            PageLocator::new("back.png"),
        ];
        let catalog = Catalog::new(pages).unwrap();
        let spread = catalog.pages_for_spread(1).unwrap();
        assert_eq!(spread.left, Some(filler.clone()));
        assert_eq!(spread.right, Some(filler));
    }

    #[test]
    fn test_manifest_round_trip() {
        let manifest = BookManifest {
            pages: vec!["cover.png".into(), "back.png".into()],
        };
        let json = manifest.to_json().unwrap();
        let restored = BookManifest::from_json(&json).unwrap();
        assert_eq!(restored.pages, manifest.pages);
    }

    #[test]
    fn test_manifest_rejects_malformed_json() {
        assert!(BookManifest::from_json("{\"pages\": 42}").is_err());
    }
}
