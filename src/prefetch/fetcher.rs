/// Page fetching seam
///
/// The coordinator never touches the filesystem itself; it goes through
/// the `PageFetcher` trait. Production uses `FsFetcher` (async file read
/// plus a decode check); tests substitute a counting double to observe
/// how many underlying fetches actually happen.

use iced::futures::future::BoxFuture;
use iced::widget::image::Handle;
use std::path::PathBuf;
use thiserror::Error;

use crate::state::catalog::PageLocator;

/// Why a page failed to resolve
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not read page data: {0}")]
    Read(#[from] std::io::Error),

    #[error("could not decode page image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Resolves a locator into displayable image data.
///
/// Object-safe so the coordinator can hold `Arc<dyn PageFetcher>`; the
/// returned future is boxed for the same reason.
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, locator: &PageLocator) -> BoxFuture<'static, Result<Handle, FetchError>>;
}

/// Default fetcher: locators are image paths relative to a root directory.
///
/// Reads the file off the UI thread via tokio and runs the bytes through
/// the image decoder before handing them to the widget layer, so a
/// corrupt file surfaces as a `Failed` resolution instead of a blank
/// widget.
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsFetcher { root: root.into() }
    }
}

impl PageFetcher for FsFetcher {
    fn fetch(&self, locator: &PageLocator) -> BoxFuture<'static, Result<Handle, FetchError>> {
        let path = self.root.join(locator.as_str());

        Box::pin(async move {
            let bytes = tokio::fs::read(&path).await?;

            // Validate before display; a handle built from garbage would
            // only fail later, silently, inside the renderer.
            image::load_from_memory(&bytes)?;

            Ok(Handle::from_bytes(bytes))
        })
    }
}
