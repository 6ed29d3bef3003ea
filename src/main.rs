use iced::widget::{column, container, text, Column};
use iced::{Alignment, Element, Length, Task, Theme};
use std::path::{Path, PathBuf};
use std::sync::Arc;

// Declare the application modules
mod prefetch;
mod state;
mod ui;

use prefetch::coordinator::{Coordinator, Resolution};
use prefetch::fetcher::FsFetcher;
use state::catalog::{BookManifest, Catalog, PageLocator};
use state::navigator::{Navigator, FLIP_DURATION, SETTLE_DELAY};

/// Built-in demo book: front cover, twelve pages, back cover
const DEFAULT_PAGES: [&str; 14] = [
    "front-cover.png",
    "page-01.png",
    "page-02.png",
    "page-03.png",
    "page-04.png",
    "page-05.png",
    "page-06.png",
    "page-07.png",
    "page-08.png",
    "page-09.png",
    "page-10.png",
    "page-11.png",
    "page-12.png",
    "back-cover.png",
];

/// Default asset directory for the built-in book
const DEFAULT_ASSET_ROOT: &str = "assets/pages";

/// How many leading pages must settle before the first spread renders:
/// the cover plus the first interior spread (indices 0, 1, 2)
const PRIORITY_PAGE_COUNT: usize = 3;

/// Main application state
struct FlipBook {
    /// The book's page catalog, immutable after startup
    catalog: Catalog,
    /// Flip transition state machine
    navigator: Navigator,
    /// Readiness cache and prefetch policy
    prefetch: Coordinator,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// A page fetch settled, successfully or not
    PageResolved(PageLocator, Resolution),
    /// User clicked the previous-spread button
    PrevPressed,
    /// User clicked the next-spread button
    NextPressed,
    /// Flip animation reached the content-swap deadline
    FlipAdvanced,
    /// Settle delay elapsed; navigation input re-enables
    FlipSettled,
}

impl FlipBook {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // If the catalog cannot be built, we panic: the app cannot render
        // a book with no pages, and misconfiguration should fail loudly.
        let (catalog, asset_root) = load_catalog();

        println!(
            "📖 Flip book initialized: {} pages, {} spreads",
            catalog.len(),
            catalog.spread_count()
        );

        let navigator = Navigator::new(catalog.spread_count());

        // Priority batch: the pages visible on the first spread. Clamped
        // for the smallest books (two covers have no index 2).
        let priority: Vec<PageLocator> = (0..PRIORITY_PAGE_COUNT.min(catalog.len()))
            .filter_map(|index| catalog.locator(index).cloned())
            .collect();

        let fetcher = Arc::new(FsFetcher::new(asset_root));
        let mut prefetch = Coordinator::new(fetcher, priority.clone());

        let tasks: Vec<Task<Message>> = prefetch
            .batch(priority)
            .into_iter()
            .map(|settle| Task::perform(settle, |(locator, res)| Message::PageResolved(locator, res)))
            .collect();

        let status = format!("Loading first spread of {} pages...", catalog.len());

        (
            FlipBook {
                catalog,
                navigator,
                prefetch,
                status,
            },
            Task::batch(tasks),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PageResolved(locator, resolution) => {
                if let Resolution::Failed(reason) = &resolution {
                    // Non-fatal: the page renders a broken-image marker
                    eprintln!("⚠️  Page failed to load: {locator}: {reason}");
                }

                let gate_opened = self.prefetch.record(locator, resolution);
                self.status = format!("{} pages settled", self.prefetch.settled_count());

                if gate_opened {
                    println!("✅ First spread ready, prefetching the rest in the background");
                    return self.prefetch_remaining();
                }

                Task::none()
            }
            Message::PrevPressed => {
                if self.navigator.request_prev() {
                    return Task::perform(tokio::time::sleep(FLIP_DURATION), |_| {
                        Message::FlipAdvanced
                    });
                }
                Task::none()
            }
            Message::NextPressed => {
                if self.navigator.request_next() {
                    return Task::perform(tokio::time::sleep(FLIP_DURATION), |_| {
                        Message::FlipAdvanced
                    });
                }
                Task::none()
            }
            Message::FlipAdvanced => {
                if self.navigator.is_transitioning() {
                    self.navigator.advance();
                    return Task::perform(tokio::time::sleep(SETTLE_DELAY), |_| {
                        Message::FlipSettled
                    });
                }
                // Stale timer after the machine already settled
                Task::none()
            }
            Message::FlipSettled => {
                self.navigator.settle();
                Task::none()
            }
        }
    }

    /// Launch the background batch for every page not covered by the
    /// priority batch, in ascending index order. De-duplication in the
    /// coordinator skips pages that are already settled or in flight.
    fn prefetch_remaining(&mut self) -> Task<Message> {
        let remaining: Vec<PageLocator> = (0..self.catalog.len())
            .filter_map(|index| self.catalog.locator(index).cloned())
            .collect();

        let tasks: Vec<Task<Message>> = self
            .prefetch
            .batch(remaining)
            .into_iter()
            .map(|settle| Task::perform(settle, |(locator, res)| Message::PageResolved(locator, res)))
            .collect();

        Task::batch(tasks)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let content: Column<Message> = column![
            text("Flip Book").size(48),
            ui::spread::book_view(&self.catalog, &self.navigator, &self.prefetch),
            ui::spread::controls(&self.catalog, &self.navigator),
            text(&self.status).size(16),
        ]
        .spacing(20)
        .padding(40)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application("Flip Book", FlipBook::update, FlipBook::view)
        .theme(FlipBook::theme)
        .centered()
        .run_with(FlipBook::new)
}

/// Build the catalog and pick the asset root the fetcher resolves
/// locators against.
///
/// With a manifest argument, pages resolve relative to the manifest's
/// directory; otherwise the built-in demo book loads from the default
/// asset directory.
fn load_catalog() -> (Catalog, PathBuf) {
    let (locators, asset_root) = match std::env::args().nth(1) {
        Some(manifest_path) => {
            println!("📚 Loading book manifest: {manifest_path}");

            let manifest = BookManifest::load(&manifest_path)
                .expect("Failed to load book manifest. Check the path and JSON format.");

            let root = Path::new(&manifest_path)
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
                .to_path_buf();

            (manifest.into_locators(), root)
        }
        None => (
            DEFAULT_PAGES.iter().copied().map(PageLocator::new).collect(),
            PathBuf::from(DEFAULT_ASSET_ROOT),
        ),
    };

    let catalog = Catalog::new(locators)
        .expect("Book catalog is invalid. A book needs at least front and back covers.");

    (catalog, asset_root)
}
