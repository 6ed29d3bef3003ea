/// Spread rendering
///
/// Turns the current navigator position plus the prefetch cache into
/// widgets. All of this is derived state: nothing here is stored, it is
/// recomputed from the catalog, the navigator, and the readiness cache
/// on every view pass.

use iced::widget::{button, container, image, row, text, Space};
use iced::{Alignment, Element, Length};

use crate::prefetch::coordinator::{Coordinator, Resolution};
use crate::state::catalog::{Catalog, PageLocator};
use crate::state::navigator::Navigator;
use crate::Message;

/// Page panel dimensions, matching the book's 3:4 page aspect
const PAGE_WIDTH: f32 = 300.0;
const PAGE_HEIGHT: f32 = 400.0;

/// The open book: two page panels side by side.
///
/// Until the priority batch has settled the whole spread is one loading
/// placeholder — this guarantees the first view never flickers from
/// placeholder to partial content. After that, each page side degrades
/// independently.
pub fn book_view(
    catalog: &Catalog,
    navigator: &Navigator,
    prefetch: &Coordinator,
) -> Element<'static, Message> {
    if !prefetch.initial_batch_ready() {
        return loading_spread();
    }

    let spread = match catalog.pages_for_spread(navigator.current_spread()) {
        Ok(spread) => spread,
        // Unreachable through the navigation guards, but render something
        // sensible rather than panic inside view()
        Err(err) => {
            eprintln!("⚠️  Spread lookup failed: {err}");
            return loading_spread();
        }
    };

    row![
        page_panel(spread.left, prefetch),
        page_panel(spread.right, prefetch),
    ]
    .spacing(4)
    .into()
}

/// Previous / next buttons around the position label.
///
/// Buttons disable at the covers and while a flip is in flight, mirroring
/// the navigator's own guards so a click can never reach an illegal
/// transition.
pub fn controls(catalog: &Catalog, navigator: &Navigator) -> Element<'static, Message> {
    let label = catalog.position_label(navigator.current_spread());

    row![
        button(text("◀"))
            .on_press_maybe(navigator.can_go_prev().then_some(Message::PrevPressed))
            .padding(10),
        text(label).size(16),
        button(text("▶"))
            .on_press_maybe(navigator.can_go_next().then_some(Message::NextPressed))
            .padding(10),
    ]
    .spacing(20)
    .align_y(Alignment::Center)
    .into()
}

/// One page panel: image if ready, placeholder while loading, broken-page
/// marker on failure, blank for the structurally empty cover slots.
fn page_panel(slot: Option<PageLocator>, prefetch: &Coordinator) -> Element<'static, Message> {
    let Some(locator) = slot else {
        // The blank panel facing a cover; no border, it is not a page
        return container(Space::new(Length::Fill, Length::Fill))
            .width(PAGE_WIDTH)
            .height(PAGE_HEIGHT)
            .into();
    };

    let content: Element<'static, Message> = match prefetch.resolution(&locator) {
        Some(Resolution::Ready(handle)) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        Some(Resolution::Failed(_)) => centered(text("⚠️ failed to load").size(14)),
        None => centered(text("⏳").size(24)),
    };

    container(content)
        .width(PAGE_WIDTH)
        .height(PAGE_HEIGHT)
        .padding(8)
        .style(container::bordered_box)
        .into()
}

/// Full-spread placeholder shown before the priority batch settles
fn loading_spread() -> Element<'static, Message> {
    container(centered(text("⏳ Loading…").size(20)))
        .width(PAGE_WIDTH * 2.0)
        .height(PAGE_HEIGHT)
        .style(container::bordered_box)
        .into()
}

fn centered(content: impl Into<Element<'static, Message>>) -> Element<'static, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
