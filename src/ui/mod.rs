/// UI widgets module
///
/// This module builds the visual pieces of the book:
/// - Spread rendering, page placeholders, and the controls bar (spread.rs)

pub mod spread;
