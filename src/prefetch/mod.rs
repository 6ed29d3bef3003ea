/// Page prefetching module
///
/// This module handles:
/// - Resolving page locators into displayable image handles (fetcher.rs)
/// - The readiness cache, de-duplication, and priority gate (coordinator.rs)

pub mod coordinator;
pub mod fetcher;
