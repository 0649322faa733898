/// Media preview module
///
/// This module handles:
/// - Fetching preview bytes for gallery records
/// - Generating and caching grid thumbnails to disk

pub mod thumbnail;
