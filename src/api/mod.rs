/// Gallery REST collaborator
///
/// This module handles:
/// - Wire DTOs and ingestion into domain records (dto.rs)
/// - The typed error taxonomy (error.rs)
/// - The HTTP client itself (client.rs)

pub mod client;
pub mod dto;
pub mod error;

pub use client::GalleryApi;
pub use error::ApiError;
