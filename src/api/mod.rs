//! API clients for external services
//!
//! - Metadata: movie/series search and detail records
//! - Stream: stream descriptors and playable URL resolution

pub mod omdb;
pub mod stream;

pub use omdb::MetadataClient;
pub use stream::StreamClient;
