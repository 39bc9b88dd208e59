//! 저장소 구현 (PostgreSQL, S3)

mod postgres;
mod s3;

pub use postgres::PgVenueStore;
pub use s3::S3ImageSink;
