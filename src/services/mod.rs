// Service exports
pub mod bookings;
pub mod cache;
pub mod directory;

pub use bookings::{BookingStore, BookingStoreError};
pub use cache::{CacheKey, CacheManager};
pub use directory::{DirectoryClient, DirectoryError};
