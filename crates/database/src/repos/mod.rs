//! Database repository implementations

pub mod flat_repository;
pub mod house_repository;
pub mod user_repository;

pub use flat_repository::FlatRepository;
pub use house_repository::HouseRepository;
pub use user_repository::UserRepository;
