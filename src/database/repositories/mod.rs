pub mod client;
pub mod request;
pub mod shoot;
pub mod slot;

// Re-export all repositories for easy importing
pub use client::ClientRepository;
pub use request::AvailabilityRequestRepository;
pub use shoot::{NewShoot, ShootRepository};
pub use slot::SlotRepository;
