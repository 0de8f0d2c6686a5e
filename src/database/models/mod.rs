pub mod client;
pub mod macros;
pub mod post_production;
pub mod request;
pub mod shoot;
pub mod slot;

// Re-export all models for easy importing
pub use client::*;
pub use post_production::*;
pub use request::*;
pub use shoot::*;
pub use slot::*;
