pub mod booking;
pub mod layout;
pub mod visibility;

pub use booking::BookingService;
pub use layout::{Geometry, clamp_range, layout};
pub use visibility::{ShootVisibility, TimeRange, render_all, render_shoot};
