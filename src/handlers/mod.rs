pub mod blocks;
pub mod calendar;
pub mod clients;
pub mod requests;
pub mod shared;
pub mod shoots;
