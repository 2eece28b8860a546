pub mod booking;
pub mod event;
pub mod job;
pub mod session;
pub mod settlement;
