pub mod payment;
pub mod reservation;
pub mod space;
