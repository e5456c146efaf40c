pub mod payment;
pub mod reservation;
