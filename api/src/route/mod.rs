pub mod health;
pub mod payment;
pub mod reservation;
pub mod v1;
