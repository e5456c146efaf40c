pub mod id;
pub mod payment;
pub mod period;
pub mod reservation;
pub mod space;
