use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::repository::{
    health::HealthCheckRepositoryImpl, payment::PaymentRepositoryImpl,
    reservation::ReservationRepositoryImpl, space::SpaceRepositoryImpl,
};
use kernel::repository::{
    health::HealthCheckRepository, payment::PaymentRepository,
    reservation::ReservationRepository, space::SpaceRepository,
};
use kernel::scheduling::{lifecycle::LifecycleService, BookingService};

/// Explicitly constructed dependency wiring: built once at process start
/// from the connection pool and passed around by reference, never held in
/// module-level state.
#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    payment_repository: Arc<dyn PaymentRepository>,
    booking_service: Arc<BookingService>,
    lifecycle_service: Arc<LifecycleService>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let space_repository: Arc<dyn SpaceRepository> =
            Arc::new(SpaceRepositoryImpl::new(pool.clone()));
        let reservation_repository: Arc<dyn ReservationRepository> =
            Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        let payment_repository: Arc<dyn PaymentRepository> =
            Arc::new(PaymentRepositoryImpl::new(pool.clone()));

        let booking_service = Arc::new(BookingService::new(
            space_repository.clone(),
            reservation_repository.clone(),
        ));
        let lifecycle_service = Arc::new(LifecycleService::new(
            reservation_repository.clone(),
            payment_repository.clone(),
        ));

        Self {
            health_check_repository,
            reservation_repository,
            payment_repository,
            booking_service,
            lifecycle_service,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn payment_repository(&self) -> Arc<dyn PaymentRepository> {
        self.payment_repository.clone()
    }

    pub fn booking_service(&self) -> Arc<BookingService> {
        self.booking_service.clone()
    }

    pub fn lifecycle_service(&self) -> Arc<LifecycleService> {
        self.lifecycle_service.clone()
    }
}
