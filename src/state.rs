use std::sync::Arc;
use crate::domain::ports::{BookingRepository, EmailService, HotelRepository, UserRepository};
use crate::domain::services::{
    account_service::AccountService, auth_service::AuthService,
    reservation_service::ReservationService,
};
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub hotel_repo: Arc<dyn HotelRepository>,
    pub auth_service: Arc<AuthService>,
    pub account_service: Arc<AccountService>,
    pub reservation_service: Arc<ReservationService>,
}

impl AppState {
    /// Wires the services on top of whichever storage backend was injected.
    pub fn new(
        config: Config,
        user_repo: Arc<dyn UserRepository>,
        hotel_repo: Arc<dyn HotelRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        email_service: Arc<dyn EmailService>,
        templates: Arc<Tera>,
    ) -> Self {
        let auth_service = Arc::new(AuthService::new(user_repo.clone(), config.clone()));
        let account_service = Arc::new(AccountService::new(
            user_repo.clone(),
            auth_service.clone(),
            email_service,
            templates,
            config.clone(),
        ));
        let reservation_service = Arc::new(ReservationService::new(hotel_repo.clone(), booking_repo));

        Self {
            config,
            user_repo,
            hotel_repo,
            auth_service,
            account_service,
            reservation_service,
        }
    }
}
