use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::redis::RedisClient;
use adapter::repository::{
    auth::AuthRepositoryImpl, health::HealthCheckRepositoryImpl, member::MemberRepositoryImpl,
    reservation::ReservationRepositoryImpl, waiting::WaitingRepositoryImpl,
};
use kernel::repository::{
    auth::AuthRepository, health::HealthCheckRepository, member::MemberRepository,
};
use kernel::service::waiting::WaitingService;
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    member_repository: Arc<dyn MemberRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    waiting_service: Arc<WaitingService>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let member_repository = Arc::new(MemberRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let waiting_service = Arc::new(WaitingService::new(
            Arc::new(ReservationRepositoryImpl::new(pool.clone())),
            Arc::new(WaitingRepositoryImpl::new(pool.clone())),
        ));
        Self {
            health_check_repository,
            member_repository,
            auth_repository,
            waiting_service,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn member_repository(&self) -> Arc<dyn MemberRepository> {
        self.member_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn waiting_service(&self) -> Arc<WaitingService> {
        self.waiting_service.clone()
    }
}
