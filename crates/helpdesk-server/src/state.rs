use crate::auth::TokenService;
use application::{
    MachineReconciler, MachineService, ReportCaseService, ReportService, SpecializationService,
    StatisticsService, UserService, WorkerService,
};
use infrastructure::{
    PasswordHasher, SeaOrmMachineRepository, SeaOrmReportCaseRepository, SeaOrmReportRepository,
    SeaOrmSpecializationRepository, SeaOrmUserRepository, SeaOrmWorkerRepository,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub struct AppState {
    pub users: UserService,
    pub workers: WorkerService,
    pub machines: MachineService,
    pub reports: ReportService,
    pub report_cases: ReportCaseService,
    pub specializations: SpecializationService,
    pub statistics: StatisticsService,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(db: DatabaseConnection, tokens: TokenService, hasher: PasswordHasher) -> Self {
        let users = Arc::new(SeaOrmUserRepository::new(db.clone()));
        let workers = Arc::new(SeaOrmWorkerRepository::new(db.clone()));
        let machines = Arc::new(SeaOrmMachineRepository::new(db.clone()));
        let reports = Arc::new(SeaOrmReportRepository::new(db.clone()));
        let report_cases = Arc::new(SeaOrmReportCaseRepository::new(db.clone()));
        let specializations = Arc::new(SeaOrmSpecializationRepository::new(db));

        // One reconciler so every flow shares the per-number locks
        let reconciler = Arc::new(MachineReconciler::new(machines.clone()));

        Self {
            users: UserService::new(
                users.clone(),
                specializations.clone(),
                reconciler.clone(),
                hasher,
            ),
            workers: WorkerService::new(workers, reconciler.clone()),
            machines: MachineService::new(machines),
            reports: ReportService::new(reports.clone(), reconciler),
            report_cases: ReportCaseService::new(report_cases, reports.clone(), users.clone()),
            specializations: SpecializationService::new(specializations, users),
            statistics: StatisticsService::new(reports),
            tokens,
        }
    }
}
