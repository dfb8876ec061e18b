mod common;

use application::user::{CreateUser, UpdateUser};
use application::worker::{CreateWorker, UpdateWorker};
use application::{MachineReconciler, SpecializationService, UserService, WorkerService};
use common::{BrokenMachines, FakeMachines, FakeSpecializations, FakeUsers, FakeWorkers};
use domain::user::UserRepository;
use domain::{DomainError, Owner};
use infrastructure::PasswordHasher;
use serde_json::json;
use std::sync::Arc;

struct Harness {
    machines: Arc<FakeMachines>,
    users: Arc<FakeUsers>,
    specializations: Arc<FakeSpecializations>,
    service: UserService,
}

fn harness() -> Harness {
    let machines = Arc::new(FakeMachines::default());
    let users = Arc::new(FakeUsers::default());
    let specializations = Arc::new(FakeSpecializations::default());
    let service = UserService::new(
        users.clone(),
        specializations.clone(),
        Arc::new(MachineReconciler::new(machines.clone())),
        PasswordHasher::new(4),
    );
    Harness {
        machines,
        users,
        specializations,
        service,
    }
}

fn new_user(value: serde_json::Value) -> CreateUser {
    let mut base = json!({
        "name": "Ana",
        "lastname": "Rojas",
        "email": "Ana@Example.com",
        "cedula": "V-100",
        "role": "technician",
        "password": "s3cret"
    });
    if let (Some(base), Some(extra)) = (base.as_object_mut(), value.as_object()) {
        base.extend(extra.clone());
    }
    serde_json::from_value(base).unwrap()
}

#[tokio::test]
async fn test_create_user_with_specializations_and_machine() {
    let h = harness();

    let details = h
        .service
        .create(new_user(json!({
            "specializations": ["Redes", " redes ", "Impresoras"],
            "nro_maquina": "PC-01"
        })))
        .await
        .unwrap();

    assert_eq!(details.user.email, "ana@example.com");
    assert_ne!(details.user.password_hash, "s3cret");
    let mut names: Vec<_> = details.specializations.iter().map(|s| s.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["impresoras", "redes"]);

    let machine = details.machine.unwrap();
    assert_eq!(machine.nro_maquina, "PC-01");
    assert_eq!(machine.owner, Some(Owner::User(details.user.id)));
    assert_eq!(h.machines.all().len(), 1);
}

#[tokio::test]
async fn test_blank_specialization_rejects_whole_user() {
    let h = harness();

    let result = h
        .service
        .create(new_user(json!({ "specializations": ["redes", "  "] })))
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert!(h.service.authenticate("ana@example.com", "s3cret").await.is_err());
}

#[tokio::test]
async fn test_authenticate() {
    let h = harness();
    h.service.create(new_user(json!({}))).await.unwrap();

    let user = h
        .service
        .authenticate(" ANA@example.com ", "s3cret")
        .await
        .unwrap();
    assert_eq!(user.cedula, "V-100");

    for (email, password) in [("ana@example.com", "nope"), ("bob@example.com", "s3cret")] {
        assert!(matches!(
            h.service.authenticate(email, password).await,
            Err(DomainError::Unauthorized(_))
        ));
    }
}

#[tokio::test]
async fn test_update_user_runs_ownership_aware_reconciliation() {
    let h = harness();
    let user = h.users.seed("tec@example.com");
    let held_by_worker = h.machines.seed("M-7", Some(Owner::Worker(3)));

    let payload: UpdateUser =
        serde_json::from_value(json!({ "nro_maquina": "M-7", "password": "nueva" })).unwrap();
    let details = h.service.update(user.id, payload).await.unwrap();

    assert_eq!(details.machine.map(|m| m.id), Some(held_by_worker.id));
    assert_eq!(h.machines.all()[0].owner, Some(Owner::User(user.id)));
    assert!(h.service.authenticate("tec@example.com", "nueva").await.is_ok());

    let payload: UpdateUser = serde_json::from_value(json!({ "nro_maquina": "" })).unwrap();
    let details = h.service.update(user.id, payload).await.unwrap();
    assert!(details.machine.is_none());
    assert_eq!(h.machines.all().len(), 1);
}

#[tokio::test]
async fn test_update_worker_runs_ownership_aware_reconciliation() {
    let machines = Arc::new(FakeMachines::default());
    let workers = Arc::new(FakeWorkers::default());
    let service = WorkerService::new(
        workers.clone(),
        Arc::new(MachineReconciler::new(machines.clone())),
    );
    let worker = workers.seed("F-20");
    let held_by_user = machines.seed("M-3", Some(Owner::User(5)));

    let payload: UpdateWorker =
        serde_json::from_value(json!({ "nro_maquina": " M-3 ", "department": "Almacén" }))
            .unwrap();
    let details = service.update(worker.id, payload).await.unwrap();
    assert_eq!(details.worker.department.as_deref(), Some("Almacén"));
    assert_eq!(details.machine.map(|m| m.id), Some(held_by_user.id));
    assert_eq!(machines.all()[0].owner, Some(Owner::Worker(worker.id)));

    // The worker's own machine is renamed in place
    let payload: UpdateWorker = serde_json::from_value(json!({ "nro_maquina": "M-4" })).unwrap();
    let details = service.update(worker.id, payload).await.unwrap();
    let machine = details.machine.unwrap();
    assert_eq!(machine.id, held_by_user.id);
    assert_eq!(machine.nro_maquina, "M-4");
    assert_eq!(machines.all().len(), 1);

    let payload: UpdateWorker = serde_json::from_value(json!({ "nro_maquina": "" })).unwrap();
    let details = service.update(worker.id, payload).await.unwrap();
    assert!(details.machine.is_none());
    assert_eq!(machines.all()[0].owner, None);

    assert!(matches!(
        service.update(worker.id + 50, UpdateWorker::default()).await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_failed_machine_reconciliation_leaves_user_row_untouched() {
    let users = Arc::new(FakeUsers::default());
    let service = UserService::new(
        users.clone(),
        Arc::new(FakeSpecializations::default()),
        Arc::new(MachineReconciler::new(Arc::new(BrokenMachines))),
        PasswordHasher::new(4),
    );
    let user = users.seed("tec@example.com");

    let payload: UpdateUser =
        serde_json::from_value(json!({ "name": "Otra", "nro_maquina": "9" })).unwrap();
    let result = service.update(user.id, payload).await;

    assert!(matches!(result, Err(DomainError::Database(_))));
    assert_eq!(users.find_by_id(user.id).await.unwrap().unwrap().name, "Ana");
}

#[tokio::test]
async fn test_failed_machine_reconciliation_undoes_creation() {
    let users = Arc::new(FakeUsers::default());
    let user_service = UserService::new(
        users.clone(),
        Arc::new(FakeSpecializations::default()),
        Arc::new(MachineReconciler::new(Arc::new(BrokenMachines))),
        PasswordHasher::new(4),
    );

    let result = user_service
        .create(new_user(json!({ "nro_maquina": "9" })))
        .await;
    assert!(matches!(result, Err(DomainError::Database(_))));
    assert!(users.find_by_email("ana@example.com").await.unwrap().is_none());

    let workers = Arc::new(FakeWorkers::default());
    let worker_service = WorkerService::new(
        workers.clone(),
        Arc::new(MachineReconciler::new(Arc::new(BrokenMachines))),
    );
    let payload: CreateWorker = serde_json::from_value(json!({
        "ficha": "F-9",
        "name": "Luis",
        "lastname": "Pérez",
        "nro_maquina": "9"
    }))
    .unwrap();

    let result = worker_service.create(payload).await;
    assert!(matches!(result, Err(DomainError::Database(_))));
    assert!(workers.all().is_empty());
}

#[tokio::test]
async fn test_update_missing_user_is_not_found() {
    let h = harness();

    let result = h.service.update(12, UpdateUser::default()).await;

    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_assign_specialization_by_name() {
    let h = harness();
    let user = h.users.seed("tec@example.com");
    let service = SpecializationService::new(h.specializations.clone(), h.users.clone());

    let first = service.assign(user.id, "Servidores").await.unwrap();
    let second = service.assign(user.id, "SERVIDORES ").await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(service.for_user(user.id).await.unwrap().len(), 1);

    assert!(matches!(
        service.assign(user.id + 100, "redes").await,
        Err(DomainError::NotFound(_))
    ));
    assert!(matches!(
        service.create("   ").await,
        Err(DomainError::Validation(_))
    ));
}
