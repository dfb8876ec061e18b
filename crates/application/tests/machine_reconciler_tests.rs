mod common;

use application::{MachineOutcome, MachineReconciler};
use common::{BrokenMachines, FakeMachines};
use domain::machine::{MachineChange, MachineNumber, MachineRepository};
use domain::{DomainError, Owner};
use std::sync::Arc;

fn assign(raw: &str) -> MachineChange {
    MachineChange::from_raw(raw)
}

fn setup() -> (Arc<FakeMachines>, MachineReconciler) {
    let machines = Arc::new(FakeMachines::default());
    let reconciler = MachineReconciler::new(machines.clone());
    (machines, reconciler)
}

#[tokio::test]
async fn test_create_path_reuses_machine_whoever_owns_it() {
    let (machines, reconciler) = setup();
    let existing = machines.seed("55", Some(Owner::Worker(9)));

    let id = reconciler
        .resolve_for_new_report(Some(Owner::User(1)), &assign(" 55 "))
        .await
        .unwrap();

    assert_eq!(id, Some(existing.id));
    // Ownership is left alone on the create path
    assert_eq!(machines.all()[0].owner, Some(Owner::Worker(9)));
    assert_eq!(machines.all().len(), 1);
}

#[tokio::test]
async fn test_create_path_creates_missing_machine_for_submitter() {
    let (machines, reconciler) = setup();

    let id = reconciler
        .resolve_for_new_report(Some(Owner::User(1)), &assign("77"))
        .await
        .unwrap()
        .unwrap();

    let all = machines.all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, id);
    assert_eq!(all[0].nro_maquina, "77");
    assert_eq!(all[0].owner, Some(Owner::User(1)));
}

#[tokio::test]
async fn test_create_path_without_number_attaches_nothing() {
    let (machines, reconciler) = setup();

    for change in [MachineChange::Unchanged, assign(""), assign("   ")] {
        let id = reconciler
            .resolve_for_new_report(Some(Owner::User(1)), &change)
            .await
            .unwrap();
        assert_eq!(id, None);
    }
    assert!(machines.all().is_empty());
}

#[tokio::test]
async fn test_same_number_twice_yields_one_machine() {
    let (machines, reconciler) = setup();

    let first = reconciler
        .resolve_for_new_report(Some(Owner::User(1)), &assign("55"))
        .await
        .unwrap();
    let second = reconciler
        .resolve_for_new_report(Some(Owner::Worker(2)), &assign("55"))
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(machines.all().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_do_not_duplicate() {
    let (machines, reconciler) = setup();
    let reconciler = Arc::new(reconciler);

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let reconciler = reconciler.clone();
            tokio::spawn(async move {
                reconciler
                    .resolve_for_new_report(Some(Owner::User(i)), &MachineChange::from_raw("900"))
                    .await
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap());
    }

    let number = MachineNumber::parse("900").unwrap();
    assert_eq!(machines.count_by_number(&number).await.unwrap(), 1);
    assert!(ids.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn test_update_path_renames_owned_machine_in_place() {
    let (machines, reconciler) = setup();
    let owner = Owner::User(3);
    let owned = machines.seed("10", Some(owner));

    let outcome = reconciler
        .reconcile_owner_machine(owner, &assign("11"))
        .await
        .unwrap();

    assert_eq!(outcome, MachineOutcome::Attached(owned.id));
    let all = machines.all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].nro_maquina, "11");
}

#[tokio::test]
async fn test_update_path_steals_machine_from_other_owner() {
    let (machines, reconciler) = setup();
    let other = machines.seed("20", Some(Owner::User(1)));

    let outcome = reconciler
        .reconcile_owner_machine(Owner::Worker(5), &assign("20"))
        .await
        .unwrap();

    assert_eq!(outcome, MachineOutcome::Attached(other.id));
    assert_eq!(machines.all()[0].owner, Some(Owner::Worker(5)));
    assert_eq!(
        machines.count_by_owner(Owner::User(1)).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_update_path_creates_when_number_unknown() {
    let (machines, reconciler) = setup();

    let outcome = reconciler
        .reconcile_owner_machine(Owner::Worker(5), &assign("30"))
        .await
        .unwrap();

    let all = machines.all();
    assert_eq!(all.len(), 1);
    assert_eq!(outcome, MachineOutcome::Attached(all[0].id));
    assert_eq!(all[0].owner, Some(Owner::Worker(5)));
}

#[tokio::test]
async fn test_empty_number_unlinks_without_deleting() {
    let (machines, reconciler) = setup();
    let owner = Owner::User(4);
    machines.seed("40", Some(owner));
    machines.seed("41", Some(owner));
    machines.seed("42", Some(Owner::User(8)));

    let outcome = reconciler
        .reconcile_owner_machine(owner, &assign(""))
        .await
        .unwrap();

    assert_eq!(outcome, MachineOutcome::Detached);
    assert_eq!(outcome.report_machine(), Some(None));
    let all = machines.all();
    assert_eq!(all.len(), 3);
    assert_eq!(machines.count_by_owner(owner).await.unwrap(), 0);
    assert_eq!(all[2].owner, Some(Owner::User(8)));
}

#[tokio::test]
async fn test_absent_number_changes_nothing() {
    let (machines, reconciler) = setup();
    let owner = Owner::User(4);
    machines.seed("40", Some(owner));

    let outcome = reconciler
        .reconcile_owner_machine(owner, &MachineChange::Unchanged)
        .await
        .unwrap();

    assert_eq!(outcome, MachineOutcome::Unchanged);
    assert_eq!(outcome.report_machine(), None);
    assert_eq!(machines.all()[0].owner, Some(owner));
}

#[tokio::test]
async fn test_store_failure_propagates_with_message() {
    let reconciler = MachineReconciler::new(Arc::new(BrokenMachines));

    let err = reconciler
        .resolve_for_new_report(Some(Owner::User(1)), &assign("55"))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Database("connection reset".into()));

    let result = reconciler
        .reconcile_owner_machine(Owner::Worker(1), &assign(""))
        .await;
    assert!(matches!(result, Err(DomainError::Database(msg)) if msg == "connection reset"));
}
