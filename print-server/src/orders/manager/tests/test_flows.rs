//! Staff actions over the head of the queue

use super::*;

#[test]
fn test_download_returns_head_artifact() {
    let manager = test_manager();
    let a = submit_one(&manager, "Asha Rao");

    let (order, artifact) = manager.download(&a.id).unwrap();
    assert_eq!(order.id, a.id);
    assert!(artifact.starts_with(b"%PDF"));
    assert_eq!(artifact.len() as u64, order.file_size);
}

#[test]
fn test_download_refused_for_non_head() {
    let manager = test_manager();
    let _a = submit_one(&manager, "Asha Rao");
    let b = submit_one(&manager, "Bimal Das");

    assert!(matches!(
        manager.download(&b.id),
        Err(ManagerError::NotHeadOfQueue(_))
    ));
}

#[test]
fn test_download_unknown_order() {
    let manager = test_manager();
    assert!(matches!(
        manager.download("no-such-id"),
        Err(ManagerError::NotFound(_))
    ));
}

#[test]
fn test_complete_advances_the_queue() {
    let manager = test_manager();
    let a = submit_one(&manager, "Asha Rao");
    let b = submit_one(&manager, "Bimal Das");

    let completed = manager.complete(&a.id).unwrap();
    assert_eq!(completed.status, OrderStatus::Completed);
    assert!(completed.completed_at.is_some());

    // B is now head: downloadable, completable
    assert!(manager.download(&b.id).is_ok());
}

#[test]
fn test_reject_retains_the_record() {
    let manager = test_manager();
    let a = submit_one(&manager, "Asha Rao");

    let rejected = manager.reject(&a.id).unwrap();
    assert_eq!(rejected.status, OrderStatus::Cancelled);
    assert_eq!(manager.get(&a.id).unwrap().status, OrderStatus::Cancelled);
}

#[test]
fn test_remove_erases_the_record() {
    let manager = test_manager();
    let a = submit_one(&manager, "Asha Rao");

    manager.remove(&a.id).unwrap();
    assert!(matches!(
        manager.get(&a.id),
        Err(ManagerError::NotFound(_))
    ));
}

#[test]
fn test_non_head_mutations_refused() {
    let manager = test_manager();
    let _a = submit_one(&manager, "Asha Rao");
    let b = submit_one(&manager, "Bimal Das");

    assert!(matches!(
        manager.complete(&b.id),
        Err(ManagerError::NotHeadOfQueue(_))
    ));
    assert!(matches!(
        manager.reject(&b.id),
        Err(ManagerError::NotHeadOfQueue(_))
    ));
    assert!(matches!(
        manager.remove(&b.id),
        Err(ManagerError::NotHeadOfQueue(_))
    ));
}
