//! Submission pipeline and queue views

use super::*;
use shared::{Binding, ColorMode, PrintSides};
use std::str::FromStr;

#[test]
fn test_submit_assigns_sequential_positions() {
    let manager = test_manager();
    let a = submit_one(&manager, "Asha Rao");
    let b = submit_one(&manager, "Bimal Das");
    let c = submit_one(&manager, "Chitra Sen");

    assert_eq!(a.queue_position, 1);
    assert_eq!(b.queue_position, 2);
    assert_eq!(c.queue_position, 3);
}

#[test]
fn test_submit_fixes_pages_cost_and_size() {
    let manager = test_manager();
    let order = submit_one(&manager, "Asha Rao");

    // 3 uploaded pages + 1 cover
    assert_eq!(order.total_pages, 4);
    // front 2 + 4 pages x 2 (bw A4 normal)
    assert_eq!(order.estimated_cost, 10.0);
    assert!(order.file_size > 0);
    assert_eq!(order.original_filenames, vec!["notes.pdf".to_string()]);
    assert_eq!(order.status, OrderStatus::Pending);
}

#[test]
fn test_submit_merges_files_in_submission_order() {
    let manager = test_manager();
    let mut req = request(
        "Asha Rao",
        vec![
            ("first.pdf", make_pdf("A", 2)),
            ("second.pdf", make_pdf("B", 3)),
        ],
    );
    req.settings.print_sides = PrintSides::from_str("single").unwrap();

    let order = manager.submit(req).unwrap();
    assert_eq!(order.total_pages, 6);
    assert_eq!(
        order.original_filenames,
        vec!["first.pdf".to_string(), "second.pdf".to_string()]
    );
}

#[test]
fn test_duplex_rounds_page_count_up() {
    let manager = test_manager();
    let mut req = request("Asha Rao", vec![("notes.pdf", make_pdf("A", 4))]);
    req.settings.print_sides = PrintSides::Double;

    // 4 uploaded + cover = 5 pages, duplexed as 6 sides: 2 + 6 x 2
    let order = manager.submit(req).unwrap();
    assert_eq!(order.total_pages, 5);
    assert_eq!(order.estimated_cost, 14.0);
}

#[test]
fn test_color_and_binding_priced_from_settings() {
    let manager = test_manager();
    let mut req = request("Asha Rao", vec![("notes.pdf", make_pdf("A", 3))]);
    req.settings.color_mode = ColorMode::from_str("color").unwrap();
    req.settings.binding = Binding::Spiral;

    // front 2 + 4 pages x 5 color + 25 spiral
    let order = manager.submit(req).unwrap();
    assert_eq!(order.estimated_cost, 47.0);
}

#[test]
fn test_cost_rates_every_page_of_the_merged_artifact() {
    let manager = test_manager();
    let req = request("Asha Rao", vec![("notes.pdf", make_pdf("A", 4))]);

    // The rate card prices the whole merged document: the cover page is
    // rated like any other page and its flat charge comes on top.
    let order = manager.submit(req).unwrap();
    assert_eq!(order.total_pages, 5);
    assert_eq!(order.estimated_cost, 12.0);
}

#[test]
fn test_copies_out_of_range_rejected() {
    let manager = test_manager();

    for copies in [0, 11] {
        let mut req = request("Asha Rao", vec![("notes.pdf", make_pdf("A", 1))]);
        req.settings.copies = copies;
        assert!(matches!(
            manager.submit(req),
            Err(ManagerError::InvalidSettings(_))
        ));
    }
}

#[test]
fn test_empty_submission_rejected() {
    let manager = test_manager();
    assert!(matches!(
        manager.submit(request("Asha Rao", vec![])),
        Err(ManagerError::InvalidDocument(_))
    ));
}

#[test]
fn test_unparseable_file_rejected_with_filename() {
    let manager = test_manager();
    let req = request("Asha Rao", vec![("broken.pdf", b"not a pdf".to_vec())]);

    match manager.submit(req) {
        Err(ManagerError::InvalidDocument(msg)) => assert!(msg.contains("broken.pdf")),
        other => panic!("expected InvalidDocument, got {other:?}"),
    }
}

#[test]
fn test_submission_blocked_while_service_stopped() {
    let manager = test_manager();
    manager
        .status
        .stop("Closed for Diwali".to_string(), "owner".to_string());

    match manager.submit(request("Asha Rao", vec![("notes.pdf", make_pdf("A", 1))])) {
        Err(ManagerError::ServiceUnavailable(msg)) => assert_eq!(msg, "Closed for Diwali"),
        other => panic!("expected ServiceUnavailable, got {other:?}"),
    }

    manager.status.start();
    assert!(
        manager
            .submit(request("Asha Rao", vec![("notes.pdf", make_pdf("A", 1))]))
            .is_ok()
    );
}

#[test]
fn test_list_marks_only_the_head() {
    let manager = test_manager();
    let a = submit_one(&manager, "Asha Rao");
    let b = submit_one(&manager, "Bimal Das");

    let pending = manager.list(true).unwrap();
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].order.id, a.id);
    assert!(pending[0].is_first);
    assert!(!pending[1].is_first);

    manager.complete(&a.id).unwrap();

    // Completed entries show up in the full view, never as head
    let all = manager.list(false).unwrap();
    assert_eq!(all.len(), 2);
    let head_flags: Vec<bool> = all
        .iter()
        .map(|s| s.is_first && s.order.id == b.id)
        .collect();
    assert_eq!(head_flags.iter().filter(|f| **f).count(), 1);
}

#[test]
fn test_stats_reflect_queue_activity() {
    let manager = test_manager();
    let a = submit_one(&manager, "Asha Rao");
    let _b = submit_one(&manager, "Bimal Das");
    manager.complete(&a.id).unwrap();

    let stats = manager.stats().unwrap();
    assert_eq!(stats.pending_count, 1);
    assert_eq!(stats.completed_today, 1);
}
