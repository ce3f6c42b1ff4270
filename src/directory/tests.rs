use std::time::{Duration, SystemTime};

use super::*;
use crate::core::{Priority, Record, Status, TransitionCause};
use crate::error::DirectoryError;
use crate::graph::{EdgeSpec, LocationGraph, Topology};

fn anchor() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

fn seeded() -> Directory {
    Directory::seeded(anchor()).unwrap()
}

fn ids(records: &[&Record]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}

fn record(id: &str, priority: Priority) -> Record {
    Record::new(id, id, "Test", "Glenwood", priority, anchor(), anchor())
}

#[test]
fn sorted_views_project_each_index() {
    let dir = seeded();
    assert_eq!(dir.len(), 12);

    assert_eq!(
        ids(&dir.sort_by_id()),
        [
            "M001", "M002", "R101", "R102", "R103", "R109", "R150", "R201", "R202", "R210",
            "R211", "R305"
        ]
    );
    assert_eq!(
        ids(&dir.sort_by_created()),
        [
            "M001", "R101", "R102", "R103", "M002", "R210", "R211", "R201", "R305", "R202",
            "R109", "R150"
        ]
    );
    // 高优先级在前，同优先级保持插入顺序
    assert_eq!(
        ids(&dir.sort_by_priority()),
        [
            "M002", "M001", "R101", "R102", "R210", "R211", "R150", "R305", "R201", "R103",
            "R202", "R109"
        ]
    );
}

#[test]
fn next_jobs_follow_eta_then_priority() {
    let dir = seeded();
    assert_eq!(
        ids(&dir.get_next_jobs(5)),
        ["M001", "M002", "R101", "R102", "R103"]
    );
    // ETA 同为 5h：High 先于 Medium
    let all = ids(&dir.get_next_jobs(100));
    assert_eq!(all.len(), 12);
    let r211 = all.iter().position(|id| id == "R211").unwrap();
    let r201 = all.iter().position(|id| id == "R201").unwrap();
    assert!(r211 < r201);
    assert_eq!(all.last().map(String::as_str), Some("R202"));
    // 只读：重复调用结果不变
    assert_eq!(ids(&dir.get_next_jobs(5)), ids(&dir.get_next_jobs(5)));
}

#[test]
fn get_by_id_reports_missing_as_none() {
    let dir = seeded();
    assert_eq!(dir.get_by_id("R150").map(|r| r.priority), Some(Priority::High));
    assert!(dir.get_by_id("nonexistent").is_none());
}

#[test]
fn update_status_walks_the_state_machine() {
    let mut dir = seeded();
    assert_eq!(dir.get_by_id("R150").unwrap().status, Status::Open);
    assert!(dir.get_by_id("R150").unwrap().updated_at.is_none());

    let events = dir.update_status("R150").unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!((events[0].from, events[0].to), (Status::Open, Status::InProgress));
    assert_eq!(events[0].cause, TransitionCause::Advance);
    let stamped = dir.get_by_id("R150").unwrap().updated_at;
    assert!(stamped.is_some());

    dir.update_status("R150").unwrap();
    assert_eq!(dir.get_by_id("R150").unwrap().status, Status::Closed);

    let events = dir.update_status("R150").unwrap();
    assert!(events.is_empty());
    assert_eq!(dir.get_by_id("R150").unwrap().status, Status::Closed);

    assert!(matches!(
        dir.update_status("nonexistent"),
        Err(DirectoryError::RecordNotFound(id)) if id == "nonexistent"
    ));
}

#[test]
fn closing_a_parent_through_update_status_cascades() {
    let mut dir = seeded();
    // M001 种子状态为 InProgress：一次推进即关闭
    let events = dir.update_status("M001").unwrap();
    let touched: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(touched, ["M001", "R101", "R102", "R103"]);
    assert!(events[1..].iter().all(|e| e.cause == TransitionCause::Cascade));
    for id in ["R101", "R102", "R103"] {
        assert_eq!(dir.get_by_id(id).unwrap().status, Status::Closed);
    }
    // 其他簇不受影响
    assert_eq!(dir.get_by_id("R210").unwrap().status, Status::Open);
}

#[test]
fn resolve_request_closes_every_descendant_unconditionally() {
    let mut dir = seeded();
    dir.update_status("R101").unwrap();
    assert_eq!(dir.get_by_id("R101").unwrap().status, Status::InProgress);

    let events = dir.resolve_request("M001").unwrap();
    assert_eq!(events[0].cause, TransitionCause::Resolve);
    for id in ["M001", "R101", "R102", "R103"] {
        let r = dir.get_by_id(id).unwrap();
        assert_eq!(r.status, Status::Closed, "{id}");
        assert!(r.updated_at.is_some());
    }

    // 已关闭的记录同样会被再次级联
    let again = dir.resolve_request("M001").unwrap();
    assert_eq!(again.len(), 4);
    assert!(again.iter().all(|e| !e.changed()));

    assert!(dir.resolve_request("nope").is_err());
}

#[test]
fn cascade_reaches_grandchildren_and_survives_cycles() {
    let g = LocationGraph::new();
    let records = vec![
        record("A", Priority::High).with_dependents(["B"]),
        record("B", Priority::Low).with_parent("A").with_dependents(["C"]),
        record("C", Priority::Low).with_parent("B").with_dependents(["A"]),
    ];
    let mut dir = Directory::new(records, g).unwrap();
    let events = dir.resolve_request("A").unwrap();
    let touched: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(touched, ["A", "B", "C"]);
}

#[test]
fn construction_rejects_broken_records() {
    let dup = vec![record("A", Priority::Low), record("A", Priority::High)];
    assert!(matches!(
        Directory::new(dup, LocationGraph::new()),
        Err(DirectoryError::DuplicateRecord(id)) if id == "A"
    ));

    let orphan = vec![record("A", Priority::Low).with_parent("Z")];
    assert!(matches!(
        Directory::new(orphan, LocationGraph::new()),
        Err(DirectoryError::UnknownParent { parent, .. }) if parent == "Z"
    ));

    let dangling = vec![record("A", Priority::Low).with_dependents(["Q"])];
    assert!(matches!(
        Directory::new(dangling, LocationGraph::new()),
        Err(DirectoryError::UnknownDependent { dependent, .. }) if dependent == "Q"
    ));
}

#[test]
fn add_record_rebuilds_indexes_and_links_parent() {
    let mut dir = seeded();
    let child = Record::new(
        "R400",
        "Burst Pipe - House 90",
        "Water",
        "Durban North",
        Priority::Critical,
        anchor() + Duration::from_secs(3600),
        anchor(),
    )
    .with_parent("M001");
    dir.add_record(child).unwrap();

    assert_eq!(dir.len(), 13);
    assert_eq!(ids(&dir.sort_by_id()).last().map(String::as_str), Some("R400"));
    assert_eq!(ids(&dir.sort_by_priority())[2], "R400");
    assert_eq!(ids(&dir.get_next_jobs(1)), ["R400"]);
    assert_eq!(ids(&dir.sort_by_created()).last().map(String::as_str), Some("R400"));
    assert!(dir
        .get_by_id("M001")
        .unwrap()
        .dependents
        .iter()
        .any(|d| d == "R400"));

    dir.resolve_request("M001").unwrap();
    assert_eq!(dir.get_by_id("R400").unwrap().status, Status::Closed);

    assert!(matches!(
        dir.add_record(record("R400", Priority::Low)),
        Err(DirectoryError::DuplicateRecord(_))
    ));
}

#[test]
fn filter_ids_supports_contains_and_glob() {
    let dir = seeded();
    assert_eq!(ids(&dir.filter_ids("m00")), ["M001", "M002"]);
    assert_eq!(ids(&dir.filter_ids("R2*")), ["R201", "R202", "R210", "R211"]);
    assert_eq!(ids(&dir.filter_ids("R?0?")), ["R101", "R102", "R103", "R109", "R201", "R202", "R305"]);
    assert!(dir.filter_ids("X*").is_empty());
}

#[test]
fn filter_keeps_the_chosen_sort_order() {
    let dir = seeded();
    assert_eq!(
        ids(&dir.filter_sorted("R*", SortKey::Priority)),
        ["R101", "R102", "R210", "R211", "R150", "R305", "R201", "R103", "R202", "R109"]
    );
    assert_eq!(
        ids(&dir.filter_sorted("r2", SortKey::Created)),
        ["R210", "R211", "R201", "R202"]
    );
    assert_eq!(ids(&dir.filter_sorted("M*", SortKey::Id)), ids(&dir.filter_ids("M*")));
    assert_eq!(ids(&dir.sorted(SortKey::Created)), ids(&dir.sort_by_created()));
}

#[test]
fn construction_links_children_missing_from_parent_dependents() {
    let records = vec![
        record("A", Priority::High),
        record("B", Priority::Low).with_parent("A"),
        record("C", Priority::Low).with_parent("A"),
    ];
    let mut dir = Directory::new(records, LocationGraph::new()).unwrap();
    assert_eq!(dir.get_by_id("A").unwrap().dependents, ["B", "C"]);

    let events = dir.resolve_request("A").unwrap();
    let touched: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(touched, ["A", "B", "C"]);
    assert_eq!(dir.get_by_id("C").unwrap().status, Status::Closed);
}

#[test]
fn closing_a_leaf_touches_only_itself() {
    let mut dir = seeded();
    let events = dir.resolve_request("R150").unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].cause, TransitionCause::Resolve);
}

#[test]
fn graph_operations_format_paths() {
    let dir = seeded();
    assert_eq!(
        dir.run_bfs("Durban North"),
        "Durban North → Glenwood → Umhlanga → Morningside → Springfield"
    );
    assert_eq!(
        dir.run_dfs("durban north"),
        "Durban North → Glenwood → Morningside → Springfield → Umhlanga"
    );
    assert_eq!(dir.run_bfs("Nowhere"), LOCATION_NOT_FOUND);
    assert_eq!(dir.run_dfs("Nowhere"), LOCATION_NOT_FOUND);
    assert!(matches!(
        dir.bfs_path("Nowhere"),
        Err(DirectoryError::LocationNotFound(_))
    ));
    assert_eq!(dir.suggest_locations("sprng", 3), ["Springfield"]);
}

#[test]
fn mst_summary_lists_edges_and_total() {
    let dir = seeded();
    let expected = [
        "Glenwood — Morningside : 4.2 km",
        "Durban North — Glenwood : 5.0 km",
        "Glenwood — Springfield : 5.3 km",
        "Umhlanga — Springfield : 7.5 km",
        "Total Distance: 22.0 km",
    ]
    .join("\n");
    assert_eq!(dir.get_mst_summary(), expected);
}

#[test]
fn mst_summary_is_empty_for_disconnected_or_empty_graph() {
    let empty = Directory::new(Vec::new(), LocationGraph::new()).unwrap();
    assert_eq!(empty.get_mst_summary(), "");

    let split = Topology {
        nodes: vec!["A".into(), "B".into(), "C".into()],
        edges: vec![EdgeSpec {
            from: "A".into(),
            to: "B".into(),
            distance: 1.0,
        }],
    };
    let dir = Directory::seeded_with(&split, anchor()).unwrap();
    assert_eq!(dir.get_mst_summary(), "");
    assert_eq!(dir.minimum_spanning_network().edges.len(), 1);

    let solo = Topology {
        nodes: vec!["A".into()],
        edges: vec![],
    };
    let dir = Directory::seeded_with(&solo, anchor())
        .unwrap()
        .with_distance_unit("mi");
    assert_eq!(dir.get_mst_summary(), "Total Distance: 0.0 mi");
}

#[test]
fn report_counts_records_and_structures() {
    let mut dir = seeded();
    dir.resolve_request("M002").unwrap();
    let r = dir.report();
    assert_eq!(r.records, 12);
    assert_eq!(r.by_id.entries, 12);
    assert_eq!(r.by_created.entries, 12);
    assert_eq!(r.by_priority.entries, 12);
    assert_eq!(r.heap_len, 12);
    assert!(r.black_height.is_some());
    assert_eq!(r.status.closed, 3);
    assert_eq!(r.status.in_progress, 1);
    assert_eq!(r.status.open, 8);
    assert_eq!((r.graph_nodes, r.graph_edges), (5, 5));
    // AVL 高度不超过 1.44·log2(n+2)
    assert!(r.by_created.height <= 5);
}
