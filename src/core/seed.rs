//! 固定种子数据：两个父子工单簇 + 若干独立工单，以及五节点地点拓扑。

use std::time::{Duration, SystemTime};

use crate::core::record::{Priority, Record, Status};
use crate::graph::{EdgeSpec, Topology};

const HOUR: u64 = 3600;

/// 以 `anchor` 为时间原点构造种子记录。
///
/// created_at 按构造顺序逐秒递增；返回顺序即插入目录的顺序（刻意打乱，便于观察排序视图）。
pub fn seed_records(anchor: SystemTime) -> Vec<Record> {
    let mut tick = 0u64;
    let mut created = || {
        let t = anchor + Duration::from_secs(tick);
        tick += 1;
        t
    };
    let eta = |hours: u64| anchor + Duration::from_secs(hours * HOUR);

    let m001 = Record::new(
        "M001",
        "Main Water Line Burst - Durban North",
        "Water",
        "Durban North",
        Priority::Critical,
        created(),
        eta(1),
    )
    .with_status(Status::InProgress)
    .with_dependents(["R101", "R102", "R103"]);

    let r101 = Record::new(
        "R101",
        "No Water - House 21",
        "Water",
        "Durban North",
        Priority::High,
        created(),
        eta(2),
    )
    .with_parent("M001");

    let r102 = Record::new(
        "R102",
        "No Water - House 45",
        "Water",
        "Durban North",
        Priority::High,
        created(),
        eta(2),
    )
    .with_parent("M001");

    let r103 = Record::new(
        "R103",
        "Low Pressure - House 63",
        "Water",
        "La Lucia",
        Priority::Medium,
        created(),
        eta(3),
    )
    .with_parent("M001");

    let m002 = Record::new(
        "M002",
        "Power Outage - Springfield Substation Failure",
        "Electrical",
        "Springfield",
        Priority::Critical,
        created(),
        eta(2),
    )
    .with_dependents(["R210", "R211"]);

    let r210 = Record::new(
        "R210",
        "Power Outage - Glenwood Area",
        "Electrical",
        "Glenwood",
        Priority::High,
        created(),
        eta(4),
    )
    .with_parent("M002");

    let r211 = Record::new(
        "R211",
        "No Power - Morningside Flats",
        "Electrical",
        "Morningside",
        Priority::High,
        created(),
        eta(5),
    )
    .with_parent("M002");

    let r201 = Record::new(
        "R201",
        "Streetlight Out - Oak Ave",
        "Electrical",
        "Musgrave",
        Priority::Medium,
        created(),
        eta(5),
    );

    let r305 = Record::new(
        "R305",
        "Missed Garbage Collection - Hillcrest",
        "Sanitation",
        "Hillcrest",
        Priority::Medium,
        created(),
        eta(10),
    );

    let r202 = Record::new(
        "R202",
        "Pothole - Pine Rd",
        "Roads",
        "Umhlanga",
        Priority::Low,
        created(),
        eta(12),
    );

    let r109 = Record::new(
        "R109",
        "Park Maintenance - Umhlanga Rocks",
        "Public Works",
        "Bluff",
        Priority::Low,
        created(),
        eta(8),
    );

    let r150 = Record::new(
        "R150",
        "Flooded Intersection - Ridge Road",
        "Roads",
        "Morningside",
        Priority::High,
        created(),
        eta(6),
    );

    vec![
        r305, r101, m002, r202, m001, r102, r201, r103, r109, r210, r211, r150,
    ]
}

/// 内置地点拓扑（距离单位 km）
pub fn seed_topology() -> Topology {
    let edge = |from: &str, to: &str, distance: f64| EdgeSpec {
        from: from.to_string(),
        to: to.to_string(),
        distance,
    };
    Topology {
        nodes: ["Durban North", "Glenwood", "Umhlanga", "Morningside", "Springfield"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        edges: vec![
            edge("Durban North", "Glenwood", 5.0),
            edge("Durban North", "Umhlanga", 8.0),
            edge("Morningside", "Glenwood", 4.2),
            edge("Umhlanga", "Springfield", 7.5),
            edge("Springfield", "Glenwood", 5.3),
        ],
    }
}
