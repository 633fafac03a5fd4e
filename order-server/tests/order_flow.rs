//! 订单全流程集成测试
//!
//! 使用内存 SurrealDB 作为实体目录，内存 redb 作为快照存储，
//! 覆盖 创建 -> 确认 -> 修订 -> 确认/驳回 -> 历史查询 的完整流程。

use std::sync::Arc;

use order_server::db::directory::DbDirectory;
use order_server::db::models::{BuyerCreate, DepartmentCreate, EmployeeCreate};
use order_server::db::repository::{BuyerRepository, DepartmentRepository, EmployeeRepository};
use order_server::orders::{OrderError, OrderService, SnapshotStore};
use shared::order::{HistoryQuery, HistoryView, OrderDetail, OrderDetailPatch, OrderStatus};

struct TestEnv {
    service: OrderService,
    buyer_id: String,
    other_buyer_id: String,
    sourcing_id: String,
    production_id: String,
}

async fn setup() -> TestEnv {
    let db = order_server::db::connect_memory()
        .await
        .expect("in-memory surreal");

    let departments = DepartmentRepository::new(db.clone());
    departments
        .create(DepartmentCreate {
            department_code: "S1".to_string(),
            department_name: "Sourcing".to_string(),
        })
        .await
        .expect("create S1");
    departments
        .create(DepartmentCreate {
            department_code: "P1".to_string(),
            department_name: "Production".to_string(),
        })
        .await
        .expect("create P1");

    let buyers = BuyerRepository::new(db.clone());
    let buyer = buyers
        .create(BuyerCreate {
            buyer_name: "Acme Retail".to_string(),
            email: "acme@example.com".to_string(),
            password: "secret-pass-1".to_string(),
            date_of_birth: None,
            phone: None,
            address: None,
        })
        .await
        .expect("create buyer");
    let other_buyer = buyers
        .create(BuyerCreate {
            buyer_name: "Globex".to_string(),
            email: "globex@example.com".to_string(),
            password: "secret-pass-2".to_string(),
            date_of_birth: None,
            phone: None,
            address: None,
        })
        .await
        .expect("create other buyer");

    let employees = EmployeeRepository::new(db.clone());
    let sourcing = employees
        .create(EmployeeCreate {
            employee_name: "Sam Sourcing".to_string(),
            email: "sam@example.com".to_string(),
            password: "secret-pass-3".to_string(),
            date_of_birth: None,
            department_code: Some("S1".to_string()),
        })
        .await
        .expect("create sourcing employee");
    let production = employees
        .create(EmployeeCreate {
            employee_name: "Pat Production".to_string(),
            email: "pat@example.com".to_string(),
            password: "secret-pass-4".to_string(),
            date_of_birth: None,
            department_code: Some("P1".to_string()),
        })
        .await
        .expect("create production employee");

    let store = SnapshotStore::open_in_memory().expect("in-memory redb");
    let service = OrderService::new(store, Arc::new(DbDirectory::new(db)));

    TestEnv {
        service,
        buyer_id: buyer.buyer_id,
        other_buyer_id: other_buyer.buyer_id,
        sourcing_id: sourcing.employee_id,
        production_id: production.employee_id,
    }
}

fn sample_detail() -> OrderDetail {
    OrderDetail {
        product_name: "Canvas Tote Bag".to_string(),
        quantity: 500,
        unit_price: 1200,
        color: "Natural".to_string(),
        size: "M".to_string(),
        due_date: "20261201".to_string(),
    }
}

#[tokio::test]
async fn create_confirm_revise_confirm() {
    let env = setup().await;

    let (order, first) = env
        .service
        .create(&env.buyer_id, sample_detail())
        .await
        .expect("create order");
    assert_eq!(order.order_status, OrderStatus::Pending);
    assert_eq!(first.sequence_id, 1);

    env.service
        .confirm_by_employee(&order.order_id, &env.sourcing_id)
        .await
        .expect("confirm v1");

    let patch = OrderDetailPatch {
        quantity: Some(800),
        unit_price: Some(1100),
        ..Default::default()
    };
    env.service
        .update_by_buyer(&order.order_id, &env.buyer_id, &patch)
        .await
        .expect("buyer revision");

    let header = env.service.get_order(&order.order_id).expect("header");
    assert_eq!(header.order_status, OrderStatus::Pending);

    env.service
        .confirm_by_employee(&order.order_id, &env.sourcing_id)
        .await
        .expect("confirm v2");

    let view = env
        .service
        .history(&order.order_id, &HistoryQuery::default())
        .await
        .expect("full history");
    let HistoryView::Full(full) = view else {
        panic!("expected full history");
    };
    assert_eq!(full.total_versions, 2);
    assert_eq!(full.current_status, OrderStatus::Confirmed);
    assert_eq!(full.buyer.buyer_name, "Acme Retail");
    assert_eq!(full.history[0].version, 1);
    assert_eq!(full.history[0].snapshot.detail.quantity, 500);
    assert_eq!(full.history[1].version, 2);
    assert_eq!(full.history[1].snapshot.detail.quantity, 800);
}

#[tokio::test]
async fn reject_leaves_header_and_consumes_no_version() {
    let env = setup().await;

    let (order, _) = env
        .service
        .create(&env.buyer_id, sample_detail())
        .await
        .expect("create order");
    env.service
        .confirm_by_employee(&order.order_id, &env.sourcing_id)
        .await
        .expect("confirm v1");

    let patch = OrderDetailPatch {
        color: Some("Black".to_string()),
        ..Default::default()
    };
    env.service
        .update_by_buyer(&order.order_id, &env.buyer_id, &patch)
        .await
        .expect("buyer revision");

    env.service
        .reject_by_employee(&order.order_id, &env.sourcing_id)
        .await
        .expect("reject revision");

    // Header keeps the status set by the last buyer action
    let header = env.service.get_order(&order.order_id).expect("header");
    assert_eq!(header.order_status, OrderStatus::Pending);

    let view = env
        .service
        .history(&order.order_id, &HistoryQuery::default())
        .await
        .expect("full history");
    let HistoryView::Full(full) = view else {
        panic!("expected full history");
    };
    assert_eq!(full.total_versions, 1);
    assert_eq!(full.history[0].snapshot.detail.color, "Natural");
}

#[tokio::test]
async fn update_requires_ownership_and_confirmed_state() {
    let env = setup().await;

    let (order, _) = env
        .service
        .create(&env.buyer_id, sample_detail())
        .await
        .expect("create order");

    let patch = OrderDetailPatch {
        quantity: Some(10),
        ..Default::default()
    };

    // Another buyer cannot revise
    let err = env
        .service
        .update_by_buyer(&order.order_id, &env.other_buyer_id, &patch)
        .await
        .expect_err("foreign buyer");
    assert!(matches!(err, OrderError::Invalid(ref msg)
        if msg == "Order is not buyer's order"));

    // Latest snapshot is still pending, revision is not allowed yet
    let err = env
        .service
        .update_by_buyer(&order.order_id, &env.buyer_id, &patch)
        .await
        .expect_err("pending latest");
    assert!(matches!(err, OrderError::NotFound(ref msg)
        if msg == "Previous request is not in confirm state"));

    // Empty patch is rejected before any lookups
    let err = env
        .service
        .update_by_buyer(&order.order_id, &env.buyer_id, &OrderDetailPatch::default())
        .await
        .expect_err("empty patch");
    assert!(matches!(err, OrderError::Invalid(ref msg)
        if msg == "At least one field must be provided"));
}

#[tokio::test]
async fn confirm_requires_sourcing_department() {
    let env = setup().await;

    let (order, _) = env
        .service
        .create(&env.buyer_id, sample_detail())
        .await
        .expect("create order");

    let err = env
        .service
        .confirm_by_employee(&order.order_id, &env.production_id)
        .await
        .expect_err("wrong department");
    assert!(matches!(err, OrderError::Invalid(ref msg)
        if msg == "Department is not sourcing team"));

    // Pending-state check precedes the employee check
    env.service
        .confirm_by_employee(&order.order_id, &env.sourcing_id)
        .await
        .expect("confirm v1");
    let err = env
        .service
        .confirm_by_employee(&order.order_id, &env.production_id)
        .await
        .expect_err("nothing pending");
    assert!(matches!(err, OrderError::NotFound(ref msg)
        if msg == "Previous request is not in pending state"));
}

#[tokio::test]
async fn version_lookup_and_compare() {
    let env = setup().await;

    let (order, _) = env
        .service
        .create(&env.buyer_id, sample_detail())
        .await
        .expect("create order");
    env.service
        .confirm_by_employee(&order.order_id, &env.sourcing_id)
        .await
        .expect("confirm v1");
    env.service
        .update_by_buyer(
            &order.order_id,
            &env.buyer_id,
            &OrderDetailPatch {
                quantity: Some(800),
                ..Default::default()
            },
        )
        .await
        .expect("revision");
    env.service
        .confirm_by_employee(&order.order_id, &env.sourcing_id)
        .await
        .expect("confirm v2");

    let view = env
        .service
        .history(
            &order.order_id,
            &HistoryQuery {
                version: Some(1),
                ..Default::default()
            },
        )
        .await
        .expect("version lookup");
    let HistoryView::Version(v1) = view else {
        panic!("expected version view");
    };
    assert_eq!(v1.version, 1);
    assert_eq!(v1.snapshot.detail.quantity, 500);

    // Out-of-range versions name the valid range
    for bad in [0u32, 3] {
        let err = env
            .service
            .history(
                &order.order_id,
                &HistoryQuery {
                    version: Some(bad),
                    ..Default::default()
                },
            )
            .await
            .expect_err("out of range");
        assert!(matches!(err, OrderError::Invalid(ref msg)
            if msg == &format!("Version {bad} does not exist. Available version: 1-2")));
    }

    let view = env
        .service
        .history(
            &order.order_id,
            &HistoryQuery {
                from_version: Some(1),
                to_version: Some(2),
                ..Default::default()
            },
        )
        .await
        .expect("compare");
    let HistoryView::Compare(diff) = view else {
        panic!("expected compare view");
    };
    assert_eq!(diff.changed_fields, 1);
    assert_eq!(diff.changes[0].field, "quantity");
    assert_eq!(diff.changes[0].difference, Some(300));

    // Comparing a version to itself yields no changes
    let view = env
        .service
        .history(
            &order.order_id,
            &HistoryQuery {
                from_version: Some(1),
                to_version: Some(1),
                ..Default::default()
            },
        )
        .await
        .expect("self compare");
    let HistoryView::Compare(diff) = view else {
        panic!("expected compare view");
    };
    assert_eq!(diff.changed_fields, 0);
    assert!(diff.changes.is_empty());
}

#[tokio::test]
async fn time_travel_before_first_snapshot_is_not_found() {
    let env = setup().await;

    let (order, first) = env
        .service
        .create(&env.buyer_id, sample_detail())
        .await
        .expect("create order");

    let before = (first.created_at / 1000) - 60;
    let err = env
        .service
        .history(
            &order.order_id,
            &HistoryQuery {
                timestamp: Some(before.to_string()),
                ..Default::default()
            },
        )
        .await
        .expect_err("before first snapshot");
    assert!(matches!(err, OrderError::NotFound(_)));

    let after = (first.created_at / 1000) + 60;
    let view = env
        .service
        .history(
            &order.order_id,
            &HistoryQuery {
                timestamp: Some(after.to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("after first snapshot");
    let HistoryView::TimeTravel(tt) = view else {
        panic!("expected time travel view");
    };
    // No confirmed snapshot yet, version in effect is 0
    assert_eq!(tt.version, 0);
    assert_eq!(tt.snapshot.sequence_id, first.sequence_id);
}

#[tokio::test]
async fn snapshot_store_survives_reopen() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("orders.redb");

    let order_id;
    {
        let store = SnapshotStore::open(&path).expect("open store");
        let db = order_server::db::connect_memory().await.expect("surreal");
        let buyers = BuyerRepository::new(db.clone());
        let buyer = buyers
            .create(BuyerCreate {
                buyer_name: "Acme Retail".to_string(),
                email: "persist@example.com".to_string(),
                password: "secret-pass-9".to_string(),
                date_of_birth: None,
                phone: None,
                address: None,
            })
            .await
            .expect("create buyer");

        let service = OrderService::new(store, Arc::new(DbDirectory::new(db)));
        let (order, _) = service
            .create(&buyer.buyer_id, sample_detail())
            .await
            .expect("create order");
        order_id = order.order_id;
    }

    let reopened = SnapshotStore::open(&path).expect("reopen store");
    let header = reopened.get_order(&order_id).expect("read header");
    assert!(header.is_some());
    let snapshots = reopened.get_snapshots(&order_id).expect("read snapshots");
    assert_eq!(snapshots.len(), 1);
}

#[tokio::test]
async fn create_rejects_unknown_buyer() {
    let env = setup().await;

    let err = env
        .service
        .create("buyer-missing", sample_detail())
        .await
        .expect_err("unknown buyer");
    assert!(matches!(err, OrderError::NotFound(_)));
}
