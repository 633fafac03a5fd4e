//! 实体目录集成测试
//!
//! 覆盖买家/员工/部门仓储的创建、查询、更新和删除。

use order_server::db::models::{
    BuyerCreate, BuyerUpdate, DepartmentCreate, DepartmentUpdate, EmployeeCreate, EmployeeUpdate,
};
use order_server::db::repository::{
    BuyerRepository, DepartmentRepository, EmployeeRepository, RepoError,
};

async fn repos() -> (BuyerRepository, EmployeeRepository, DepartmentRepository) {
    let db = order_server::db::connect_memory()
        .await
        .expect("in-memory surreal");
    (
        BuyerRepository::new(db.clone()),
        EmployeeRepository::new(db.clone()),
        DepartmentRepository::new(db),
    )
}

fn buyer_payload(email: &str) -> BuyerCreate {
    BuyerCreate {
        buyer_name: "Acme Retail".to_string(),
        email: email.to_string(),
        password: "secret-pass-1".to_string(),
        date_of_birth: Some("1990-04-01".to_string()),
        phone: None,
        address: None,
    }
}

#[tokio::test]
async fn buyer_create_update_delete() {
    let (buyers, _, _) = repos().await;

    let buyer = buyers
        .create(buyer_payload("acme@example.com"))
        .await
        .expect("create buyer");
    assert_eq!(buyer.date_of_birth.as_deref(), Some("1990-04-01"));
    assert!(buyer.verify_password("secret-pass-1").unwrap());

    let updated = buyers
        .update(
            &buyer.buyer_id,
            BuyerUpdate {
                phone: Some("555-0100".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("update buyer");
    assert_eq!(updated.phone.as_deref(), Some("555-0100"));
    // untouched fields keep their values
    assert_eq!(updated.buyer_name, "Acme Retail");
    assert_eq!(updated.email, "acme@example.com");

    buyers.delete(&buyer.buyer_id).await.expect("delete buyer");
    assert!(buyers.find_by_id(&buyer.buyer_id).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let (buyers, _, _) = repos().await;

    buyers
        .create(buyer_payload("dup@example.com"))
        .await
        .expect("first create");
    let err = buyers
        .create(buyer_payload("dup@example.com"))
        .await
        .expect_err("duplicate email");
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn employee_department_filter_and_update() {
    let (_, employees, departments) = repos().await;

    departments
        .create(DepartmentCreate {
            department_code: "S1".to_string(),
            department_name: "Sourcing".to_string(),
        })
        .await
        .expect("create S1");

    let employee = employees
        .create(EmployeeCreate {
            employee_name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            password: "secret-pass-2".to_string(),
            date_of_birth: None,
            department_code: None,
        })
        .await
        .expect("create employee");
    assert!(employees.find_by_department("S1").await.unwrap().is_empty());

    let updated = employees
        .update(
            &employee.employee_id,
            EmployeeUpdate {
                department_code: Some("S1".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("assign department");
    assert_eq!(updated.department_code.as_deref(), Some("S1"));

    let in_s1 = employees.find_by_department("S1").await.unwrap();
    assert_eq!(in_s1.len(), 1);
    assert_eq!(in_s1[0].employee_id, employee.employee_id);
}

#[tokio::test]
async fn department_rename_keeps_code() {
    let (_, _, departments) = repos().await;

    departments
        .create(DepartmentCreate {
            department_code: "P1".to_string(),
            department_name: "Production".to_string(),
        })
        .await
        .expect("create P1");

    let renamed = departments
        .update(
            "P1",
            DepartmentUpdate {
                department_name: Some("Manufacturing".to_string()),
            },
        )
        .await
        .expect("rename");
    assert_eq!(renamed.department_code, "P1");
    assert_eq!(renamed.department_name, "Manufacturing");

    let err = departments
        .update("ZZ", DepartmentUpdate::default())
        .await
        .expect_err("unknown code");
    assert!(matches!(err, RepoError::NotFound(_)));
}
