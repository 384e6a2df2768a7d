use hrbook_core::db::{ensure_schema, open_db_in_memory};
use hrbook_core::{
    DepartmentRepository, EmployeeRepository, ReviewRepository, SqliteDepartmentRepository,
    SqliteEmployeeRepository, SqliteReviewRepository,
};

#[test]
fn records_serialize_with_expected_fields() {
    let conn = open_db_in_memory().unwrap();
    ensure_schema(&conn).unwrap();
    let department = SqliteDepartmentRepository::new(&conn)
        .create("Research", "Lab 2")
        .unwrap();
    let employee = SqliteEmployeeRepository::new(&conn)
        .create("Mo", "Scientist", department.id.unwrap())
        .unwrap();
    let mut reviews = SqliteReviewRepository::new(&conn, SqliteEmployeeRepository::new(&conn));
    let review = reviews.create(2025, "Published twice", 1).unwrap();

    let json = serde_json::to_value(&*review.borrow()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": 1,
            "year": 2025,
            "summary": "Published twice",
            "employee_id": 1
        })
    );

    let json = serde_json::to_value(&employee).unwrap();
    assert_eq!(json["job_title"], "Scientist");
    assert_eq!(json["department_id"], 1);

    let json = serde_json::to_value(&department).unwrap();
    assert_eq!(json["location"], "Lab 2");
}

#[test]
fn display_uses_record_format() {
    let conn = open_db_in_memory().unwrap();
    ensure_schema(&conn).unwrap();
    let department = SqliteDepartmentRepository::new(&conn)
        .create("Research", "Lab 2")
        .unwrap();
    SqliteEmployeeRepository::new(&conn)
        .create("Mo", "Scientist", department.id.unwrap())
        .unwrap();
    let mut reviews = SqliteReviewRepository::new(&conn, SqliteEmployeeRepository::new(&conn));

    let review = reviews.create(2023, "Great work", 1).unwrap();
    assert_eq!(
        review.borrow().to_string(),
        "<Review 1: 2023, Great work, Employee: 1>"
    );
}
