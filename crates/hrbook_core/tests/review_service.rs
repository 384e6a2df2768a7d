use hrbook_core::db::{ensure_schema, open_db_in_memory};
use hrbook_core::{
    review_handle, DepartmentRepository, EmployeeRepository, RepoError, Review,
    ReviewRepository, ReviewService, SqliteDepartmentRepository, SqliteEmployeeRepository,
    SqliteReviewRepository,
};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = open_db_in_memory().unwrap();
    ensure_schema(&conn).unwrap();
    let department = SqliteDepartmentRepository::new(&conn)
        .create("Sales", "Annex")
        .unwrap();
    let employees = SqliteEmployeeRepository::new(&conn);
    employees
        .create("Kim", "Rep", department.id.unwrap())
        .unwrap();
    employees
        .create("Noor", "Lead", department.id.unwrap())
        .unwrap();
    conn
}

fn stored_employee_id(conn: &Connection, id: i64) -> i64 {
    conn.query_row(
        "SELECT employee_id FROM reviews WHERE id = ?1;",
        [id],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn reassign_updates_instance_and_row() {
    let conn = setup();
    let repo = SqliteReviewRepository::new(&conn, SqliteEmployeeRepository::new(&conn));
    let mut service = ReviewService::new(repo);
    service.prepare_storage().unwrap();

    let review = service.create_review(2024, "Quarterly", 1).unwrap();
    service.reassign(&review, 2).unwrap();

    assert_eq!(review.borrow().employee_id(), 2);
    assert_eq!(stored_employee_id(&conn, 1), 2);
    assert_eq!(service.reviews_for_employee(2).unwrap().len(), 1);
}

#[test]
fn reassign_to_unknown_employee_changes_nothing() {
    let conn = setup();
    let repo = SqliteReviewRepository::new(&conn, SqliteEmployeeRepository::new(&conn));
    let mut service = ReviewService::new(repo);

    let review = service.create_review(2024, "Quarterly", 1).unwrap();
    let err = service.reassign(&review, 404).unwrap_err();

    assert!(err.is_invalid_reference());
    assert_eq!(review.borrow().employee_id(), 1);
    assert_eq!(stored_employee_id(&conn, 1), 1);
}

#[test]
fn revise_summary_rejects_blank_and_keeps_row() {
    let conn = setup();
    let repo = SqliteReviewRepository::new(&conn, SqliteEmployeeRepository::new(&conn));
    let mut service = ReviewService::new(repo);

    let review = service.create_review(2024, "Keep me", 1).unwrap();
    assert!(service.revise_summary(&review, "\t").unwrap_err().is_invalid_value());
    service.revise_summary(&review, " Better ").unwrap();

    let reloaded = service.get_review(1).unwrap().unwrap();
    assert_eq!(reloaded.borrow().summary(), " Better ");
    assert_eq!(service.list_reviews().unwrap().len(), 1);
}

#[test]
fn mutation_helpers_require_saved_review() {
    let conn = setup();
    let repo = SqliteReviewRepository::new(&conn, SqliteEmployeeRepository::new(&conn));
    let mut service = ReviewService::new(repo);

    let unsaved = review_handle(
        Review::new(2024, "Unsaved", 1, service.repository().employees()).unwrap(),
    );
    let err = service.reassign(&unsaved, 2).unwrap_err();
    assert!(matches!(err, RepoError::NotPersisted { .. }));
    assert_eq!(unsaved.borrow().employee_id(), 1);

    let err = service.revise_summary(&unsaved, "Changed").unwrap_err();
    assert!(matches!(err, RepoError::NotPersisted { .. }));
    assert_eq!(unsaved.borrow().summary(), "Unsaved");
}

#[test]
fn remove_review_deletes_row() {
    let conn = setup();
    let repo = SqliteReviewRepository::new(&conn, SqliteEmployeeRepository::new(&conn));
    let mut service = ReviewService::new(repo);

    let review = service.create_review(2024, "Short lived", 2).unwrap();
    service.remove_review(&review).unwrap();

    assert!(review.borrow().id().is_none());
    assert!(service.get_review(1).unwrap().is_none());
    assert_eq!(service.repository().identity_map_len(), 0);
}

#[test]
fn reassign_of_borrowed_review_returns_error() {
    let conn = setup();
    let repo = SqliteReviewRepository::new(&conn, SqliteEmployeeRepository::new(&conn));
    let mut service = ReviewService::new(repo);

    let review = service.create_review(2024, "Quarterly", 1).unwrap();
    let guard = review.borrow();
    let err = service.reassign(&review, 2).unwrap_err();
    assert!(matches!(err, RepoError::InstanceBorrowed { .. }));
    drop(guard);

    assert_eq!(review.borrow().employee_id(), 1);
    assert_eq!(stored_employee_id(&conn, 1), 1);
}
