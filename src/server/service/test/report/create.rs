use super::*;

/// Tests linking a report to a car whose plate differs only in case.
///
/// Expected: Ok with car_id set on the returned and the stored report
#[tokio::test]
async fn links_car_ignoring_plate_case() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_report_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = CarFactory::new(db).plate("ABC123").build().await?;
    let service = ReportService::new(db);

    let report = service.create(issue_params("r-1", Some(" abc123 "))).await?;

    assert_eq!(report.car_id, Some(car.id));
    let stored = service.get_by_id("r-1").await?.unwrap();
    assert_eq!(stored.car_id, Some(car.id));
    assert_eq!(stored.car_plate.as_deref(), Some(" abc123 "));

    Ok(())
}

/// Tests that an unknown plate stores the report without a car.
///
/// Expected: Ok with car_id None
#[tokio::test]
async fn unknown_plate_leaves_report_unlinked() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_report_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    CarFactory::new(db).plate("ABC123").build().await?;
    let service = ReportService::new(db);

    let report = service.create(issue_params("r-1", Some("ZZZ999"))).await?;
    assert_eq!(report.car_id, None);

    let unplated = service.create(issue_params("r-2", Some("   "))).await?;
    assert_eq!(unplated.car_id, None);

    let stored = service.get_by_id("r-1").await?.unwrap();
    assert_eq!(stored.car_id, None);

    Ok(())
}

/// Tests that a report id can only be used once.
///
/// Expected: Err(AppError::Conflict) on the second create
#[tokio::test]
async fn rejects_duplicate_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_report_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = ReportService::new(db);
    service.create(issue_params("r-1", None)).await?;

    let result = service.create(issue_params("r-1", None)).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests deleting a stored report and an unknown one.
///
/// Expected: Ok with the deleted flag set, Err(AppError::NotFound) for the unknown id
#[tokio::test]
async fn delete_flags_report() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_report_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = ReportService::new(db);
    service.create(issue_params("r-1", None)).await?;

    service.delete("r-1").await?;

    assert!(service.get_by_id("r-1").await?.unwrap().deleted);
    assert!(matches!(
        service.delete("missing").await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests plate resolution with a non-ASCII capital letter.
///
/// Expected: Ok with car_id set for both the identical and the lowercase plate
#[tokio::test]
async fn links_car_with_non_ascii_plate() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_report_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = CarFactory::new(db).plate("ÑAB123").build().await?;
    let service = ReportService::new(db);

    let exact = service.create(issue_params("r-1", Some("ÑAB123"))).await?;
    let lower = service.create(issue_params("r-2", Some("ñab123"))).await?;

    assert_eq!(exact.car_id, Some(car.id));
    assert_eq!(lower.car_id, Some(car.id));

    Ok(())
}

/// Tests the mapping applied when an insert loses a race on the report id.
///
/// Verifies that the primary key violation raised by a second insert of the same
/// id becomes a conflict rather than a database error.
///
/// Expected: AppError::Conflict
#[tokio::test]
async fn maps_duplicate_insert_to_conflict() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_report_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ReportRepository::new(db);
    repo.create(issue_params("r-1", None)).await?;

    let err = repo.create(issue_params("r-1", None)).await.unwrap_err();

    assert!(matches!(
        conflict_on_duplicate("r-1", err),
        AppError::Conflict(_)
    ));

    Ok(())
}
