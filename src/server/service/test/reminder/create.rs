use super::*;

/// Tests creating a reminder with repeated recipients.
///
/// Expected: Ok with one pending destination per distinct user, in request order
#[tokio::test]
async fn creates_one_destination_per_distinct_recipient() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_reminder_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = factory::create_car(db).await?;
    let params = CreateReminderParams::from_dto(dto(car.id, &["u2", "u1", "u2"]));

    let reminder = ReminderService::new(db).create(params).await?;

    assert_eq!(reminder.status, ReminderStatus::Pending);
    assert_eq!(
        reminder
            .destinations
            .iter()
            .map(|d| d.user_id.as_str())
            .collect::<Vec<_>>(),
        vec!["u2", "u1"]
    );

    Ok(())
}

/// Tests creating a reminder for a car that does not exist.
///
/// Expected: Err(AppError::NotFound) and nothing stored
#[tokio::test]
async fn rejects_missing_car() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_reminder_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = ReminderService::new(db);
    let result = service
        .create(CreateReminderParams::from_dto(dto(999, &["u1"])))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(service.get_all().await?.is_empty());

    Ok(())
}
