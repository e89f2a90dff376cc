use super::*;
use test_utils::factory::reminder::create_reminder_dest_with_status;

fn update_params(id: i32, car_id: i32, reminder_date: DateTime<Utc>) -> UpdateReminderParams {
    UpdateReminderParams {
        id,
        title: Some("Updated".to_string()),
        description: Some("New description".to_string()),
        email: None,
        reminder_date,
        author: None,
        car_id,
        recipients: None,
    }
}

/// Tests that moving the due date reschedules a sent reminder.
///
/// Verifies status returns to pending, broadcast and sent timestamps are cleared,
/// and destinations are reset.
///
/// Expected: Ok(Some) with a fresh pending reminder
#[tokio::test]
async fn new_date_reschedules_reminder() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reminder_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = factory::create_car(db).await?;
    let reminder = ReminderFactory::new(db, car.id)
        .reminder_date(now())
        .status("sent")
        .broadcast_at(Some(now()))
        .build()
        .await?;
    create_reminder_dest_with_status(db, reminder.id, "u1", "delivered", 0).await?;
    create_reminder_dest_with_status(db, reminder.id, "u2", "failed", 3).await?;

    let updated = ReminderRepository::new(db)
        .update(update_params(reminder.id, car.id, now() + Duration::days(30)))
        .await?
        .unwrap();

    assert_eq!(updated.title, Some("Updated".to_string()));
    assert_eq!(updated.status, ReminderStatus::Pending);
    assert!(updated.broadcast_at.is_none());
    assert!(updated.sent_at.is_none());
    assert_eq!(updated.destinations.len(), 2);
    assert!(updated
        .destinations
        .iter()
        .all(|d| d.status == DeliveryStatus::Pending && d.attempts == 0 && d.last_error.is_none()));

    Ok(())
}

/// Tests that editing text without moving the date keeps dispatch state.
///
/// Expected: Ok(Some) with status and destinations untouched
#[tokio::test]
async fn same_date_keeps_dispatch_state() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reminder_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = factory::create_car(db).await?;
    let reminder = ReminderFactory::new(db, car.id)
        .reminder_date(now())
        .status("sent")
        .build()
        .await?;
    create_reminder_dest_with_status(db, reminder.id, "u1", "delivered", 0).await?;

    let updated = ReminderRepository::new(db)
        .update(update_params(reminder.id, car.id, now()))
        .await?
        .unwrap();

    assert_eq!(updated.description, Some("New description".to_string()));
    assert_eq!(updated.status, ReminderStatus::Sent);
    assert_eq!(updated.destinations[0].status, DeliveryStatus::Delivered);

    Ok(())
}

/// Tests replacing the recipient list.
///
/// Expected: Ok(Some) with exactly the new recipients, all pending
#[tokio::test]
async fn recipients_replace_destinations() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reminder_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = factory::create_car(db).await?;
    let reminder = factory::create_reminder(db, car.id).await?;
    factory::create_reminder_dest(db, reminder.id, "old").await?;

    let mut params = update_params(reminder.id, car.id, reminder.reminder_date);
    params.recipients = Some(vec!["new1".to_string(), "new2".to_string()]);

    let updated = ReminderRepository::new(db).update(params).await?.unwrap();

    assert_eq!(
        updated
            .destinations
            .iter()
            .map(|d| d.user_id.as_str())
            .collect::<Vec<_>>(),
        vec!["new1", "new2"]
    );

    Ok(())
}

/// Tests updating a reminder that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_reminder() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reminder_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = factory::create_car(db).await?;

    let result = ReminderRepository::new(db)
        .update(update_params(999, car.id, now()))
        .await?;

    assert!(result.is_none());

    Ok(())
}
