use super::*;

/// Tests creating a reminder with destinations.
///
/// Verifies that the reminder starts pending and gets one pending destination per
/// recipient, in request order.
///
/// Expected: Ok with reminder and destinations created
#[tokio::test]
async fn creates_pending_reminder_with_destinations() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reminder_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = factory::create_car(db).await?;

    let reminder = ReminderRepository::new(db)
        .create(CreateReminderParams {
            title: Some("Oil change".to_string()),
            description: None,
            email: Some("legacy@example.com".to_string()),
            reminder_date: now(),
            author: Some("fleet-admin".to_string()),
            car_id: car.id,
            recipients: vec!["u1".to_string(), "u2".to_string()],
        })
        .await?;

    assert_eq!(reminder.status, ReminderStatus::Pending);
    assert_eq!(reminder.car_id, car.id);
    assert_eq!(reminder.email, Some("legacy@example.com".to_string()));
    assert!(reminder.broadcast_at.is_none());
    assert!(reminder.sent_at.is_none());

    let users: Vec<_> = reminder
        .destinations
        .iter()
        .map(|d| d.user_id.as_str())
        .collect();
    assert_eq!(users, vec!["u1", "u2"]);
    assert!(reminder
        .destinations
        .iter()
        .all(|d| d.status == DeliveryStatus::Pending && d.attempts == 0));

    Ok(())
}

/// Tests listing a car's reminders.
///
/// Expected: Ok with only that car's reminders, newest due date first
#[tokio::test]
async fn lists_reminders_by_car_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reminder_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = factory::create_car(db).await?;
    let other = factory::create_car(db).await?;

    let older = ReminderFactory::new(db, car.id)
        .reminder_date(now() - Duration::days(3))
        .build()
        .await?;
    let newer = ReminderFactory::new(db, car.id)
        .reminder_date(now())
        .build()
        .await?;
    factory::create_reminder(db, other.id).await?;

    let reminders = ReminderRepository::new(db).get_by_car(car.id).await?;

    assert_eq!(
        reminders.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![newer.id, older.id]
    );

    Ok(())
}
