use super::*;
use crate::model::notification::REMINDER_NOTIFICATION_EVENT;

/// Tests that one reminder yields one realtime notification regardless of
/// how many destinations it has.
///
/// Expected: Ok with a single envelope carrying the reminder, car and recipients
#[tokio::test]
async fn broadcasts_once_per_reminder() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_reminder_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = CarFactory::new(db).plate("XYZ789").build().await?;
    for id in ["a", "b", "c"] {
        user(db, id).await?;
    }
    let reminder = ReminderFactory::new(db, car.id)
        .title(Some("Cambio de aceite".to_string()))
        .reminder_date(now())
        .build()
        .await?;
    for id in ["a", "b", "c"] {
        factory::create_reminder_dest(db, reminder.id, id).await?;
    }

    let mailer = RecordingMailer::new();
    let hub = NotificationHub::new();
    let mut subscriber = hub.subscribe();

    run_cycle(db, &mailer, &hub).await?;

    let envelope = subscriber.try_recv().unwrap();
    assert!(subscriber.try_recv().is_err());
    assert_eq!(envelope.event, REMINDER_NOTIFICATION_EVENT);
    assert_eq!(envelope.payload["id"], reminder.id);
    assert_eq!(envelope.payload["title"], "Cambio de aceite");
    assert_eq!(envelope.payload["car"]["plate"], "XYZ789");
    assert_eq!(envelope.payload["recipients"], serde_json::json!(["a", "b", "c"]));
    assert_eq!(mailer.sent().len(), 3);

    let stored = ReminderRepository::new(db)
        .get_by_id(reminder.id)
        .await?
        .unwrap();
    assert_eq!(stored.broadcast_at, Some(now()));

    Ok(())
}

/// Tests that a reminder already broadcast on an earlier attempt is not
/// broadcast again.
///
/// Expected: Ok with mail sent and no envelope published
#[tokio::test]
async fn skips_broadcast_when_already_published() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_reminder_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = factory::create_car(db).await?;
    user(db, "driver").await?;
    let reminder = ReminderFactory::new(db, car.id)
        .reminder_date(now())
        .broadcast_at(Some(now() - Duration::minutes(5)))
        .build()
        .await?;
    factory::create_reminder_dest(db, reminder.id, "driver").await?;

    let mailer = RecordingMailer::new();
    let hub = NotificationHub::new();
    let mut subscriber = hub.subscribe();

    run_cycle(db, &mailer, &hub).await?;

    assert!(subscriber.try_recv().is_err());
    assert_eq!(mailer.recipients(), vec!["driver@example.com"]);

    Ok(())
}
