use super::*;
use crate::server::{error::mail::MailError, service::notification::EmailSender};

/// Tests delivery when one destination has no matching user.
///
/// Verifies that with three destinations where the second user does not exist,
/// the first and third receive mail, the second is skipped, and the reminder is
/// finalised as sent.
///
/// Expected: Ok with two deliveries and the reminder sent
#[tokio::test]
async fn skips_missing_user_and_delivers_the_rest() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_reminder_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = factory::create_car(db).await?;
    user(db, "first").await?;
    user(db, "third").await?;
    let reminder = ReminderFactory::new(db, car.id)
        .reminder_date(now() - Duration::hours(1))
        .build()
        .await?;
    factory::create_reminder_dest(db, reminder.id, "first").await?;
    factory::create_reminder_dest(db, reminder.id, "ghost").await?;
    factory::create_reminder_dest(db, reminder.id, "third").await?;

    let mailer = RecordingMailer::new();
    let hub = NotificationHub::new();
    let report = run_cycle(db, &mailer, &hub).await?;

    assert_eq!(report.selected, 1);
    assert_eq!(report.sent, 1);
    assert_eq!(report.deliveries, 2);
    assert_eq!(report.failures, 0);
    assert_eq!(
        mailer.recipients(),
        vec!["first@example.com", "third@example.com"]
    );

    let stored = ReminderRepository::new(db)
        .get_by_id(reminder.id)
        .await?
        .unwrap();
    assert_eq!(stored.status, ReminderStatus::Sent);
    assert_eq!(stored.sent_at, Some(now()));
    assert_eq!(
        stored
            .destinations
            .iter()
            .map(|d| d.status)
            .collect::<Vec<_>>(),
        vec![
            DeliveryStatus::Delivered,
            DeliveryStatus::Skipped,
            DeliveryStatus::Delivered
        ]
    );

    Ok(())
}

/// Tests that a sent reminder is never sent again.
///
/// Expected: Ok with nothing selected on the second cycle and no extra mail
#[tokio::test]
async fn sent_reminder_is_not_resent() -> Result<(), AppError> {
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
        .build()
        .await?;
    factory::create_reminder_dest(db, reminder.id, "driver").await?;

    let mailer = RecordingMailer::new();
    let hub = NotificationHub::new();
    let mut subscriber = hub.subscribe();

    run_cycle(db, &mailer, &hub).await?;
    let second = run_cycle(db, &mailer, &hub).await?;

    assert_eq!(second, DispatchReport::default());
    assert_eq!(mailer.sent().len(), 1);
    assert!(subscriber.recv().await.is_ok());
    assert!(subscriber.try_recv().is_err());

    Ok(())
}

/// Tests the rendered email for a reminder without title or description.
///
/// Expected: Ok with fallback texts in subject and body, and the car plate shown
#[tokio::test]
async fn renders_fallbacks_in_sent_mail() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_reminder_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = CarFactory::new(db).plate("ABC123").build().await?;
    user(db, "driver").await?;
    let reminder = ReminderFactory::new(db, car.id)
        .title(None)
        .description(None)
        .reminder_date(now())
        .build()
        .await?;
    factory::create_reminder_dest(db, reminder.id, "driver").await?;

    let mailer = RecordingMailer::new();
    run_cycle(db, &mailer, &NotificationHub::new()).await?;

    let mail = &mailer.sent()[0];
    assert_eq!(mail.subject, "Fleet Reminder: Sin título");
    assert!(mail.html_body.contains("Sin descripción."));
    assert!(mail.html_body.contains("ABC123"));
    assert!(mail.html_body.contains("10/03/2026 12:00 UTC"));

    Ok(())
}

/// Tests that the legacy email field is never used as a delivery target.
///
/// Expected: Ok with the reminder sent and no mail, since it has no destinations
#[tokio::test]
async fn ignores_legacy_email_field() -> Result<(), AppError> {
    use sea_orm::{ActiveModelTrait, ActiveValue};

    let test = TestBuilder::new()
        .with_reminder_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = factory::create_car(db).await?;
    let reminder = ReminderFactory::new(db, car.id)
        .reminder_date(now())
        .build()
        .await?;
    entity::reminder::ActiveModel {
        id: ActiveValue::Unchanged(reminder.id),
        email: ActiveValue::Set(Some("legacy@example.com".to_string())),
        ..Default::default()
    }
    .update(db)
    .await?;

    let mailer = RecordingMailer::new();
    let report = run_cycle(db, &mailer, &NotificationHub::new()).await?;

    assert_eq!(report.sent, 1);
    assert!(mailer.sent().is_empty());

    Ok(())
}

/// Tests that a reminder claimed by another worker is left alone.
///
/// Expected: Ok with nothing selected and no mail
#[tokio::test]
async fn leaves_dispatching_reminder_alone() -> Result<(), AppError> {
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
        .status("dispatching")
        .build()
        .await?;
    factory::create_reminder_dest(db, reminder.id, "driver").await?;

    let mailer = RecordingMailer::new();
    let report = run_cycle(db, &mailer, &NotificationHub::new()).await?;

    assert_eq!(report.selected, 0);
    assert!(mailer.sent().is_empty());

    Ok(())
}

/// Transport that deletes one reminder while its email is in flight.
struct DeletingMailer {
    db: DatabaseConnection,
    reminder_id: i32,
    trigger: String,
    inner: RecordingMailer,
}

#[async_trait::async_trait]
impl EmailSender for DeletingMailer {
    async fn send_email(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError> {
        if to == self.trigger {
            ReminderRepository::new(&self.db)
                .delete(self.reminder_id)
                .await
                .unwrap();
        }

        self.inner.send_email(to, subject, html_body).await
    }
}

/// Tests that a persistence error on one reminder does not stop the batch.
///
/// Verifies that when the first reminder's row disappears mid-send, so recording
/// its delivery fails, the second reminder in the same cycle is still sent.
///
/// Expected: Ok with one reminder sent and the failed one left out of the counts
#[tokio::test]
async fn persistence_error_aborts_only_that_reminder() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_reminder_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = factory::create_car(db).await?;
    user(db, "first").await?;
    user(db, "second").await?;
    let doomed = ReminderFactory::new(db, car.id)
        .reminder_date(now() - Duration::hours(2))
        .build()
        .await?;
    factory::create_reminder_dest(db, doomed.id, "first").await?;
    let survivor = ReminderFactory::new(db, car.id)
        .reminder_date(now() - Duration::hours(1))
        .build()
        .await?;
    factory::create_reminder_dest(db, survivor.id, "second").await?;

    let mailer = DeletingMailer {
        db: db.clone(),
        reminder_id: doomed.id,
        trigger: "first@example.com".to_string(),
        inner: RecordingMailer::new(),
    };
    let report = ReminderDispatcher::new(
        db,
        &mailer,
        &NotificationHub::new(),
        &DispatchSettings::default(),
    )
    .dispatch_due(now(), &CancellationToken::new())
    .await?;

    assert_eq!(report.selected, 2);
    assert_eq!(report.sent, 1);
    assert_eq!(report.deliveries, 1);

    let repo = ReminderRepository::new(db);
    assert!(repo.get_by_id(doomed.id).await?.is_none());
    let sent = repo.get_by_id(survivor.id).await?.unwrap();
    assert_eq!(sent.status, ReminderStatus::Sent);
    assert_eq!(sent.destinations[0].status, DeliveryStatus::Delivered);

    Ok(())
}
