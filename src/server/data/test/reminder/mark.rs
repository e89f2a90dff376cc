use super::*;

/// Tests the status transitions recorded during dispatch.
///
/// Verifies broadcast, delivered, failed and skipped markers, then finalisation.
///
/// Expected: Ok with every marker persisted
#[tokio::test]
async fn records_dispatch_outcomes() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reminder_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = factory::create_car(db).await?;
    let reminder = factory::create_reminder(db, car.id).await?;
    let delivered = factory::create_reminder_dest(db, reminder.id, "u1").await?;
    let failed = factory::create_reminder_dest(db, reminder.id, "u2").await?;
    let skipped = factory::create_reminder_dest(db, reminder.id, "u3").await?;

    let repo = ReminderRepository::new(db);
    repo.claim(reminder.id).await?;
    repo.mark_broadcast(reminder.id, now()).await?;
    repo.mark_dest_delivered(delivered.id, now()).await?;
    repo.mark_dest_failed(failed.id, 1, "relay down").await?;
    repo.mark_dest_skipped(skipped.id).await?;
    repo.mark_sent(reminder.id, now()).await?;

    let stored = repo.get_by_id(reminder.id).await?.unwrap();
    assert_eq!(stored.status, ReminderStatus::Sent);
    assert_eq!(stored.broadcast_at, Some(now()));
    assert_eq!(stored.sent_at, Some(now()));

    let dests = &stored.destinations;
    assert_eq!(dests[0].status, DeliveryStatus::Delivered);
    assert_eq!(dests[0].delivered_at, Some(now()));
    assert_eq!(dests[1].status, DeliveryStatus::Failed);
    assert_eq!(dests[1].attempts, 1);
    assert_eq!(dests[1].last_error.as_deref(), Some("relay down"));
    assert_eq!(dests[2].status, DeliveryStatus::Skipped);

    Ok(())
}

/// Tests releasing a claimed reminder.
///
/// Expected: Ok with the reminder back to pending
#[tokio::test]
async fn release_returns_reminder_to_pending() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reminder_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = factory::create_car(db).await?;
    let reminder = factory::create_reminder(db, car.id).await?;
    let repo = ReminderRepository::new(db);

    repo.claim(reminder.id).await?;
    repo.release(reminder.id).await?;

    assert_eq!(
        repo.get_by_id(reminder.id).await?.unwrap().status,
        ReminderStatus::Pending
    );

    Ok(())
}
