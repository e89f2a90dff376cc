use super::*;

/// Tests claiming a pending reminder.
///
/// Verifies that the first claim wins and moves the reminder to dispatching, and
/// that a second claim on the same reminder loses.
///
/// Expected: Ok(true) then Ok(false)
#[tokio::test]
async fn only_first_claim_wins() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reminder_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = factory::create_car(db).await?;
    let reminder = factory::create_reminder(db, car.id).await?;
    let repo = ReminderRepository::new(db);

    assert!(repo.claim(reminder.id).await?);
    assert!(!repo.claim(reminder.id).await?);

    let stored = repo.get_by_id(reminder.id).await?.unwrap();
    assert_eq!(stored.status, ReminderStatus::Dispatching);

    Ok(())
}

/// Tests that a sent reminder cannot be claimed.
///
/// Expected: Ok(false) and the reminder stays sent
#[tokio::test]
async fn cannot_claim_sent_reminder() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_reminder_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = factory::create_car(db).await?;
    let reminder = ReminderFactory::new(db, car.id)
        .status("sent")
        .build()
        .await?;
    let repo = ReminderRepository::new(db);

    assert!(!repo.claim(reminder.id).await?);
    assert_eq!(
        repo.get_by_id(reminder.id).await?.unwrap().status,
        ReminderStatus::Sent
    );

    Ok(())
}
