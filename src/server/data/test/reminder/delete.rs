use super::*;

/// Tests deleting a reminder with destinations.
///
/// Expected: Ok(true), reminder and destinations gone; a second delete is Ok(false)
#[tokio::test]
async fn deletes_reminder_and_destinations() -> Result<(), DbErr> {
    use sea_orm::{EntityTrait, PaginatorTrait};

    let test = TestBuilder::new()
        .with_reminder_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_car, _user, reminder, _dest) =
        factory::helpers::create_reminder_with_dependencies(db).await?;
    let repo = ReminderRepository::new(db);

    assert!(repo.delete(reminder.id).await?);
    assert!(repo.get_by_id(reminder.id).await?.is_none());
    assert_eq!(entity::prelude::ReminderDest::find().count(db).await?, 0);
    assert!(!repo.delete(reminder.id).await?);

    Ok(())
}
