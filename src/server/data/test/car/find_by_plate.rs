use super::*;
use test_utils::factory::car::CarFactory;

/// Tests that plate lookup ignores case.
///
/// Verifies that a lowercase plate finds a car stored with an uppercase plate.
///
/// Expected: Ok(Some) with the matching car
#[tokio::test]
async fn matches_plate_ignoring_case() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Car)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let car = CarFactory::new(db).plate("ABC123").build().await?;

    let found = CarRepository::new(db).find_by_plate("abc123").await?;

    assert_eq!(found.map(|c| c.id), Some(car.id));

    Ok(())
}

/// Tests that the lowest id wins when plates collide.
///
/// Expected: Ok(Some) with the first car created
#[tokio::test]
async fn prefers_lowest_id_on_duplicate_plates() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Car)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = CarFactory::new(db).plate("XYZ999").build().await?;
    CarFactory::new(db).plate("xyz999").build().await?;

    let found = CarRepository::new(db).find_by_plate("Xyz999").await?;

    assert_eq!(found.map(|c| c.id), Some(first.id));

    Ok(())
}

/// Tests lookup of a plate no car carries.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_plate() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Car)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    CarFactory::new(db).plate("ABC123").build().await?;
    CarFactory::new(db).no_plate().build().await?;

    let found = CarRepository::new(db).find_by_plate("ZZZ000").await?;

    assert!(found.is_none());

    Ok(())
}

/// Tests plate lookup with a non-ASCII capital letter.
///
/// Verifies that both the identical plate and its lowercase form find a car
/// created through the repository.
///
/// Expected: Ok(Some) for both spellings
#[tokio::test]
async fn matches_non_ascii_plate_ignoring_case() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Car)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CarRepository::new(db);
    let car = repo.create(params("Hilux", Some("ÑAB123"))).await?;

    assert_eq!(repo.find_by_plate("ÑAB123").await?.map(|c| c.id), Some(car.id));
    assert_eq!(repo.find_by_plate("ñab123").await?.map(|c| c.id), Some(car.id));

    Ok(())
}

/// Tests that changing a plate moves its lookup key along with it.
///
/// Expected: Ok(Some) for the new plate, Ok(None) for the old one
#[tokio::test]
async fn follows_plate_changes() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Car)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CarRepository::new(db);
    let car = repo.create(params("Hilux", Some("OLD111"))).await?;
    repo.update(car.id, params("Hilux", Some("NEW222"))).await?;

    assert!(repo.find_by_plate("old111").await?.is_none());
    assert_eq!(repo.find_by_plate("new222").await?.map(|c| c.id), Some(car.id));

    Ok(())
}
