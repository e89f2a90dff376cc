use super::*;

/// Tests creating a car.
///
/// Verifies that the repository stores every field and assigns an id.
///
/// Expected: Ok with car created
#[tokio::test]
async fn creates_car() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Car)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CarRepository::new(db);
    let car = repo.create(params("Hilux", Some("ABC123"))).await?;

    assert!(car.id > 0);
    assert_eq!(car.model, "Hilux");
    assert_eq!(car.plate, Some("ABC123".to_string()));
    assert_eq!(car.fuel_type, Some("Diesel".to_string()));
    assert_eq!(car.year, Some(2022));

    let stored = repo.get_by_id(car.id).await?;
    assert_eq!(stored, Some(car));

    Ok(())
}

/// Tests listing cars in id order.
///
/// Expected: Ok with cars ordered by id
#[tokio::test]
async fn lists_cars_in_id_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Car)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_car(db).await?;
    let second = factory::create_car(db).await?;

    let cars = CarRepository::new(db).get_all().await?;

    assert_eq!(
        cars.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![first.id, second.id]
    );

    Ok(())
}
