use flatseller_config::DatabaseConfig;
use flatseller_database::{
    initialize_database, FlatRepository, FlatStatus, HouseRepository, Role,
};
use flatseller_housing::{FlatService, FlatVisibility, HouseService, HousingError};
use tempfile::TempDir;

type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

struct TestContext {
    flats: FlatService,
    houses: HouseService,
    _temp_dir: TempDir,
}

impl TestContext {
    async fn new() -> TestResult<Self> {
        let temp_dir = TempDir::new()?;
        let config = DatabaseConfig {
            url: format!("sqlite://{}", temp_dir.path().join("housing.db").display()),
            max_connections: 4,
        };
        let pool = initialize_database(&config).await?;

        Ok(Self {
            flats: FlatService::new(FlatRepository::new(pool.clone())),
            houses: HouseService::new(HouseRepository::new(pool.clone()), FlatRepository::new(pool)),
            _temp_dir: temp_dir,
        })
    }
}

#[tokio::test]
async fn house_is_created_with_optional_developer() -> TestResult {
    let ctx = TestContext::new().await?;

    let with_developer = ctx.houses.save_house("Tverskaya 7", 1937, Some("Mosstroy")).await?;
    let without = ctx.houses.save_house("Arbat 2", 1890, None).await?;

    assert_eq!(with_developer.address, "Tverskaya 7");
    assert_eq!(with_developer.year, 1937);
    assert_eq!(with_developer.developer.as_deref(), Some("Mosstroy"));
    assert!(without.developer.is_none());
    assert!(without.id > with_developer.id);
    Ok(())
}

#[tokio::test]
async fn fresh_house_numbers_flats_from_one() -> TestResult {
    let ctx = TestContext::new().await?;
    let house = ctx.houses.save_house("Lenina 1", 2001, None).await?;

    let first = ctx.flats.save_flat(house.id, 3_000_000, 1).await?;
    let second = ctx.flats.save_flat(house.id, 4_500_000, 2).await?;

    assert_eq!(first.flat_number, 1);
    assert_eq!(second.flat_number, 2);
    assert_eq!(first.status, FlatStatus::Created);
    assert_eq!(second.house_id, house.id);
    Ok(())
}

#[tokio::test]
async fn flat_under_missing_house_is_a_store_error() -> TestResult {
    let ctx = TestContext::new().await?;

    let err = ctx.flats.save_flat(999, 100, 1).await.unwrap_err();
    assert!(matches!(err, HousingError::Store(_)), "unexpected: {err:?}");
    Ok(())
}

#[cfg(not(feature = "strict-transitions"))]
#[tokio::test]
async fn listing_is_filtered_by_caller_role() -> TestResult {
    let ctx = TestContext::new().await?;
    let house = ctx.houses.save_house("Sadovaya 3", 1975, None).await?;

    for status in ["created", "approved", "declined"] {
        let flat = ctx.flats.save_flat(house.id, 1_000_000, 1).await?;
        if status != "created" {
            ctx.flats.update_flat(flat.id, flat.price, flat.rooms, status).await?;
        }
    }

    let as_user = ctx
        .houses
        .list_flats(house.id, FlatVisibility::for_role(Role::User))
        .await?;
    let as_admin = ctx
        .houses
        .list_flats(house.id, FlatVisibility::for_role(Role::Admin))
        .await?;

    assert_eq!(as_user.len(), 1);
    assert_eq!(as_user[0].status, FlatStatus::Approved);
    assert_eq!(as_admin.len(), 3);
    let numbers: Vec<_> = as_admin.iter().map(|flat| flat.flat_number).collect();
    assert_eq!(numbers, [1, 2, 3]);
    Ok(())
}

#[tokio::test]
async fn unknown_house_lists_nothing() -> TestResult {
    let ctx = TestContext::new().await?;

    let flats = ctx.houses.list_flats(12345, FlatVisibility::All).await?;
    assert!(flats.is_empty());
    Ok(())
}

#[tokio::test]
async fn update_of_unknown_flat_is_not_found() -> TestResult {
    let ctx = TestContext::new().await?;

    let err = ctx.flats.update_flat(77, 100, 1, "moderation").await.unwrap_err();
    assert!(matches!(err, HousingError::FlatNotFound(77)));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn every_write_is_visible_to_the_next_listing() -> TestResult {
    let ctx = TestContext::new().await?;
    let house = ctx.houses.save_house("Nevsky 28", 1904, None).await?;

    for round in 1..=40_usize {
        let flat = ctx.flats.save_flat(house.id, 2_000_000, 2).await?;

        let as_admin = ctx.houses.list_flats(house.id, FlatVisibility::All).await?;
        assert_eq!(as_admin.len(), round, "admin listing after create #{round}");

        let moderated = ctx
            .flats
            .update_flat(flat.id, flat.price, flat.rooms, "moderation")
            .await?;
        assert_eq!(moderated.status, FlatStatus::Moderation);

        let approved = ctx
            .flats
            .update_flat(flat.id, flat.price, flat.rooms, "approved")
            .await?;
        assert_eq!(approved.status, FlatStatus::Approved);

        let as_user = ctx
            .houses
            .list_flats(house.id, FlatVisibility::ApprovedOnly)
            .await?;
        assert_eq!(as_user.len(), round, "user listing after approval #{round}");
    }
    Ok(())
}

#[cfg(feature = "strict-transitions")]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_approve_and_decline_apply_only_one() -> TestResult {
    let ctx = TestContext::new().await?;
    let house = ctx.houses.save_house("Liteyny 4", 1932, None).await?;

    for _ in 0..20 {
        let flat = ctx.flats.save_flat(house.id, 1_000_000, 1).await?;
        ctx.flats.update_flat(flat.id, 1_000_000, 1, "moderation").await?;

        let (approve, decline) = tokio::join!(
            ctx.flats.update_flat(flat.id, 1_000_000, 1, "approved"),
            ctx.flats.update_flat(flat.id, 1_000_000, 1, "declined"),
        );

        let (winner, loser) = match (approve, decline) {
            (Ok(flat), Err(err)) | (Err(err), Ok(flat)) => (flat, err),
            other => panic!("exactly one update should apply: {other:?}"),
        };
        assert!(
            matches!(
                loser,
                HousingError::InvalidStatusTransition { from, .. } if from == winner.status
            ),
            "unexpected: {loser:?}"
        );

        let listed = ctx.houses.list_flats(house.id, FlatVisibility::All).await?;
        let stored = listed.iter().find(|f| f.id == flat.id).expect("flat listed");
        assert_eq!(stored.status, winner.status);
    }
    Ok(())
}

#[cfg(feature = "strict-transitions")]
#[tokio::test]
async fn stepwise_moderation_succeeds_right_after_creation() -> TestResult {
    let ctx = TestContext::new().await?;
    let house = ctx.houses.save_house("Moika 12", 1800, None).await?;

    let flat = ctx.flats.save_flat(house.id, 100, 1).await?;
    let err = ctx.flats.update_flat(flat.id, 100, 1, "approved").await.unwrap_err();
    assert!(matches!(
        err,
        HousingError::InvalidStatusTransition {
            from: FlatStatus::Created,
            to: FlatStatus::Approved
        }
    ));

    ctx.flats.update_flat(flat.id, 100, 1, "moderation").await?;
    ctx.flats.update_flat(flat.id, 100, 1, "declined").await?;
    ctx.flats.update_flat(flat.id, 100, 1, "moderation").await?;
    let approved = ctx.flats.update_flat(flat.id, 100, 1, "approved").await?;
    assert_eq!(approved.status, FlatStatus::Approved);
    Ok(())
}
