mod common;

use anyhow::Result;
use common::{Shop, fast_config, memory_service, test_service, test_service_with};
use xpense::application::AppError;
use xpense::domain::{SimulationError, ValidationError, ZeroQuantityPolicy};

#[tokio::test]
async fn test_report_and_simulation_scenario() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let shop = Shop::open(&service, "alice").await?;
    let product = shop.product(&service, "Notebook", 10000).await?;

    service.add_expense(product, "ink", 2000).await?;
    service.add_expense(product, "paper", 3000).await?;

    let report = service.report(product).await?;
    assert_eq!(report.price, 10000);
    assert_eq!(report.total_expenses, 5000);
    assert_eq!(report.net_income_per_unit, 5000);
    assert_eq!(report.product_name, "Notebook");

    let simulation = service.simulate_profit(product, 10).await?;
    assert_eq!(simulation.net_income_per_unit, 5000);
    assert_eq!(simulation.total_profit, 50000);

    Ok(())
}

#[tokio::test]
async fn test_report_without_expenses_totals_zero() -> Result<()> {
    let service = memory_service().await?;
    let shop = Shop::open(&service, "alice").await?;
    let product = shop.product(&service, "Notebook", 4999).await?;

    let report = service.report(product).await?;
    assert_eq!(report.total_expenses, 0);
    assert_eq!(report.net_income_per_unit, 4999);

    Ok(())
}

#[tokio::test]
async fn test_total_matches_sum_of_amounts() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let shop = Shop::open(&service, "alice").await?;
    let product = shop.product(&service, "Lamp", 2500).await?;

    let amounts = [1, 99, 1234, 5000, 1];
    for (i, amount) in amounts.iter().enumerate() {
        service
            .add_expense(product, &format!("part {i}"), *amount)
            .await?;
    }

    let report = service.report(product).await?;
    let expected: i64 = amounts.iter().sum();
    assert_eq!(report.total_expenses, expected);
    assert_eq!(report.net_income_per_unit, 2500 - expected);

    Ok(())
}

#[tokio::test]
async fn test_expenses_can_exceed_price() -> Result<()> {
    let service = memory_service().await?;
    let shop = Shop::open(&service, "alice").await?;
    let product = shop.product(&service, "Mug", 800).await?;
    service.add_expense(product, "clay", 1000).await?;

    let report = service.report(product).await?;
    assert_eq!(report.net_income_per_unit, -200);
    assert_eq!(service.simulate_profit(product, 3).await?.total_profit, -600);

    Ok(())
}

#[tokio::test]
async fn test_invalid_expenses_rejected() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let shop = Shop::open(&service, "alice").await?;
    let product = shop.product(&service, "Notebook", 10000).await?;

    let zero = service.add_expense(product, "ink", 0).await.unwrap_err();
    assert!(matches!(
        zero,
        AppError::Validation(ValidationError::NotPositive(_))
    ));

    let negative = service.add_expense(product, "ink", -2000).await.unwrap_err();
    assert!(matches!(negative, AppError::Validation(_)));

    let blank = service.add_expense(product, "", 2000).await.unwrap_err();
    assert!(matches!(
        blank,
        AppError::Validation(ValidationError::EmptyField(_))
    ));

    assert!(service.list_expenses(product).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_expense_for_missing_product() -> Result<()> {
    let service = memory_service().await?;

    let err = service.add_expense(404, "ink", 2000).await.unwrap_err();
    assert!(matches!(err, AppError::ProductNotFound(404)));

    Ok(())
}

#[tokio::test]
async fn test_remove_expense_by_position() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let shop = Shop::open(&service, "alice").await?;
    let product = shop.product(&service, "Notebook", 10000).await?;
    service.add_expense(product, "ink", 2000).await?;
    service.add_expense(product, "paper", 3000).await?;
    service.add_expense(product, "glue", 500).await?;

    let removed = service.remove_expense(product, "2").await?;
    assert_eq!(removed.name, "paper");

    let remaining: Vec<String> = service
        .list_expenses(product)
        .await?
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(remaining, ["ink", "glue"]);
    assert_eq!(service.report(product).await?.total_expenses, 2500);

    Ok(())
}

#[tokio::test]
async fn test_remove_expense_invalid_selection() -> Result<()> {
    let service = memory_service().await?;
    let shop = Shop::open(&service, "alice").await?;
    let product = shop.product(&service, "Notebook", 10000).await?;
    service.add_expense(product, "ink", 2000).await?;

    for selection in ["2", "0", "ink"] {
        assert!(matches!(
            service.remove_expense(product, selection).await,
            Err(AppError::InvalidSelection(_))
        ));
    }
    assert_eq!(service.list_expenses(product).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_ledgers_are_per_product() -> Result<()> {
    let service = memory_service().await?;
    let shop = Shop::open(&service, "alice").await?;
    let notebook = shop.product(&service, "Notebook", 10000).await?;
    let mug = shop.product(&service, "Mug", 800).await?;

    service.add_expense(notebook, "ink", 2000).await?;
    service.add_expense(mug, "clay", 300).await?;

    // Position 1 in the mug's ledger is the clay, not the ink
    let removed = service.remove_expense(mug, "1").await?;
    assert_eq!(removed.name, "clay");
    assert_eq!(service.list_expenses(notebook).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_report_missing_product() -> Result<()> {
    let service = memory_service().await?;

    assert!(matches!(
        service.report(7).await,
        Err(AppError::ProductNotFound(7))
    ));

    Ok(())
}

#[tokio::test]
async fn test_simulation_rejects_bad_quantities() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let shop = Shop::open(&service, "alice").await?;
    let product = shop.product(&service, "Notebook", 10000).await?;

    assert!(matches!(
        service.simulate_profit(product, -1).await,
        Err(AppError::Simulation(SimulationError::NegativeQuantity))
    ));
    assert!(matches!(
        service.simulate_profit(product, 0).await,
        Err(AppError::Simulation(SimulationError::ZeroQuantity))
    ));
    assert!(matches!(
        service.simulate_profit(999, 5).await,
        Err(AppError::Simulation(SimulationError::ProductNotFound(999)))
    ));

    Ok(())
}

#[tokio::test]
async fn test_zero_quantity_allowed_by_config() -> Result<()> {
    let config = fast_config().with_zero_quantity(ZeroQuantityPolicy::Allow);
    let (service, _temp) = test_service_with(config).await?;
    assert_eq!(service.config().zero_quantity, ZeroQuantityPolicy::Allow);
    let shop = Shop::open(&service, "alice").await?;
    let product = shop.product(&service, "Notebook", 10000).await?;

    let simulation = service.simulate_profit(product, 0).await?;
    assert_eq!(simulation.total_profit, 0);

    // Negative quantities stay rejected
    assert!(matches!(
        service.simulate_profit(product, -5).await,
        Err(AppError::Simulation(SimulationError::NegativeQuantity))
    ));

    Ok(())
}

#[tokio::test]
async fn test_expense_total_overflow_rejected() -> Result<()> {
    let service = memory_service().await?;
    let shop = Shop::open(&service, "alice").await?;
    let product = shop.product(&service, "Notebook", 10000).await?;

    let huge = 5_000_000_000_000_000_000;
    service.add_expense(product, "tooling", huge).await?;

    let err = service.add_expense(product, "more tooling", huge).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::TotalOutOfRange(_))
    ));
    assert!(err.is_recoverable());

    // The ledger still holds a summable total
    assert_eq!(service.list_expenses(product).await?.len(), 1);
    let report = service.report(product).await?;
    assert_eq!(report.total_expenses, huge);
    assert_eq!(report.net_income_per_unit, 10000 - huge);

    Ok(())
}
