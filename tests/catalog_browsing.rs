//! Filtering and sorting the demo catalog fixture.

use testresult::TestResult;

use storefront::prelude::*;

fn demo() -> Result<Catalog<'static>, FixtureError> {
    CatalogFixtures::default().load("demo")
}

fn ids(view: &[&Product<'_>]) -> Vec<String> {
    view.iter().map(|product| product.id.to_string()).collect()
}

#[test]
fn featured_keeps_catalog_order() -> TestResult {
    let catalog = demo()?;

    let view = project(&catalog, &CatalogQuery::default());

    let catalog_ids: Vec<String> = catalog.iter().map(|product| product.id.to_string()).collect();

    assert_eq!(ids(&view), catalog_ids);
    assert_eq!(view.len(), 10);

    Ok(())
}

#[test]
fn text_query_is_case_insensitive_over_name_and_description() -> TestResult {
    let catalog = demo()?;

    let view = project(
        &catalog,
        &CatalogQuery {
            text: "LaMp".to_string(),
            ..CatalogQuery::default()
        },
    );

    assert_eq!(ids(&view), vec!["p-1", "p-8", "p-10"]);

    Ok(())
}

#[test]
fn price_sorts_reverse_each_other_without_ties() -> TestResult {
    let catalog = demo()?;

    let query = |sort| CatalogQuery {
        category: CategoryFilter::Only(Category::Tech),
        sort,
        ..CatalogQuery::default()
    };

    let asc = ids(&project(&catalog, &query(SortKey::PriceAsc)));
    let mut desc = ids(&project(&catalog, &query(SortKey::PriceDesc)));

    assert_eq!(asc, vec!["p-8", "p-2"]);

    desc.reverse();
    assert_eq!(asc, desc);

    Ok(())
}

#[test]
fn price_ties_keep_catalog_order() -> TestResult {
    let catalog = demo()?;

    let view = project(
        &catalog,
        &CatalogQuery {
            sort: SortKey::PriceAsc,
            ..CatalogQuery::default()
        },
    );

    assert_eq!(
        ids(&view),
        vec!["p-9", "p-4", "p-8", "p-3", "p-1", "p-7", "p-5", "p-10", "p-6", "p-2"]
    );

    Ok(())
}

#[test]
fn rating_sort_puts_best_rated_first() -> TestResult {
    let catalog = demo()?;

    let view = project(
        &catalog,
        &CatalogQuery {
            sort: SortKey::Rating,
            ..CatalogQuery::default()
        },
    );

    assert_eq!(
        ids(&view),
        vec!["p-3", "p-1", "p-6", "p-8", "p-2", "p-5", "p-9", "p-4", "p-10", "p-7"]
    );

    Ok(())
}

#[test]
fn combined_filters_can_match_nothing() -> TestResult {
    let catalog = demo()?;

    let view = project(
        &catalog,
        &CatalogQuery {
            text: "lamp".to_string(),
            category: CategoryFilter::Only(Category::Kids),
            sort: SortKey::Rating,
        },
    );

    assert!(view.is_empty());

    Ok(())
}

#[test]
fn projection_does_not_touch_the_catalog() -> TestResult {
    let catalog = demo()?;
    let before: Vec<String> = catalog.iter().map(|product| product.id.to_string()).collect();

    let _view = project(
        &catalog,
        &CatalogQuery {
            sort: SortKey::PriceDesc,
            ..CatalogQuery::default()
        },
    );

    let after: Vec<String> = catalog.iter().map(|product| product.id.to_string()).collect();

    assert_eq!(before, after);

    Ok(())
}
