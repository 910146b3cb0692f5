//! POS 业务流程集成测试
//!
//! 需要一个可用的 PostgreSQL 实例：
//!
//! ```text
//! TEST_DATABASE_URL=postgres://localhost/till_test cargo test
//! ```
//!
//! 未设置 TEST_DATABASE_URL 时全部跳过。

use rand::Rng;
use rust_decimal::Decimal;
use sqlx::PgPool;

use till_server::db::DbService;
use till_server::db::models::{Admin, BillLineInput, NewBill, PaymentMode, Product, ProductCreate};
use till_server::db::repository::{
    AdminRepository, AnalyticsRepository, BillRepository, ProductRepository, RepoError,
    StockUpdateRepository,
};

/// Connect to the test database, or skip the test when none is configured
async fn test_pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping database test");
        return None;
    };

    let db = DbService::new(&url, 5)
        .await
        .expect("Failed to connect to test database");
    Some(db.pool)
}

fn unique(label: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..u32::MAX);
    format!("{label}-{suffix:08x}")
}

async fn seed_product(pool: &PgPool, name: &str, price: &str, stock: i32) -> Product {
    ProductRepository::new(pool.clone())
        .create(ProductCreate {
            name: name.to_string(),
            price: price.parse().expect("test price should parse"),
            stock,
            image_url: None,
        })
        .await
        .expect("Failed to seed product")
}

async fn current_stock(pool: &PgPool, product_id: i32) -> i32 {
    sqlx::query_scalar("SELECT stock FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_one(pool)
        .await
        .expect("Product should exist")
}

fn line(product_id: i32, quantity: i32) -> BillLineInput {
    BillLineInput {
        product_id,
        quantity,
    }
}

fn new_bill(customer: &str, items: Vec<BillLineInput>) -> NewBill {
    NewBill {
        customer_name: customer.to_string(),
        items,
        payment_mode: PaymentMode::Cash,
        custom_total: None,
    }
}

#[tokio::test]
async fn bill_creation_decrements_stock_and_freezes_price() {
    let Some(pool) = test_pool().await else { return };
    let repo = BillRepository::new(pool.clone());

    let product = seed_product(&pool, &unique("Dog Food"), "500", 10).await;

    let bill = repo
        .create(new_bill("Walk-in", vec![line(product.id, 3)]))
        .await
        .expect("Bill creation should succeed");

    assert_eq!(current_stock(&pool, product.id).await, 7);
    assert_eq!(bill.total, Decimal::from(1500));
    assert_eq!(bill.items.len(), 1);
    assert_eq!(bill.items[0].quantity, 3);
    assert_eq!(bill.items[0].price, Decimal::from(500));
    assert_eq!(bill.items[0].product_name, product.name);
}

#[tokio::test]
async fn custom_total_overrides_computed_total() {
    let Some(pool) = test_pool().await else { return };
    let repo = BillRepository::new(pool.clone());

    let product = seed_product(&pool, &unique("Cat Litter"), "250", 5).await;

    let mut input = new_bill("Regular", vec![line(product.id, 2)]);
    input.custom_total = Some(Decimal::from(450));

    let bill = repo.create(input).await.expect("Bill creation should succeed");
    assert_eq!(bill.total, Decimal::from(450));

    // Line items still carry the real unit price
    assert_eq!(bill.items[0].price, Decimal::from(250));
}

#[tokio::test]
async fn insufficient_stock_fails_with_exact_message_and_no_side_effects() {
    let Some(pool) = test_pool().await else { return };
    let repo = BillRepository::new(pool.clone());

    let product = seed_product(&pool, &unique("Dog Food"), "500", 2).await;
    let customer = unique("Oversell");

    let err = repo
        .create(new_bill(&customer, vec![line(product.id, 5)]))
        .await
        .expect_err("Oversell must fail");

    assert_eq!(
        err.to_string(),
        format!("Insufficient stock for {}. Only 2 left.", product.name)
    );
    assert_eq!(current_stock(&pool, product.id).await, 2);

    let bills: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bills WHERE customer_name = $1")
        .bind(&customer)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(bills, 0, "No bill row may survive a failed transaction");
}

#[tokio::test]
async fn failing_item_rolls_back_earlier_decrements() {
    let Some(pool) = test_pool().await else { return };
    let repo = BillRepository::new(pool.clone());

    let plenty = seed_product(&pool, &unique("Bird Seed"), "120", 10).await;
    let scarce = seed_product(&pool, &unique("Fish Flakes"), "80", 1).await;

    let err = repo
        .create(new_bill(
            &unique("Partial"),
            vec![line(plenty.id, 2), line(scarce.id, 5)],
        ))
        .await
        .expect_err("Second line must sink the whole bill");

    assert!(matches!(err, RepoError::InsufficientStock { .. }));
    // The first line's decrement must not survive the rollback
    assert_eq!(current_stock(&pool, plenty.id).await, 10);
    assert_eq!(current_stock(&pool, scarce.id).await, 1);
}

#[tokio::test]
async fn unknown_product_fails_the_bill() {
    let Some(pool) = test_pool().await else { return };
    let repo = BillRepository::new(pool.clone());

    let customer = unique("Ghost");
    let err = repo
        .create(new_bill(&customer, vec![line(i32::MAX, 1)]))
        .await
        .expect_err("Unknown product must fail");

    assert!(matches!(err, RepoError::NotFound(_)));

    let bills: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bills WHERE customer_name = $1")
        .bind(&customer)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(bills, 0);
}

#[tokio::test]
async fn concurrent_bills_never_oversell() {
    let Some(pool) = test_pool().await else { return };

    let product = seed_product(&pool, &unique("Last Unit"), "999", 1).await;

    let repo_a = BillRepository::new(pool.clone());
    let repo_b = BillRepository::new(pool.clone());
    let (id_a, id_b) = (product.id, product.id);

    let (a, b) = tokio::join!(
        tokio::spawn(async move { repo_a.create(new_bill("Racer A", vec![line(id_a, 1)])).await }),
        tokio::spawn(async move { repo_b.create(new_bill("Racer B", vec![line(id_b, 1)])).await }),
    );

    let results = [a.unwrap(), b.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();

    assert_eq!(successes, 1, "Exactly one of the racing bills may win");
    assert_eq!(current_stock(&pool, product.id).await, 0);

    let loser = results
        .iter()
        .find_map(|r| r.as_ref().err())
        .expect("One bill must lose");
    assert!(matches!(loser, RepoError::InsufficientStock { .. }));
}

#[tokio::test]
async fn product_with_sales_history_cannot_be_deleted() {
    let Some(pool) = test_pool().await else { return };
    let products = ProductRepository::new(pool.clone());
    let bills = BillRepository::new(pool.clone());

    let product = seed_product(&pool, &unique("Hamster Wheel"), "300", 8).await;
    bills
        .create(new_bill("History", vec![line(product.id, 1)]))
        .await
        .expect("Bill creation should succeed");

    let err = products
        .delete(product.id)
        .await
        .expect_err("Referenced product must not be deletable");
    assert!(matches!(err, RepoError::Conflict(_)));

    // Product and its stock untouched
    assert_eq!(current_stock(&pool, product.id).await, 7);
}

#[tokio::test]
async fn deleting_a_bill_removes_items_but_keeps_stock() {
    let Some(pool) = test_pool().await else { return };
    let bills = BillRepository::new(pool.clone());

    let product = seed_product(&pool, &unique("Leash"), "150", 10).await;
    let bill = bills
        .create(new_bill("To Delete", vec![line(product.id, 4)]))
        .await
        .expect("Bill creation should succeed");
    assert_eq!(current_stock(&pool, product.id).await, 6);

    bills.delete(bill.id).await.expect("Bill deletion should succeed");

    let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bill_items WHERE bill_id = $1")
        .bind(bill.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(items, 0, "Line items must be cascaded away");

    // No stock restoration on bill deletion
    assert_eq!(current_stock(&pool, product.id).await, 6);

    let err = bills.delete(bill.id).await.expect_err("Bill is already gone");
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn stock_correction_writes_one_audit_entry() {
    let Some(pool) = test_pool().await else { return };
    let products = ProductRepository::new(pool.clone());
    let audit = StockUpdateRepository::new(pool.clone());

    let product = seed_product(&pool, &unique("Aquarium"), "2000", 3).await;

    let updated = products
        .update_stock(product.id, 12, "shop_admin")
        .await
        .expect("Stock correction should succeed");
    assert_eq!(updated.stock, 12);

    let history = audit
        .find_by_product(product.id)
        .await
        .expect("Audit query should succeed");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].old_stock, 3);
    assert_eq!(history[0].new_stock, 12);
    assert_eq!(history[0].updated_by, "shop_admin");
    assert_eq!(history[0].product_name, product.name);

    let err = products
        .update_stock(i32::MAX, 5, "shop_admin")
        .await
        .expect_err("Unknown product must 404");
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn bill_driven_decrements_do_not_touch_the_audit_log() {
    let Some(pool) = test_pool().await else { return };
    let bills = BillRepository::new(pool.clone());
    let audit = StockUpdateRepository::new(pool.clone());

    let product = seed_product(&pool, &unique("Chew Toy"), "90", 6).await;
    bills
        .create(new_bill("No Audit", vec![line(product.id, 2)]))
        .await
        .expect("Bill creation should succeed");

    let history = audit.find_by_product(product.id).await.unwrap();
    assert!(history.is_empty(), "Sales must not write audit entries");
}

#[tokio::test]
async fn monthly_report_for_empty_month_is_all_zeros() {
    let Some(pool) = test_pool().await else { return };
    let analytics = AnalyticsRepository::new(pool.clone());

    // Nothing in this suite writes bills dated 2001-02
    let summary = analytics
        .monthly_summary_for(2001, 2)
        .await
        .expect("Summary query should succeed");

    assert_eq!(summary.total_amount, Decimal::ZERO);
    assert_eq!(summary.total_bills, 0);
    assert_eq!(summary.cash_amount, Decimal::ZERO);
    assert_eq!(summary.online_amount, Decimal::ZERO);

    let products = analytics.monthly_product_sales(2001, 2).await.unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn best_selling_reflects_quantities() {
    let Some(pool) = test_pool().await else { return };
    let bills = BillRepository::new(pool.clone());
    let analytics = AnalyticsRepository::new(pool.clone());

    let product = seed_product(&pool, &unique("Top Seller"), "10", 100).await;
    bills
        .create(new_bill("Bulk", vec![line(product.id, 60)]))
        .await
        .expect("Bill creation should succeed");

    let best = analytics.best_selling().await.expect("Query should succeed");
    assert!(best.len() <= 10);
    let entry = best.iter().find(|p| p.id == product.id);
    if let Some(entry) = entry {
        assert_eq!(entry.total_quantity, 60);
        assert_eq!(entry.total_revenue, Decimal::from(600));
    }
    // With ten busier products in the shared test database the new product
    // may not chart; either way the list stays capped at ten.
}

#[tokio::test]
async fn admin_credentials_roundtrip() {
    let Some(pool) = test_pool().await else { return };
    let admins = AdminRepository::new(pool.clone());

    let username = unique("admin");
    let hash = Admin::hash_password("saad@petshop").expect("hashing should succeed");
    admins.upsert(&username, &hash).await.expect("Upsert should succeed");

    let admin = admins
        .find_by_username(&username)
        .await
        .expect("Query should succeed")
        .expect("Admin should exist");

    assert!(admin.verify_password("saad@petshop").unwrap());
    assert!(!admin.verify_password("wrong").unwrap());

    assert!(
        admins
            .find_by_username(&unique("nobody"))
            .await
            .unwrap()
            .is_none()
    );
}
