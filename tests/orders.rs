//! Database-backed order flow tests.
//!
//! They run against the database named by `TEST_DATABASE_URL` and are
//! skipped when it is not set.

use bigdecimal::BigDecimal;
use chrono::{Duration, Utc};
use flashbites_backend_rs::{
    modules::{
        cart::{self, repository::CartItem},
        coupon::{self, repository::DiscountType},
        menu::{self, repository::MenuItem},
        notification::service::{EventKind, Hub},
        order::{
            self,
            repository::{OrderActor, OrderStatus, PaymentMethod, PaymentStatus},
            service::{Checkout, CheckoutError},
        },
        pricing,
        restaurant::{self, repository::Restaurant},
        user::{
            self,
            repository::{Role, User},
        },
    },
    types::{AppContext, AppEnvironment, AuthContext, Context, OrderContext},
    utils::database,
};
use std::str::FromStr;
use std::sync::Arc;
use ulid::Ulid;

async fn test_context() -> Option<Arc<Context>> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let db_conn = database::connect(&url, 4).await;
    database::migrate(db_conn.clone()).await;

    Some(Arc::new(Context {
        app: AppContext {
            host: String::from("127.0.0.1"),
            environment: AppEnvironment::Development,
            port: 8000,
            url: String::from("http://127.0.0.1:8000"),
        },
        db_conn,
        auth: AuthContext {
            session_ttl: Duration::hours(1),
        },
        orders: OrderContext {
            acceptance_timeout: Duration::minutes(15),
        },
        notifications: Hub::new(),
    }))
}

fn unique(prefix: &str) -> String {
    format!("{}{}", prefix, &Ulid::new().to_string()[16..])
}

async fn create_user(ctx: &Context, role: Role) -> User {
    user::repository::upsert_by_email(
        &ctx.db_conn.pool,
        user::repository::UpsertUserPayload {
            email: format!("{}@flashbites.test", unique("user").to_lowercase()),
            first_name: String::from("Test"),
            last_name: String::from("User"),
            role,
        },
    )
    .await
    .expect("Failed to create user")
}

async fn create_restaurant(ctx: &Context) -> Restaurant {
    let owner = create_user(ctx, Role::RestaurantOwner).await;

    restaurant::repository::create(
        &ctx.db_conn.pool,
        restaurant::repository::CreateRestaurantPayload {
            name: String::from("Dosa Corner"),
            description: String::new(),
            address: String::from("12 MG Road"),
            phone_number: String::from("+919800000000"),
            cuisine: String::from("South Indian"),
            latitude: 12.9716,
            longitude: 77.5946,
            opening_time: String::from("08:00"),
            closing_time: String::from("22:00"),
            owner_id: owner.id,
        },
    )
    .await
    .expect("Failed to create restaurant")
}

async fn create_menu_item(ctx: &Context, restaurant: &Restaurant, price: &str) -> MenuItem {
    menu::repository::create(
        &ctx.db_conn.pool,
        menu::repository::CreateMenuItemPayload {
            name: String::from("Masala Dosa"),
            description: String::new(),
            price: BigDecimal::from_str(price).unwrap(),
            category: String::from("Mains"),
            is_veg: true,
            restaurant_id: restaurant.id.clone(),
        },
    )
    .await
    .expect("Failed to create menu item")
}

async fn create_coupon(ctx: &Context, usage_limit: Option<i32>) -> coupon::repository::Coupon {
    let now = Utc::now().naive_utc();

    coupon::repository::create(
        &ctx.db_conn.pool,
        coupon::repository::CreateCouponPayload {
            code: unique("T"),
            description: String::new(),
            discount_type: DiscountType::Fixed,
            value: BigDecimal::from(50),
            max_discount: None,
            min_order_value: BigDecimal::from(0),
            valid_from: now - Duration::hours(1),
            valid_until: now + Duration::days(1),
            usage_limit,
            restaurant_id: None,
        },
    )
    .await
    .expect("Failed to create coupon")
}

async fn fill_cart(ctx: &Context, customer: &User, menu_item: &MenuItem, quantity: i32) {
    let cart = cart::repository::find_or_create_by_owner_id(&ctx.db_conn.pool, customer.id.clone())
        .await
        .expect("Failed to create cart");

    cart::repository::update_by_id(
        &ctx.db_conn.pool,
        cart.id,
        cart::repository::UpdateCartPayload {
            restaurant_id: Some(menu_item.restaurant_id.clone()),
            items: vec![CartItem {
                menu_item_id: menu_item.id.clone(),
                quantity,
            }],
        },
    )
    .await
    .expect("Failed to fill cart");
}

fn checkout(customer: &User, restaurant: &Restaurant) -> Checkout {
    Checkout {
        customer_id: customer.id.clone(),
        payment_method: PaymentMethod::CashOnDelivery,
        delivery_address: String::from("4 Church Street"),
        destination: restaurant.coordinates(),
        note: None,
    }
}

async fn cart_size(ctx: &Context, customer: &User) -> usize {
    cart::repository::find_or_create_by_owner_id(&ctx.db_conn.pool, customer.id.clone())
        .await
        .expect("Failed to load cart")
        .items
        .0
        .len()
}

async fn used_count(ctx: &Context, coupon_id: &str) -> i32 {
    coupon::repository::find_by_id(&ctx.db_conn.pool, coupon_id.to_string())
        .await
        .expect("Failed to load coupon")
        .expect("Coupon vanished")
        .used_count
}

#[tokio::test]
async fn last_coupon_use_goes_to_exactly_one_caller() {
    let Some(ctx) = test_context().await else {
        eprintln!("Skipping test: TEST_DATABASE_URL not set");
        return;
    };

    let coupon = create_coupon(&ctx, Some(1)).await;
    let pool = &ctx.db_conn.pool;

    let (first, second) = tokio::join!(
        coupon::repository::consume_usage(pool, coupon.id.clone()),
        coupon::repository::consume_usage(pool, coupon.id.clone())
    );

    let granted = [first.unwrap(), second.unwrap()]
        .into_iter()
        .filter(Option::is_some)
        .count();
    assert_eq!(granted, 1);
    assert_eq!(used_count(&ctx, &coupon.id).await, 1);
}

#[tokio::test]
async fn checkout_writes_order_history_and_clears_the_cart() {
    let Some(ctx) = test_context().await else {
        eprintln!("Skipping test: TEST_DATABASE_URL not set");
        return;
    };

    let restaurant = create_restaurant(&ctx).await;
    let dosa = create_menu_item(&ctx, &restaurant, "120.00").await;
    let customer = create_user(&ctx, Role::Customer).await;
    let coupon = create_coupon(&ctx, Some(1)).await;
    fill_cart(&ctx, &customer, &dosa, 2).await;

    let mut events = ctx.notifications.subscribe();

    let cart_quote = pricing::service::quote_cart(
        &ctx,
        customer.id.clone(),
        restaurant.coordinates(),
        Some(coupon.code.clone()),
    )
    .await
    .expect("Cart should be quotable");

    let placed = order::service::place_order(&ctx, cart_quote, checkout(&customer, &restaurant))
        .await
        .expect("Checkout should succeed");

    assert_eq!(placed.status, OrderStatus::Pending);
    assert_eq!(placed.sub_total, BigDecimal::from(240));
    assert_eq!(placed.discount, BigDecimal::from(50));
    assert_eq!(placed.coupon_code.as_deref(), Some(coupon.code.as_str()));
    assert_eq!(placed.items.0.len(), 1);

    let history = order::repository::find_status_updates_by_order_id(&ctx.db_conn.pool, placed.id.clone())
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, OrderStatus::Pending);
    assert_eq!(history[0].actor, OrderActor::Customer);
    assert_eq!(history[0].actor_id.as_deref(), Some(customer.id.as_str()));

    assert_eq!(cart_size(&ctx, &customer).await, 0);
    assert_eq!(used_count(&ctx, &coupon.id).await, 1);

    let event = events.recv().await.unwrap();
    assert_eq!(event.kind, EventKind::OrderPlaced);
    assert_eq!(event.order_id, placed.id);
    assert_eq!(event.restaurant_owner_id, restaurant.owner_id);
}

#[tokio::test]
async fn checkout_with_an_exhausted_coupon_changes_nothing() {
    let Some(ctx) = test_context().await else {
        eprintln!("Skipping test: TEST_DATABASE_URL not set");
        return;
    };

    let restaurant = create_restaurant(&ctx).await;
    let dosa = create_menu_item(&ctx, &restaurant, "120.00").await;
    let customer = create_user(&ctx, Role::Customer).await;
    let coupon = create_coupon(&ctx, Some(1)).await;
    fill_cart(&ctx, &customer, &dosa, 1).await;

    let cart_quote = pricing::service::quote_cart(
        &ctx,
        customer.id.clone(),
        restaurant.coordinates(),
        Some(coupon.code.clone()),
    )
    .await
    .expect("Cart should be quotable");

    // Somebody else takes the last use between quoting and placing.
    coupon::repository::consume_usage(&ctx.db_conn.pool, coupon.id.clone())
        .await
        .unwrap()
        .expect("First use should be granted");

    let result =
        order::service::place_order(&ctx, cart_quote, checkout(&customer, &restaurant)).await;
    assert_eq!(result.unwrap_err(), CheckoutError::CouponExhausted);

    assert_eq!(cart_size(&ctx, &customer).await, 1);
    assert_eq!(used_count(&ctx, &coupon.id).await, 1);

    let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE owner_id = $1")
        .bind(&customer.id)
        .fetch_one(&ctx.db_conn.pool)
        .await
        .unwrap();
    assert_eq!(orders, 0);
}

async fn place_pending_order(ctx: &Arc<Context>, payment_method: PaymentMethod) -> (order::repository::Order, Restaurant) {
    let restaurant = create_restaurant(ctx).await;
    let dosa = create_menu_item(ctx, &restaurant, "80.00").await;
    let customer = create_user(ctx, Role::Customer).await;
    fill_cart(ctx, &customer, &dosa, 1).await;

    let cart_quote =
        pricing::service::quote_cart(ctx, customer.id.clone(), restaurant.coordinates(), None)
            .await
            .expect("Cart should be quotable");

    let placed = order::service::place_order(
        ctx,
        cart_quote,
        Checkout {
            payment_method,
            ..checkout(&customer, &restaurant)
        },
    )
    .await
    .expect("Checkout should succeed");

    (placed, restaurant)
}

#[tokio::test]
async fn status_update_from_a_stale_status_is_refused() {
    let Some(ctx) = test_context().await else {
        eprintln!("Skipping test: TEST_DATABASE_URL not set");
        return;
    };

    let (placed, _) = place_pending_order(&ctx, PaymentMethod::CashOnDelivery).await;

    let stale = order::repository::update_status(
        &ctx.db_conn.pool,
        placed.id.clone(),
        order::repository::UpdateStatusPayload {
            from: OrderStatus::Confirmed,
            to: OrderStatus::Preparing,
            payment_status: None,
            cancellation_reason: None,
        },
    )
    .await
    .unwrap();
    assert!(stale.is_none());

    let current = order::repository::find_by_id(&ctx.db_conn.pool, placed.id.clone())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.status, OrderStatus::Pending);

    let confirmed = order::repository::update_status(
        &ctx.db_conn.pool,
        placed.id,
        order::repository::UpdateStatusPayload {
            from: OrderStatus::Pending,
            to: OrderStatus::Confirmed,
            payment_status: None,
            cancellation_reason: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(confirmed.map(|order| order.status), Some(OrderStatus::Confirmed));
}

#[tokio::test]
async fn stale_pending_orders_are_cancelled_by_the_system() {
    let Some(ctx) = test_context().await else {
        eprintln!("Skipping test: TEST_DATABASE_URL not set");
        return;
    };

    let (placed, restaurant) = place_pending_order(&ctx, PaymentMethod::Online).await;

    order::repository::update_payment_status(
        &ctx.db_conn.pool,
        placed.id.clone(),
        PaymentStatus::Pending,
        PaymentStatus::Paid,
    )
    .await
    .unwrap()
    .expect("Payment should be recorded");

    sqlx::query("UPDATE orders SET created_at = NOW() - INTERVAL '1 hour' WHERE id = $1")
        .bind(&placed.id)
        .execute(&ctx.db_conn.pool)
        .await
        .unwrap();

    let mut events = ctx.notifications.subscribe();

    for job in order::job::list(ctx.clone()) {
        (job.job)().await.unwrap();
    }

    let cancelled = order::repository::find_by_id(&ctx.db_conn.pool, placed.id.clone())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(cancelled.payment_status, PaymentStatus::Refunded);
    assert_eq!(
        cancelled.cancellation_reason.as_deref(),
        Some("Restaurant did not respond in time")
    );

    let history = order::repository::find_status_updates_by_order_id(&ctx.db_conn.pool, placed.id.clone())
        .await
        .unwrap();
    let last = history.last().unwrap();
    assert_eq!(last.status, OrderStatus::Cancelled);
    assert_eq!(last.actor, OrderActor::System);
    assert_eq!(last.actor_id, None);

    // Other tests may leave stale orders behind; look for this one.
    loop {
        let event = events.recv().await.unwrap();
        if event.order_id == placed.id {
            assert_eq!(event.kind, EventKind::StatusChanged);
            assert_eq!(event.status, OrderStatus::Cancelled);
            assert_eq!(event.restaurant_owner_id, restaurant.owner_id);
            break;
        }
    }
}

#[tokio::test]
async fn coupon_limits_can_be_lifted() {
    let Some(ctx) = test_context().await else {
        eprintln!("Skipping test: TEST_DATABASE_URL not set");
        return;
    };

    let coupon = create_coupon(&ctx, Some(3)).await;
    let coupon = coupon::repository::update_by_id(
        &ctx.db_conn.pool,
        coupon.id,
        coupon::repository::UpdateCouponPayload {
            max_discount: Some(BigDecimal::from(40)),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to cap coupon");
    assert_eq!(coupon.max_discount, Some(BigDecimal::from(40)));
    assert_eq!(coupon.usage_limit, Some(3));

    let coupon = coupon::repository::update_by_id(
        &ctx.db_conn.pool,
        coupon.id,
        coupon::repository::UpdateCouponPayload {
            description: Some(String::from("No strings attached")),
            clear_max_discount: true,
            clear_usage_limit: true,
            ..Default::default()
        },
    )
    .await
    .expect("Failed to lift coupon limits");

    assert_eq!(coupon.max_discount, None);
    assert_eq!(coupon.usage_limit, None);
    assert_eq!(coupon.description, "No strings attached");
    assert_eq!(coupon.discount_type, DiscountType::Fixed);
}
