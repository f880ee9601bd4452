use order_desk::admin::{AdminConsole, AdminError, CONFIRM_DELETE_CUSTOMER, CONFIRM_DELETE_PRODUCT};
use order_desk::auth::{AuthProvider, StaticCredentials};
use order_desk::config::{AdminCredentials, AppConfig};
use order_desk::lifecycle::StoreSystem;
use order_desk::model::ProductCreate;
use order_desk::notice::Notice;
use order_desk::order::MemoryClipboard;
use secrecy::SecretString;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn signed_out_auth() -> Arc<StaticCredentials> {
    Arc::new(StaticCredentials::new(AdminCredentials {
        email: "owner@example.jp".to_string(),
        password: SecretString::from("s3cret-pass".to_string()),
    }))
}

async fn open(system: &StoreSystem) -> AdminConsole {
    let auth = signed_out_auth();
    auth.sign_in("owner@example.jp", "s3cret-pass")
        .await
        .expect("Sign-in failed");
    AdminConsole::open(
        system.customer_client.clone(),
        system.product_client.clone(),
        auth,
        "https://order.example.jp/",
    )
    .await
    .expect("Open failed")
}

#[tokio::test]
async fn test_console_requires_sign_in() {
    let system = StoreSystem::new(&AppConfig::default());
    let result = AdminConsole::open(
        system.customer_client.clone(),
        system.product_client.clone(),
        signed_out_auth(),
        "https://order.example.jp",
    )
    .await;
    assert!(matches!(result, Err(AdminError::Unauthenticated)));
}

/// Customers and products through the console, including blank input being ignored.
#[tokio::test]
async fn test_maintain_customers_and_products() {
    let system = StoreSystem::new(&AppConfig::default());
    let mut console = open(&system).await;
    assert!(console.customers().is_empty());

    assert_eq!(console.add_customer("   ").await, Ok(None));
    let tanaka = console
        .add_customer("居酒屋たなか")
        .await
        .expect("Add failed")
        .expect("Customer not created");
    assert_eq!(console.customers().len(), 1);

    // Products need a selected customer
    assert_eq!(
        console.add_product("赤霧島", "900ml").await,
        Err(AdminError::NoCustomerSelected)
    );
    console.select(tanaka).expect("Select failed");

    assert_eq!(console.add_product("  ", "900ml").await, Ok(None));
    console
        .add_product("赤霧島", "900ml")
        .await
        .expect("Add failed");
    let taketsuru = console
        .add_product(" 竹鶴 ", "  ")
        .await
        .expect("Add failed")
        .expect("Product not created");

    let products = &console.selected().expect("Selection lost").products;
    assert_eq!(products.len(), 2);
    assert_eq!(products[1].name, "竹鶴");
    assert_eq!(products[1].volume, "-");
    assert_eq!(products[1].display_order, Some(1));

    assert_eq!(console.edit_product(taketsuru, "", "700ml").await, Ok(false));
    assert_eq!(
        console.edit_product(taketsuru, "竹鶴 ピュアモルト", "700ml").await,
        Ok(true)
    );
    let edited = &console.selected().expect("Selection lost").products[1];
    assert_eq!(edited.name, "竹鶴 ピュアモルト");
    assert_eq!(edited.volume, "700ml");

    assert_eq!(
        console.take_notices(),
        vec![
            Notice::success("顧客を追加しました"),
            Notice::success("商品を追加しました"),
            Notice::success("商品を追加しました"),
            Notice::success("商品を更新しました"),
        ]
    );
}

/// Products stored without a position sort after numbered ones, so a new product must not get a
/// number either or it would jump ahead of them.
#[tokio::test]
async fn test_added_product_goes_last_behind_unordered_ones() {
    let system = StoreSystem::new(&AppConfig::default());
    let mut console = open(&system).await;
    let customer = console
        .add_customer("居酒屋たなか")
        .await
        .unwrap()
        .unwrap();

    for (name, volume) in [("赤霧島", "900ml"), ("竹鶴", "")] {
        system
            .product_client
            .create_product(ProductCreate::new(customer, name, volume))
            .await
            .expect("Create failed");
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    console.refresh().await.expect("Refresh failed");
    console.select(customer).expect("Select failed");

    let added = console
        .add_product("新商品", "700ml")
        .await
        .expect("Add failed")
        .expect("Product not created");

    let products = &console.selected().expect("Selection lost").products;
    let order: Vec<_> = products
        .iter()
        .map(|p| (p.name.as_str(), p.display_order))
        .collect();
    assert_eq!(
        order,
        vec![("赤霧島", None), ("竹鶴", None), ("新商品", None)]
    );
    assert_eq!(products.last().map(|p| p.id), Some(added));
}

/// Nothing is deleted unless the user confirms, and the right question is asked.
#[tokio::test]
async fn test_deletes_are_confirmed_first() {
    let system = StoreSystem::new(&AppConfig::default());
    let answer = Arc::new(AtomicBool::new(false));
    let asked = Arc::new(Mutex::new(Vec::<String>::new()));

    let mut console = {
        let answer = Arc::clone(&answer);
        let asked = Arc::clone(&asked);
        open(&system).await.with_confirm(move |prompt: &str| {
            asked.lock().unwrap().push(prompt.to_string());
            answer.load(Ordering::SeqCst)
        })
    };

    let customer = console
        .add_customer("Bar Popcorn")
        .await
        .unwrap()
        .unwrap();
    console.select(customer).unwrap();
    let product = console.add_product("竹鶴", "").await.unwrap().unwrap();
    console.take_notices();

    assert_eq!(console.remove_product(product).await, Ok(false));
    assert_eq!(console.delete_customer(customer).await, Ok(false));
    assert_eq!(console.selected().unwrap().products.len(), 1);
    assert!(console.notices().is_empty());

    answer.store(true, Ordering::SeqCst);
    assert_eq!(console.remove_product(product).await, Ok(true));
    assert!(console.selected().unwrap().products.is_empty());

    console.add_product("山崎", "700ml").await.unwrap();
    assert_eq!(console.delete_customer(customer).await, Ok(true));
    assert!(console.customers().is_empty());
    assert!(console.selected().is_none());

    // The customer's products went with it
    let orphans = system
        .product_client
        .list_for_customer(customer)
        .await
        .unwrap();
    assert!(orphans.is_empty());

    assert_eq!(
        *asked.lock().unwrap(),
        vec![
            CONFIRM_DELETE_PRODUCT.to_string(),
            CONFIRM_DELETE_CUSTOMER.to_string(),
            CONFIRM_DELETE_PRODUCT.to_string(),
            CONFIRM_DELETE_CUSTOMER.to_string(),
        ]
    );
    assert_eq!(
        console.take_notices(),
        vec![
            Notice::success("商品を削除しました"),
            Notice::success("商品を追加しました"),
            Notice::success("顧客を削除しました"),
        ]
    );
}

#[tokio::test]
async fn test_copy_order_url_and_sign_out() {
    let system = StoreSystem::new(&AppConfig::default());
    let clipboard = Arc::new(MemoryClipboard::new());
    let mut console = open(&system).await.with_clipboard(clipboard.clone());
    let customer = console.add_customer("居酒屋たなか").await.unwrap().unwrap();
    console.take_notices();

    assert!(console.copy_order_url(customer).await);
    assert_eq!(
        clipboard.contents(),
        Some(format!("https://order.example.jp/order/{customer}"))
    );

    let mut console = console.with_clipboard(Arc::new(MemoryClipboard::unavailable()));
    assert!(!console.copy_order_url(customer).await);

    let notices = console.sign_out().await.expect("Sign-out failed");
    assert_eq!(
        notices,
        vec![
            Notice::success("URLをコピーしました"),
            Notice::error("コピーに失敗しました"),
            Notice::success("ログアウトしました"),
        ]
    );
}

/// The console stops working once the session is gone.
#[tokio::test]
async fn test_signed_out_session_is_rejected() {
    let system = StoreSystem::new(&AppConfig::default());
    let auth = signed_out_auth();
    auth.sign_in("owner@example.jp", "s3cret-pass").await.unwrap();
    let mut console = AdminConsole::open(
        system.customer_client.clone(),
        system.product_client.clone(),
        auth.clone(),
        "https://order.example.jp",
    )
    .await
    .unwrap();

    auth.sign_out().await.unwrap();
    assert_eq!(console.refresh().await, Err(AdminError::Unauthenticated));
    assert_eq!(console.reorder(0, 1).await, Err(AdminError::Unauthenticated));

    // A new sign-in is a different session
    auth.sign_in("owner@example.jp", "s3cret-pass").await.unwrap();
    assert_eq!(
        console.add_customer("居酒屋たなか").await,
        Err(AdminError::Unauthenticated)
    );
}

#[tokio::test]
async fn test_shutdown_after_console_closes() {
    let system = StoreSystem::new(&AppConfig::default());
    let mut console = open(&system).await;
    console.add_customer("居酒屋たなか").await.unwrap();
    console.sign_out().await.unwrap();

    system.shutdown().await.expect("Shutdown failed");
}
