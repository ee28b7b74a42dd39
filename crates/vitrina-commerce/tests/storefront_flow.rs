use vitrina_commerce::prelude::*;

fn usd(cents: i64) -> Money {
    Money::new(cents, Currency::USD)
}

fn shipping() -> ShippingInfo {
    ShippingInfo {
        first_name: "Camila".into(),
        last_name: "Rojas".into(),
        address1: "Avenida 6N # 23-45".into(),
        city: "Cali".into(),
        state: "Valle del Cauca".into(),
        zip: "760045".into(),
        phone: "3151112233".into(),
    }
}

fn card() -> PaymentDetails {
    PaymentDetails {
        card_name: "Camila Rojas".into(),
        card_number: "5555555555554444".into(),
        expiry: "03/28".into(),
        cvv: "999".into(),
    }
}

#[test]
fn repeated_adds_merge_into_one_line() {
    let mut cart = Cart::default();
    cart.add_item(LineItem::new("1", "Camiseta", usd(1000), 1, "M", "Negro"))
        .unwrap();
    cart.add_item(LineItem::new("1", "Camiseta", usd(1000), 2, "M", "Negro"))
        .unwrap();

    assert_eq!(cart.unique_item_count(), 1);
    assert_eq!(cart.items()[0].quantity, 3);
    assert_eq!(cart.subtotal(), usd(3000));
    assert_eq!(cart.tax(), usd(480));
}

#[test]
fn favorites_toggle_round_trip() {
    let mut favorites = Favorites::new();
    let record = FavoriteItem::new("5", "Collar Elegante", usd(29999));

    favorites.toggle_favorite(record.clone());
    assert!(favorites.is_favorite(&ProductId::new("5")));

    favorites.toggle_favorite(record);
    assert!(favorites.is_empty());
}

#[test]
fn browse_add_and_check_out() {
    let mut store = Storefront::with_sample_catalog().unwrap();

    let women = store.search(
        &SearchQuery::new()
            .with_filter(Filter::category("mujer"))
            .with_sort(SortOption::PriceAsc),
    );
    let ids: Vec<&str> = women.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "3"]);

    store
        .add_to_cart(&ProductId::new("2"), "30", "Azul", 1)
        .unwrap();
    store
        .add_to_cart(&ProductId::new("5"), "Único", "Plateado", 2)
        .unwrap();
    store
        .update_quantity(&LineKey::new("5", "Único", "Plateado"), 1)
        .unwrap();
    assert_eq!(store.cart().item_count(), 2);

    // 599.99 + 299.99 = 899.98; tax 143.9968 -> 144.00
    assert_eq!(store.cart().subtotal(), usd(89998));
    assert_eq!(store.cart().tax(), usd(14400));
    assert_eq!(store.cart().total().unwrap(), usd(89998 + 1000 + 14400));

    let mut flow = store.begin_checkout().unwrap();
    flow.set_shipping(shipping()).unwrap();
    flow.advance().unwrap();
    flow.set_payment(&card()).unwrap();
    flow.advance().unwrap();

    let order = store.place_order(&mut flow).unwrap();
    assert_eq!(order.total, usd(105398));
    assert_eq!(order.item_count(), 2);
    assert_eq!(order.payment.last4, "4444");
    assert_eq!(order.ship_to.city, "Cali");

    assert!(flow.is_complete());
    assert!(store.cart().is_empty());
    assert_eq!(store.cart().shipping_fee(), usd(1000));
    assert_eq!(
        store.formatter().format(&order.total),
        "$4.215.920"
    );
}

#[test]
fn configured_tax_and_shipping_apply() {
    let config = StoreConfig {
        tax_rate: 0.19,
        shipping_fee: usd(0),
        ..StoreConfig::default()
    };
    let mut store = Storefront::new(config, InMemoryCatalog::sample().unwrap()).unwrap();
    store
        .add_to_cart(&ProductId::new("4"), "L", "Marrón", 1)
        .unwrap();

    // 1299.99 * 0.19 = 246.9981
    assert_eq!(store.cart().tax(), usd(24700));
    assert_eq!(store.cart().total().unwrap(), usd(129999 + 24700));
}
