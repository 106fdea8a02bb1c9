use trade_dashboard_wasm::domain::errors::AppError;
use trade_dashboard_wasm::domain::market_data::Price;
use trade_dashboard_wasm::domain::trading::{OrderSide, OrderType, TradeForm};

fn form(order_type: OrderType, quantity: &str, limit_price: &str) -> TradeForm {
    TradeForm {
        symbol: "msft".to_string(),
        side: OrderSide::Sell,
        order_type,
        quantity: quantity.to_string(),
        limit_price: limit_price.to_string(),
    }
}

fn rejected(form: TradeForm) -> String {
    match form.validate() {
        Err(AppError::ValidationError(msg)) => msg,
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[test]
fn market_order_is_accepted() {
    let order = form(OrderType::Market, " 10 ", "").validate().unwrap();
    assert_eq!(order.symbol.value(), "MSFT");
    assert_eq!(order.quantity, 10.0);
    assert_eq!(order.limit_price, None);
    assert_eq!(order.notional(Price::from(400.0)), 4_000.0);
}

#[test]
fn limit_order_uses_its_own_price() {
    let order = form(OrderType::Limit, "2.5", "100").validate().unwrap();
    assert_eq!(order.limit_price, Some(Price::from(100.0)));
    assert_eq!(order.notional(Price::from(400.0)), 250.0);
}

#[test]
fn limit_price_rules() {
    assert!(rejected(form(OrderType::Limit, "1", "")).contains("limit price"));
    assert!(rejected(form(OrderType::Market, "1", "100")).contains("market orders"));
    assert!(rejected(form(OrderType::Limit, "1", "-5")).contains("greater than zero"));
}

#[test]
fn quantity_must_be_a_positive_number() {
    assert!(rejected(form(OrderType::Market, "", "")).contains("quantity"));
    assert!(rejected(form(OrderType::Market, "abc", "")).contains("must be a number"));
    assert!(rejected(form(OrderType::Market, "0", "")).contains("greater than zero"));
    assert!(rejected(form(OrderType::Market, "inf", "")).contains("greater than zero"));
}

#[test]
fn symbol_is_required() {
    let mut blank = form(OrderType::Market, "1", "");
    blank.symbol = "  ".to_string();
    assert!(rejected(blank).contains("Symbol"));
}

#[test]
fn sides_and_types_parse_case_insensitively() {
    assert_eq!("BUY".parse::<OrderSide>().unwrap(), OrderSide::Buy);
    assert_eq!("Limit".parse::<OrderType>().unwrap(), OrderType::Limit);
}

#[test]
fn form_deserializes_from_camel_case() {
    let json = r#"{
        "symbol": "nvda",
        "side": "buy",
        "orderType": "limit",
        "quantity": "3",
        "limitPrice": "120.5"
    }"#;
    let form: TradeForm = serde_json::from_str(json).unwrap();
    assert_eq!(form.validate().unwrap().limit_price, Some(Price::from(120.5)));
}
