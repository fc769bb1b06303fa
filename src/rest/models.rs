use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_with::{serde_as, skip_serializing_none, TimestampSeconds};

use super::FtxRestError;

#[derive(Copy, Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum OrderType {
    Limit,
    Market,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "limit",
            OrderType::Market => "market",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConditionalOrderType {
    Stop,
    TakeProfit,
    TrailingStop,
}

impl ConditionalOrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionalOrderType::Stop => "stop",
            ConditionalOrderType::TakeProfit => "take_profit",
            ConditionalOrderType::TrailingStop => "trailing_stop",
        }
    }
}

impl fmt::Display for ConditionalOrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `price` is `None` for market orders.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub market: String,
    pub side: Side,
    pub price: Option<Decimal>,
    pub size: Decimal,
    pub r#type: OrderType,
    pub reduce_only: bool,
    pub ioc: bool,
    pub post_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl PlaceOrderRequest {
    pub fn limit(market: impl Into<String>, side: Side, price: Decimal, size: Decimal) -> Self {
        Self {
            market: market.into(),
            side,
            price: Some(price),
            size,
            r#type: OrderType::Limit,
            reduce_only: false,
            ioc: false,
            post_only: false,
            client_id: None,
        }
    }

    pub fn market(market: impl Into<String>, side: Side, size: Decimal) -> Self {
        Self {
            market: market.into(),
            side,
            price: None,
            size,
            r#type: OrderType::Market,
            reduce_only: false,
            ioc: false,
            post_only: false,
            client_id: None,
        }
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn reduce_only(mut self) -> Self {
        self.reduce_only = true;
        self
    }

    pub fn ioc(mut self) -> Self {
        self.ioc = true;
        self
    }

    pub fn post_only(mut self) -> Self {
        self.post_only = true;
        self
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModifyOrderRequest {
    pub size: Option<Decimal>,
    pub price: Option<Decimal>,
    pub client_id: Option<String>,
}

impl ModifyOrderRequest {
    pub fn validate(&self) -> Result<(), FtxRestError> {
        if self.size.is_none() && self.price.is_none() {
            return Err(FtxRestError::InvalidArgument(
                "must modify price or size of order",
            ));
        }

        Ok(())
    }
}

/// Body of `POST /api/conditional_orders`.
///
/// Stop and take-profit orders need `trigger_price`; adding `order_price`
/// turns them into limit orders on trigger. Trailing stops take
/// `trail_value` and no trigger price.
#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceConditionalOrderRequest {
    pub market: String,
    pub side: Side,
    pub size: Decimal,
    pub r#type: ConditionalOrderType,
    pub reduce_only: bool,
    pub order_price: Option<Decimal>,
    pub trigger_price: Option<Decimal>,
    pub trail_value: Option<Decimal>,
    pub cancel_limit_on_trigger: bool,
}

impl PlaceConditionalOrderRequest {
    pub fn stop(market: impl Into<String>, side: Side, size: Decimal, trigger_price: Decimal) -> Self {
        Self::triggered(market, side, size, ConditionalOrderType::Stop, trigger_price)
    }

    pub fn take_profit(
        market: impl Into<String>,
        side: Side,
        size: Decimal,
        trigger_price: Decimal,
    ) -> Self {
        Self::triggered(market, side, size, ConditionalOrderType::TakeProfit, trigger_price)
    }

    pub fn trailing_stop(
        market: impl Into<String>,
        side: Side,
        size: Decimal,
        trail_value: Decimal,
    ) -> Self {
        Self {
            market: market.into(),
            side,
            size,
            r#type: ConditionalOrderType::TrailingStop,
            reduce_only: false,
            order_price: None,
            trigger_price: None,
            trail_value: Some(trail_value),
            cancel_limit_on_trigger: true,
        }
    }

    fn triggered(
        market: impl Into<String>,
        side: Side,
        size: Decimal,
        r#type: ConditionalOrderType,
        trigger_price: Decimal,
    ) -> Self {
        Self {
            market: market.into(),
            side,
            size,
            r#type,
            reduce_only: false,
            order_price: None,
            trigger_price: Some(trigger_price),
            trail_value: None,
            cancel_limit_on_trigger: true,
        }
    }

    pub fn with_order_price(mut self, order_price: Decimal) -> Self {
        self.order_price = Some(order_price);
        self
    }

    pub fn reduce_only(mut self) -> Self {
        self.reduce_only = true;
        self
    }

    pub fn validate(&self) -> Result<(), FtxRestError> {
        match self.r#type {
            ConditionalOrderType::Stop | ConditionalOrderType::TakeProfit
                if self.trigger_price.is_none() =>
            {
                Err(FtxRestError::InvalidArgument(
                    "stop and take profit orders need a trigger price",
                ))
            }
            ConditionalOrderType::TrailingStop
                if self.trigger_price.is_some() || self.trail_value.is_none() =>
            {
                Err(FtxRestError::InvalidArgument(
                    "trailing stops need a trail value and can not take a trigger price",
                ))
            }
            _ => Ok(()),
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModifyConditionalOrderRequest {
    pub size: Option<Decimal>,
    pub trigger_price: Option<Decimal>,
    pub order_price: Option<Decimal>,
    pub trail_value: Option<Decimal>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRequest {
    pub coin: String,
    pub size: Decimal,
    pub address: String,
    pub tag: Option<String>,
    pub password: Option<String>,
    pub code: Option<String>,
}

impl WithdrawalRequest {
    pub fn new(coin: impl Into<String>, size: Decimal, address: impl Into<String>) -> Self {
        Self {
            coin: coin.into(),
            size,
            address: address.into(),
            tag: None,
            password: None,
            code: None,
        }
    }
}

/// `None` means the main account.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubaccountTransferRequest {
    pub coin: String,
    pub size: Decimal,
    pub source: Option<String>,
    pub destination: Option<String>,
}

#[derive(Copy, Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum OptionType {
    Call,
    Put,
}

/// `limit_price` and `request_expiry` are left out of the body when `None`.
#[serde_as]
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuoteRequest {
    pub underlying: String,
    pub r#type: OptionType,
    pub strike: Decimal,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub expiry: DateTime<Utc>,
    pub side: Side,
    pub size: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<Decimal>,
    pub hide_limit_price: bool,
    #[serde_as(as = "Option<TimestampSeconds<i64>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_expiry: Option<DateTime<Utc>>,
}

impl CreateQuoteRequest {
    pub const DEFAULT_UNDERLYING: &'static str = "BTC";

    pub fn new(
        r#type: OptionType,
        strike: Decimal,
        expiry: DateTime<Utc>,
        side: Side,
        size: Decimal,
    ) -> Self {
        Self {
            underlying: Self::DEFAULT_UNDERLYING.to_string(),
            r#type,
            strike,
            expiry,
            side,
            size,
            limit_price: None,
            hide_limit_price: false,
            request_expiry: None,
        }
    }

    pub fn with_limit_price(mut self, limit_price: Decimal, hide: bool) -> Self {
        self.limit_price = Some(limit_price);
        self.hide_limit_price = hide;
        self
    }

    pub fn with_request_expiry(mut self, request_expiry: DateTime<Utc>) -> Self {
        self.request_expiry = Some(request_expiry);
        self
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LeverageBody {
    pub leverage: u32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NicknameBody<'a> {
    pub nickname: &'a str,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RenameSubaccountBody<'a> {
    pub nickname: &'a str,
    pub new_nickname: &'a str,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SizeBody {
    pub size: Decimal,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PriceBody {
    pub price: Decimal,
}
