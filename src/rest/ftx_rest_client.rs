use chrono::{DateTime, Utc};
use http::Method;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::ftx_auth_settings::FtxAuthSettings;

use super::models::*;
use super::{FtxRequestBuilder, FtxResponse, FtxRestError, FtxRestSettings, FtxTransport, QueryString};

/// Non-2xx statuses come back as responses, not errors.
pub struct FtxRestClient<T: FtxTransport = reqwest::blocking::Client> {
    request_builder: FtxRequestBuilder,
    transport: T,
}

impl FtxRestClient<reqwest::blocking::Client> {
    pub fn new(auth_settings: FtxAuthSettings) -> Result<Self, FtxRestError> {
        Self::with_settings(auth_settings, FtxRestSettings::default())
    }

    pub fn with_settings(
        auth_settings: FtxAuthSettings,
        settings: FtxRestSettings,
    ) -> Result<Self, FtxRestError> {
        let transport = reqwest::blocking::Client::builder().build()?;
        Ok(Self::with_transport(auth_settings, settings, transport))
    }
}

impl<T: FtxTransport> FtxRestClient<T> {
    pub fn with_transport(
        auth_settings: FtxAuthSettings,
        settings: FtxRestSettings,
        transport: T,
    ) -> Self {
        Self {
            request_builder: FtxRequestBuilder::new(auth_settings, settings),
            transport,
        }
    }

    pub fn request_builder(&self) -> &FtxRequestBuilder {
        &self.request_builder
    }

    pub fn send<B: Serialize + ?Sized>(
        &self,
        path: &str,
        method: Method,
        body: Option<&B>,
    ) -> Result<FtxResponse, FtxRestError> {
        let request = self.request_builder.build_request(path, method, body)?;
        tracing::debug!(method = %request.method(), path = %path, "Sending FTX request");

        let response = self.transport.execute(request)?;
        tracing::debug!(status = response.status, path = %path, "FTX response");

        Ok(response)
    }

    fn get(&self, path: &str) -> Result<FtxResponse, FtxRestError> {
        self.send::<()>(path, Method::GET, None)
    }

    fn get_with_query(&self, path: &str, query: QueryString) -> Result<FtxResponse, FtxRestError> {
        self.get(&query.append_to(path))
    }

    fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<FtxResponse, FtxRestError> {
        self.send(path, Method::POST, Some(body))
    }

    fn delete(&self, path: &str) -> Result<FtxResponse, FtxRestError> {
        self.send::<()>(path, Method::DELETE, None)
    }

    // Futures

    pub fn list_futures(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/futures")
    }

    pub fn get_future(&self, future: &str) -> Result<FtxResponse, FtxRestError> {
        self.get(&format!("/api/futures/{}", future))
    }

    pub fn get_future_stats(&self, future: &str) -> Result<FtxResponse, FtxRestError> {
        self.get(&format!("/api/futures/{}/stats", future))
    }

    pub fn get_expired_futures(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/expired_futures")
    }

    pub fn get_funding_rates(
        &self,
        future: Option<&str>,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<FtxResponse, FtxRestError> {
        let query = QueryString::new()
            .with_opt("future", future)
            .with_opt("start_time", start_time.map(|t| t.timestamp()))
            .with_opt("end_time", end_time.map(|t| t.timestamp()));

        self.get_with_query("/api/funding_rates", query)
    }

    // Markets

    pub fn list_markets(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/markets")
    }

    pub fn get_orderbook(&self, market: &str, depth: Option<u32>) -> Result<FtxResponse, FtxRestError> {
        let query = QueryString::new().with_opt("depth", depth);
        self.get_with_query(&format!("/api/markets/{}/orderbook", market), query)
    }

    pub fn get_trades(&self, market: &str) -> Result<FtxResponse, FtxRestError> {
        self.get(&format!("/api/markets/{}/trades", market))
    }

    /// `resolution` is the candle length in seconds.
    pub fn get_historical_prices(
        &self,
        market: &str,
        resolution: u32,
        limit: Option<u32>,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<FtxResponse, FtxRestError> {
        let query = QueryString::new()
            .with("resolution", resolution)
            .with_opt("limit", limit)
            .with_opt("start_time", start_time.map(|t| t.timestamp()))
            .with_opt("end_time", end_time.map(|t| t.timestamp()));

        self.get_with_query(&format!("/api/markets/{}/candles", market), query)
    }

    // Account

    pub fn get_account_info(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/account")
    }

    pub fn change_leverage(&self, leverage: u32) -> Result<FtxResponse, FtxRestError> {
        self.post("/api/account/leverage", &LeverageBody { leverage })
    }

    pub fn get_positions(&self, show_avg_price: bool) -> Result<FtxResponse, FtxRestError> {
        let query = QueryString::new().with("showAvgPrice", show_avg_price);
        self.get_with_query("/api/positions", query)
    }

    // Orders

    pub fn get_open_orders(&self, market: Option<&str>) -> Result<FtxResponse, FtxRestError> {
        let query = QueryString::new().with_opt("market", market);
        self.get_with_query("/api/orders", query)
    }

    pub fn get_order_history(
        &self,
        market: Option<&str>,
        side: Option<Side>,
        order_type: Option<OrderType>,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<FtxResponse, FtxRestError> {
        let query = QueryString::new()
            .with_opt("market", market)
            .with_opt("side", side)
            .with_opt("orderType", order_type)
            .with_opt("start_time", start_time.map(|t| t.timestamp()))
            .with_opt("end_time", end_time.map(|t| t.timestamp()));

        self.get_with_query("/api/orders/history", query)
    }

    pub fn get_order_status(&self, order_id: &str) -> Result<FtxResponse, FtxRestError> {
        self.get(&format!("/api/orders/{}", order_id))
    }

    pub fn get_order_status_by_client_id(&self, client_id: &str) -> Result<FtxResponse, FtxRestError> {
        self.get(&format!("/api/orders/by_client_id/{}", client_id))
    }

    pub fn place_order(&self, order: &PlaceOrderRequest) -> Result<FtxResponse, FtxRestError> {
        self.post("/api/orders", order)
    }

    pub fn modify_order(
        &self,
        order_id: &str,
        modify: &ModifyOrderRequest,
    ) -> Result<FtxResponse, FtxRestError> {
        modify.validate()?;
        self.post(&format!("/api/orders/{}/modify", order_id), modify)
    }

    pub fn modify_order_by_client_id(
        &self,
        client_id: &str,
        modify: &ModifyOrderRequest,
    ) -> Result<FtxResponse, FtxRestError> {
        modify.validate()?;
        self.post(&format!("/api/orders/by_client_id/{}/modify", client_id), modify)
    }

    pub fn cancel_order(&self, order_id: &str) -> Result<FtxResponse, FtxRestError> {
        self.delete(&format!("/api/orders/{}", order_id))
    }

    pub fn cancel_order_by_client_id(&self, client_id: &str) -> Result<FtxResponse, FtxRestError> {
        self.delete(&format!("/api/orders/by_client_id/{}", client_id))
    }

    /// Filters travel in the query string; the DELETE itself has no body.
    pub fn cancel_orders(
        &self,
        market: Option<&str>,
        conditional_orders_only: bool,
        limit_orders_only: bool,
    ) -> Result<FtxResponse, FtxRestError> {
        let query = QueryString::new()
            .with_opt("market", market)
            .with("conditionalOrdersOnly", conditional_orders_only)
            .with("limitOrdersOnly", limit_orders_only);

        self.delete(&query.append_to("/api/orders"))
    }

    // Conditional orders

    pub fn get_conditional_orders(&self, market: Option<&str>) -> Result<FtxResponse, FtxRestError> {
        let query = QueryString::new().with_opt("market", market);
        self.get_with_query("/api/conditional_orders", query)
    }

    pub fn get_conditional_order_history(
        &self,
        market: Option<&str>,
        side: Option<Side>,
        r#type: Option<ConditionalOrderType>,
        order_type: Option<OrderType>,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<FtxResponse, FtxRestError> {
        let query = QueryString::new()
            .with_opt("market", market)
            .with_opt("side", side)
            .with_opt("type", r#type)
            .with_opt("orderType", order_type)
            .with_opt("start_time", start_time.map(|t| t.timestamp()))
            .with_opt("end_time", end_time.map(|t| t.timestamp()));

        self.get_with_query("/api/conditional_orders/history", query)
    }

    pub fn get_trigger_order_triggers(&self, order_id: &str) -> Result<FtxResponse, FtxRestError> {
        self.get(&format!("/api/conditional_orders/{}/triggers", order_id))
    }

    pub fn place_conditional_order(
        &self,
        order: &PlaceConditionalOrderRequest,
    ) -> Result<FtxResponse, FtxRestError> {
        order.validate()?;
        self.post("/api/conditional_orders", order)
    }

    pub fn modify_conditional_order(
        &self,
        order_id: &str,
        modify: &ModifyConditionalOrderRequest,
    ) -> Result<FtxResponse, FtxRestError> {
        self.post(&format!("/api/conditional_orders/{}/modify", order_id), modify)
    }

    pub fn cancel_conditional_order(&self, order_id: &str) -> Result<FtxResponse, FtxRestError> {
        self.delete(&format!("/api/conditional_orders/{}", order_id))
    }

    // Fills and funding

    pub fn get_fills(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/fills")
    }

    pub fn get_funding_payments(
        &self,
        future: Option<&str>,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<FtxResponse, FtxRestError> {
        let query = QueryString::new()
            .with_opt("future", future)
            .with_opt("start_time", start_time.map(|t| t.timestamp()))
            .with_opt("end_time", end_time.map(|t| t.timestamp()));

        self.get_with_query("/api/funding_payments", query)
    }

    // Wallet

    pub fn get_balances(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/wallet/balances")
    }

    pub fn get_balances_all_accounts(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/wallet/all_balances")
    }

    pub fn get_coins(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/wallet/coins")
    }

    pub fn get_deposit_address(&self, coin: &str) -> Result<FtxResponse, FtxRestError> {
        self.get(&format!("/api/wallet/deposit_address/{}", coin))
    }

    pub fn get_deposit_history(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/wallet/deposits")
    }

    pub fn get_withdrawal_history(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/wallet/withdrawals")
    }

    pub fn request_withdrawal(&self, withdrawal: &WithdrawalRequest) -> Result<FtxResponse, FtxRestError> {
        self.post("/api/wallet/withdrawals", withdrawal)
    }

    // Subaccounts

    pub fn get_subaccounts(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/subaccounts")
    }

    pub fn create_subaccount(&self, nickname: &str) -> Result<FtxResponse, FtxRestError> {
        self.post("/api/subaccounts", &NicknameBody { nickname })
    }

    pub fn change_subaccount_name(
        &self,
        nickname: &str,
        new_nickname: &str,
    ) -> Result<FtxResponse, FtxRestError> {
        let body = RenameSubaccountBody {
            nickname,
            new_nickname,
        };
        self.post("/api/subaccounts/update_name", &body)
    }

    pub fn get_subaccount_balances(&self, nickname: &str) -> Result<FtxResponse, FtxRestError> {
        self.get(&format!("/api/subaccounts/{}/balances", nickname))
    }

    pub fn transfer_between_subaccounts(
        &self,
        transfer: &SubaccountTransferRequest,
    ) -> Result<FtxResponse, FtxRestError> {
        self.post("/api/subaccounts/transfer", transfer)
    }

    // Leveraged tokens

    pub fn list_leveraged_tokens(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/lt/tokens")
    }

    pub fn get_leveraged_token_info(&self, token: &str) -> Result<FtxResponse, FtxRestError> {
        self.get(&format!("/api/lt/{}", token))
    }

    pub fn get_leveraged_token_balances(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/lt/balances")
    }

    pub fn list_leveraged_token_creations(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/lt/creations")
    }

    pub fn request_leveraged_token_creation(
        &self,
        token: &str,
        size: Decimal,
    ) -> Result<FtxResponse, FtxRestError> {
        self.post(&format!("/api/lt/{}/create", token), &SizeBody { size })
    }

    pub fn list_leveraged_token_redemptions(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/lt/redemptions")
    }

    pub fn request_leveraged_token_redemption(
        &self,
        token: &str,
        size: Decimal,
    ) -> Result<FtxResponse, FtxRestError> {
        self.post(&format!("/api/lt/{}/redeem", token), &SizeBody { size })
    }

    // Options

    pub fn list_quote_requests(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/options/requests")
    }

    pub fn get_my_quote_requests(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/options/my_requests")
    }

    pub fn create_quote_request(&self, request: &CreateQuoteRequest) -> Result<FtxResponse, FtxRestError> {
        self.post("/api/options/requests", request)
    }

    pub fn cancel_quote_request(&self, request_id: &str) -> Result<FtxResponse, FtxRestError> {
        self.delete(&format!("/api/options/requests/{}", request_id))
    }

    pub fn get_quotes_for_my_quote_request(&self, request_id: &str) -> Result<FtxResponse, FtxRestError> {
        self.get(&format!("/api/options/requests/{}/quotes", request_id))
    }

    pub fn create_quote(&self, request_id: &str, price: Decimal) -> Result<FtxResponse, FtxRestError> {
        self.post(
            &format!("/api/options/requests/{}/quotes", request_id),
            &PriceBody { price },
        )
    }

    pub fn get_my_quotes(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/options/my_quotes")
    }

    pub fn cancel_quote(&self, quote_id: &str) -> Result<FtxResponse, FtxRestError> {
        self.delete(&format!("/api/options/quotes/{}", quote_id))
    }

    pub fn accept_quote(&self, quote_id: &str) -> Result<FtxResponse, FtxRestError> {
        self.send::<()>(&format!("/api/options/quotes/{}/accept", quote_id), Method::POST, None)
    }

    pub fn get_account_option_info(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/options/account_info")
    }

    pub fn get_option_positions(&self) -> Result<FtxResponse, FtxRestError> {
        self.get("/api/options/positions")
    }

    pub fn get_public_option_trades(
        &self,
        limit: Option<u32>,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<FtxResponse, FtxRestError> {
        let query = QueryString::new()
            .with_opt("limit", limit)
            .with_opt("start_time", start_time.map(|t| t.timestamp()))
            .with_opt("end_time", end_time.map(|t| t.timestamp()));

        self.get_with_query("/api/options/trades", query)
    }

    pub fn get_option_fills(
        &self,
        limit: Option<u32>,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<FtxResponse, FtxRestError> {
        let query = QueryString::new()
            .with_opt("limit", limit)
            .with_opt("start_time", start_time.map(|t| t.timestamp()))
            .with_opt("end_time", end_time.map(|t| t.timestamp()));

        self.get_with_query("/api/options/fills", query)
    }
}
