//! Spreadsheet interop contracts for publishing live positions and blotter rows.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Object-safe boxed future used by [`SpreadsheetInterop`].
pub type SpreadsheetFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Net position for one currency pair with its latest mark.
pub struct CurrencyPairPosition {
    /// Currency pair symbol, for example `EURUSD`.
    pub symbol: String,
    /// Signed base-currency position.
    pub base_trade_position: f64,
    /// Signed counter-currency position.
    pub counter_trade_position: f64,
    /// Base-currency position expressed in USD.
    pub base_pnl: f64,
    /// Latest mid price used for marking.
    pub latest_ask: Option<f64>,
}

/// Host service bridging positions and blotter data into an external spreadsheet.
pub trait SpreadsheetInterop {
    /// Returns the stable adapter name for diagnostics.
    fn adapter_name(&self) -> &'static str;

    /// Opens (or focuses) the spreadsheet workbook.
    fn open(&self) -> SpreadsheetFuture<'_, Result<(), String>>;

    /// Returns whether the workbook is currently open.
    fn is_open(&self) -> bool;

    /// Publishes the current positions snapshot.
    fn publish_positions<'a>(
        &'a self,
        positions: &'a [CurrencyPairPosition],
    ) -> SpreadsheetFuture<'a, Result<(), String>>;

    /// Publishes blotter rows.
    fn publish_blotter(&self, blotter: Value) -> SpreadsheetFuture<'_, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Spreadsheet adapter for hosts without spreadsheet integration.
pub struct NoopSpreadsheetInterop;

impl SpreadsheetInterop for NoopSpreadsheetInterop {
    fn adapter_name(&self) -> &'static str {
        "none"
    }

    fn open(&self) -> SpreadsheetFuture<'_, Result<(), String>> {
        Box::pin(async { Err("spreadsheet interop unavailable".to_string()) })
    }

    fn is_open(&self) -> bool {
        false
    }

    fn publish_positions<'a>(
        &'a self,
        _positions: &'a [CurrencyPairPosition],
    ) -> SpreadsheetFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn publish_blotter(&self, _blotter: Value) -> SpreadsheetFuture<'_, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Default)]
struct MemorySpreadsheetInner {
    open: bool,
    positions: Vec<Vec<CurrencyPairPosition>>,
    blotters: Vec<Value>,
}

#[derive(Debug, Clone, Default)]
/// In-memory workbook recording published payloads.
///
/// Publishing to a closed workbook is rejected.
pub struct MemorySpreadsheetInterop {
    inner: Rc<RefCell<MemorySpreadsheetInner>>,
}

impl MemorySpreadsheetInterop {
    /// Returns every published positions snapshot in order.
    pub fn published_positions(&self) -> Vec<Vec<CurrencyPairPosition>> {
        self.inner.borrow().positions.clone()
    }

    /// Returns every published blotter payload in order.
    pub fn published_blotters(&self) -> Vec<Value> {
        self.inner.borrow().blotters.clone()
    }
}

impl SpreadsheetInterop for MemorySpreadsheetInterop {
    fn adapter_name(&self) -> &'static str {
        "memory"
    }

    fn open(&self) -> SpreadsheetFuture<'_, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().open = true;
            Ok(())
        })
    }

    fn is_open(&self) -> bool {
        self.inner.borrow().open
    }

    fn publish_positions<'a>(
        &'a self,
        positions: &'a [CurrencyPairPosition],
    ) -> SpreadsheetFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            if !inner.open {
                return Err("workbook is not open".to_string());
            }
            inner.positions.push(positions.to_vec());
            Ok(())
        })
    }

    fn publish_blotter(&self, blotter: Value) -> SpreadsheetFuture<'_, Result<(), String>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            if !inner.open {
                return Err("workbook is not open".to_string());
            }
            inner.blotters.push(blotter);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;

    #[test]
    fn position_payload_uses_camel_case_keys() {
        let position = CurrencyPairPosition {
            symbol: "EURUSD".to_string(),
            base_trade_position: 1_000_000.0,
            counter_trade_position: -1_100_000.0,
            base_pnl: 250.0,
            latest_ask: Some(1.1),
        };
        let value = serde_json::to_value(&position).expect("serialize");
        assert_eq!(value["baseTradePosition"], json!(1_000_000.0));
        assert_eq!(value["latestAsk"], json!(1.1));
    }

    #[test]
    fn publishing_requires_an_open_workbook() {
        let sheet = MemorySpreadsheetInterop::default();
        assert!(block_on(sheet.publish_blotter(json!([]))).is_err());

        block_on(sheet.open()).expect("open");
        block_on(sheet.publish_blotter(json!([{"tradeId": 1}]))).expect("publish");
        assert_eq!(sheet.published_blotters(), vec![json!([{"tradeId": 1}])]);
    }
}
