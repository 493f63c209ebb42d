//! Intent and subintent taxonomy for customer conversations
//!
//! The classification scheme is a two-level code table: top-level intents
//! ("A", "B") and their subintents ("A1".."B4"). The `update_session` tool
//! schema derives its enum values from these tables, so the taxonomy and the
//! schema cannot drift apart.

use serde::{Deserialize, Serialize};

/// Top-level intent of a customer's conversational turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// "A" - order related
    OrderRelated,
    /// "B" - product and service related
    ProductAndService,
}

impl Intent {
    /// All intents, in code order
    pub const ALL: [Intent; 2] = [Intent::OrderRelated, Intent::ProductAndService];

    /// Short classification code ("A", "B")
    pub fn code(&self) -> &'static str {
        match self {
            Intent::OrderRelated => "A",
            Intent::ProductAndService => "B",
        }
    }

    /// Human-readable label, as shown to the model
    pub fn label(&self) -> &'static str {
        match self {
            Intent::OrderRelated => "訂單相關",
            Intent::ProductAndService => "產品與服務相關",
        }
    }

    /// The combined "code. label" form used as a schema enum value
    pub fn schema_value(&self) -> String {
        format!("{}. {}", self.code(), self.label())
    }

    /// Reverse lookup from a schema enum value
    pub fn from_schema_value(value: &str) -> Option<Intent> {
        Intent::ALL.into_iter().find(|i| i.schema_value() == value)
    }
}

/// Second-level intent, scoped under a top-level [`Intent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subintent {
    /// "A1" - order status/progress inquiry
    OrderStatus,
    /// "A2" - order modification
    OrderChange,
    /// "A3" - order cancellation
    OrderCancel,
    /// "A4" - invoice/receipt inquiry
    InvoiceLookup,
    /// "B1" - product information
    ProductInfo,
    /// "B2" - stock availability
    StockInquiry,
    /// "B3" - pricing and promotions
    PricePromotion,
    /// "B4" - product comparison
    ProductComparison,
}

impl Subintent {
    /// All subintents, in code order
    pub const ALL: [Subintent; 8] = [
        Subintent::OrderStatus,
        Subintent::OrderChange,
        Subintent::OrderCancel,
        Subintent::InvoiceLookup,
        Subintent::ProductInfo,
        Subintent::StockInquiry,
        Subintent::PricePromotion,
        Subintent::ProductComparison,
    ];

    /// Short classification code ("A1".."B4")
    pub fn code(&self) -> &'static str {
        match self {
            Subintent::OrderStatus => "A1",
            Subintent::OrderChange => "A2",
            Subintent::OrderCancel => "A3",
            Subintent::InvoiceLookup => "A4",
            Subintent::ProductInfo => "B1",
            Subintent::StockInquiry => "B2",
            Subintent::PricePromotion => "B3",
            Subintent::ProductComparison => "B4",
        }
    }

    /// Human-readable label, as shown to the model
    pub fn label(&self) -> &'static str {
        match self {
            Subintent::OrderStatus => "查詢訂單狀態/進度",
            Subintent::OrderChange => "修改訂單內容",
            Subintent::OrderCancel => "取消訂單",
            Subintent::InvoiceLookup => "查詢發票/收據",
            Subintent::ProductInfo => "詢問產品資訊",
            Subintent::StockInquiry => "詢問庫存狀況",
            Subintent::PricePromotion => "詢問價格與優惠",
            Subintent::ProductComparison => "比較產品",
        }
    }

    /// The combined "code. label" form used as a schema enum value
    pub fn schema_value(&self) -> String {
        format!("{}. {}", self.code(), self.label())
    }

    /// Reverse lookup from a schema enum value
    pub fn from_schema_value(value: &str) -> Option<Subintent> {
        Subintent::ALL.into_iter().find(|s| s.schema_value() == value)
    }

    /// The top-level intent this subintent belongs to
    pub fn intent(&self) -> Intent {
        match self {
            Subintent::OrderStatus
            | Subintent::OrderChange
            | Subintent::OrderCancel
            | Subintent::InvoiceLookup => Intent::OrderRelated,
            Subintent::ProductInfo
            | Subintent::StockInquiry
            | Subintent::PricePromotion
            | Subintent::ProductComparison => Intent::ProductAndService,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_schema_values() {
        assert_eq!(Intent::OrderRelated.schema_value(), "A. 訂單相關");
        assert_eq!(Intent::ProductAndService.schema_value(), "B. 產品與服務相關");
    }

    #[test]
    fn test_subintent_codes_are_unique() {
        let mut codes: Vec<&str> = Subintent::ALL.iter().map(|s| s.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), Subintent::ALL.len());
    }

    #[test]
    fn test_schema_value_round_trip() {
        for intent in Intent::ALL {
            assert_eq!(Intent::from_schema_value(&intent.schema_value()), Some(intent));
        }
        for subintent in Subintent::ALL {
            assert_eq!(
                Subintent::from_schema_value(&subintent.schema_value()),
                Some(subintent)
            );
        }
    }

    #[test]
    fn test_from_schema_value_rejects_unknown() {
        assert_eq!(Intent::from_schema_value("C. 其他"), None);
        assert_eq!(Subintent::from_schema_value("A1"), None);
    }

    #[test]
    fn test_subintent_parent_intent() {
        assert_eq!(Subintent::OrderCancel.intent(), Intent::OrderRelated);
        assert_eq!(Subintent::StockInquiry.intent(), Intent::ProductAndService);
    }
}
