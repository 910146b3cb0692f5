//! Database Models
//!
//! Row types and request payloads for the POS schema

pub mod admin;
pub mod bill;
pub mod product;
pub mod stock_update;

pub use admin::Admin;
pub use bill::{
    ANONYMOUS_CUSTOMER, Bill, BillCreate, BillItem, BillItemDetail, BillLineInput, BillWithItems,
    NewBill, PaymentMode,
};
pub use product::{Product, ProductCreate, StockPatch};
pub use stock_update::{StockUpdate, StockUpdateWithProduct};
