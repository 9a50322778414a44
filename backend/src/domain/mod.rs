//! Inventory and point-of-sale domain.
//!
//! Entities, validated drafts and patches, the repositories that mirror
//! each collection to a [`ports::CollectionStore`], the login session, and
//! the use cases built on them. Everything here is synchronous and free of
//! I/O apart from the store port.
//!
//! Public surface:
//! - [`Stockroom`]: facade owning every repository and the session.
//! - [`Error`] and [`ErrorCode`]: the outcome of every fallible use case.
//! - [`reports`] and [`export`]: pure aggregation and CSV rendering.

mod auth;
mod category;
mod email;
mod error;
mod ids;
mod product;
mod product_repository;
mod role;
mod sale;
mod sale_repository;
mod session;
mod stockroom;
mod supplier;
mod supplier_repository;
mod user;
mod user_repository;
mod validation;

pub mod catalogue_admin;
pub mod export;
pub mod ports;
pub mod reports;
pub mod repository;
pub mod sales;
pub mod seeding;
pub mod user_admin;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::category::{Category, UnknownCategory};
pub use self::email::{EmailAddress, EmailValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{IdValidationError, ProductId, SaleId, SupplierId, UserId};
pub use self::product::{NewProduct, Product, ProductPatch, StockStatus};
pub use self::product_repository::{ProductRepository, ProductStats};
pub use self::reports::{
    CategoryReportRow, InventoryFilter, InventoryReportRow, LowStockReportRow, MonthlySales,
    MonthlySalesRow, SalesStats, SupplierReportRow, TopSeller,
};
pub use self::role::{Capability, Role, UnknownRole};
pub use self::sale::{CustomerInfo, Sale, SaleRequest};
pub use self::sale_repository::SaleRepository;
pub use self::session::SessionService;
pub use self::stockroom::Stockroom;
pub use self::supplier::{NewSupplier, Supplier, SupplierOption, SupplierPatch};
pub use self::supplier_repository::SupplierRepository;
pub use self::user::{NewUser, User, UserPatch};
pub use self::user_repository::UserRepository;
