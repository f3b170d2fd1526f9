pub mod claim;
pub mod transaction;

pub use claim::{CryptoClaim, Network, ValidatedClaim};
pub use transaction::{
    Amounts, Customer, LineItem, PaymentMethod, Transaction, TransactionStatus,
};
