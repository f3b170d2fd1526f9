pub mod checkout;
pub mod confirmation;
pub mod credentials;

pub use checkout::{CheckoutOutcome, CheckoutRequest, CheckoutService};
pub use confirmation::{Confirmation, ConfirmationDispatcher, ConfirmationLog};
pub use credentials::{Credential, CredentialStore};
