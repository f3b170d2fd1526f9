pub mod charge;
pub mod notifier;

pub use charge::{AuthorizationHandle, ChargeAuthorizer, ChargeError, ChargeRequest, HttpChargeGateway};
pub use notifier::{HttpNotifier, Notification, Notifier, NotifyError};
