mod dispatch;
mod health_check;
mod subscriptions;

pub use dispatch::*;
pub use health_check::*;
pub use subscriptions::*;
