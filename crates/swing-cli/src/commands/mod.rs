pub mod dispatch;
pub mod pairs;
pub mod reconcile;
pub mod schema;
