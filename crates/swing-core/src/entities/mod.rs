//! Entity structs for swing reconciliation.
//!
//! Every entity is built fresh per reconciliation run from the latest device
//! rows; nothing here is persisted between runs. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` so the presentation layer can
//! validate payloads against a generated schema.

mod pair;
mod session;
mod swing;

pub use pair::MatchedPair;
pub use session::{Session, SessionMetrics, SessionSwing, SwingDerivedMetrics};
pub use swing::{NormalizedSwing, RawSwing, RawTimestamp, SwingMetrics};
