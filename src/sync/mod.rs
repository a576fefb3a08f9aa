pub mod list_sync;

pub use list_sync::{ListSyncClient, SyncOutcome};
