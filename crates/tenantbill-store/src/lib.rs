//! Tenantbill Store Library
//!
//! Flat-file JSON persistence: a generic collection store plus typed
//! repositories for users, tenants, and subscriptions. One JSON document per
//! collection, whole-document rewrite on every mutation, linear scans for
//! every lookup. There is no locking and no atomic rename; concurrent
//! writers to the same collection race last-write-wins.

mod store;

pub use store::file::FileStore;
pub use store::subscriptions::SubscriptionRepository;
pub use store::tenants::TenantRepository;
pub use store::users::UserRepository;
