pub use crate::error::{Error, VzResult};
pub use crate::types::{Patch, PlanTier, Tenant, TenantId};

pub use tracing::{debug, error, info, trace, warn};

// vim: ts=4
