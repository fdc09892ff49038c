pub use ventazo_tenant_types::prelude::*;

// vim: ts=4
