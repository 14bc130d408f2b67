// handlers/mod.rs - Two handler tiers
//
// Public (no auth) → Protected (x-api-key required, mounted under /api/v1)

pub mod public;
pub mod protected;
