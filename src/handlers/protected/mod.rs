// handlers/protected/mod.rs - Protected handlers (API key required)
//
// Route Prefix: /api/v1
// Middleware: api_key_middleware

pub mod clothing;
