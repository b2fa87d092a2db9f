//! HTTP surface over [`Node`](crate::Node).
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | GET  | `/health` | `{"status": "ok", "service": ...}` |
//! | POST | `/api/v1/mutant` | 200 mutant, 403 human, 422 bad grid |
//! | GET  | `/api/v1/stats` | `{"count_mutant_dna", "count_human_dna", "ratio"}` |

mod routes;

pub use routes::{create_router, create_router_with_name, ApiError, AppState, DnaRequest, MUTANT_PATH, STATS_PATH};
