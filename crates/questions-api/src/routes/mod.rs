//! # API Route Modules
//!
//! | Module | Prefix |
//! |--------|--------|
//! | [`question`] | `/api/v1/question` |

pub mod question;
