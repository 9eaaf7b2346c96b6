//! Turn a spreadsheet of text rows into an `id,prediction` submission CSV.
//!
//! ```text
//!  input file ──► data::loader ──► Table
//!                                    │
//!                 predict::columns ◄─┘  text column (+ optional label column)
//!                                    │
//!                 predict::predict ──┘  supervised or keyword heuristic
//!                                    │
//!                 data::writer ◄─────┘  id,prediction rows
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod predict;
