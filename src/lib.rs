//! Booking normalization and room allocation engine for group-tour sheets.
//!
//! The engine is synchronous and file/network-free: callers hand it a sheet
//! grid snapshot, a package row range, card text and a gender code, and get
//! back normalized bookings, room groupings, and single-row write
//! instructions. Transport (chat, spreadsheet I/O) lives outside.

pub mod aliases;
pub mod allocator;
pub mod card;
pub mod error;
pub mod grid;
pub mod grouper;
pub mod header;
pub mod models;
pub mod payload;
pub mod settings;
pub mod slots;
pub mod text;

pub use aliases::{AliasBook, RoomType};
pub use card::CardParser;
pub use error::{CaravanError, Result};
pub use grid::Grid;
pub use models::{Booking, ColumnMap, ColumnRole, RoomGroup, Slot, WriteInstruction};
