//! Hero and player operations. Each call runs inside one transaction that
//! commits on success and rolls back when dropped on an error path.

pub mod heroes;
pub mod players;
