pub mod scan;
pub mod table;
pub mod write;

pub use scan::ScanCommand;
pub use write::{DeleteCommand, InsertCommand, UpdateCommand};
