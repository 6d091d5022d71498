pub mod alert;
pub mod raw_entry;
