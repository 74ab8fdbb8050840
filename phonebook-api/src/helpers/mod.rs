pub mod page;
pub mod storage;
