pub mod library;
pub mod storage;
