pub mod backup;
pub mod cards;
pub mod games;
pub mod lessons;
pub mod review;
