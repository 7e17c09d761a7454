pub mod batches;
pub mod extraction;
pub mod jobs;
pub mod pairing;
pub mod uploads;
