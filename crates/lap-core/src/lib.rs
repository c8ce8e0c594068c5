pub mod capture;
pub mod color;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod input;
pub mod monitor;
pub mod reconcile;
pub mod scaling;
pub mod scan_loop;
pub mod scanner;
pub mod verify;

#[cfg(test)]
pub(crate) mod testing;
