pub mod bruteforce;
pub mod read;
pub mod write;

pub use bruteforce::bruteforce_imei;
pub use read::read_imei;
pub use write::write_imei;
