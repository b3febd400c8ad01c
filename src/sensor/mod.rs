pub mod bme680;
pub mod moisture;
pub mod veml7700;
