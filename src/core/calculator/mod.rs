pub mod pay;
pub mod projection;
