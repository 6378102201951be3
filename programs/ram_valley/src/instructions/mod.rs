pub mod admin;
pub mod redeem;
pub mod reveal;
pub mod reward;
pub mod round;
pub mod seed;
