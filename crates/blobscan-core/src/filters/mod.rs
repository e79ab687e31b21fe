pub mod denoise;
pub mod histogram;
pub mod levels;
