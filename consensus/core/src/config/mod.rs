pub mod params;

pub use params::{Params, MAINNET_PARAMS, TESTNET_PARAMS};
