pub mod uint;

pub use uint::Uint256;
