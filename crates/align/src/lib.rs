pub mod decode;
pub mod drawdown;
pub mod normalizer;
pub mod pipeline;
pub mod snapper;
