use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("personalization is {0} bytes, at most 8 allowed")]
    PersonalizationTooLong(usize),

    #[error("invalid equihash parameters n={n} k={k}")]
    InvalidEquihashParams { n: u32, k: u32 },
}
