pub mod password;
pub mod token;

pub use password::*;
pub use token::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Wrong password")]
    WrongPassword,

    #[error("Unrecognized password hash format")]
    HashFormat,
}
