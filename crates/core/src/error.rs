use thiserror::Error;

use crate::model::{ParseIdError, ProductError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    InvalidId(#[from] ParseIdError),
    #[error(transparent)]
    Product(#[from] ProductError),
}
