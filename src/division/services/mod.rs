//! Application services for the division directory.

mod directory;

pub use directory::{
    CreateDivisionRequest, DivisionDirectoryError, DivisionDirectoryResult,
    DivisionDirectoryService,
};
