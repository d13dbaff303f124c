pub mod aligner;
pub mod csv;
pub mod validator;

pub use aligner::{AlignedTable, SeriesAligner};
pub use csv::CsvConnector;
pub use validator::SeriesValidator;
