pub mod parser;
pub mod show;

pub use parser::{CertificateParser, CertificateSummary};
pub use show::show_certificate_file;
