pub mod cert;
pub mod cli;
pub mod dispatch;
pub mod page;
pub mod storage;
pub mod utils;

// Re-export specific items to avoid conflicts
pub use cert::{CertificateParser, CertificateSummary};
pub use cli::{args, commands};
pub use dispatch::{CertificateRequest, DownloadClient, DownloadService, ExpirationDays};
pub use page::{compose, FragmentSet, Section};
pub use utils::{errors, paths};
