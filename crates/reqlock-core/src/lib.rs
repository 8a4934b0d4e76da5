//! reqlock-core: check that generated lock files match their inputs
//!
//! A lock file generator embeds `# SHA1:<hex>` of its input file. This crate
//! recomputes that digest for each environment (input/output pair) and
//! reports outputs that were not regenerated after their input changed.

pub mod comment;
pub mod environment;
pub mod error;
pub mod hash;
pub mod logging;
pub mod verify;
pub mod work_queue;

pub use comment::{HashComment, read_hash_comment};
pub use environment::{DiscoverOptions, Environment, discover, from_inputs};
pub use error::VerifyError;
pub use hash::{HashStrategy, raw_digest, raw_hash, robust_digest, robust_hash, sha1_hex};
pub use logging::init_logging;
pub use verify::{VerificationResult, VerifyReport, check, report, verify, verify_parallel};
pub use work_queue::WorkQueue;
