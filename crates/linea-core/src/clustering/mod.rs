pub mod engine;
pub mod outcome;
pub mod sweep;

pub use engine::{cluster, cluster_with, try_cluster, try_cluster_with};
pub use outcome::{Page, Row, RowsError, RowsMetadata, RowsResult};
pub use sweep::{sweep, SweepPoint};
