pub mod env_vars;
pub mod versions;
pub use versions::{rewrite_manifest, unversion, write_versions, RewriteMode};
