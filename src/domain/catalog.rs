//! Built-in career taxonomy, embedded at compile time.

use crate::domain::entities::Taxonomy;
use crate::domain::error::DomainResult;

pub const BUILTIN_TAXONOMY: &str = include_str!("../../data/career_tree.toml");

pub fn builtin_taxonomy() -> DomainResult<Taxonomy> {
    Taxonomy::from_toml_str(BUILTIN_TAXONOMY)
}
