//! Scoped fetching of every parameter stored under a prefix

use crate::store::{ListRequest, ParameterStore, StoreResult};
use crate::utils::decode_value;
use std::collections::{BTreeMap, HashSet};

pub mod prefix;

pub use prefix::Prefix;

/// Upper bound on pages followed for a single prefix.
pub const MAX_PAGES: usize = 10_000;

/// Fetch all parameters under `prefix`, following continuation tokens.
///
/// Keys in the result have the prefix stripped and values are decoded (trimmed).
/// A later page overwrites an earlier one for the same local key. Store errors
/// are returned as-is; nothing is retried here.
///
/// The loop ends when a page carries no token. A token that was already seen
/// ends it as well, as does reaching [`MAX_PAGES`]; both count as normal
/// completion.
pub fn fetch_by_prefix<S>(store: &S, prefix: &Prefix) -> StoreResult<BTreeMap<String, String>>
where
    S: ParameterStore + ?Sized,
{
    let mut result = BTreeMap::new();
    let mut seen_tokens: HashSet<String> = HashSet::new();
    let mut next_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let request = ListRequest::recursive(prefix.as_str()).with_token(next_token.take());
        let page = store.list_by_prefix(&request)?;
        pages += 1;

        tracing::debug!(
            prefix = %prefix,
            page = pages,
            entries = page.parameters.len(),
            "fetched parameter page"
        );

        for parameter in page.parameters {
            result.insert(prefix.strip(&parameter.name), decode_value(&parameter.value));
        }

        let Some(token) = page.next_token else {
            break;
        };

        if !seen_tokens.insert(token.clone()) {
            tracing::warn!(prefix = %prefix, page = pages, "continuation token repeated; stopping");
            break;
        }
        if pages >= MAX_PAGES {
            tracing::warn!(prefix = %prefix, pages, "page limit reached; stopping");
            break;
        }

        next_token = Some(token);
    }

    tracing::debug!(prefix = %prefix, pages, keys = result.len(), "prefix fetch complete");
    Ok(result)
}
