//! Walks over the binary label tree.
//!
//! The root is `1`, and every label `l` has the two children `l1` and
//! `l2`. Labels are plain strings, so the searches identify them by
//! their structural hash.

use std::io::{BufRead, BufReader, Read};

use anyhow::{anyhow, Error};
use searcher::{bfs, dfs, SearchOptions, SearchResult};
use thiserror::Error;

pub const ROOT: &str = "1";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid label {0:?}, labels are 1 followed by 1s and 2s")]
pub struct InvalidLabel(String);

/// Check that `label` names a node in the tree.
pub fn validate(label: &str) -> Result<(), InvalidLabel> {
    let mut chars = label.chars();
    if chars.next() == Some('1') && chars.all(|c| c == '1' || c == '2') {
        Ok(())
    } else {
        Err(InvalidLabel(label.to_string()))
    }
}

/// Children of `label`, until labels reach `depth` characters.
pub fn children(depth: usize) -> impl FnMut(&String) -> Vec<String> + Copy {
    move |label: &String| {
        if label.len() < depth {
            vec![format!("{}1", label), format!("{}2", label)]
        } else {
            vec![]
        }
    }
}

/// Labels from just below the root down to `target`.
pub fn descend(target: &str, options: &SearchOptions) -> SearchResult<Option<Vec<String>>> {
    let solution = bfs::build(ROOT.to_string(), children(target.len()))
        .with_options(options.clone())
        .run(|l| l == target)?;
    Ok(solution.map(|s| s.path))
}

/// Position of `target` in a depth first walk of the tree cut at its depth.
pub fn preorder_rank(target: &str) -> Option<usize> {
    dfs::traverse(ROOT.to_string(), children(target.len())).position(|v| v.state == target)
}

/// Every label down to `depth`, in depth first order.
pub fn preorder(depth: usize) -> Vec<String> {
    dfs::traverse(ROOT.to_string(), children(depth))
        .map(|v| v.state)
        .collect()
}

pub fn main(input: Box<dyn Read + 'static>, options: &SearchOptions) -> ::std::result::Result<(), Error> {
    let reader = BufReader::new(input);

    for line in reader.lines() {
        let line = line?;
        let target = line.trim();
        if target.is_empty() {
            continue;
        }
        validate(target)?;

        let path = descend(target, options)?.ok_or_else(|| anyhow!("{} not found", target))?;
        let rank = preorder_rank(target).ok_or_else(|| anyhow!("{} not found", target))?;
        println!("{}: {} ({} before it depth first)", target, path.join(" -> "), rank);
    }

    Ok(())
}
