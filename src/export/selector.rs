//! Interactive collection selection
//!
//! Presents the candidate collections with zero-based indices and reads one
//! line of free text from the operator, waiting at most the configured
//! timeout. Selection parsing deliberately fails open: malformed input must
//! never block an export, so anything that does not resolve to at least one
//! valid index falls back to "export everything".

use std::io::Write;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::error::{Result, SelectionError};

use super::lister::CollectionDescriptor;

/// Resolve the operator's choice to an ordered list of collection names.
///
/// An empty candidate list is fatal for the run: there is nothing to export
/// and the caller is expected to terminate with a non-zero exit.
///
/// # Arguments
/// * `candidates` - Non-empty collections discovered by the lister
/// * `timeout` - Bounded wait for the input line; elapsing means "all"
pub async fn select_collections(
    candidates: &[CollectionDescriptor],
    timeout: Duration,
) -> Result<Vec<String>> {
    if candidates.is_empty() {
        return Err(SelectionError::NoCollections.into());
    }

    println!("\n===== COLLECTION EXPORT =====");
    println!("\nAvailable collections:");
    for (index, descriptor) in candidates.iter().enumerate() {
        println!("{index}: {}", descriptor.name);
    }

    print!(
        "\nEnter the indices of the collections to export separated by commas \
         (e.g. 0,1) or press Enter to export all: "
    );
    std::io::stdout().flush()?;

    let raw = read_line_with_timeout(timeout).await?;
    info!("Input received (raw): {:?}, length: {}", raw, raw.len());

    let cleaned = normalize_input(&raw);
    info!("Cleaned input: {:?}, length: {}", cleaned, cleaned.len());

    let selected = parse_selection(&cleaned, candidates);

    println!("\nCollections selected for export:");
    for (position, name) in selected.iter().enumerate() {
        println!("{}. {name}", position + 1);
    }

    Ok(selected)
}

/// Read one line from stdin, racing it against the timeout.
///
/// One await point decides the race: either the line arrives in time, or
/// the timer fires and the pending read is dropped, cancelling its
/// registration. A timeout resolves to the empty string, which downstream
/// parsing treats as "all collections".
async fn read_line_with_timeout(timeout: Duration) -> Result<String> {
    let mut reader = BufReader::new(tokio::io::stdin());
    let mut line = String::new();

    match tokio::time::timeout(timeout, reader.read_line(&mut line)).await {
        Ok(read) => {
            read.map_err(|e| SelectionError::InputFailed(e.to_string()))?;
            Ok(line)
        }
        Err(_elapsed) => {
            info!(
                "No input within {} seconds, defaulting to all collections",
                timeout.as_secs()
            );
            Ok(String::new())
        }
    }
}

/// Strip every whitespace character anywhere in the input.
///
/// Terminals and pipes can smuggle carriage returns, tabs and stray spaces
/// into the middle of the line, not just the ends.
pub fn normalize_input(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parse cleaned input into the ordered list of selected collection names.
///
/// Empty input selects every candidate. Comma-separated fragments are
/// parsed individually; invalid fragments are discarded with a diagnostic
/// and duplicates are kept in the order they were given. When nothing
/// parses, the full candidate list is returned instead of an error.
pub fn parse_selection(cleaned: &str, candidates: &[CollectionDescriptor]) -> Vec<String> {
    if cleaned.is_empty() {
        info!("Empty input detected. ALL collections will be exported.");
        return candidates.iter().map(|d| d.name.clone()).collect();
    }

    let mut valid_indices = Vec::new();

    if cleaned.contains(',') {
        for fragment in cleaned.split(',') {
            if fragment.is_empty() {
                warn!("Discarding empty fragment");
                continue;
            }
            match parse_index(fragment, candidates.len()) {
                Some(index) => {
                    info!("Valid index: {index} = {}", candidates[index].name);
                    valid_indices.push(index);
                }
                None => warn!("Discarding invalid index: {fragment:?}"),
            }
        }
    } else {
        match parse_index(cleaned, candidates.len()) {
            Some(index) => {
                info!("Valid index: {index} = {}", candidates[index].name);
                valid_indices.push(index);
            }
            None => warn!("Discarding invalid index: {cleaned:?}"),
        }
    }

    if valid_indices.is_empty() {
        warn!("No valid indices were found. ALL collections will be exported.");
        return candidates.iter().map(|d| d.name.clone()).collect();
    }

    valid_indices
        .into_iter()
        .map(|index| candidates[index].name.clone())
        .collect()
}

/// Parse one fragment as an index into `[0, count)`.
fn parse_index(fragment: &str, count: usize) -> Option<usize> {
    fragment.parse::<usize>().ok().filter(|&index| index < count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(names: &[&str]) -> Vec<CollectionDescriptor> {
        names
            .iter()
            .map(|name| CollectionDescriptor {
                name: name.to_string(),
                record_count: 1,
            })
            .collect()
    }

    #[test]
    fn test_empty_input_selects_everything_in_order() {
        let list = candidates(&["albums", "artists", "news"]);
        assert_eq!(
            parse_selection("", &list),
            vec!["albums", "artists", "news"]
        );
    }

    #[test]
    fn test_comma_separated_indices_preserve_input_order() {
        let list = candidates(&["albums", "artists", "news"]);
        assert_eq!(parse_selection("0,2", &list), vec!["albums", "news"]);
        assert_eq!(parse_selection("2,0", &list), vec!["news", "albums"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let list = candidates(&["albums", "artists"]);
        assert_eq!(
            parse_selection("1,1,0", &list),
            vec!["artists", "artists", "albums"]
        );
    }

    #[test]
    fn test_invalid_fragments_are_discarded() {
        let list = candidates(&["albums", "artists", "news"]);
        assert_eq!(parse_selection("0,,x,9,2", &list), vec!["albums", "news"]);
    }

    #[test]
    fn test_single_out_of_range_index_fails_open() {
        let list = candidates(&["albums", "artists", "news"]);
        assert_eq!(
            parse_selection("5", &list),
            vec!["albums", "artists", "news"]
        );
    }

    #[test]
    fn test_all_invalid_fragments_fail_open() {
        let list = candidates(&["albums", "artists"]);
        assert_eq!(
            parse_selection("x,7,-1", &list),
            vec!["albums", "artists"]
        );
    }

    #[test]
    fn test_single_valid_index_without_comma() {
        let list = candidates(&["albums", "artists", "news"]);
        assert_eq!(parse_selection("1", &list), vec!["artists"]);
    }

    #[test]
    fn test_normalize_strips_whitespace_everywhere() {
        assert_eq!(normalize_input(" 0 ,\t1\r\n"), "0,1");
        assert_eq!(normalize_input("\u{b}2\u{c} , 3 "), "2,3");
        assert_eq!(normalize_input("\r\n"), "");
    }

    #[tokio::test]
    async fn test_empty_candidates_are_fatal() {
        let result = select_collections(&[], Duration::from_millis(10)).await;
        assert!(result.is_err());
    }
}
