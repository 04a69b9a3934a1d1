//! Ad hoc lookups against the loaded records
//!
//! Queries run against the immutable store (and optionally the finished
//! run report), so no locking is involved.

use crate::booster::RunReport;
use crate::core::set::normalize;
use crate::core::{CardPool, CardRecord, SetInfo};
use crate::loader::RecordStore;
use crate::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// What a lookup query resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupHit<'a> {
    Card(&'a CardRecord),
    Set(&'a SetInfo),
}

/// Find the first crypt card, library card, or set whose name starts with `query`
///
/// Case and accents are ignored; a trailing `*` is accepted and dropped.
pub fn lookup<'a>(store: &'a RecordStore, query: &str) -> Option<LookupHit<'a>> {
    let query = normalize(query.trim().trim_end_matches('*'));
    if query.is_empty() {
        return None;
    }

    for pool in [CardPool::Limited, CardPool::Unlimited] {
        if let Some(card) = store
            .cards(pool)
            .iter()
            .find(|c| normalize(c.name.as_str()).starts_with(&query))
        {
            return Some(LookupHit::Card(card));
        }
    }

    store
        .sets()
        .iter()
        .find(|s| {
            normalize(s.abbrev.as_str()).starts_with(&query) || normalize(&s.full_name).starts_with(&query)
        })
        .map(LookupHit::Set)
}

/// One-line description of a hit, with its bucket when a run report is given
pub fn describe(hit: &LookupHit<'_>, report: Option<&RunReport>) -> String {
    match hit {
        LookupHit::Card(card) => {
            let mut line = format!("{} [{}] {}", card.name, card.pool, card.sets);
            if let Some(report) = report {
                if let Some(classification) = report.classification_of(card.pool, card.name.as_str()) {
                    line.push_str(&format!(" ({classification} in {})", report.set.abbrev));
                }
            }
            line
        }
        LookupHit::Set(set) => format!("Found set by name: {set}"),
    }
}

/// Line-driven lookup prompt; ends at end of input
pub async fn run_prompt<R, W>(
    store: &RecordStore,
    report: Option<&RunReport>,
    input: R,
    mut output: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    output.write_all(b">").await?;
    output.flush().await?;
    while let Some(line) = lines.next_line().await? {
        let query = line.trim();
        if !query.is_empty() {
            let reply = match lookup(store, query) {
                Some(hit) => describe(&hit, report),
                None => format!("Could not find card by name: {query}"),
            };
            output.write_all(reply.as_bytes()).await?;
            output.write_all(b"\n").await?;
        }
        output.write_all(b">").await?;
        output.flush().await?;
    }
    output.write_all(b"\n").await?;
    output.flush().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RecordStore {
        let mut store = RecordStore::new();
        store.add_card(CardRecord::new("Étienne Fauberge", "Jyhad:V", CardPool::Limited));
        store.add_card(CardRecord::new("Lucian(ADV)", "KoT:P", CardPool::Limited));
        store.add_card(CardRecord::new("Deflection", "Jyhad:U, KoT:C", CardPool::Unlimited));
        store.add_set(SetInfo::new("KoT", "Keepers of Tradition"));
        store
    }

    #[test]
    fn test_lookup_prefers_crypt_then_library_then_sets() {
        let store = store();

        match lookup(&store, "etienne") {
            Some(LookupHit::Card(card)) => assert_eq!(card.name.as_str(), "Étienne Fauberge"),
            other => panic!("unexpected hit: {other:?}"),
        }
        match lookup(&store, "DEFL*") {
            Some(LookupHit::Card(card)) => assert_eq!(card.pool, CardPool::Unlimited),
            other => panic!("unexpected hit: {other:?}"),
        }
        match lookup(&store, "keepers") {
            Some(LookupHit::Set(set)) => assert_eq!(set.abbrev.as_str(), "KoT"),
            other => panic!("unexpected hit: {other:?}"),
        }
        assert!(lookup(&store, "zzz").is_none());
        assert!(lookup(&store, "*").is_none());
    }

    #[test]
    fn test_describe_card() {
        let store = store();
        let hit = lookup(&store, "lucian").unwrap();
        assert_eq!(describe(&hit, None), "Lucian(ADV) [Crypt] KoT:P");
    }

    #[tokio::test]
    async fn test_prompt() {
        let store = store();
        let input: &[u8] = b"deflection\n\nnothing here\n";
        let mut output = Vec::new();

        run_prompt(&store, None, input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Deflection [Library] Jyhad:U, KoT:C\n"));
        assert!(text.contains("Could not find card by name: nothing here\n"));
    }
}
