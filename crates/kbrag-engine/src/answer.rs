//! Retrieval-only answer templates.

use tracing::debug;

use kbrag_core::types::{Answer, DocMeta, Document, Hit};

pub const NO_MATCH_ANSWER: &str = "I didn’t find a strong match in the knowledge base.\n\n\
Try:\n\
• using more specific keywords (e.g., “consultation”, “fees”, “custody”, “real estate”)\n\
• adding more rows to the FAQ or business data files";

pub const ANSWER_INTRO: &str = "Here’s what I found in the knowledge base:";

pub const FOLLOW_UP_PROMPT: &str =
    "If you want, tell me which part you want to act on (fees, timeline, practice area, or a specific service).";

pub fn format_answer(query: &str, hits: &[Hit<'_>]) -> Answer {
    debug!(query, hits = hits.len(), "formatting answer");
    if hits.is_empty() {
        return Answer { answer: NO_MATCH_ANSWER.to_string(), sources: Vec::new() };
    }
    let lines: Vec<String> = hits.iter().map(render_line).collect();
    Answer {
        answer: format!("{}\n\n{}\n\n{}", ANSWER_INTRO, lines.join("\n\n"), FOLLOW_UP_PROMPT),
        sources: hits.iter().map(|h| source_label(h.document)).collect(),
    }
}

pub fn render_line(hit: &Hit<'_>) -> String {
    match &hit.document.meta {
        DocMeta::Faq(f) => format!("{}) FAQ: {} — {}", hit.rank, f.topic, f.content),
        DocMeta::Business(b) => format!("{}) {} ({}) — {}", hit.rank, b.name, b.category, b.summary),
        DocMeta::Plain => format!("{}) {}", hit.rank, hit.document.text),
    }
}

pub fn source_label(document: &Document) -> String {
    match &document.meta {
        DocMeta::Faq(f) => format!("FAQ: {}", or_entry(&f.topic)),
        DocMeta::Business(b) => format!("Biz: {}", or_entry(&b.name)),
        DocMeta::Plain => format!("Doc: {}", document.id),
    }
}

fn or_entry(value: &str) -> &str {
    if value.is_empty() { "entry" } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_documents_render_raw_text() {
        let doc = Document::plain("note-1", "Parking is behind the building");
        let hit = Hit { rank: 2, score: 0.5, document: &doc };
        assert_eq!(render_line(&hit), "2) Parking is behind the building");
        assert_eq!(source_label(&doc), "Doc: note-1");
    }
}
