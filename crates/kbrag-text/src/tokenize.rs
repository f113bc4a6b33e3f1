use std::char::ToLowercase;
use std::collections::BTreeMap;
use std::str::Chars;

use crate::stopwords::is_stopword;

/// Tokens shorter than this are dropped.
pub const MIN_TERM_LEN: usize = 2;

/// Lazy stream of index terms over borrowed text.
///
/// A clone is an independent cursor at the same position, so a clone taken
/// before iterating replays the same terms.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
	chars: Chars<'a>,
	pending: Option<ToLowercase>,
}

pub fn tokenize(text: &str) -> Tokens<'_> {
	Tokens { chars: text.chars(), pending: None }
}

/// Raw per-term counts for `text`, keyed in term order.
pub fn term_counts(text: &str) -> BTreeMap<String, u32> {
	let mut counts = BTreeMap::new();
	for term in tokenize(text) { *counts.entry(term).or_insert(0) += 1; }
	counts
}

impl Tokens<'_> {
	fn next_lower(&mut self) -> Option<char> {
		loop {
			if let Some(lower) = self.pending.as_mut() {
				if let Some(c) = lower.next() { return Some(c); }
				self.pending = None;
			}
			let c = self.chars.next()?;
			self.pending = Some(c.to_lowercase());
		}
	}
}

impl Iterator for Tokens<'_> {
	type Item = String;

	fn next(&mut self) -> Option<String> {
		loop {
			let mut term = String::new();
			while let Some(c) = self.next_lower() {
				if c.is_ascii_lowercase() || c.is_ascii_digit() { term.push(c); }
				else if !term.is_empty() { break; }
			}
			// Only an exhausted input leaves the term empty.
			if term.is_empty() { return None; }
			if term.len() >= MIN_TERM_LEN && !is_stopword(&term) { return Some(term); }
		}
	}
}
